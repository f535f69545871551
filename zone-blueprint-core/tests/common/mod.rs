//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::sync::Arc;

use zone_blueprint_core::{BlueprintConfig, ServiceContext};

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {:?}", res.as_ref().err());
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 断言 `Option` 为 `Some`，并解包返回内部值。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 两台服务器的蓝图配置
pub const BLUEPRINT_JSON: &str = r#"{
    "rootDomain": "example.com",
    "defaultServer": "atlas",
    "tunnelTarget": "gw.example.com",
    "servers": [
        { "name": "atlas", "location": "fsn1", "prefix": "atlas", "ipv4": "203.0.113.10", "ipv6": "2001:db8::10" },
        { "name": "nas", "location": "home", "prefix": "nas", "ipv4": "198.51.100.7", "isDdns": true }
    ]
}"#;

/// 一个域名：核心记录、两个服务分类、Fastmail 邮件
pub const DOMAIN_JSON: &str = r#"{
    "config": {
        "name": "example.com",
        "registrar": "none",
        "dnsProvider": "cloudflare",
        "defaultTtl": "1h",
        "ignorePatterns": ["_acme-challenge"]
    },
    "records": [
        { "name": "@", "data": { "type": "A", "content": { "address": "203.0.113.10" } } },
        { "name": "@", "data": { "type": "CAA", "content": { "flags": 0, "tag": "issue", "value": "letsencrypt.org" } } }
    ],
    "categories": [
        {
            "name": "infrastructure",
            "services": [
                { "subdomain": "git", "routing": "direct" },
                { "subdomain": "vault", "routing": "tunnel", "ttl": "5m" }
            ]
        },
        {
            "name": "home",
            "services": [
                { "subdomain": "files", "server": "nas", "routing": "direct", "proxy": "off" },
                { "subdomain": "router", "routing": "internal" }
            ]
        }
    ],
    "mail": { "provider": "fastmail", "options": { "domain": "example.com", "includeWildcard": false } }
}"#;

/// 由 `BLUEPRINT_JSON` 构建服务上下文
pub fn build_context() -> Option<Arc<ServiceContext>> {
    let config = BlueprintConfig::from_json_str(BLUEPRINT_JSON).ok()?;
    config.build().ok().map(Arc::new)
}
