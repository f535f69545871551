//! 共享测试工具和辅助函数

#![allow(dead_code)]

use zone_blueprint_schema::{
    Location, RecordData, RecordOperation, RoutingStrategy, Server, ServiceDefinition,
};

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
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
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Err`，并解包返回错误值。
#[macro_export]
macro_rules! require_err {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_err(), "expected Err(..), got {res:?}");
        let Err(err) = res else {
            return;
        };
        err
    }};
}

pub const ROOT_DOMAIN: &str = "example.com";

/// 合法的服务器
pub fn valid_server() -> Server {
    Server::new("atlas", Location::Fsn1, "atlas", "203.0.113.10", ROOT_DOMAIN)
}

/// IPv4 非法的服务器
pub fn invalid_server() -> Server {
    Server::new("atlas", Location::Fsn1, "atlas", "203.0.113.300", ROOT_DOMAIN)
}

/// 子域名非法的服务
pub fn invalid_service() -> ServiceDefinition {
    ServiceDefinition::new("not a label", RoutingStrategy::Direct)
}

pub fn a_record(name: &str, address: &str) -> RecordOperation {
    RecordOperation::new(
        name,
        RecordData::A {
            address: address.to_string(),
        },
    )
}
