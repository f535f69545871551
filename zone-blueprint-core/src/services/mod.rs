//! 业务逻辑服务层

mod domain_assembler;
pub mod mail;
mod service_compiler;

pub use domain_assembler::{AssembledDomain, DomainAssembler, DomainBlueprint};
pub use mail::mail_records;
pub use service_compiler::ServiceCompiler;

use std::sync::Arc;

use zone_blueprint_schema::{validators, Server, Ttl, ValidationResult};

use crate::config::CompilerSettings;
use crate::error::{CoreError, CoreResult};
use crate::traits::ServerRegistry;

/// 服务上下文 - 持有所有依赖
///
/// 由 `BlueprintConfig::build` 创建，或在调用方自行注入服务器注册表实现。
pub struct ServiceContext {
    /// 服务器注册表
    pub server_registry: Arc<dyn ServerRegistry>,
    /// 编译器固定参数（根域名、默认服务器、隧道与内网地址）
    pub settings: CompilerSettings,
}

impl ServiceContext {
    /// 创建服务上下文
    ///
    /// 默认服务器必须存在于注册表中。
    pub fn new(
        server_registry: Arc<dyn ServerRegistry>,
        settings: CompilerSettings,
    ) -> CoreResult<Self> {
        if server_registry.get(&settings.default_server).is_none() {
            return Err(CoreError::UnknownServer(settings.default_server));
        }
        Ok(Self {
            server_registry,
            settings,
        })
    }

    /// 解析服务器引用，未指定时使用默认服务器
    pub fn resolve_server(&self, name: Option<&str>) -> CoreResult<&Server> {
        let name = name.unwrap_or(&self.settings.default_server);
        self.server_registry
            .get(name)
            .ok_or_else(|| CoreError::UnknownServer(name.to_string()))
    }
}

/// 取出通过校验的数据
///
/// 严格模式且不抛错时校验失败返回 `None`，并以 `error` 级别记录。
pub(crate) fn accepted<T>(result: ValidationResult<T>, context: &str) -> Option<T> {
    if result.success {
        return result.into_data();
    }
    log::error!(
        "Skipping {context}: {}",
        result.error_messages().join("; ")
    );
    None
}

/// 宽松的 TTL 转换
///
/// warn 模式下可能收到未规范化的值：无法换算的文本丢弃，越界的整数秒原样保留。
pub(crate) fn lenient_ttl(ttl: &Ttl) -> Option<u32> {
    validators::ttl(ttl).ok().or(match ttl {
        Ttl::Seconds(s) => u32::try_from(*s).ok(),
        _ => None,
    })
}
