//! 服务编译器
//!
//! 将服务定义（子域名 + 路由策略 + 可选覆盖）编译为具体的 DNS 记录。

use std::sync::Arc;

use zone_blueprint_schema::{
    validate_service, ProxyOption, RecordOperation, RoutingStrategy, ServiceCategory,
    ServiceDefinition,
};

use crate::builders::{create_a_record, create_cname_record, RecordOptions};
use crate::error::{CoreError, CoreResult};
use crate::services::{lenient_ttl, ServiceContext};

/// 服务编译器
pub struct ServiceCompiler {
    ctx: Arc<ServiceContext>,
}

impl ServiceCompiler {
    /// 创建编译器实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 编译单个服务
    ///
    /// 每个服务恰好生成一条记录。覆盖优先级：`ip` > `cname` > 路由策略。
    /// `internal` 路由始终关闭代理；其余情况未指定时默认开启。
    pub fn service_to_records(
        &self,
        service: &ServiceDefinition,
    ) -> CoreResult<Vec<RecordOperation>> {
        let result = validate_service(service)?;
        if !result.success {
            return Err(CoreError::InvalidService {
                subdomain: service.subdomain.clone(),
                message: result.error_messages().join("; "),
            });
        }
        let service = result.into_data().unwrap_or_else(|| service.clone());

        // 服务器引用总是解析，未知服务器视为配置错误
        let server = self.ctx.resolve_server(service.server.as_deref())?;
        let settings = &self.ctx.settings;

        let proxy = if service.routing == RoutingStrategy::Internal {
            ProxyOption::Off
        } else {
            service.proxy.unwrap_or(ProxyOption::On)
        };
        let mut options = RecordOptions::new().with_proxy(proxy);
        if let Some(ttl) = service.ttl.as_ref().and_then(lenient_ttl) {
            options = options.with_ttl(ttl);
        }

        let name = service.subdomain.as_str();
        let record = if let Some(ip) = &service.ip {
            create_a_record(name, ip, options)
        } else if let Some(cname) = &service.cname {
            create_cname_record(name, cname, options)
        } else {
            match service.routing {
                RoutingStrategy::Direct | RoutingStrategy::Proxied => {
                    create_cname_record(name, &server.hostname, options)
                }
                RoutingStrategy::Tunnel => {
                    create_cname_record(name, &settings.tunnel_target, options)
                }
                RoutingStrategy::Internal => {
                    create_a_record(name, &settings.internal_ip, options)
                }
            }
        };
        Ok(vec![record])
    }

    /// 按声明顺序编译分类下的全部服务
    ///
    /// 严格模式不抛错时，校验失败的服务被跳过并以 `error` 级别记录。
    pub fn category_to_records(
        &self,
        category: &ServiceCategory,
    ) -> CoreResult<Vec<RecordOperation>> {
        if category.services.is_empty() {
            log::warn!("Category '{}' has no services", category.name);
        }

        let mut records = Vec::with_capacity(category.services.len());
        for service in &category.services {
            match self.service_to_records(service) {
                Ok(compiled) => records.extend(compiled),
                Err(CoreError::InvalidService { subdomain, message }) => {
                    log::error!(
                        "Skipping service '{subdomain}' in category '{}': {message}",
                        category.name
                    );
                }
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "Compiled {} records from category '{}'",
            records.len(),
            category.name
        );
        Ok(records)
    }

    /// 按列表顺序展开多个分类，不去重
    pub fn categories_to_records(
        &self,
        categories: &[ServiceCategory],
    ) -> CoreResult<Vec<RecordOperation>> {
        let mut records = Vec::new();
        for category in categories {
            records.extend(self.category_to_records(category)?);
        }
        Ok(records)
    }
}
