//! 测试辅助模块
//!
//! 提供测试用服务器与服务上下文的工厂方法。

use std::sync::Arc;

use zone_blueprint_schema::{Location, Server};

use crate::config::CompilerSettings;
use crate::services::{DomainAssembler, ServiceCompiler, ServiceContext};
use crate::traits::InMemoryServerRegistry;

pub const ROOT_DOMAIN: &str = "example.com";

/// 以名称作为前缀的测试服务器，主机名为 `<name>.<location>.example.com`
pub fn test_server(name: &str, location: Location) -> Server {
    Server::new(name, location, name, "203.0.113.10", ROOT_DOMAIN)
}

/// 包含 `atlas`（默认，fsn1）与 `nas`（home）的上下文
pub fn create_test_context() -> Arc<ServiceContext> {
    let registry = InMemoryServerRegistry::from_servers(vec![
        test_server("atlas", Location::Fsn1),
        test_server("nas", Location::Home).with_ddns(true),
    ])
    .unwrap();
    let settings = CompilerSettings::new(ROOT_DOMAIN, "atlas");
    Arc::new(ServiceContext::new(Arc::new(registry), settings).unwrap())
}

pub fn create_test_compiler() -> ServiceCompiler {
    ServiceCompiler::new(create_test_context())
}

pub fn create_test_assembler() -> DomainAssembler {
    DomainAssembler::new(create_test_context())
}
