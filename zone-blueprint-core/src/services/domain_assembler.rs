//! 域名组装服务
//!
//! 汇总一个域名的全部记录：核心记录、服务分类编译结果、邮件模板，按此顺序排列，
//! 并附加域级修饰（默认 TTL、忽略名称）。

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zone_blueprint_schema::{
    format_errors, schemas, validate_domain_config, validate_mail_provider, validate_record,
    DomainConfig, MailProvider, RecordInput, RecordOperation, ServiceCategory,
    Subject, ValidationError, APEX,
};

use crate::error::{CoreError, CoreResult};
use crate::services::mail::mail_records;
use crate::services::{accepted, lenient_ttl, ServiceCompiler, ServiceContext};
use crate::traits::{DnsEngine, DomainModifier};

/// 一个域名的声明式描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainBlueprint {
    pub config: DomainConfig,
    /// 手写的核心记录
    #[serde(default)]
    pub records: Vec<RecordOperation>,
    #[serde(default)]
    pub categories: Vec<ServiceCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail: Option<MailProvider>,
}

impl DomainBlueprint {
    pub fn new(config: DomainConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
            categories: Vec::new(),
            mail: None,
        }
    }

    #[must_use]
    pub fn with_record(mut self, record: RecordOperation) -> Self {
        self.records.push(record);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: ServiceCategory) -> Self {
        self.categories.push(category);
        self
    }

    #[must_use]
    pub fn with_mail(mut self, mail: MailProvider) -> Self {
        self.mail = Some(mail);
        self
    }

    /// 添加一条松散格式的记录，缺省类型按字段推断
    pub fn push_input(&mut self, input: &RecordInput) -> CoreResult<()> {
        match schemas::record_input(input) {
            Ok(op) => {
                self.records.push(op);
                Ok(())
            }
            Err(errors) => {
                let name = input.name.as_deref().unwrap_or(APEX);
                Err(ValidationError::new(
                    Subject::config(format!("record.{name}")),
                    format_errors(&errors),
                )
                .into())
            }
        }
    }
}

/// 组装结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledDomain {
    pub config: DomainConfig,
    pub records: Vec<RecordOperation>,
    pub modifiers: Vec<DomainModifier>,
}

impl AssembledDomain {
    /// 规范 JSON 形式的 SHA-256 指纹（十六进制）
    ///
    /// 相同输入总是得到相同指纹，用于比较两次组装的输出。
    pub fn digest(&self) -> CoreResult<String> {
        let canonical = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&canonical)))
    }
}

/// 域名组装服务
pub struct DomainAssembler {
    compiler: ServiceCompiler,
}

impl DomainAssembler {
    /// 创建组装服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            compiler: ServiceCompiler::new(ctx),
        }
    }

    /// 组装域名
    ///
    /// 域名配置无效时失败；单条记录、服务或邮件配置在严格模式不抛错时被跳过。
    /// 服务只由编译器校验一次，编译产物不再逐条校验。
    pub fn assemble(&self, blueprint: &DomainBlueprint) -> CoreResult<AssembledDomain> {
        let result = validate_domain_config(&blueprint.config)?;
        if !result.success {
            return Err(CoreError::ConfigError(format!(
                "Invalid domain config '{}': {}",
                blueprint.config.name,
                result.error_messages().join("; ")
            )));
        }
        let config = result
            .into_data()
            .unwrap_or_else(|| blueprint.config.clone());

        let mut records = Vec::new();
        let mut rejected = Self::accept_records(&blueprint.records, &mut records)?;

        records.extend(self.compiler.categories_to_records(&blueprint.categories)?);

        if let Some(mail) = &blueprint.mail {
            let context = format!("mail provider '{}'", mail.key());
            if let Some(mail) = accepted(validate_mail_provider(mail)?, &context) {
                rejected += Self::accept_records(&mail_records(&mail), &mut records)?;
            }
        }

        let mut modifiers = Vec::new();
        if let Some(ttl) = config.default_ttl.as_ref().and_then(lenient_ttl) {
            modifiers.push(DomainModifier::DefaultTtl(ttl));
        }
        modifiers.extend(
            config
                .ignore_patterns
                .iter()
                .cloned()
                .map(DomainModifier::IgnoreName),
        );

        if rejected > 0 {
            log::warn!("Domain {}: {rejected} records rejected", config.name);
        }
        log::info!("Assembled domain {} with {} records", config.name, records.len());

        Ok(AssembledDomain {
            config,
            records,
            modifiers,
        })
    }

    /// 逐条校验并追加到 `out`，返回被拒绝的条数
    fn accept_records(
        candidates: &[RecordOperation],
        out: &mut Vec<RecordOperation>,
    ) -> CoreResult<usize> {
        let mut rejected = 0;
        for op in candidates {
            let context = format!("{} record '{}'", op.record_type(), op.name);
            match accepted(validate_record(op)?, &context) {
                Some(op) => out.push(op),
                None => rejected += 1,
            }
        }
        Ok(rejected)
    }

    /// 组装并交给 DNS 引擎
    ///
    /// 依次调用 `new_registrar`、`new_dns_provider`、每条记录的构造函数，最后调用 `domain`。
    pub fn register<E: DnsEngine>(
        &self,
        engine: &E,
        blueprint: &DomainBlueprint,
    ) -> CoreResult<E::Domain> {
        let assembled = self.assemble(blueprint)?;
        let registrar = engine.new_registrar(&assembled.config.registrar);
        let provider = engine.new_dns_provider(&assembled.config.dns_provider);
        let records = assembled
            .records
            .iter()
            .map(|op| engine.record(op))
            .collect();
        Ok(engine.domain(
            &assembled.config.name,
            &registrar,
            &provider,
            records,
            &assembled.modifiers,
        ))
    }
}
