//! 校验模式作用域测试（同步、异步、嵌套、并发、panic 恢复）
//!
//! 这些测试只使用作用域覆盖，不修改进程级默认配置。

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

mod common;

use std::time::Duration;

use common::{invalid_server, invalid_service, valid_server};
use zone_blueprint_schema::{
    MemoryLogger, ValidationConfig, ValidationMode, ValidationScope, get_validation_config,
    validate_server, validate_service, with_validation_config, with_validation_config_async,
    with_validation_mode, with_validation_mode_async,
};

// ============ 同步作用域 ============

#[test]
fn test_default_mode_is_strict() {
    let config = get_validation_config();
    assert_eq!(config.mode, ValidationMode::Strict);
    assert!(config.throw_on_error);
    assert!(config.log_warnings);
}

#[test]
fn test_scope_restores_after_return() {
    let value = with_validation_mode(ValidationMode::Disabled, || {
        assert_eq!(get_validation_config().mode, ValidationMode::Disabled);
        42
    });
    assert_eq!(value, 42);
    assert_eq!(get_validation_config().mode, ValidationMode::Strict);
}

#[test]
fn test_scope_restores_after_panic() {
    let res = std::panic::catch_unwind(|| {
        with_validation_mode(ValidationMode::Disabled, || {
            panic!("boom");
        })
    });
    assert!(res.is_err());
    assert_eq!(get_validation_config().mode, ValidationMode::Strict);
}

#[test]
fn test_nested_sync_scopes_lifo() {
    let mut seen = Vec::new();
    with_validation_mode(ValidationMode::Warn, || {
        seen.push(get_validation_config().mode);
        with_validation_mode(ValidationMode::Disabled, || {
            seen.push(get_validation_config().mode);
            with_validation_mode(ValidationMode::Strict, || {
                seen.push(get_validation_config().mode);
            });
            seen.push(get_validation_config().mode);
        });
        seen.push(get_validation_config().mode);
    });
    seen.push(get_validation_config().mode);

    assert_eq!(
        seen,
        vec![
            ValidationMode::Warn,
            ValidationMode::Disabled,
            ValidationMode::Strict,
            ValidationMode::Disabled,
            ValidationMode::Warn,
            ValidationMode::Strict,
        ]
    );
}

#[test]
fn test_explicit_guard() {
    {
        let _scope = ValidationScope::enter(
            ValidationConfig::default().with_mode(ValidationMode::Warn),
        );
        assert_eq!(get_validation_config().mode, ValidationMode::Warn);
    }
    assert_eq!(get_validation_config().mode, ValidationMode::Strict);
}

#[test]
fn test_scope_is_per_thread() {
    with_validation_mode(ValidationMode::Disabled, || {
        let other = std::thread::spawn(|| get_validation_config().mode)
            .join()
            .unwrap();
        assert_eq!(other, ValidationMode::Strict);
        assert_eq!(get_validation_config().mode, ValidationMode::Disabled);
    });
}

#[test]
fn test_mode_changes_outcome() {
    let server = invalid_server();

    let strict = with_validation_mode(ValidationMode::Strict, || validate_server(&server));
    let err = require_err!(strict);
    assert_eq!(err.context(), "server:atlas");

    let warn = with_validation_mode(ValidationMode::Warn, || validate_server(&server));
    let result = require_ok!(warn);
    assert!(result.success);
    assert_eq!(result.data, Some(server.clone()));
    assert!(!result.error_messages().is_empty());

    let disabled = with_validation_mode(ValidationMode::Disabled, || validate_server(&server));
    let result = require_ok!(disabled);
    assert!(result.success);
    assert!(result.errors.is_none());
}

#[test]
fn test_valid_input_passes_in_every_mode() {
    let server = valid_server();
    for mode in [
        ValidationMode::Strict,
        ValidationMode::Warn,
        ValidationMode::Disabled,
    ] {
        let res = with_validation_mode(mode, || validate_server(&server));
        let result = require_ok!(res, "mode {mode}");
        assert_eq!(result.data, Some(server.clone()));
    }
}

// ============ 异步作用域 ============

#[tokio::test]
async fn test_async_scope_applies_and_restores() {
    let mode = with_validation_mode_async(ValidationMode::Warn, async {
        tokio::task::yield_now().await;
        get_validation_config().mode
    })
    .await;
    assert_eq!(mode, ValidationMode::Warn);
    assert_eq!(get_validation_config().mode, ValidationMode::Strict);
}

#[tokio::test]
async fn test_nested_async_scopes() {
    let seen = with_validation_mode_async(ValidationMode::Warn, async {
        let outer = get_validation_config().mode;
        let inner = with_validation_mode_async(ValidationMode::Disabled, async {
            tokio::task::yield_now().await;
            get_validation_config().mode
        })
        .await;
        let after = get_validation_config().mode;
        (outer, inner, after)
    })
    .await;

    assert_eq!(
        seen,
        (
            ValidationMode::Warn,
            ValidationMode::Disabled,
            ValidationMode::Warn
        )
    );
}

#[tokio::test]
async fn test_concurrent_async_scopes_are_isolated() {
    let warn = with_validation_mode_async(ValidationMode::Warn, async {
        let before = get_validation_config().mode;
        tokio::time::sleep(Duration::from_millis(20)).await;
        (before, get_validation_config().mode)
    });
    let disabled = with_validation_mode_async(ValidationMode::Disabled, async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        let before = get_validation_config().mode;
        tokio::time::sleep(Duration::from_millis(30)).await;
        (before, get_validation_config().mode)
    });

    let (warn_seen, disabled_seen) = futures::join!(warn, disabled);
    assert_eq!(warn_seen, (ValidationMode::Warn, ValidationMode::Warn));
    assert_eq!(
        disabled_seen,
        (ValidationMode::Disabled, ValidationMode::Disabled)
    );
    assert_eq!(get_validation_config().mode, ValidationMode::Strict);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_scopes_in_spawned_tasks() {
    let service = invalid_service();

    let strict = {
        let service = service.clone();
        tokio::spawn(with_validation_mode_async(ValidationMode::Strict, async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            validate_service(&service).is_err()
        }))
    };
    let tolerant = {
        let service = service.clone();
        tokio::spawn(with_validation_mode_async(ValidationMode::Warn, async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            validate_service(&service).is_ok()
        }))
    };

    assert!(strict.await.unwrap());
    assert!(tolerant.await.unwrap());
}

#[tokio::test]
async fn test_spawned_task_does_not_inherit_scope() {
    let mode = with_validation_mode_async(ValidationMode::Disabled, async {
        tokio::spawn(async { get_validation_config().mode })
            .await
            .unwrap()
    })
    .await;
    assert_eq!(mode, ValidationMode::Strict);
}

#[tokio::test]
async fn test_cancelled_scope_ends() {
    let pending = with_validation_mode_async(ValidationMode::Disabled, async {
        tokio::time::sleep(Duration::from_secs(60)).await;
    });
    let res = tokio::time::timeout(Duration::from_millis(10), pending).await;
    assert!(res.is_err());
    assert_eq!(get_validation_config().mode, ValidationMode::Strict);
}

#[tokio::test]
async fn test_sync_scope_inside_async_scope() {
    let seen = with_validation_mode_async(ValidationMode::Warn, async {
        let inner = with_validation_mode(ValidationMode::Disabled, || get_validation_config().mode);
        (inner, get_validation_config().mode)
    })
    .await;
    assert_eq!(seen, (ValidationMode::Disabled, ValidationMode::Warn));
}

#[test]
fn test_async_scope_inside_sync_scope() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    let seen = with_validation_mode(ValidationMode::Warn, || {
        let inner = rt.block_on(with_validation_mode_async(ValidationMode::Disabled, async {
            let before = get_validation_config().mode;
            tokio::time::sleep(Duration::from_millis(5)).await;
            (before, get_validation_config().mode)
        }));
        (inner, get_validation_config().mode)
    });
    assert_eq!(
        seen,
        (
            (ValidationMode::Disabled, ValidationMode::Disabled),
            ValidationMode::Warn
        )
    );
    assert_eq!(get_validation_config().mode, ValidationMode::Strict);
}

#[test]
fn test_sync_async_sync_nesting_is_lifo() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    let seen = with_validation_mode(ValidationMode::Warn, || {
        rt.block_on(with_validation_mode_async(ValidationMode::Disabled, async {
            let inner = with_validation_mode(ValidationMode::Strict, || get_validation_config().mode);
            (inner, get_validation_config().mode)
        }))
    });
    assert_eq!(seen, (ValidationMode::Strict, ValidationMode::Disabled));
}

#[test]
fn test_async_config_scope_inside_sync_scope_uses_its_logger() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let logger = MemoryLogger::new();
    let config = ValidationConfig::default()
        .with_mode(ValidationMode::Warn)
        .with_logger(logger.clone());

    let res = with_validation_mode(ValidationMode::Strict, || {
        rt.block_on(with_validation_config_async(config, async {
            validate_server(&invalid_server())
        }))
    });
    let result = require_ok!(res);
    assert!(result.success);
    assert_eq!(logger.len(), 1);
}

#[tokio::test]
async fn test_async_warn_uses_scoped_logger() {
    let logger = MemoryLogger::new();
    let config = ValidationConfig::default()
        .with_mode(ValidationMode::Warn)
        .with_logger(logger.clone());

    let res = with_validation_config_async(config, async { validate_service(&invalid_service()) }).await;
    let result = require_ok!(res);
    assert!(result.success);

    let entries = logger.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].1.as_deref(), Some("service:not a label"));
    assert!(entries[0].0.contains("subdomain"));
}

#[test]
fn test_sync_config_scope_with_custom_logger() {
    let logger = MemoryLogger::new();
    let config = ValidationConfig::default()
        .with_mode(ValidationMode::Warn)
        .with_logger(logger.clone());
    with_validation_config(config, || {
        let _ = validate_server(&invalid_server());
        let _ = validate_server(&valid_server());
    });
    assert_eq!(logger.len(), 1);
}
