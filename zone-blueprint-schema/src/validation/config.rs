//! Validation configuration and its scoped overrides.
//!
//! Scopes form a stack per thread. A synchronous scope
//! ([`with_validation_config`], [`ValidationScope`]) stays on the stack
//! until it returns; an asynchronous scope ([`with_validation_config_async`])
//! is pushed for each poll of its future and popped before the poll returns.
//! Whichever scope was entered last is therefore on top, regardless of
//! whether it is sync or async.
//!
//! The effective configuration is resolved from the top of the stack down:
//!
//! - a mode scope ([`with_validation_mode`]) overrides only the mode;
//! - a config scope ([`with_validation_config`]) pins every field;
//! - below the last config scope sit the process-wide defaults
//!   ([`set_validation_config`]), read at the time of the call.
//!
//! Scopes never touch the process-wide defaults, so concurrent scopes on
//! other threads or tasks do not observe each other.

use std::cell::RefCell;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::{LazyLock, PoisonError, RwLock};
use std::task::{Context, Poll};

use serde::{Deserialize, Serialize};

use super::logger::{SharedLogger, default_logger};

/// How validation failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Failures are errors.
    #[default]
    Strict,
    /// Failures are logged; the original value is passed on.
    Warn,
    /// Nothing is checked.
    Disabled,
}

impl ValidationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Warn => "warn",
            Self::Disabled => "disabled",
        }
    }
}

impl std::fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationConfig {
    #[serde(default)]
    pub mode: ValidationMode,
    /// In strict mode, return `Err` rather than a failed result.
    #[serde(default = "default_true")]
    pub throw_on_error: bool,
    /// In warn mode, pass failures to the logger.
    #[serde(default = "default_true")]
    pub log_warnings: bool,
    #[serde(skip, default = "default_logger")]
    pub logger: SharedLogger,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Strict,
            throw_on_error: true,
            log_warnings: true,
            logger: default_logger(),
        }
    }
}

impl ValidationConfig {
    #[must_use]
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_throw_on_error(mut self, throw_on_error: bool) -> Self {
        self.throw_on_error = throw_on_error;
        self
    }

    #[must_use]
    pub fn with_log_warnings(mut self, log_warnings: bool) -> Self {
        self.log_warnings = log_warnings;
        self
    }

    #[must_use]
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }
}

/// Partial update merged into the process-wide defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationConfigUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ValidationMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throw_on_error: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_warnings: Option<bool>,
    #[serde(skip)]
    pub logger: Option<SharedLogger>,
}

impl ValidationConfigUpdate {
    pub fn mode(mode: ValidationMode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn apply_to(self, config: &mut ValidationConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(throw_on_error) = self.throw_on_error {
            config.throw_on_error = throw_on_error;
        }
        if let Some(log_warnings) = self.log_warnings {
            config.log_warnings = log_warnings;
        }
        if let Some(logger) = self.logger {
            config.logger = logger;
        }
    }
}

static DEFAULTS: LazyLock<RwLock<ValidationConfig>> =
    LazyLock::new(|| RwLock::new(ValidationConfig::default()));

#[derive(Debug, Clone)]
enum Layer {
    Mode(ValidationMode),
    Config(ValidationConfig),
}

thread_local! {
    static SCOPES: RefCell<Vec<Layer>> = const { RefCell::new(Vec::new()) };
}

fn defaults() -> ValidationConfig {
    DEFAULTS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn resolve(layers: &[Layer]) -> ValidationConfig {
    let mut mode = None;
    for layer in layers.iter().rev() {
        match layer {
            Layer::Mode(m) => {
                mode.get_or_insert(*m);
            }
            Layer::Config(config) => {
                let config = config.clone();
                return match mode {
                    Some(mode) => config.with_mode(mode),
                    None => config,
                };
            }
        }
    }
    let config = defaults();
    match mode {
        Some(mode) => config.with_mode(mode),
        None => config,
    }
}

/// The configuration in effect for the caller.
pub fn get_validation_config() -> ValidationConfig {
    SCOPES
        .try_with(|scopes| resolve(&scopes.borrow()))
        .unwrap_or_else(|_| defaults())
}

/// Merges `update` into the process-wide defaults.
///
/// Active config scopes keep their own configuration. Active mode scopes
/// keep their mode but see the other fields change.
pub fn set_validation_config(update: ValidationConfigUpdate) {
    let mut defaults = DEFAULTS.write().unwrap_or_else(PoisonError::into_inner);
    update.apply_to(&mut defaults);
    log::debug!(
        "Validation defaults updated: mode={}, throw_on_error={}, log_warnings={}",
        defaults.mode,
        defaults.throw_on_error,
        defaults.log_warnings
    );
}

/// Restores the built-in defaults.
pub fn reset_validation_config() {
    *DEFAULTS.write().unwrap_or_else(PoisonError::into_inner) = ValidationConfig::default();
}

/// Synchronous override for the current thread, undone on drop.
///
/// Dropping a guard also ends every scope entered after it, so guards bound
/// to nested lexical scopes unwind in LIFO order. The guard is not `Send`.
#[must_use = "the override ends as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ValidationScope {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl ValidationScope {
    /// Pins every field to `config`.
    pub fn enter(config: ValidationConfig) -> Self {
        Self::push(Layer::Config(config))
    }

    /// Overrides the mode only.
    pub fn enter_mode(mode: ValidationMode) -> Self {
        Self::push(Layer::Mode(mode))
    }

    fn push(layer: Layer) -> Self {
        let depth = SCOPES
            .try_with(|scopes| {
                let mut scopes = scopes.borrow_mut();
                let depth = scopes.len();
                scopes.push(layer);
                depth
            })
            .unwrap_or(0);
        Self {
            depth,
            _not_send: PhantomData,
        }
    }
}

impl Drop for ValidationScope {
    fn drop(&mut self) {
        // Fails only during thread teardown, when nothing can observe the stack.
        let _ = SCOPES.try_with(|scopes| scopes.borrow_mut().truncate(self.depth));
    }
}

/// Runs `f` with the mode overridden; other settings are inherited.
pub fn with_validation_mode<R>(mode: ValidationMode, f: impl FnOnce() -> R) -> R {
    let _scope = ValidationScope::enter_mode(mode);
    f()
}

/// Runs `f` with `config` in effect. The previous configuration is restored
/// when `f` returns or unwinds.
pub fn with_validation_config<R>(config: ValidationConfig, f: impl FnOnce() -> R) -> R {
    let _scope = ValidationScope::enter(config);
    f()
}

/// Future that re-enters its layer around every poll of the inner future.
struct Scoped<F> {
    layer: Layer,
    inner: Pin<Box<F>>,
}

impl<F: Future> Future for Scoped<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let _scope = ValidationScope::push(this.layer.clone());
        this.inner.as_mut().poll(cx)
    }
}

/// Runs `fut` with the mode overridden for every poll of that future.
pub async fn with_validation_mode_async<F: Future>(mode: ValidationMode, fut: F) -> F::Output {
    Scoped {
        layer: Layer::Mode(mode),
        inner: Box::pin(fut),
    }
    .await
}

/// Runs `fut` with `config` in effect. Dropping the returned future ends the
/// scope.
pub async fn with_validation_config_async<F: Future>(config: ValidationConfig, fut: F) -> F::Output {
    Scoped {
        layer: Layer::Config(config),
        inner: Box::pin(fut),
    }
    .await
}
