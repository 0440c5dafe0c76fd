// ABOUTME: Logging configuration and structured logging setup built on tracing
// ABOUTME: Host applications call init once at startup; the engine only emits events
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use crate::errors::{EngineError, EngineResult};
use std::env;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON lines for production aggregation
    Json,
    /// Human-readable output for development
    Pretty,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Read `RUST_LOG` and `LOG_FORMAT` from the environment
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned());
        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        Self { level, format }
    }

    /// Install the global subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Internal`] when a global subscriber is
    /// already installed.
    pub fn init(&self) -> EngineResult<()> {
        let filter = EnvFilter::try_new(&self.level)
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let registry = tracing_subscriber::registry().with(filter);
        let result = match self.format {
            LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
            LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
        };
        result.map_err(|e| EngineError::Internal(format!("logging already initialized: {e}")))
    }
}

/// Initialize logging from the environment
///
/// # Errors
///
/// Returns [`EngineError::Internal`] when a global subscriber is already
/// installed.
pub fn init_from_env() -> EngineResult<()> {
    LoggingConfig::from_env().init()
}
