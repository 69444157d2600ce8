//! Error types for action-gate
//!
//! The gate never turns an error into an allow decision. Callers must treat
//! any `GateError` the same way they treat a block.

use thiserror::Error;

/// Errors raised by the gate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// The action is missing a field its kind requires, or carries one it must not
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// A static rule pattern failed to compile
    #[error("rule {rule} has an invalid pattern: {detail}")]
    PatternCompile { rule: &'static str, detail: String },
}

impl GateError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        GateError::InvalidAction(message.into())
    }
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
