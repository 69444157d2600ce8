//! Configuration loading for action-gate
//!
//! Supports TOML configuration with embedded defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            audit_log: true,
            audit_path: Some("~/.config/action-gate/audit.jsonl".to_string()),
        }
    }
}

/// Bounds on how much text the gate inspects
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Longest write/edit content scanned, in bytes. Commands and paths are
    /// always scanned in full.
    pub max_scan_bytes: usize,

    /// Longest excerpt quoted in a block reason, in chars
    pub max_excerpt_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_scan_bytes: 1024 * 1024,
            max_excerpt_chars: 80,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration from the first standard location that parses,
    /// or use defaults
    pub fn load() -> Self {
        let config_paths = [
            // User-specific config
            dirs::home_dir().map(|p| p.join(".config/action-gate/config.toml")),
            // System-wide config
            Some(PathBuf::from("/etc/action-gate/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return config,
                    Err(e) => eprintln!("Warning: {}", e),
                }
            }
        }

        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get the audit log path (expanded), if auditing is on
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        self.general.audit_path.as_deref().map(Self::expand_path)
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
audit_log = true
audit_path = "~/.config/action-gate/audit.jsonl"

[limits]
max_scan_bytes = 1048576
max_excerpt_chars = 80
"#;
