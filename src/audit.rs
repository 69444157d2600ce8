//! JSONL audit logging for the action-gate host
//!
//! Records every decision to a JSONL file. The gate itself never logs; the
//! binary wraps `classify` with an [`AuditLogger`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::action::Action;
use crate::engine::Gate;
use crate::error::GateError;
use crate::output::Verdict;

/// Log level for audit entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Allowed,
    Blocked,
    Warn,
    Error,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    /// ALLOWED, BLOCKED, WARN (allowed with warnings) or ERROR
    pub level: LogLevel,

    /// Action kind, or "unknown" when the request never became an action
    pub kind: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Summary of the input with secrets redacted
    pub input_summary: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuditEntry {
    /// Create an entry for a classified action
    pub fn new(gate: &Gate, action: &Action, verdict: &Verdict, session_id: Option<&str>) -> Self {
        let level = match verdict {
            Verdict::Block { .. } => LogLevel::Blocked,
            Verdict::Allow { warnings } if !warnings.is_empty() => LogLevel::Warn,
            Verdict::Allow { .. } => LogLevel::Allowed,
        };

        Self {
            timestamp: Utc::now(),
            level,
            kind: action.kind().to_string(),
            rule_id: verdict.rule_id().map(String::from),
            category: verdict.category().map(|c| c.as_str().to_string()),
            input_summary: gate.redact(&action.summary()),
            reason: verdict.reason().map(String::from),
            warnings: verdict.warnings().to_vec(),
            session_id: session_id.map(String::from),
        }
    }

    /// Create an entry for a request that could not be classified
    pub fn error(err: &GateError, session_id: Option<&str>) -> Self {
        Self {
            timestamp: Utc::now(),
            level: LogLevel::Error,
            kind: "unknown".to_string(),
            rule_id: None,
            category: None,
            input_summary: String::new(),
            reason: Some(err.to_string()),
            warnings: Vec::new(),
            session_id: session_id.map(String::from),
        }
    }
}

/// Audit logger
#[derive(Default)]
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Open the log for appending; a log that cannot be opened disables auditing
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            if let Some(parent) = p.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .ok()
                .map(BufWriter::new)
        });

        Self { writer }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Log a decision
    pub fn log_verdict(
        &mut self,
        gate: &Gate,
        action: &Action,
        verdict: &Verdict,
        session_id: Option<&str>,
    ) -> Result<(), std::io::Error> {
        self.log(&AuditEntry::new(gate, action, verdict, session_id))
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}
