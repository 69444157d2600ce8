//! action-gate - pre-execution safety gate for coding-agent tool calls
//!
//! Given a proposed action (a shell command, or a file read, write or edit),
//! the gate decides whether to allow it, allow it with warnings, or block it.
//!
//! # Features
//!
//! - **Destructive commands**: dangerous `rm` invocations, disk and firewall wipes
//! - **Privilege escalation**: `sudo`, `su -`, `doas`
//! - **Git safety**: blocks force pushes to protected branches, warns on hard resets
//! - **File protection**: blocks access to `.env`, SSH keys and credential files
//! - **Secret detection**: blocks writes that would leak keys or tokens
//!
//! The gate is pure: no I/O, no state between calls, and errors never turn
//! into an allow.
//!
//! # Example
//!
//! ```
//! use action_gate::{Action, Config, Gate};
//!
//! let gate = Gate::new(&Config::default()).unwrap();
//!
//! let verdict = gate.classify(&Action::shell("rm -rf /")).unwrap();
//! assert!(verdict.is_block());
//!
//! let verdict = gate.classify(&Action::read(".env.example")).unwrap();
//! assert!(verdict.is_allow());
//! ```

pub mod action;
pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;
pub mod rules;

use once_cell::sync::Lazy;

// Re-exports for convenience
pub use action::{Action, ActionKind, ActionRequest};
pub use config::Config;
pub use engine::{Gate, Stage, PIPELINE};
pub use error::{ConfigError, GateError};
pub use input::{HookInput, ToolInput};
pub use output::{GateResponse, HookOutput, Verdict};
pub use rules::{Category, Severity};

static DEFAULT_GATE: Lazy<Result<Gate, GateError>> = Lazy::new(|| Gate::new(&Config::default()));

/// Classify with a process-wide gate using default limits
pub fn classify(action: &Action) -> Result<Verdict, GateError> {
    match Lazy::force(&DEFAULT_GATE) {
        Ok(gate) => gate.classify(action),
        Err(e) => Err(e.clone()),
    }
}

/// Parse a JSON request, classify it and render the response.
/// Malformed requests come back as a block.
pub fn evaluate_json(json: &str) -> GateResponse {
    let verdict = ActionRequest::from_json(json)
        .map_err(|e| GateError::invalid(e.to_string()))
        .and_then(Action::try_from)
        .and_then(|action| classify(&action));

    match verdict {
        Ok(verdict) => GateResponse::from_verdict(&verdict),
        Err(e) => GateResponse::from_error(&e),
    }
}
