//! Verdicts and their response formats
//!
//! A [`Verdict`] is what the gate decides. [`GateResponse`] is the plain
//! request/response contract; [`HookOutput`] is the shape agent hooks expect.

use serde::Serialize;

use crate::error::GateError;
use crate::rules::Category;

/// Decision result from the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Let the action run, possibly with warnings
    Allow { warnings: Vec<String> },

    /// Refuse the action
    Block {
        category: Category,
        rule_id: String,
        reason: String,
        warnings: Vec<String>,
    },
}

impl Verdict {
    pub fn allow(warnings: Vec<String>) -> Self {
        Verdict::Allow { warnings }
    }

    pub fn block(
        category: Category,
        rule_id: impl Into<String>,
        reason: impl Into<String>,
        warnings: Vec<String>,
    ) -> Self {
        Verdict::Block {
            category,
            rule_id: rule_id.into(),
            reason: reason.into(),
            warnings,
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Verdict::Allow { .. })
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Verdict::Block { .. })
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            Verdict::Allow { warnings } | Verdict::Block { warnings, .. } => warnings,
        }
    }

    /// The blocking reason, if blocked
    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Allow { .. } => None,
            Verdict::Block { reason, .. } => Some(reason),
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Verdict::Allow { .. } => None,
            Verdict::Block { category, .. } => Some(*category),
        }
    }

    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Verdict::Allow { .. } => None,
            Verdict::Block { rule_id, .. } => Some(rule_id),
        }
    }
}

/// Response contract: `{"decision":"allow","warnings":[..]}` or
/// `{"decision":"block","reason":".."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum GateResponse {
    Allow {
        warnings: Vec<String>,
    },
    Block {
        reason: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
    },
}

impl GateResponse {
    pub fn from_verdict(verdict: &Verdict) -> Self {
        match verdict {
            Verdict::Allow { warnings } => GateResponse::Allow {
                warnings: warnings.clone(),
            },
            Verdict::Block {
                reason, warnings, ..
            } => GateResponse::Block {
                reason: reason.clone(),
                warnings: warnings.clone(),
            },
        }
    }

    /// Evaluation failures are answered with a block
    pub fn from_error(err: &GateError) -> Self {
        GateResponse::Block {
            reason: format!("Blocked (evaluation failed): {}", err),
            warnings: Vec::new(),
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, GateResponse::Block { .. })
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"decision":"block","reason":"Blocked (evaluation failed)"}"#.to_string())
    }
}

/// Output structure for agent PreToolUse hooks
#[derive(Debug, Serialize)]
pub struct HookOutput {
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,

    /// Message shown to the user
    #[serde(rename = "systemMessage", skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HookSpecificOutput {
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,

    /// "allow" or "deny"
    #[serde(rename = "permissionDecision")]
    pub permission_decision: String,

    #[serde(rename = "permissionDecisionReason", skip_serializing_if = "Option::is_none")]
    pub permission_decision_reason: Option<String>,
}

impl HookOutput {
    /// Empty output means allow
    pub fn allow() -> Self {
        HookOutput {
            hook_specific_output: None,
            system_message: None,
        }
    }

    /// Allow, but show the warnings
    pub fn warn(warnings: &[String]) -> Self {
        HookOutput {
            hook_specific_output: None,
            system_message: Some(format!("[action-gate] Warning: {}", warnings.join("; "))),
        }
    }

    pub fn deny(rule_id: &str, reason: &str) -> Self {
        HookOutput {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: "PreToolUse".to_string(),
                permission_decision: "deny".to_string(),
                permission_decision_reason: Some(reason.to_string()),
            }),
            system_message: Some(format!("[action-gate:{}] {}", rule_id, reason)),
        }
    }

    pub fn from_verdict(verdict: &Verdict) -> Self {
        match verdict {
            Verdict::Allow { warnings } if warnings.is_empty() => HookOutput::allow(),
            Verdict::Allow { warnings } => HookOutput::warn(warnings),
            Verdict::Block {
                rule_id, reason, ..
            } => HookOutput::deny(rule_id, reason),
        }
    }

    pub fn from_error(err: &GateError) -> Self {
        HookOutput::deny("error", &format!("Blocked (evaluation failed): {}", err))
    }

    /// The reason to report on stderr when the hook blocks. Hosts that act
    /// on exit code 2 read stderr, not the JSON on stdout.
    pub fn deny_reason(&self) -> Option<&str> {
        self.hook_specific_output
            .as_ref()
            .filter(|specific| specific.permission_decision == "deny")
            .and_then(|specific| specific.permission_decision_reason.as_deref())
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
