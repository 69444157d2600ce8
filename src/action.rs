//! Actions submitted to the gate
//!
//! `ActionRequest` is the loosely shaped wire form; `Action` is the validated,
//! closed set of variants the classifier works on. Converting one into the
//! other is where missing or misplaced fields become `InvalidAction`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GateError;

/// The kind of operation being proposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Shell,
    Read,
    Write,
    Edit,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Shell => "shell",
            ActionKind::Read => "read",
            ActionKind::Write => "write",
            ActionKind::Edit => "edit",
        }
    }

    /// File operations carry a target path
    pub fn is_file_op(self) -> bool {
        !matches!(self, ActionKind::Shell)
    }

    /// Writes and edits carry new content
    pub fn writes_content(self) -> bool {
        matches!(self, ActionKind::Write | ActionKind::Edit)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ActionRequest {
    pub kind: ActionKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_preview: Option<String>,
}

impl ActionRequest {
    /// Parse a request from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A validated action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShellCommand { command: String },
    FileRead { path: String },
    FileWrite { path: String, content: String },
    FileEdit { path: String, content: String },
}

impl Action {
    pub fn shell(command: impl Into<String>) -> Self {
        Action::ShellCommand {
            command: command.into(),
        }
    }

    pub fn read(path: impl Into<String>) -> Self {
        Action::FileRead { path: path.into() }
    }

    pub fn write(path: impl Into<String>, content: impl Into<String>) -> Self {
        Action::FileWrite {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn edit(path: impl Into<String>, content: impl Into<String>) -> Self {
        Action::FileEdit {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::ShellCommand { .. } => ActionKind::Shell,
            Action::FileRead { .. } => ActionKind::Read,
            Action::FileWrite { .. } => ActionKind::Write,
            Action::FileEdit { .. } => ActionKind::Edit,
        }
    }

    pub fn command(&self) -> Option<&str> {
        match self {
            Action::ShellCommand { command } => Some(command),
            _ => None,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Action::ShellCommand { .. } => None,
            Action::FileRead { path }
            | Action::FileWrite { path, .. }
            | Action::FileEdit { path, .. } => Some(path),
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Action::FileWrite { content, .. } | Action::FileEdit { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Check the invariants a hand-built action could still violate
    pub fn validate(&self) -> Result<(), GateError> {
        match self {
            Action::ShellCommand { command } if command.trim().is_empty() => {
                Err(GateError::invalid("shell command is empty"))
            }
            _ => match self.path() {
                Some(path) if path.trim().is_empty() => {
                    Err(GateError::invalid(format!("{} target path is empty", self.kind())))
                }
                _ => Ok(()),
            },
        }
    }

    /// Short description for logs
    pub fn summary(&self) -> String {
        match self {
            Action::ShellCommand { command } => {
                let truncated: String = command.chars().take(100).collect();
                if truncated.len() < command.len() {
                    format!("shell: {}...", truncated)
                } else {
                    format!("shell: {}", command)
                }
            }
            Action::FileRead { path } => format!("read: {}", path),
            Action::FileWrite { path, .. } => format!("write: {}", path),
            Action::FileEdit { path, .. } => format!("edit: {}", path),
        }
    }
}

impl TryFrom<ActionRequest> for Action {
    type Error = GateError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        let kind = request.kind;

        if kind.is_file_op() && request.command_text.is_some() {
            return Err(GateError::invalid(format!(
                "commandText is not allowed for {kind} actions"
            )));
        }
        if kind == ActionKind::Shell && request.target_path.is_some() {
            return Err(GateError::invalid("targetPath is not allowed for shell actions"));
        }
        if !kind.writes_content() && request.content_preview.is_some() {
            return Err(GateError::invalid(format!(
                "contentPreview is not allowed for {kind} actions"
            )));
        }

        let required = |field: Option<String>, name: &str| {
            field.ok_or_else(|| GateError::invalid(format!("{kind} action requires {name}")))
        };

        let action = match kind {
            ActionKind::Shell => Action::ShellCommand {
                command: required(request.command_text, "commandText")?,
            },
            ActionKind::Read => Action::FileRead {
                path: required(request.target_path, "targetPath")?,
            },
            ActionKind::Write => Action::FileWrite {
                path: required(request.target_path, "targetPath")?,
                content: required(request.content_preview, "contentPreview")?,
            },
            ActionKind::Edit => Action::FileEdit {
                path: required(request.target_path, "targetPath")?,
                content: required(request.content_preview, "contentPreview")?,
            },
        };

        action.validate()?;
        Ok(action)
    }
}

impl From<&Action> for ActionRequest {
    fn from(action: &Action) -> Self {
        ActionRequest {
            kind: action.kind(),
            command_text: action.command().map(String::from),
            target_path: action.path().map(String::from),
            content_preview: action.content().map(String::from),
        }
    }
}
