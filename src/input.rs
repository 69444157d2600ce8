//! Input parsing for agent hook JSON payloads
//!
//! Claude Code sends `{"tool_name": "Bash", "tool_input": {...}}`; OpenCode
//! sends `{"tool": "bash", "args": {...}}`. Both are mapped onto an
//! [`ActionRequest`] so the gate sees a single shape.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::action::{ActionKind, ActionRequest};
use crate::error::GateError;

/// Hook payload from an agent
#[derive(Debug, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash", "Read", "Edit", "Write")
    #[serde(alias = "tool")]
    pub tool_name: String,

    /// Tool-specific input parameters
    #[serde(default, alias = "args", alias = "input")]
    pub tool_input: Value,

    #[serde(default, alias = "sessionID", alias = "sessionId")]
    pub session_id: Option<String>,
}

/// Tool invocations the gate understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInput {
    Bash { command: String },
    Read { file_path: String },
    Write { file_path: String, content: String },
    /// Edit and MultiEdit; `new_content` is every replacement string
    Edit { file_path: String, new_content: String },
    /// Not an action the gate inspects
    Unknown,
}

fn string_field(obj: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| obj.get(*name).and_then(Value::as_str))
        .map(String::from)
}

fn require(value: Option<String>, tool: &str, what: &str) -> Result<String, GateError> {
    value.ok_or_else(|| GateError::invalid(format!("{tool} hook input has no {what}")))
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Interpret the tool input for the named tool.
    ///
    /// A known tool with a missing field is an error, not a pass-through.
    pub fn tool(&self) -> Result<ToolInput, GateError> {
        let tool = self.tool_name.to_ascii_lowercase();
        let empty = Map::new();
        let obj = self.tool_input.as_object().unwrap_or(&empty);
        let path = || string_field(obj, &["file_path", "filePath", "path"]);

        let input = match tool.as_str() {
            "bash" | "shell" => ToolInput::Bash {
                command: require(string_field(obj, &["command"]), &tool, "command")?,
            },
            "read" => ToolInput::Read {
                file_path: require(path(), &tool, "file path")?,
            },
            "write" => ToolInput::Write {
                file_path: require(path(), &tool, "file path")?,
                content: require(string_field(obj, &["content"]), &tool, "content")?,
            },
            "edit" => ToolInput::Edit {
                file_path: require(path(), &tool, "file path")?,
                new_content: require(
                    string_field(obj, &["new_string", "newString"]),
                    &tool,
                    "new string",
                )?,
            },
            "multiedit" => {
                let edits = obj
                    .get("edits")
                    .and_then(Value::as_array)
                    .ok_or_else(|| GateError::invalid("multiedit hook input has no edits"))?;
                let new_content = edits
                    .iter()
                    .filter_map(Value::as_object)
                    .filter_map(|edit| string_field(edit, &["new_string", "newString"]))
                    .collect::<Vec<_>>()
                    .join("\n");
                ToolInput::Edit {
                    file_path: require(path(), &tool, "file path")?,
                    new_content,
                }
            }
            _ => ToolInput::Unknown,
        };

        Ok(input)
    }

    /// The gate request for this hook call, or `None` for tools the gate
    /// does not inspect
    pub fn to_request(&self) -> Result<Option<ActionRequest>, GateError> {
        let request = |kind, command_text, target_path, content_preview| ActionRequest {
            kind,
            command_text,
            target_path,
            content_preview,
        };

        Ok(match self.tool()? {
            ToolInput::Bash { command } => Some(request(ActionKind::Shell, Some(command), None, None)),
            ToolInput::Read { file_path } => Some(request(ActionKind::Read, None, Some(file_path), None)),
            ToolInput::Write { file_path, content } => {
                Some(request(ActionKind::Write, None, Some(file_path), Some(content)))
            }
            ToolInput::Edit {
                file_path,
                new_content,
            } => Some(request(ActionKind::Edit, None, Some(file_path), Some(new_content))),
            ToolInput::Unknown => None,
        })
    }
}
