use serde_json::Value;

use super::content::{ContentBundle, value_text};
use super::record::{MessageLine, RawContent, Usage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// A model transition observed on an assistant message.
///
/// `from` is `None` when the message is the first one to declare a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelChange {
    pub from: Option<String>,
    pub to: String,
}

/// Out-of-band tool output attached to a message (`toolUseResult`)
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResultPayload {
    /// Shell-style result carrying captured standard output
    Stdout(String),
    /// Todo list replacement; holds the number of items in the new list
    TodoUpdate(usize),
    /// Bare string payload, usually an error message
    Text(String),
    Other(Value),
}

impl ToolResultPayload {
    /// Classifies a raw payload. Empty payloads (null, `""`, `{}`, `[]`) yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(Self::Text(text)),
            Value::Array(items) if items.is_empty() => None,
            Value::Object(map) if map.is_empty() => None,
            Value::Object(map) => {
                if let Some(stdout) = map.get("stdout") {
                    return Some(Self::Stdout(value_text(stdout)));
                }
                if let Some(todos) = map.get("newTodos") {
                    return Some(Self::TodoUpdate(todos.as_array().map_or(0, Vec::len)));
                }
                Some(Self::Other(Value::Object(map)))
            }
            other => Some(Self::Other(other)),
        }
    }
}

/// A user or assistant message, in the order it appeared in the log
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub uuid: Option<String>,
    pub parent_uuid: Option<String>,
    pub timestamp: Option<String>,
    pub is_sidechain: bool,
    pub session_id: Option<String>,
    pub cwd: Option<String>,
    pub version: Option<String>,
    pub request_id: Option<String>,
    pub content: Option<RawContent>,
    /// Declared model; only kept for assistant messages
    pub model: Option<String>,
    pub usage: Option<Usage>,
    pub tool_use_result: Option<ToolResultPayload>,
    /// Set by the indexer when this message switched the tracked model
    pub model_change: Option<ModelChange>,
}

impl Message {
    pub fn from_line(role: Role, line: MessageLine) -> Self {
        let body = line.message;
        let model = match role {
            Role::Assistant => non_empty(body.model),
            Role::User => None,
        };

        Self {
            role,
            uuid: non_empty(line.uuid),
            parent_uuid: non_empty(line.parent_uuid),
            timestamp: non_empty(line.timestamp),
            is_sidechain: line.is_sidechain,
            session_id: non_empty(line.session_id),
            cwd: non_empty(line.cwd),
            version: non_empty(line.version),
            request_id: non_empty(line.request_id),
            content: body.content,
            model,
            usage: body.usage.filter(|usage| !usage.is_empty()),
            tool_use_result: line.tool_use_result.and_then(ToolResultPayload::from_value),
            model_change: None,
        }
    }

    /// Splits the raw content into text, thinking, tool-use and tool-result channels
    pub fn content(&self) -> ContentBundle<'_> {
        ContentBundle::extract(self.content.as_ref())
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
