//! Raw shapes of conversation log lines as they appear on disk.
//!
//! Every field is optional and decoded leniently: a value of the wrong type is treated
//! the same as a missing one, so a single odd field never costs the whole line.

use serde::Deserialize;
use serde_json::Value;

use crate::parsers::deserializers::lenient;

/// Fields shared by `user` and `assistant` lines
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageLine {
    #[serde(deserialize_with = "lenient")]
    pub uuid: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub parent_uuid: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub is_sidechain: bool,
    #[serde(deserialize_with = "lenient")]
    pub session_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub cwd: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub request_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub message: MessageBody,
    pub tool_use_result: Option<Value>,
}

/// The nested `message` object
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageBody {
    #[serde(deserialize_with = "lenient")]
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub usage: Option<Usage>,
    #[serde(deserialize_with = "lenient")]
    pub content: Option<RawContent>,
}

/// Token accounting reported on assistant messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Usage {
    #[serde(deserialize_with = "lenient")]
    pub input_tokens: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub output_tokens: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub cache_creation_input_tokens: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub cache_read_input_tokens: Option<u64>,
}

impl Usage {
    /// True when the usage object carried no recognizable counts
    pub fn is_empty(&self) -> bool {
        self.input_tokens.is_none()
            && self.output_tokens.is_none()
            && self.cache_creation_input_tokens.is_none()
            && self.cache_read_input_tokens.is_none()
    }
}

/// `message.content` is either a plain string or a list of blocks
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawContent {
    Text(String),
    Blocks(Vec<RawBlock>),
}

/// One element of a content list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawBlock {
    Typed(ContentBlock),
    Text(String),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default, deserialize_with = "lenient")]
        text: String,
    },
    Thinking {
        #[serde(default, deserialize_with = "lenient")]
        thinking: String,
    },
    ToolUse(ToolUse),
    ToolResult(ToolResult),
    #[serde(other)]
    Unknown,
}

/// A `tool_use` block: the assistant invoking a tool
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToolUse {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    pub input: Value,
}

/// A `tool_result` block: the output handed back for an earlier `tool_use`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToolResult {
    #[serde(deserialize_with = "lenient")]
    pub tool_use_id: Option<String>,
    pub content: Value,
    #[serde(deserialize_with = "lenient")]
    pub is_error: Option<bool>,
}
