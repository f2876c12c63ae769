//! One-line summaries: tool invocations, tool results and token usage

use std::borrow::Cow;

use serde_json::Value;

use crate::models::{ToolResult, ToolUse, Usage, value_text};

const PROMPT_PREVIEW_CHARS: usize = 100;
const INPUT_PREVIEW_CHARS: usize = 100;
const RESULT_PREVIEW_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

/// What a tool-result line shows
#[derive(Debug, Clone, PartialEq)]
pub enum ResultContent<'a> {
    /// Rendered quoted, with an ellipsis when cut
    Text(Cow<'a, str>),
    /// Rendered unquoted as compact JSON
    Raw(&'a Value),
}

impl<'a> ResultContent<'a> {
    /// Content of a `tool_result` block: a string, or the text of nested text blocks
    pub fn from_block(block: &'a ToolResult) -> Self {
        match &block.content {
            Value::String(text) => Self::Text(Cow::Borrowed(text.as_str())),
            Value::Null => Self::Text(Cow::Borrowed("")),
            Value::Array(items) => {
                let texts: Vec<&str> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(text) => Some(text.as_str()),
                        Value::Object(block) => block.get("text").and_then(Value::as_str),
                        _ => None,
                    })
                    .collect();
                if texts.is_empty() {
                    Self::Raw(&block.content)
                } else {
                    Self::Text(Cow::Owned(texts.join(" ")))
                }
            }
            other => Self::Raw(other),
        }
    }
}

/// `**Bash:** \`ls -la\``
pub fn format_tool_use(tool: &ToolUse) -> String {
    let name = tool.name.as_deref().unwrap_or("Unknown");

    let detail = match tool.input.as_object() {
        Some(input) if input.contains_key("command") => {
            format!("`{}`", value_text(&input["command"]))
        }
        Some(input) if input.contains_key("query") => {
            format!("\"{}\"", value_text(&input["query"]))
        }
        Some(input) if input.contains_key("prompt") => {
            let prompt = value_text(&input["prompt"]);
            let (head, truncated) = truncate_chars(&prompt, PROMPT_PREVIEW_CHARS);
            format!("\"{}{}\"", head, if truncated { ELLIPSIS } else { "" })
        }
        _ if tool.input.is_null() => "{}".to_string(),
        _ => truncate_chars(&value_text(&tool.input), INPUT_PREVIEW_CHARS).0.to_string(),
    };

    format!("**{}:** {}", name, detail)
}

/// `→ "output"`
pub fn format_tool_result(content: &ResultContent<'_>) -> String {
    match content {
        ResultContent::Text(text) => {
            let (head, truncated) = truncate_chars(text, RESULT_PREVIEW_CHARS);
            format!("→ \"{}{}\"", head, if truncated { ELLIPSIS } else { "" })
        }
        ResultContent::Raw(value) => {
            let text = value.to_string();
            format!("→ {}", truncate_chars(&text, RESULT_PREVIEW_CHARS).0)
        }
    }
}

/// `100 in → 50 out (cache: +10 created, 20 read)`
pub fn format_tokens(usage: &Usage) -> String {
    let mut result = format!(
        "{} in → {} out",
        usage.input_tokens.unwrap_or(0),
        usage.output_tokens.unwrap_or(0)
    );

    let mut cache_parts = Vec::new();
    if let Some(created) = usage.cache_creation_input_tokens.filter(|n| *n > 0) {
        cache_parts.push(format!("+{} created", created));
    }
    if let Some(read) = usage.cache_read_input_tokens.filter(|n| *n > 0) {
        cache_parts.push(format!("{} read", read));
    }
    if !cache_parts.is_empty() {
        result.push_str(&format!(" (cache: {})", cache_parts.join(", ")));
    }

    result
}

/// First `max_chars` characters of `text`, and whether anything was cut
fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (&text[..byte_index], true),
        None => (text, false),
    }
}
