use serde_json::Value;

use super::record::{ContentBlock, RawBlock, RawContent, ToolResult, ToolUse};

/// Borrowed view of a message's content split into channels.
///
/// Order is preserved within each channel; the interleaving between channels is not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentBundle<'a> {
    pub text: Vec<&'a str>,
    pub thinking: Vec<&'a str>,
    pub tool_uses: Vec<&'a ToolUse>,
    pub tool_results: Vec<&'a ToolResult>,
}

impl<'a> ContentBundle<'a> {
    pub fn extract(content: Option<&'a RawContent>) -> Self {
        let mut bundle = Self::default();

        match content {
            None => {}
            Some(RawContent::Text(text)) => bundle.text.push(text),
            Some(RawContent::Blocks(blocks)) => {
                for block in blocks {
                    match block {
                        RawBlock::Typed(ContentBlock::Text { text }) => bundle.text.push(text),
                        RawBlock::Typed(ContentBlock::Thinking { thinking }) => {
                            bundle.thinking.push(thinking)
                        }
                        RawBlock::Typed(ContentBlock::ToolUse(tool)) => bundle.tool_uses.push(tool),
                        RawBlock::Typed(ContentBlock::ToolResult(result)) => {
                            bundle.tool_results.push(result)
                        }
                        RawBlock::Text(text) => bundle.text.push(text),
                        RawBlock::Typed(ContentBlock::Unknown) | RawBlock::Other(_) => {}
                    }
                }
            }
        }

        bundle
    }

    /// Narrative fragments joined with single spaces
    pub fn joined_text(&self) -> String {
        self.text.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.thinking.is_empty()
            && self.tool_uses.is_empty()
            && self.tool_results.is_empty()
    }
}

/// Strings render as-is; anything else as compact JSON
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
