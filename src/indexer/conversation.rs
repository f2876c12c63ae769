//! Run-scoped conversation state.
//!
//! A [`Conversation`] is built once per conversion by feeding it records in file
//! order. It owns every message for the lifetime of the run; turns, sidechain groups
//! and content bundles are borrowed views over it.

use std::collections::HashMap;

use tracing::debug;

use super::turns::{SidechainIndex, Turn, segment_turns};
use crate::models::{Message, ModelChange, ToolResult};
use crate::parsers::record::Record;

const DEFAULT_TITLE: &str = "Conversation";

/// A skipped input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

/// The `tool_result` block answering a given `tool_use`, with the message carrying it
#[derive(Debug, Clone, Copy)]
pub struct ToolResultMatch<'a> {
    pub message: &'a Message,
    pub block: &'a ToolResult,
}

#[derive(Debug, Default)]
pub struct Conversation {
    /// Summary lines in file order; the first one titles the document
    pub summaries: Vec<String>,
    pub messages: Vec<Message>,
    /// First non-empty session id seen on any message
    pub session_id: Option<String>,
    /// First non-empty working directory seen on any message
    pub working_dir: Option<String>,
    /// First non-empty timestamp seen on any message
    pub start_time: Option<String>,
    /// Most recent model declared by an assistant message
    pub current_model: Option<String>,
    pub warnings: Vec<ParseWarning>,
    /// tool_use id -> index of the message holding its tool_result
    tool_results: HashMap<String, usize>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest(&mut self, record: Record) {
        match record {
            Record::Summary(text) => self.summaries.push(text),
            Record::Message(message) => self.push_message(message),
            Record::Ignored => {}
        }
    }

    pub fn record_warning(&mut self, line: usize, message: impl Into<String>) {
        self.warnings.push(ParseWarning { line, message: message.into() });
    }

    fn push_message(&mut self, mut message: Message) {
        if self.session_id.is_none() {
            self.session_id = message.session_id.clone();
        }
        if self.working_dir.is_none() {
            self.working_dir = message.cwd.clone();
        }
        if self.start_time.is_none() {
            self.start_time = message.timestamp.clone();
        }

        if message.is_assistant()
            && let Some(model) = &message.model
            && self.current_model.as_ref() != Some(model)
        {
            debug!("Model switched from {:?} to {}", self.current_model, model);
            message.model_change =
                Some(ModelChange { from: self.current_model.clone(), to: model.clone() });
            self.current_model = Some(model.clone());
        }

        let index = self.messages.len();
        for block in message.content().tool_results {
            if let Some(id) = &block.tool_use_id {
                self.tool_results.entry(id.clone()).or_insert(index);
            }
        }

        self.messages.push(message);
    }

    /// Document title: the first summary, or a generic label
    pub fn title(&self) -> &str {
        self.summaries.first().map(String::as_str).unwrap_or(DEFAULT_TITLE)
    }

    /// Non-sidechain messages grouped into turns
    pub fn turns(&self) -> Vec<Turn<'_>> {
        segment_turns(&self.messages)
    }

    pub fn sidechains(&self) -> SidechainIndex<'_> {
        SidechainIndex::build(&self.messages)
    }

    /// Find the result block answering the tool invocation with this id
    pub fn tool_result(&self, tool_use_id: &str) -> Option<ToolResultMatch<'_>> {
        let message = self.messages.get(*self.tool_results.get(tool_use_id)?)?;
        let block = message
            .content()
            .tool_results
            .into_iter()
            .find(|block| block.tool_use_id.as_deref() == Some(tool_use_id))?;
        Some(ToolResultMatch { message, block })
    }

    /// Joined text of the first user message that has any
    pub fn first_user_text(&self) -> Option<String> {
        self.messages
            .iter()
            .filter(|message| message.is_user())
            .map(Message::content)
            .find(|content| !content.text.is_empty())
            .map(|content| content.joined_text())
    }
}
