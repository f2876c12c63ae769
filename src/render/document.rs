use std::borrow::Cow;

use tracing::debug;

use super::format::{ResultContent, format_tokens, format_tool_result, format_tool_use};
use super::timestamps::{format_date, format_time_of_day};
use crate::indexer::{Conversation, SidechainIndex, Turn};
use crate::models::{Message, ToolResultPayload, ToolUse};

/// Tool names whose invocation spawns a sidechain conversation
const DELEGATING_TOOLS: &[&str] = &["Task", "Agent"];

const AGENT_START: &str = "╭─ AGENT START ─────────────────────────────────────";
const AGENT_SEPARATOR: &str = "├─────────────────────────────────────────────────";
const AGENT_END: &str = "╰─ AGENT END ───────────────────────────────────────";

/// Render the whole conversation as a Markdown document
pub fn render_markdown(conversation: &Conversation) -> String {
    MarkdownRenderer::new(conversation).render()
}

struct MarkdownRenderer<'a> {
    conversation: &'a Conversation,
    sidechains: SidechainIndex<'a>,
}

impl<'a> MarkdownRenderer<'a> {
    fn new(conversation: &'a Conversation) -> Self {
        Self { conversation, sidechains: conversation.sidechains() }
    }

    fn render(&self) -> String {
        let mut lines = Vec::new();

        self.render_header(&mut lines);

        let turns = self.conversation.turns();
        debug!(
            "Rendering {} turns with {} sidechain groups",
            turns.len(),
            self.sidechains.group_count()
        );
        for (index, turn) in turns.iter().enumerate() {
            self.render_turn(&mut lines, index + 1, turn);
        }

        lines.join("\n")
    }

    fn render_header(&self, lines: &mut Vec<String>) {
        let conversation = self.conversation;

        lines.push(format!("# {}", conversation.title()));
        lines.push(String::new());
        lines.push("## Thread Header".to_string());

        for (index, summary) in conversation.summaries.iter().enumerate() {
            lines.push(format!("**Summary {}:** {}", index + 1, summary));
        }
        if let Some(start) = &conversation.start_time {
            lines.push(format!("**Date:** {}", format_date(start)));
        }
        if let Some(model) = &conversation.current_model {
            lines.push(format!("**Model:** {}", model));
        }
        if let Some(cwd) = &conversation.working_dir {
            lines.push(format!("**Working Directory:** {}", cwd));
        }
        if let Some(session_id) = &conversation.session_id {
            lines.push(format!("**Session ID:** {}", session_id));
        }

        push_rule(lines);
    }

    fn render_turn(&self, lines: &mut Vec<String>, number: usize, turn: &Turn<'a>) {
        lines.push(format!("## Message Turn {}", number));

        if let Some(timestamp) = turn.first().and_then(|message| message.timestamp.as_deref()) {
            lines.push(format!("**Time:** {}", format_time_of_day(timestamp)));
        }
        if let Some(usage) = turn.usage() {
            lines.push(format!("**Tokens:** {}", format_tokens(usage)));
        }
        lines.push(String::new());

        for &message in &turn.messages {
            self.render_message(lines, message);
        }

        lines.push("---".to_string());
        lines.push(String::new());
    }

    fn render_message(&self, lines: &mut Vec<String>, message: &'a Message) {
        if let Some(change) = &message.model_change
            && let Some(from) = &change.from
        {
            lines.push(format!("**Model changed:** {} → {}", from, change.to));
            lines.push(String::new());
        }

        let content = message.content();

        if message.is_user() {
            if !content.text.is_empty() {
                lines.push("**User:**".to_string());
                lines.push(content.joined_text());
                lines.push(String::new());
            }
            return;
        }

        if !content.thinking.is_empty() {
            lines.push("**Thinking:**".to_string());
            lines.extend(content.thinking.iter().map(|fragment| fragment.to_string()));
            lines.push(String::new());
        }

        if !content.tool_uses.is_empty() {
            lines.push("**Tools:**".to_string());
            for tool in &content.tool_uses {
                self.render_tool(lines, message, tool);
            }
            lines.push(String::new());
        }

        if !content.text.is_empty() {
            lines.push("**Assistant:**".to_string());
            lines.push(content.joined_text());
            lines.push(String::new());
        }
    }

    fn render_tool(&self, lines: &mut Vec<String>, message: &'a Message, tool: &ToolUse) {
        let summary = format_tool_use(tool);

        if is_delegating(tool) {
            let agent_messages = message
                .uuid
                .as_deref()
                .map(|uuid| self.sidechains.messages_for(uuid))
                .unwrap_or_default();

            lines.push(format!("- {}", summary));
            if !agent_messages.is_empty() {
                lines.push(String::new());
                render_agent_session(lines, agent_messages);
                lines.push(String::new());
            }
            return;
        }

        match self.result_content(message, tool) {
            Some(result) => lines.push(format!("- {} {}", summary, format_tool_result(&result))),
            None => lines.push(format!("- {}", summary)),
        }
    }

    /// Result shown next to an invocation: the assistant message's own payload, else the
    /// payload or block content of the user message answering it
    fn result_content(&self, message: &'a Message, tool: &ToolUse) -> Option<ResultContent<'a>> {
        let answer = tool.id.as_deref().and_then(|id| self.conversation.tool_result(id));

        let payload = message
            .tool_use_result
            .as_ref()
            .or_else(|| answer.and_then(|found| found.message.tool_use_result.as_ref()));

        match payload {
            Some(ToolResultPayload::Stdout(text)) | Some(ToolResultPayload::Text(text)) => {
                Some(ResultContent::Text(Cow::Borrowed(text.as_str())))
            }
            Some(ToolResultPayload::TodoUpdate(count)) => {
                Some(ResultContent::Text(Cow::Owned(format!("Updated todos: {} items", count))))
            }
            Some(ToolResultPayload::Other(_)) => Some(
                answer
                    .map(|found| ResultContent::from_block(found.block))
                    .unwrap_or(ResultContent::Text(Cow::Borrowed(""))),
            ),
            None => answer.map(|found| ResultContent::from_block(found.block)),
        }
    }
}

fn is_delegating(tool: &ToolUse) -> bool {
    tool.name
        .as_deref()
        .is_some_and(|name| DELEGATING_TOOLS.iter().any(|delegating| *delegating == name))
}

/// Fenced block holding a delegated sub-conversation. `messages` must not be empty.
fn render_agent_session(lines: &mut Vec<String>, messages: &[&Message]) {
    lines.push("```".to_string());
    lines.push(AGENT_START.to_string());

    if let Some(first) = messages.first() {
        if let Some(timestamp) = &first.timestamp {
            lines.push(format!("│ Time: {}", format_time_of_day(timestamp)));
        }
        if let Some(usage) = &first.usage {
            lines.push(format!("│ Tokens: {}", format_tokens(usage)));
        }
        if let Some(cwd) = &first.cwd {
            lines.push(format!("│ Working Directory: {}", cwd));
        }
        if let Some(session_id) = &first.session_id {
            lines.push(format!("│ Session ID: {} (sidechain)", session_id));
        }
    }

    lines.push(AGENT_SEPARATOR.to_string());
    lines.push(String::new());

    for message in messages {
        let content = message.content();

        if !content.text.is_empty() {
            lines.push(format!("Agent: {}", content.joined_text()));
            lines.push(String::new());
        }
        if !content.tool_uses.is_empty() {
            lines.push("Agent Tools:".to_string());
            for tool in &content.tool_uses {
                lines.push(format!("- {}", format_tool_use(tool)));
            }
            lines.push(String::new());
        }
    }

    lines.push(AGENT_END.to_string());
    lines.push("```".to_string());
}

fn push_rule(lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());
}
