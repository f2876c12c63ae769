use super::conversation::Conversation;
use crate::models::Usage;

/// Aggregate token counts over every assistant message, sidechains included
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenTotals {
    pub input: u64,
    pub output: u64,
    pub cache_created: u64,
    pub cache_read: u64,
}

impl TokenTotals {
    fn add(&mut self, usage: &Usage) {
        self.input = self.input.saturating_add(usage.input_tokens.unwrap_or(0));
        self.output = self.output.saturating_add(usage.output_tokens.unwrap_or(0));
        self.cache_created =
            self.cache_created.saturating_add(usage.cache_creation_input_tokens.unwrap_or(0));
        self.cache_read = self.cache_read.saturating_add(usage.cache_read_input_tokens.unwrap_or(0));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationStats {
    pub summaries: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
    pub sidechain_messages: usize,
    pub sidechain_sessions: usize,
    pub turns: usize,
    pub tool_calls: usize,
    pub tokens: TokenTotals,
    pub skipped_lines: usize,
}

impl ConversationStats {
    pub fn collect(conversation: &Conversation) -> Self {
        let mut stats = Self {
            summaries: conversation.summaries.len(),
            turns: conversation.turns().len(),
            sidechain_sessions: conversation.sidechains().group_count(),
            skipped_lines: conversation.warnings.len(),
            ..Self::default()
        };

        for message in &conversation.messages {
            if message.is_sidechain {
                stats.sidechain_messages += 1;
            } else if message.is_user() {
                stats.user_messages += 1;
            } else {
                stats.assistant_messages += 1;
            }

            if message.is_assistant() {
                stats.tool_calls += message.content().tool_uses.len();
                if let Some(usage) = &message.usage {
                    stats.tokens.add(usage);
                }
            }
        }

        stats
    }
}
