use std::collections::HashMap;

use crate::models::{Message, Usage};

/// Consecutive main-timeline messages opened by a user message
#[derive(Debug, Clone)]
pub struct Turn<'a> {
    /// Never empty
    pub messages: Vec<&'a Message>,
}

impl<'a> Turn<'a> {
    pub fn first(&self) -> Option<&'a Message> {
        self.messages.first().copied()
    }

    /// Usage of the first assistant message in the turn that reports any
    pub fn usage(&self) -> Option<&'a Usage> {
        self.messages
            .iter()
            .filter(|message| message.is_assistant())
            .find_map(|message| message.usage.as_ref())
    }
}

/// Group non-sidechain messages into turns.
///
/// A user message starts a new turn unless nothing has been collected yet; every other
/// message joins the open turn. A log that opens with assistant output therefore gets
/// a first turn without a user message.
pub fn segment_turns(messages: &[Message]) -> Vec<Turn<'_>> {
    let mut turns = Vec::new();
    let mut current: Vec<&Message> = Vec::new();

    for message in messages.iter().filter(|message| !message.is_sidechain) {
        if message.is_user() && !current.is_empty() {
            turns.push(Turn { messages: std::mem::take(&mut current) });
        }
        current.push(message);
    }

    if !current.is_empty() {
        turns.push(Turn { messages: current });
    }

    turns
}

/// Sidechain messages grouped by the message they hang off
#[derive(Debug, Default)]
pub struct SidechainIndex<'a> {
    by_parent: HashMap<&'a str, Vec<&'a Message>>,
}

impl<'a> SidechainIndex<'a> {
    pub fn build(messages: &'a [Message]) -> Self {
        let mut by_parent: HashMap<&'a str, Vec<&'a Message>> = HashMap::new();
        for message in messages.iter().filter(|message| message.is_sidechain) {
            if let Some(parent) = message.parent_uuid.as_deref() {
                by_parent.entry(parent).or_default().push(message);
            }
        }
        Self { by_parent }
    }

    /// Sidechain messages whose parent is `parent_uuid`, in log order
    pub fn messages_for(&self, parent_uuid: &str) -> &[&'a Message] {
        self.by_parent.get(parent_uuid).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct parents with at least one sidechain message
    pub fn group_count(&self) -> usize {
        self.by_parent.len()
    }
}
