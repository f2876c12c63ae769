//! Data models for Claude conversation logs.
//!
//! - [`record`] - raw serde shapes of a JSONL line (`MessageLine`, content blocks, usage)
//! - [`Message`] - a user or assistant message as kept by the indexer
//! - [`ContentBundle`] - borrowed per-channel view over a message's content
//!
//! Raw shapes decode every field leniently through the helpers in
//! [`crate::parsers::deserializers`].

pub mod content;
pub mod message;
pub mod record;

pub use content::{ContentBundle, value_text};
pub use message::{Message, ModelChange, Role, ToolResultPayload};
pub use record::{
    ContentBlock, MessageBody, MessageLine, RawBlock, RawContent, ToolResult, ToolUse, Usage,
};
