//! Conversation reconstruction from parsed records
//!
//! # Structure
//!
//! - **Conversation state** ([`Conversation`]): owns every message in log order together
//!   with run-scoped metadata (summaries, first-seen session id, working directory and
//!   start time, the currently tracked model). Model transitions are annotated on the
//!   assistant message that caused them.
//!
//! - **Turns** ([`segment_turns`]): main-timeline messages grouped so each turn opens
//!   with a user message. Sidechain messages never enter a turn.
//!
//! - **Sidechains** ([`SidechainIndex`]): nested agent messages looked up by the uuid of
//!   the message that spawned them. The index borrows from the conversation; there is
//!   no owned parent/child graph.

pub mod conversation;
pub mod stats;
pub mod turns;

pub use conversation::{Conversation, ParseWarning, ToolResultMatch};
pub use stats::{ConversationStats, TokenTotals};
pub use turns::{SidechainIndex, Turn, segment_turns};
