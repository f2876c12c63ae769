//! JSONL parsing for Claude conversation logs
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach suitable for CLI tools:
//!
//! - **Individual line failures**: Lines that are not valid UTF-8, not valid JSON, or not a
//!   JSON object are logged with their 1-based line number, recorded on the conversation as
//!   [`ParseWarning`](crate::indexer::ParseWarning)s and skipped. One corrupt record never
//!   prevents conversion of the rest of the log.
//!
//! - **Missing or mistyped fields**: Not errors. Every field decodes leniently (see
//!   [`deserializers::lenient`]) and falls back to "absent".
//!
//! - **I/O failures**: Failing to open or read the file is fatal and propagated as an
//!   `anyhow::Error` with the path in its context.
//!
//! Unknown line types (`system`, `file-history-snapshot`, ...) are ignored silently.

pub mod conversation;
pub mod deserializers;
pub mod record;

pub use conversation::{parse_conversation, parse_conversation_file};
pub use record::{Record, RecordError, parse_line, parse_record};
