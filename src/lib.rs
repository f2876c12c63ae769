//! convo-markdown - Turn Claude conversation logs into readable Markdown
//!
//! Claude Code records every session as a JSONL file: one loosely typed JSON record per
//! line. This library rebuilds the conversation from that flat stream and renders it:
//!
//! - Tolerant parsing of `summary`, `user` and `assistant` records, skipping bad lines
//! - Turn segmentation and grouping of nested agent (sidechain) messages
//! - Tool invocations paired with their results, token usage and model changes
//! - Chronological, conflict-free output file naming
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use convo_markdown::{ConvertOptions, convert_file};
//!
//! let report = convert_file(Path::new("session.jsonl"), &ConvertOptions::default())?;
//! println!("Wrote {} turns to {}", report.turns, report.output_path.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod converter;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use converter::{ConversionReport, ConvertOptions, convert_directory, convert_file};
pub use indexer::Conversation;
pub use parsers::{parse_conversation, parse_conversation_file};
pub use render::render_markdown;
