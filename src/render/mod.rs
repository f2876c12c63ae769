//! Markdown rendering
//!
//! [`render_markdown`] walks the turns of a [`Conversation`](crate::indexer::Conversation)
//! and produces the finished document. The `format` and `timestamps` submodules hold
//! the one-line helpers it is built from.

pub mod document;
pub mod format;
pub mod timestamps;

pub use document::render_markdown;
