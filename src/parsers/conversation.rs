use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::record::parse_line;
use crate::indexer::Conversation;
use crate::utils::open_conversation_file;

/// Parse a conversation JSONL file into a [`Conversation`]
/// Malformed lines are logged with their line number and skipped
pub fn parse_conversation_file(path: &Path) -> Result<Conversation> {
    let file = open_conversation_file(path)?;

    let conversation = parse_conversation(BufReader::new(file))
        .with_context(|| format!("Failed to read conversation file: {}", path.display()))?;

    if !conversation.warnings.is_empty() {
        warn!(
            "Parsed {}: {} messages ({} lines skipped)",
            path.display(),
            conversation.messages.len(),
            conversation.warnings.len()
        );
    } else {
        info!("Parsed {}: {} messages", path.display(), conversation.messages.len());
    }

    Ok(conversation)
}

/// Parse conversation records from any buffered reader, one JSON object per line.
///
/// Only failing to read from `reader` is an error. Lines that are not valid UTF-8,
/// not valid JSON or not a JSON object become [`crate::indexer::ParseWarning`]s.
pub fn parse_conversation<R: BufRead>(reader: R) -> Result<Conversation> {
    let mut conversation = Conversation::new();

    for (line_num, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes.context("Failed to read line from conversation log")?;
        let line_number = line_num + 1;

        match parse_line(&bytes) {
            Ok(Some(record)) => conversation.ingest(record),
            Ok(None) => {}
            Err(e) => {
                warn!("Skipping line {}: {}", line_number, e);
                conversation.record_warning(line_number, e.to_string());
            }
        }
    }

    Ok(conversation)
}
