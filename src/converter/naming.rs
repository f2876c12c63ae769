use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::indexer::Conversation;
use crate::parsers::deserializers::parse_timestamp;

const MAX_LABEL_CHARS: usize = 50;
const FIRST_MESSAGE_CHARS: usize = 100;
const FALLBACK_LABEL: &str = "conversation";

static RESERVED_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());
static NON_WORD_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static HYPHEN_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Reduce free text to a filesystem-safe, hyphenated label of at most `max_chars` characters
pub fn clean_filename(text: &str, max_chars: usize) -> String {
    let text = RESERVED_CHARS.replace_all(text, "");
    let text = NON_WORD_CHARS.replace_all(&text, "");
    let text = WHITESPACE_RUNS.replace_all(&text, "-");
    let text = HYPHEN_RUNS.replace_all(&text, "-");
    let mut label = text.trim_matches('-');

    if let Some((cut, _)) = label.char_indices().nth(max_chars) {
        label = label[..cut].trim_end_matches('-');
    }

    if label.is_empty() { FALLBACK_LABEL.to_string() } else { label.to_string() }
}

/// Chronological file name for a parsed conversation.
///
/// `2025-01-15-143022-fix-the-parser.md` when the log has a parsable start time,
/// otherwise `{input stem}-converted.md`.
pub fn output_file_name(conversation: &Conversation, input: &Path) -> String {
    let started = conversation.start_time.as_deref().and_then(parse_timestamp);

    match started {
        Some(started) => {
            let label = conversation
                .summaries
                .first()
                .cloned()
                .or_else(|| {
                    conversation
                        .first_user_text()
                        .map(|text| text.chars().take(FIRST_MESSAGE_CHARS).collect())
                })
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| FALLBACK_LABEL.to_string());

            format!(
                "{}-{}-{}.md",
                started.format("%Y-%m-%d"),
                started.format("%H%M%S"),
                clean_filename(&label, MAX_LABEL_CHARS)
            )
        }
        None => {
            let stem = input.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
            format!("{}-converted.md", stem)
        }
    }
}

/// First free path for `file_name` in `dir`, appending `-01`, `-02`, ... before the
/// extension while the candidate exists
pub fn unique_output_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let name = Path::new(file_name);
    let stem = name.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
    let extension = name.extension().map(|ext| format!(".{}", ext.to_string_lossy()));

    let mut counter = 1u32;
    loop {
        let candidate = dir.join(format!(
            "{}-{:02}{}",
            stem,
            counter,
            extension.as_deref().unwrap_or_default()
        ));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
