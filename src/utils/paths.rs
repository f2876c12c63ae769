use std::borrow::Cow;
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tempfile::NamedTempFile;

// Maximum size for a conversation log: 256MB
const MAX_FILE_SIZE_BYTES: u64 = 256 * 1024 * 1024;

/// Opens a conversation log for reading after checking its size
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is larger than 256MB.
pub fn open_conversation_file(path: &Path) -> Result<File> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open conversation file: {}", path.display()))?;
    validate_file_size(&file, path)?;
    Ok(file)
}

/// Validates that a file's size is within acceptable limits (256MB)
///
/// Takes an open file handle to avoid TOCTOU (time-of-check-time-of-use)
/// race conditions where the file could be modified between the size check
/// and subsequent file operations.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than 256MB
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

/// Writes `contents` to a new file at `path` through a temporary sibling file.
/// Fails without touching anything if `path` already exists; the temporary file is
/// removed on every failure path.
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in: {}", dir.display()))?;
    temp.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write temp file: {}", temp.path().display()))?;
    temp.persist_noclobber(path)
        .with_context(|| format!("Failed to move output into place: {}", path.display()))?;

    Ok(())
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use convo_markdown::utils::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/notes/chat.md");
/// // Returns "~/notes/chat.md" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
