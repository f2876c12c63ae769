//! Conversion driver: parse a log, render it and write the Markdown next to it.
//!
//! # Error Handling Strategy
//!
//! - **Single file**: any I/O failure (unreadable input, unwritable output) is returned.
//!   Malformed lines inside the log are not failures; they surface as warnings on the
//!   [`ConversionReport`].
//! - **Directories**: each `*.jsonl` file is converted independently. A failing file is
//!   logged and counted; the batch fails only if more than 50% of files fail.

pub mod naming;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::parsers::parse_conversation_file;
use crate::render::render_markdown;
use crate::utils::write_atomically;
pub use naming::{clean_filename, output_file_name, unique_output_path};

const LOG_EXTENSION: &str = "jsonl";

/// Where and under which name converted documents are written
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Target directory; defaults to the directory holding the input file
    pub output_dir: Option<PathBuf>,
    /// Overrides the generated chronological file name
    pub file_name: Option<String>,
}

/// Outcome of converting one log
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub turns: usize,
    pub messages: usize,
    /// Number of input lines that were skipped
    pub warnings: usize,
}

/// Convert a single log file and write the document, never overwriting an existing file
///
/// # Errors
///
/// Returns an error if the input cannot be read, the output directory cannot be created
/// or the document cannot be written.
pub fn convert_file(input: &Path, options: &ConvertOptions) -> Result<ConversionReport> {
    let conversation = parse_conversation_file(input)?;
    let markdown = render_markdown(&conversation);

    let output_dir = match &options.output_dir {
        Some(dir) => dir.clone(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    if !output_dir.as_os_str().is_empty() {
        fs::create_dir_all(&output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;
    }

    let file_name = match &options.file_name {
        Some(name) => name.clone(),
        None => output_file_name(&conversation, input),
    };
    let output_path = unique_output_path(&output_dir, &file_name);

    write_atomically(&output_path, &markdown)?;

    let report = ConversionReport {
        input_path: input.to_path_buf(),
        output_path,
        turns: conversation.turns().len(),
        messages: conversation.messages.len(),
        warnings: conversation.warnings.len(),
    };
    info!(
        "Wrote {} ({} turns, {} messages)",
        report.output_path.display(),
        report.turns,
        report.messages
    );

    Ok(report)
}

/// Convert every `*.jsonl` file beneath `dir`
///
/// # Errors
///
/// Returns an error if the directory cannot be walked, holds no logs, or more than 50%
/// of the logs fail to convert. `options.file_name` is rejected since every log needs
/// its own name.
pub fn convert_directory(dir: &Path, options: &ConvertOptions) -> Result<Vec<ConversionReport>> {
    if options.file_name.is_some() {
        bail!("A custom file name cannot be used when converting a directory");
    }

    let inputs = find_conversation_files(dir)?;
    if inputs.is_empty() {
        bail!("No .{} files found in {}", LOG_EXTENSION, dir.display());
    }

    let mut reports = Vec::new();
    let mut failed = 0usize;

    for input in &inputs {
        match convert_file(input, options) {
            Ok(report) => reports.push(report),
            Err(e) => {
                failed += 1;
                warn!("Failed to convert {}: {:#}", input.display(), e);
            }
        }
    }

    let total = inputs.len();
    let failure_rate = failed as f64 / total as f64;
    if failure_rate > 0.5 {
        bail!(
            "Conversion failed: {}/{} files failed to convert ({}% failure rate)",
            failed,
            total,
            (failure_rate * 100.0) as u32
        );
    }

    info!("Converted {} files ({} failed)", reports.len(), failed);

    Ok(reports)
}

/// All `*.jsonl` files beneath `dir`, sorted by path
pub fn find_conversation_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to read directory entry in {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == LOG_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const LOG: &str = r#"{"type":"summary","summary":"Greeting"}
{"type":"user","uuid":"u1","timestamp":"2025-01-15T10:30:00Z","message":{"role":"user","content":"Hello"}}
{"type":"assistant","uuid":"a1","message":{"role":"assistant","content":"Hi"}}
"#;

    #[test]
    fn test_convert_file_next_to_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("session.jsonl");
        fs::write(&input, LOG).unwrap();

        let report = convert_file(&input, &ConvertOptions::default()).unwrap();

        assert_eq!(report.output_path, dir.path().join("2025-01-15-103000-Greeting.md"));
        assert_eq!(report.turns, 1);
        assert_eq!(report.messages, 2);
        assert_eq!(report.warnings, 0);
        let markdown = fs::read_to_string(&report.output_path).unwrap();
        assert!(markdown.starts_with("# Greeting\n"));
    }

    #[test]
    fn test_convert_file_into_new_output_dir_with_custom_name() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("session.jsonl");
        fs::write(&input, LOG).unwrap();
        let out = dir.path().join("nested").join("out");

        let options =
            ConvertOptions { output_dir: Some(out.clone()), file_name: Some("chat.md".into()) };
        let report = convert_file(&input, &options).unwrap();

        assert_eq!(report.output_path, out.join("chat.md"));
        assert!(report.output_path.exists());
    }

    #[test]
    fn test_convert_file_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("session.jsonl");
        fs::write(&input, LOG).unwrap();

        let first = convert_file(&input, &ConvertOptions::default()).unwrap();
        let second = convert_file(&input, &ConvertOptions::default()).unwrap();

        assert_eq!(second.output_path, dir.path().join("2025-01-15-103000-Greeting-01.md"));
        assert_eq!(
            fs::read_to_string(first.output_path).unwrap(),
            fs::read_to_string(second.output_path).unwrap()
        );
    }

    #[test]
    fn test_convert_file_missing_input() {
        let dir = TempDir::new().unwrap();
        let result = convert_file(&dir.path().join("missing.jsonl"), &ConvertOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_find_conversation_files_recursive_and_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.jsonl"), "").unwrap();
        fs::write(dir.path().join("a.jsonl"), "").unwrap();
        fs::write(dir.path().join("sub").join("c.jsonl"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();

        let files = find_conversation_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![
                dir.path().join("a.jsonl"),
                dir.path().join("b.jsonl"),
                dir.path().join("sub").join("c.jsonl"),
            ]
        );
    }

    #[test]
    fn test_convert_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.jsonl"), LOG).unwrap();
        fs::write(dir.path().join("two.jsonl"), LOG).unwrap();
        let out = TempDir::new().unwrap();

        let options = ConvertOptions { output_dir: Some(out.path().to_path_buf()), file_name: None };
        let reports = convert_directory(dir.path(), &options).unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].output_path, out.path().join("2025-01-15-103000-Greeting.md"));
        assert_eq!(reports[1].output_path, out.path().join("2025-01-15-103000-Greeting-01.md"));
    }

    #[test]
    fn test_convert_directory_rejects_custom_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.jsonl"), LOG).unwrap();

        let options = ConvertOptions { output_dir: None, file_name: Some("x.md".into()) };
        let err = convert_directory(dir.path(), &options).unwrap_err();
        assert!(err.to_string().contains("custom file name"));
    }

    #[test]
    fn test_convert_directory_without_logs() {
        let dir = TempDir::new().unwrap();
        let err = convert_directory(dir.path(), &ConvertOptions::default()).unwrap_err();
        assert!(err.to_string().contains("No .jsonl files"));
    }
}
