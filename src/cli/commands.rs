use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::converter::{ConvertOptions, convert_directory, convert_file};
use crate::indexer::ConversationStats;
use crate::parsers::parse_conversation_file;
use crate::render::render_markdown;
use crate::utils::format_path_with_tilde;

#[derive(Parser)]
#[command(name = "convo-markdown")]
#[command(version = "0.1.0")]
#[command(about = "Convert Claude conversation JSONL logs into readable Markdown", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a conversation log (or every log in a directory) to Markdown
    Convert {
        /// JSONL log file, or a directory searched recursively for *.jsonl
        input: PathBuf,

        /// Directory for the generated document [default: the input's directory]
        output_dir: Option<PathBuf>,

        /// File name to use instead of the generated one
        #[arg(short, long)]
        name: Option<String>,

        /// Print the document to stdout instead of writing a file
        #[arg(long, conflicts_with_all = ["output_dir", "name"])]
        stdout: bool,
    },
    /// Show statistics about a conversation log
    Stats {
        /// JSONL log file
        input: PathBuf,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert { input, output_dir, name, stdout }) => {
            ensure_exists(&input)?;
            if stdout {
                print_markdown(&input)?;
            } else {
                convert(&input, ConvertOptions { output_dir, file_name: name })?;
            }
        }
        Some(Commands::Stats { input }) => {
            ensure_exists(&input)?;
            show_stats(&input)?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn ensure_exists(input: &Path) -> Result<()> {
    if !input.exists() {
        bail!("Input file '{}' not found", input.display());
    }
    Ok(())
}

fn convert(input: &Path, options: ConvertOptions) -> Result<()> {
    if input.is_dir() {
        let reports = convert_directory(input, &options)?;
        for report in &reports {
            println!(
                "{} -> {}",
                format_path_with_tilde(&report.input_path),
                format_path_with_tilde(&report.output_path)
            );
        }
        println!("Converted {} files", reports.len());
    } else {
        let report = convert_file(input, &options)?;
        if report.warnings > 0 {
            eprintln!("Warning: skipped {} malformed lines", report.warnings);
        }
        println!("Conversion complete: {}", format_path_with_tilde(&report.output_path));
    }
    Ok(())
}

fn print_markdown(input: &Path) -> Result<()> {
    if input.is_dir() {
        bail!("--stdout needs a single log file, not a directory");
    }

    let conversation = parse_conversation_file(input)?;
    let markdown = render_markdown(&conversation);

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", markdown).context("Failed to write to stdout")?;
    Ok(())
}

fn show_stats(input: &Path) -> Result<()> {
    let conversation = parse_conversation_file(input)?;
    let stats = ConversationStats::collect(&conversation);

    println!("Conversation Statistics");
    println!("=======================");
    println!("File: {}", format_path_with_tilde(input));
    println!("Title: {}", conversation.title());
    println!("Summaries: {}", stats.summaries);
    println!("Turns: {}", stats.turns);
    println!(
        "Messages: {}",
        stats.user_messages + stats.assistant_messages + stats.sidechain_messages
    );
    println!("  User messages: {}", stats.user_messages);
    println!("  Assistant messages: {}", stats.assistant_messages);
    println!(
        "  Sidechain messages: {} ({} agent sessions)",
        stats.sidechain_messages, stats.sidechain_sessions
    );
    println!("Tool calls: {}", stats.tool_calls);
    println!();
    println!("Tokens:");
    println!("  Input: {}", stats.tokens.input);
    println!("  Output: {}", stats.tokens.output);
    println!("  Cache created: {}", stats.tokens.cache_created);
    println!("  Cache read: {}", stats.tokens.cache_read);
    println!();

    if let Some(model) = &conversation.current_model {
        println!("Model: {}", model);
    }
    if let Some(session_id) = &conversation.session_id {
        println!("Session ID: {}", session_id);
    }
    if stats.skipped_lines > 0 {
        println!("Skipped lines: {}", stats.skipped_lines);
    }

    Ok(())
}
