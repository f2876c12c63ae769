//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a conversation log inside a temporary directory
pub struct LogBuilder {
    temp_dir: TempDir,
    lines: Vec<String>,
}

impl LogBuilder {
    /// Create a new builder with an empty log
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, lines: Vec::new() }
    }

    /// Get the path to the temporary directory
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a summary record
    pub fn summary(self, text: &str) -> Self {
        self.value(json!({"type": "summary", "summary": text, "leafUuid": "leaf"}))
    }

    /// Add a message record
    pub fn message(self, entry: EntryBuilder) -> Self {
        self.value(entry.to_json())
    }

    /// Add an arbitrary JSON record
    pub fn value(self, value: Value) -> Self {
        self.raw(&value.to_string())
    }

    /// Add a raw line, which need not be valid JSON
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Write the log as `file_name` and return its path
    pub fn write(&self, file_name: &str) -> PathBuf {
        let path = self.temp_dir.path().join(file_name);
        fs::write(&path, self.lines.join("\n")).expect("Failed to write log file");
        path
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `user` and `assistant` records
pub struct EntryBuilder {
    entry_type: &'static str,
    uuid: String,
    parent_uuid: Option<String>,
    timestamp: Option<String>,
    session_id: String,
    cwd: String,
    is_sidechain: bool,
    model: Option<String>,
    usage: Option<Value>,
    content: Value,
    tool_use_result: Option<Value>,
}

impl EntryBuilder {
    /// Create a new user message
    pub fn user(uuid: &str) -> Self {
        Self::new("user", uuid, json!("Test message"))
    }

    /// Create a new assistant message
    pub fn assistant(uuid: &str) -> Self {
        Self::new("assistant", uuid, json!([text_block("Test response")]))
    }

    fn new(entry_type: &'static str, uuid: &str, content: Value) -> Self {
        Self {
            entry_type,
            uuid: uuid.to_string(),
            parent_uuid: None,
            timestamp: Some("2025-01-15T14:30:22.000Z".to_string()),
            session_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            cwd: "/home/dev/project".to_string(),
            is_sidechain: false,
            model: None,
            usage: None,
            content,
            tool_use_result: None,
        }
    }

    /// Set plain string content
    pub fn text(mut self, text: &str) -> Self {
        self.content = json!(text);
        self
    }

    /// Set content blocks (text, thinking, tool_use, tool_result, ...)
    pub fn blocks(mut self, blocks: Vec<Value>) -> Self {
        self.content = Value::Array(blocks);
        self
    }

    pub fn parent(mut self, parent_uuid: &str) -> Self {
        self.parent_uuid = Some(parent_uuid.to_string());
        self
    }

    /// Mark as a sidechain message spawned by `parent_uuid`
    pub fn sidechain_of(mut self, parent_uuid: &str) -> Self {
        self.is_sidechain = true;
        self.parent(parent_uuid)
    }

    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = Some(timestamp.to_string());
        self
    }

    pub fn no_timestamp(mut self) -> Self {
        self.timestamp = None;
        self
    }

    pub fn session_id(mut self, session_id: &str) -> Self {
        self.session_id = session_id.to_string();
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    /// Set token usage: input, output, cache created, cache read
    pub fn usage(mut self, input: u64, output: u64, created: u64, read: u64) -> Self {
        self.usage = Some(json!({
            "input_tokens": input,
            "output_tokens": output,
            "cache_creation_input_tokens": created,
            "cache_read_input_tokens": read,
        }));
        self
    }

    pub fn tool_use_result(mut self, payload: Value) -> Self {
        self.tool_use_result = Some(payload);
        self
    }

    /// Convert to a JSON record
    pub fn to_json(&self) -> Value {
        let mut message = json!({"role": self.entry_type, "content": self.content});
        if let Some(model) = &self.model {
            message["model"] = json!(model);
        }
        if let Some(usage) = &self.usage {
            message["usage"] = usage.clone();
        }

        let mut record = json!({
            "type": self.entry_type,
            "uuid": self.uuid,
            "parentUuid": self.parent_uuid,
            "isSidechain": self.is_sidechain,
            "sessionId": self.session_id,
            "cwd": self.cwd,
            "version": "1.0.51",
            "message": message,
        });
        if let Some(timestamp) = &self.timestamp {
            record["timestamp"] = json!(timestamp);
        }
        if let Some(payload) = &self.tool_use_result {
            record["toolUseResult"] = payload.clone();
        }
        record
    }
}

pub fn text_block(text: &str) -> Value {
    json!({"type": "text", "text": text})
}

pub fn thinking_block(text: &str) -> Value {
    json!({"type": "thinking", "thinking": text, "signature": "sig"})
}

pub fn tool_use_block(id: &str, name: &str, input: Value) -> Value {
    json!({"type": "tool_use", "id": id, "name": name, "input": input})
}

pub fn tool_result_block(tool_use_id: &str, content: Value) -> Value {
    json!({"type": "tool_result", "tool_use_id": tool_use_id, "content": content, "is_error": false})
}
