use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Message, MessageLine, Role};

/// One decoded log line
#[derive(Debug, Clone)]
pub enum Record {
    Summary(String),
    Message(Message),
    /// Any other line type (`system`, `file-history-snapshot`, ...), or none at all
    Ignored,
}

/// Why a single line could not be used
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("line is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("expected a JSON object, found {0}")]
    UnexpectedShape(&'static str),
}

/// Decode one raw line. Blank lines yield `Ok(None)`.
pub fn parse_line(bytes: &[u8]) -> Result<Option<Record>, RecordError> {
    let line = std::str::from_utf8(bytes)?;
    if line.trim().is_empty() {
        return Ok(None);
    }
    parse_record(line).map(Some)
}

/// Decode one non-blank line of JSON into a [`Record`]
pub fn parse_record(line: &str) -> Result<Record, RecordError> {
    let value: Value = serde_json::from_str(line)?;
    let map = match value {
        Value::Object(map) => map,
        other => return Err(RecordError::UnexpectedShape(json_kind(&other))),
    };

    match map.get("type").and_then(Value::as_str) {
        Some("summary") => {
            let text = map.get("summary").and_then(Value::as_str).unwrap_or_default();
            Ok(Record::Summary(text.to_string()))
        }
        Some("user") => Ok(message_record(Role::User, map)),
        Some("assistant") => Ok(message_record(Role::Assistant, map)),
        _ => Ok(Record::Ignored),
    }
}

/// Every `MessageLine` field decodes leniently, so any object yields a message
fn message_record(role: Role, map: Map<String, Value>) -> Record {
    let line: MessageLine = serde_json::from_value(Value::Object(map)).unwrap_or_default();
    Record::Message(Message::from_line(role, line))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawContent;

    #[test]
    fn test_parse_summary_record() {
        let record =
            parse_record(r#"{"type":"summary","summary":"Fix login bug","leafUuid":"x"}"#)
                .unwrap();
        assert!(matches!(record, Record::Summary(ref s) if s == "Fix login bug"));
    }

    #[test]
    fn test_parse_summary_without_text() {
        let record = parse_record(r#"{"type":"summary"}"#).unwrap();
        assert!(matches!(record, Record::Summary(ref s) if s.is_empty()));
    }

    #[test]
    fn test_parse_user_record() {
        let record = parse_record(
            r#"{"type":"user","uuid":"u1","message":{"role":"user","content":"Hello"}}"#,
        )
        .unwrap();
        let Record::Message(message) = record else { panic!("expected message") };
        assert_eq!(message.role, Role::User);
        assert_eq!(message.uuid.as_deref(), Some("u1"));
        assert_eq!(message.content, Some(RawContent::Text("Hello".to_string())));
    }

    #[test]
    fn test_parse_assistant_record() {
        let record = parse_record(
            r#"{"type":"assistant","message":{"model":"claude-sonnet-4","content":[]}}"#,
        )
        .unwrap();
        let Record::Message(message) = record else { panic!("expected message") };
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.model.as_deref(), Some("claude-sonnet-4"));
    }

    #[test]
    fn test_parse_message_with_every_field_mistyped() {
        let record = parse_record(
            r#"{"type":"assistant","uuid":1,"parentUuid":[],"timestamp":{},"isSidechain":"no",
                "sessionId":false,"cwd":2,"version":null,"requestId":3.5,"message":"text",
                "toolUseResult":7}"#,
        )
        .unwrap();
        let Record::Message(message) = record else { panic!("expected message") };
        assert_eq!(message.role, Role::Assistant);
        assert!(message.uuid.is_none());
        assert!(message.parent_uuid.is_none());
        assert!(message.timestamp.is_none());
        assert!(!message.is_sidechain);
        assert!(message.session_id.is_none());
        assert!(message.content.is_none());
    }

    #[test]
    fn test_parse_other_types_are_ignored() {
        for line in [
            r#"{"type":"system","content":"x"}"#,
            r#"{"type":"file-history-snapshot","snapshot":{}}"#,
            r#"{"no_type":true}"#,
            r#"{"type":5}"#,
        ] {
            assert!(matches!(parse_record(line).unwrap(), Record::Ignored), "{}", line);
        }
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_record("{not json").unwrap_err();
        assert!(matches!(err, RecordError::InvalidJson(_)));
        assert!(err.to_string().starts_with("invalid JSON"));
    }

    #[test]
    fn test_parse_non_object_json() {
        let err = parse_record("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, RecordError::UnexpectedShape("an array")));
        assert_eq!(err.to_string(), "expected a JSON object, found an array");
    }

    #[test]
    fn test_parse_line_blank_and_utf8() {
        assert!(parse_line(b"   \t").unwrap().is_none());
        assert!(matches!(parse_line(&[0xff, 0xfe, b'{']), Err(RecordError::InvalidUtf8(_))));
        assert!(parse_line(br#"{"type":"summary","summary":"s"}"#).unwrap().is_some());
    }
}
