//! Wire event classification and validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A discrete event received over the stream. The wire format is JSON with
/// a `type` discriminator and one companion field per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Incremental text fragment.
    TextChunk { content: String },
    /// Final structured result. The payload shape is the caller's concern;
    /// an empty array is a legitimate completion.
    Completion { data: Value },
    /// Server-reported error.
    Error { message: String },
}

impl StreamEvent {
    /// The wire discriminator for this event.
    pub fn kind(&self) -> &'static str {
        match self {
            StreamEvent::TextChunk { .. } => "text_chunk",
            StreamEvent::Completion { .. } => "completion",
            StreamEvent::Error { .. } => "error",
        }
    }
}

/// Result of classifying one raw wire message. Never constructed from a
/// failure path: parse and protocol problems become invalid `error`-kind
/// events so a single bad message cannot tear down the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedEvent {
    /// The classified event.
    pub event: StreamEvent,
    /// False when the raw message violated the protocol.
    pub is_valid: bool,
    /// The raw payload, kept only when it failed to parse as JSON.
    pub original_data: Option<String>,
}

/// Outcome of [`validate_event`]: every violation found, not just the
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Strict-parse failure for the final buffered payload.
#[derive(Error, Debug)]
#[error("failed to parse final stream payload: {source}")]
pub struct StreamParseError {
    #[from]
    source: serde_json::Error,
}

/// Classify one raw wire message.
///
/// Infallible by design: malformed input is reported as an invalid
/// `error`-kind event. A known kind missing its companion field is echoed
/// with the empty default (`""` / `null`) and left for [`validate_event`]
/// to flag.
pub fn process_event(raw: &str) -> ProcessedEvent {
    let Ok(value) = serde_json::from_str::<Value>(raw) else {
        return ProcessedEvent {
            event: StreamEvent::Error {
                message: "Failed to parse stream event".to_string(),
            },
            is_valid: false,
            original_data: Some(raw.to_string()),
        };
    };

    let Some(kind) = value.get("type").and_then(Value::as_str) else {
        return invalid("Invalid stream event: missing type".to_string());
    };

    let event = match kind {
        "text_chunk" => StreamEvent::TextChunk {
            content: field_str(&value, "content"),
        },
        "completion" => StreamEvent::Completion {
            data: value.get("data").cloned().unwrap_or(Value::Null),
        },
        "error" => StreamEvent::Error {
            message: field_str(&value, "message"),
        },
        other => return invalid(format!("Unknown stream event type: {other}")),
    };

    ProcessedEvent {
        event,
        is_valid: true,
        original_data: None,
    }
}

/// Structural check independent of parsing: confirms the companion field
/// required by each kind is actually present.
///
/// `completion` data of `null` counts as absent (the classifier uses
/// `null` for a missing field); an empty array is valid.
pub fn validate_event(event: &StreamEvent) -> Validation {
    let mut errors = Vec::new();

    match event {
        StreamEvent::TextChunk { content } => {
            if content.is_empty() {
                errors.push("text_chunk event missing content".to_string());
            }
        }
        StreamEvent::Completion { data } => {
            if data.is_null() {
                errors.push("completion event missing data".to_string());
            }
        }
        StreamEvent::Error { message } => {
            if message.is_empty() {
                errors.push("error event missing message".to_string());
            }
        }
    }

    Validation {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Strict JSON parse of the fully-buffered final response.
///
/// Unlike [`process_event`], this path fails fast: once the stream has
/// signaled completion there is no partial data to fall back on.
pub fn parse_final_payload<T: serde::de::DeserializeOwned>(
    text: &str,
) -> Result<T, StreamParseError> {
    serde_json::from_str(text).map_err(StreamParseError::from)
}

fn field_str(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn invalid(message: String) -> ProcessedEvent {
    ProcessedEvent {
        event: StreamEvent::Error { message },
        is_valid: false,
        original_data: None,
    }
}
