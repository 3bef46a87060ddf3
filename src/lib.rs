//! # promptpipe
//!
//! Prompt template rendering plus a streaming-event pipeline for
//! AI-generated wizard flows.
//!
//! The crate has two cooperating halves:
//!
//! - [`template`] / [`processor`]: load named, versioned prompt
//!   configurations (model settings, output schema, template text) from a
//!   backing source, cache them, and render the template against a
//!   caller-supplied variable tree.
//! - [`stream`]: classify server-push wire events into a typed protocol,
//!   validate them, and turn connection failures into exponential-backoff
//!   retry decisions.
//!
//! ## Rendering a template
//!
//! ```
//! use promptpipe::template::render;
//! use serde_json::json;
//!
//! let vars = json!({
//!     "dish": "ramen",
//!     "steps": ["boil stock", "cook noodles"],
//! });
//! let out = render(
//!     "Make {{dish}}:\n{{#each steps}}{{@index}}. {{this}}\n{{/each}}",
//!     &vars,
//! )?;
//! assert!(out.contains("0. boil stock"));
//! assert!(out.contains("1. cook noodles"));
//! # Ok::<(), promptpipe::template::TemplateError>(())
//! ```
//!
//! ## Classifying stream events
//!
//! ```
//! use promptpipe::stream::{process_event, StreamEvent};
//!
//! let processed = process_event(r#"{"type":"text_chunk","content":"hi"}"#);
//! assert!(processed.is_valid);
//! assert_eq!(
//!     processed.event,
//!     StreamEvent::TextChunk { content: "hi".to_string() }
//! );
//! ```
//!
//! Unresolved template variables are deliberately left as literal
//! `{{...}}` text, and malformed individual stream messages are reported
//! as structured error events rather than tearing down the connection.
//! Consumers wire up their own `tracing` subscriber.

pub mod config;
pub mod error;
pub mod processor;
pub mod stream;
pub mod template;

// Convenience re-exports
pub use config::{ConfigError, ConfigSource, FsConfigSource, ModelConfig, PromptConfig};
pub use error::{Error, Result};
pub use processor::{ProcessedPrompt, TemplateProcessor};
pub use stream::{
    ChannelTransport, ConnectionHandle, ConnectionState, ProcessedEvent, RetryDecision,
    RetryPolicy, StreamEvent, StreamHandlers, StreamParseError, StreamTransport, TransportEvent,
    handle_connection_error, open_connection, parse_final_payload, process_event, validate_event,
};
pub use template::{TemplateError, render};
