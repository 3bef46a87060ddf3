//! Streaming event pipeline.
//!
//! Consumes a server-push event stream and converts raw wire messages into
//! validated [`StreamEvent`] values, plus classifies connection failures
//! into exponential-backoff retry decisions.
//!
//! Failure semantics, in one place:
//!
//! - A malformed individual message is *not* an error: it is reported as a
//!   well-formed `error`-kind [`ProcessedEvent`] and the connection stays
//!   open.
//! - [`parse_final_payload`] is the one fail-fast path: the fully-buffered
//!   final response either parses or errors, there is no partial data to
//!   fall back on.
//! - Connection-level failures are surfaced through the `on_error` handler
//!   and classified by [`RetryPolicy::evaluate`]; reconnection is always a
//!   caller decision, never automatic.

mod connection;
mod event;
mod retry;


// Re-export public API
pub use connection::{
    ChannelTransport, ConnectionHandle, ConnectionState, StreamHandlers, StreamTransport,
    TransportEvent, open_connection,
};
pub use event::{
    ProcessedEvent, StreamEvent, StreamParseError, Validation, parse_final_payload, process_event,
    validate_event,
};
pub use retry::{DEFAULT_BASE_DELAY, RetryDecision, RetryPolicy, handle_connection_error};
