//! Connection pump: transport events in, classified events out.
//!
//! The transport itself (an HTTP long-lived response, a test channel) is an
//! external collaborator behind [`StreamTransport`]. [`open_connection`]
//! returns immediately and delivers events asynchronously through the
//! caller's handlers, in the order the transport produced them - a single
//! pump task does all delivery, so there is no reordering layer to reason
//! about.
//!
//! Per-connection state machine: `Connecting -> Open -> Receiving ->
//! Closed`, with `Error` before `Closed` on a connection-level failure.
//! No reconnection is automatic; on `on_error` the caller consults
//! [`super::RetryPolicy`] and decides whether to open a new connection.

use std::future::Future;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::event::{ProcessedEvent, process_event};

/// Raw transport-level events, before protocol classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The connection is established.
    Opened,
    /// One message payload (UTF-8 text, expected to be JSON).
    Message(String),
    /// Connection-level failure (network drop, server close with error).
    Error(String),
    /// Orderly end of stream.
    Closed,
}

/// Observable connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Receiving,
    Error,
    Closed,
}

/// A server-push transport. `connect` receives the target URL unvalidated -
/// a malformed URL is the transport's failure to report as
/// [`TransportEvent::Error`].
pub trait StreamTransport: Send + 'static {
    /// Called once with the target URL before any event is delivered.
    fn connect(&mut self, url: &str);

    /// Next transport-level event, or `None` once the stream is exhausted.
    fn next_event(&mut self) -> impl Future<Output = Option<TransportEvent>> + Send;
}

type OpenHandler = Box<dyn FnMut() + Send>;
type MessageHandler = Box<dyn FnMut(ProcessedEvent) + Send>;
type ErrorHandler = Box<dyn FnMut(String) + Send>;

/// Caller callbacks, all optional. Built fluently:
///
/// ```
/// use promptpipe::stream::StreamHandlers;
///
/// let handlers = StreamHandlers::new()
///     .on_message(|event| println!("{:?}", event.event))
///     .on_error(|message| eprintln!("connection lost: {message}"));
/// # let _ = handlers;
/// ```
#[derive(Default)]
pub struct StreamHandlers {
    on_open: Option<OpenHandler>,
    on_message: Option<MessageHandler>,
    on_error: Option<ErrorHandler>,
}

impl StreamHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_open(mut self, handler: impl FnMut() + Send + 'static) -> Self {
        self.on_open = Some(Box::new(handler));
        self
    }

    pub fn on_message(mut self, handler: impl FnMut(ProcessedEvent) + Send + 'static) -> Self {
        self.on_message = Some(Box::new(handler));
        self
    }

    pub fn on_error(mut self, handler: impl FnMut(String) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }
}

/// Handle to a running connection pump.
///
/// Dropping the handle does not stop delivery; [`close`](Self::close) is
/// the cancellation primitive. There is no delivery guarantee: a dropped
/// connection silently stops events, detected only via `on_error` or a
/// timeout the caller imposes.
pub struct ConnectionHandle {
    state_rx: watch::Receiver<ConnectionState>,
    task: JoinHandle<()>,
}

impl ConnectionHandle {
    /// Latest observed lifecycle state.
    pub fn state(&self) -> ConnectionState {
        *self.state_rx.borrow()
    }

    /// Abort the pump. No further handler invocations occur after the
    /// in-flight one, if any, completes.
    pub fn close(&self) {
        self.task.abort();
    }

    /// Whether the pump has terminated (stream end, error, or `close`).
    pub fn is_closed(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the pump to terminate.
    pub async fn closed(self) {
        // Abort shows up as a JoinError; either way the pump is done.
        let _ = self.task.await;
    }
}

/// Establish a connection and start pumping its events through
/// [`process_event`] into the handlers.
///
/// Returns immediately; must be called within a tokio runtime. Malformed
/// individual messages are delivered as invalid `error`-kind events and do
/// not close the stream. A [`TransportEvent::Error`] invokes `on_error`
/// and ends the pump.
pub fn open_connection<T: StreamTransport>(
    url: &str,
    mut transport: T,
    mut handlers: StreamHandlers,
) -> ConnectionHandle {
    let (state_tx, state_rx) = watch::channel(ConnectionState::Connecting);
    transport.connect(url);
    debug!(url, "stream connection opening");

    let task = tokio::spawn(async move {
        while let Some(event) = transport.next_event().await {
            match event {
                TransportEvent::Opened => {
                    let _ = state_tx.send(ConnectionState::Open);
                    if let Some(handler) = handlers.on_open.as_mut() {
                        handler();
                    }
                }
                TransportEvent::Message(raw) => {
                    let _ = state_tx.send(ConnectionState::Receiving);
                    let processed = process_event(&raw);
                    if !processed.is_valid {
                        warn!(kind = processed.event.kind(), "malformed stream event");
                    }
                    if let Some(handler) = handlers.on_message.as_mut() {
                        handler(processed);
                    }
                }
                TransportEvent::Error(message) => {
                    let _ = state_tx.send(ConnectionState::Error);
                    warn!(%message, "stream connection error");
                    if let Some(handler) = handlers.on_error.as_mut() {
                        handler(message);
                    }
                    break;
                }
                TransportEvent::Closed => break,
            }
        }
        let _ = state_tx.send(ConnectionState::Closed);
        debug!("stream connection closed");
    });

    ConnectionHandle { state_rx, task }
}

/// Channel-backed transport: the seam between a real server-push feed and
/// the pump. Production adapters forward their frames into the sender;
/// tests drive it directly.
pub struct ChannelTransport {
    url: Option<String>,
    events: mpsc::UnboundedReceiver<TransportEvent>,
}

impl ChannelTransport {
    /// Returns the feeding sender and the transport.
    pub fn new() -> (mpsc::UnboundedSender<TransportEvent>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            tx,
            Self {
                url: None,
                events: rx,
            },
        )
    }

    /// The URL this transport was connected to, once `connect` has run.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl StreamTransport for ChannelTransport {
    fn connect(&mut self, url: &str) {
        self.url = Some(url.to_string());
    }

    fn next_event(&mut self) -> impl Future<Output = Option<TransportEvent>> + Send {
        self.events.recv()
    }
}
