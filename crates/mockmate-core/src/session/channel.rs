use crate::error::Result;
use async_trait::async_trait;

/// Something observed on an open channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A text frame.
    Text(String),
    /// The peer closed the channel. `clean` is false for abnormal closures
    /// (dropped connection, close codes other than normal/going-away).
    Closed { clean: bool },
}

/// One open bidirectional channel.
///
/// `next_event` must be cancel-safe: the session client polls it inside
/// `tokio::select!` alongside its command queue.
#[async_trait]
pub trait ChannelTransport: Send {
    async fn send_text(&mut self, text: String) -> Result<()>;

    /// Returns `None` once the channel is finished.
    async fn next_event(&mut self) -> Option<TransportEvent>;

    /// Closes the channel cleanly.
    async fn close(&mut self) -> Result<()>;
}

/// Opens channels. One call = one connection attempt.
#[async_trait]
pub trait ChannelConnector: Send + Sync {
    async fn connect(&self, url: &str) -> Result<Box<dyn ChannelTransport>>;
}
