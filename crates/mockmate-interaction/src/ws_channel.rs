//! WebSocket transport for the interview channel.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use mockmate_core::session::{ChannelConnector, ChannelTransport, TransportEvent};
use mockmate_core::{MockMateError, Result};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Opens interview channels with `tokio-tungstenite`.
#[derive(Debug, Default, Clone)]
pub struct WsConnector;

impl WsConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ChannelConnector for WsConnector {
    async fn connect(&self, url: &str) -> Result<Box<dyn ChannelTransport>> {
        tracing::debug!("[WsChannel] Connecting to {}", redact_token(url));
        let (stream, response) = connect_async(url)
            .await
            .map_err(|e| MockMateError::transport(format!("WebSocket connect failed: {}", e)))?;
        tracing::debug!("[WsChannel] Handshake completed ({})", response.status());
        Ok(Box::new(WsTransport {
            stream,
            finished: false,
        }))
    }
}

/// One open WebSocket connection.
pub struct WsTransport {
    stream: WsStream,
    finished: bool,
}

#[async_trait]
impl ChannelTransport for WsTransport {
    async fn send_text(&mut self, text: String) -> Result<()> {
        if self.finished {
            return Err(MockMateError::channel("Channel is closed"));
        }
        self.stream
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| MockMateError::transport(format!("WebSocket send failed: {}", e)))
    }

    async fn next_event(&mut self) -> Option<TransportEvent> {
        if self.finished {
            return None;
        }

        // `StreamExt::next` is cancel-safe, so this loop is too.
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Some(TransportEvent::Text(text.to_string()));
                }
                Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                    Ok(text) => return Some(TransportEvent::Text(text)),
                    Err(_) => {
                        tracing::warn!(
                            "[WsChannel] Ignoring non UTF-8 binary frame ({} bytes)",
                            bytes.len()
                        );
                    }
                },
                // Pongs are queued by tungstenite itself.
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {}
                Some(Ok(Message::Close(frame))) => {
                    self.finished = true;
                    let clean = is_clean_close(frame.as_ref());
                    tracing::debug!("[WsChannel] Close frame received: {:?}", frame);
                    return Some(TransportEvent::Closed { clean });
                }
                Some(Err(e)) => {
                    self.finished = true;
                    tracing::warn!("[WsChannel] Read error: {}", e);
                    return Some(TransportEvent::Closed { clean: false });
                }
                None => {
                    self.finished = true;
                    return Some(TransportEvent::Closed { clean: false });
                }
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.stream
            .close(Some(CloseFrame {
                code: CloseCode::Normal,
                reason: "interview ended".into(),
            }))
            .await
            .map_err(|e| MockMateError::transport(format!("WebSocket close failed: {}", e)))
    }
}

/// Normal and going-away closures end the session; anything else (or a
/// close without a status) is treated as a dropped connection.
fn is_clean_close(frame: Option<&CloseFrame>) -> bool {
    matches!(
        frame.map(|f| f.code),
        Some(CloseCode::Normal) | Some(CloseCode::Away)
    )
}

/// Strips the bearer token from a channel URL for logging.
fn redact_token(url: &str) -> String {
    match url.split_once("token=") {
        Some((head, _)) => format!("{}token=***", head),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(code: CloseCode) -> CloseFrame {
        CloseFrame {
            code,
            reason: "".into(),
        }
    }

    #[test]
    fn test_clean_close_codes() {
        assert!(is_clean_close(Some(&frame(CloseCode::Normal))));
        assert!(is_clean_close(Some(&frame(CloseCode::Away))));
        assert!(!is_clean_close(Some(&frame(CloseCode::Error))));
        assert!(!is_clean_close(Some(&frame(CloseCode::Abnormal))));
        assert!(!is_clean_close(None));
    }

    #[test]
    fn test_redact_token() {
        assert_eq!(
            redact_token("ws://localhost:8000/interview/3/?token=secret"),
            "ws://localhost:8000/interview/3/?token=***"
        );
        assert_eq!(
            redact_token("ws://localhost:8000/interview/3/"),
            "ws://localhost:8000/interview/3/"
        );
    }

    #[tokio::test]
    async fn test_connect_refused_is_transport_error() {
        let connector = WsConnector::new();
        // Port 9 (discard) is not expected to accept WebSocket handshakes.
        let err = match connector.connect("ws://127.0.0.1:9/interview/1/").await {
            Ok(_) => panic!("connection unexpectedly succeeded"),
            Err(err) => err,
        };
        assert!(err.is_transport());
    }
}
