//! Network adapters for the MockMate backend.
//!
//! - `api_client`: REST endpoints over `reqwest` with a session cookie jar
//! - `ws_channel`: interview channel over `tokio-tungstenite`

pub mod api_client;
pub mod ws_channel;

pub use api_client::ApiClient;
pub use ws_channel::{WsConnector, WsTransport};
