//! Session domain module.
//!
//! - `model`: Session identity and channel lifecycle (`Session`, `ChannelState`)
//! - `channel`: Transport seam for the interview channel (`ChannelConnector`, `ChannelTransport`)

mod channel;
mod model;

pub use channel::{ChannelConnector, ChannelTransport, TransportEvent};
pub use model::{ChannelState, Session, SessionTarget};
