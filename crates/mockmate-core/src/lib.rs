//! Domain types and service interfaces of the MockMate interview client.

pub mod api;
pub mod auth;
pub mod config;
pub mod cv;
pub mod error;
pub mod id;
pub mod interview;
pub mod job;
pub mod notification;
pub mod reconnect;
pub mod session;

// Re-export common error type
pub use error::{MockMateError, Result};
