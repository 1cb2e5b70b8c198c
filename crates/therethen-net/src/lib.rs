//! # therethen-net
//!
//! Transport layer for the There Then backend: a typed JSON request client
//! with bearer-token authentication, the per-resource endpoint methods
//! built on it, and the realtime text-frame stream.

pub mod api;
pub mod config;
pub mod endpoints;
pub mod realtime;
pub mod session;

mod error;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result, StreamError};
pub use realtime::{ConnectionState, StreamClient};
pub use session::AuthSession;
