//! # therethen-client
//!
//! Application layer a host UI drives: session and stream lifecycle,
//! the area board behind the map, and channel messaging with realtime
//! fan-out.

pub mod commands;
pub mod error;
pub mod events;
pub mod state;

use tracing_subscriber::{fmt, EnvFilter};

pub use error::{ClientError, Result};
pub use state::ClientState;

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// crate-scoped default filter. Calling it again is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("therethen_client=debug,therethen_net=debug,warn"));

    let installed = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();

    if installed.is_ok() {
        tracing::info!("Starting There Then client");
    }
}
