//! # therethen-shared
//!
//! Pure, I/O-free building blocks shared by the network and client crates:
//! geographic value types, the screen ↔ map transform, rectangle drawing,
//! the WKT polygon codec, and the wire records exchanged with the backend.

pub mod constants;
pub mod drawing;
pub mod models;
pub mod protocol;
pub mod requests;
pub mod transform;
pub mod types;
pub mod wkt;

pub use drawing::{DrawingState, RectangleDrawer};
pub use models::*;
pub use protocol::RealtimeEnvelope;
pub use types::*;
