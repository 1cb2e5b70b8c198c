//! Operations a host UI invokes, grouped by screen.
//!
//! Each module is generic over a small service trait implemented by
//! [`therethen_net::ApiClient`], so the flows can be driven without a
//! backend.

pub mod areas;
pub mod messaging;
