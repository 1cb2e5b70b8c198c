//! Backend operations, grouped by resource.
//!
//! Each sub-module adds methods to [`ApiClient`](crate::ApiClient). None of
//! them has transport logic of its own: they choose a route, a verb, a
//! request body type and a response type.

pub mod areas;
pub mod auth;
pub mod channels;
pub mod direct_messages;
pub mod locations;
pub mod messages;
