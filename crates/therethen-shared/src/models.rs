//! Server-owned records as they appear on the JSON wire.
//!
//! Field names are snake_case on both sides. Optional fields that are
//! absent in a payload decode to `None` and are omitted again on encode,
//! so presence survives a round trip.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAP_CENTER_LAT, DEFAULT_MAP_CENTER_LON};
use crate::types::{AreaId, ChannelId, GeoPoint, MessageId, TimePeriod, Timestamp, UserId};
use crate::wkt;

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Token pair returned by login, refresh and sign-up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
}

/// Error body shape used by the backend for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_date: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A `created_by` reference: either a bare id or an embedded user record,
/// depending on the endpoint's serializer depth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum UserRef {
    Id(UserId),
    User(Box<User>),
}

impl UserRef {
    pub fn id(&self) -> &UserId {
        match self {
            UserRef::Id(id) => id,
            UserRef::User(user) => &user.id,
        }
    }
}

// ---------------------------------------------------------------------------
// Geographic area
// ---------------------------------------------------------------------------

/// A persisted area: a WKT footprint plus an inclusive year range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeographicArea {
    pub id: AreaId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_wkt: Option<String>,
    pub start_year: i32,
    pub end_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl GeographicArea {
    pub fn time_period(&self) -> TimePeriod {
        TimePeriod {
            start_year: self.start_year,
            end_year: self.end_year,
            start_month: self.start_month,
            end_month: self.end_month,
        }
    }

    /// Decoded polygon ring; empty when there is no usable geometry.
    pub fn geometry(&self) -> Vec<GeoPoint> {
        self.geometry_wkt
            .as_deref()
            .map(wkt::decode_polygon)
            .unwrap_or_default()
    }

    /// Where to pin the area on the map. Falls back to the default map
    /// centre when the geometry is missing or unparseable.
    pub fn center(&self) -> GeoPoint {
        wkt::polygon_center(&self.geometry())
            .unwrap_or(GeoPoint::new(DEFAULT_MAP_CENTER_LAT, DEFAULT_MAP_CENTER_LON))
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    pub area: GeographicArea,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,
    pub is_private: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    pub member_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelMembership {
    pub id: String,
    pub channel: Channel,
    pub user: User,
    pub joined_at: Timestamp,
    pub is_admin: bool,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub channel: Channel,
    pub author: User,
    pub content: String,
    pub is_anonymous: bool,
    pub contains_pii: bool,
    pub restricted_to_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// Reaction type → count.
    pub reactions: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageReaction {
    pub id: String,
    pub message: Message,
    pub user: User,
    pub reaction_type: String,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectMessage {
    pub id: String,
    pub sender: User,
    pub recipient: User,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,
}

// ---------------------------------------------------------------------------
// User location
// ---------------------------------------------------------------------------

/// A user's recorded visit to an area.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserLocation {
    pub id: String,
    pub user: User,
    pub area: GeographicArea,
    pub visited_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visited_month: Option<u8>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Paginated list envelope. Cursors are passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    pub results: Vec<T>,
}
