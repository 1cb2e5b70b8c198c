//! Typed request bodies, one per write operation.

use serde::Serialize;

use crate::constants::DEFAULT_SEARCH_RADIUS_KM;
use crate::types::{AreaId, ChannelId, GeoRectangle, MessageId, TimePeriod, UserId};
use crate::wkt;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Sign-up body. The backend expects the password twice and empty strings
/// for missing names.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
}

impl CreateUserRequest {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        let password = password.into();
        Self {
            email: email.into(),
            username: username.into(),
            password_confirm: password.clone(),
            password,
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
}

impl UpdateProfileRequest {
    pub fn new(first_name: Option<String>, last_name: Option<String>) -> Self {
        Self {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Areas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateAreaRequest {
    pub name: String,
    pub geometry_wkt: String,
    pub start_year: i32,
    pub end_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_month: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_month: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
}

impl CreateAreaRequest {
    pub fn new(name: Option<String>, geometry_wkt: String, period: TimePeriod) -> Self {
        Self {
            name: name.unwrap_or_default(),
            geometry_wkt,
            start_year: period.start_year,
            end_year: period.end_year,
            start_month: period.start_month,
            end_month: period.end_month,
            created_by: None,
        }
    }

    /// Area body for a drawn rectangle; the corners are normalized during
    /// WKT encoding.
    pub fn for_rectangle(name: Option<String>, rect: &GeoRectangle, period: TimePeriod) -> Self {
        Self::new(name, wkt::encode_rectangle(rect), period)
    }

    pub fn created_by(mut self, user: UserId) -> Self {
        self.created_by = Some(user);
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationSearchRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

impl LocationSearchRequest {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km: DEFAULT_SEARCH_RADIUS_KM,
        }
    }
}

/// Every bound is optional; absent bounds are left out of the body.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TimeSearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_month: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_month: Option<u8>,
}

impl From<TimePeriod> for TimeSearchRequest {
    fn from(p: TimePeriod) -> Self {
        Self {
            start_year: Some(p.start_year),
            end_year: Some(p.end_year),
            start_month: p.start_month,
            end_month: p.end_month,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IntersectionSearchRequest {
    pub geometry: String,
}

// ---------------------------------------------------------------------------
// Channels and messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateChannelRequest {
    pub name: String,
    pub area: AreaId,
    pub is_private: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateMessageRequest {
    pub channel: ChannelId,
    pub content: String,
    pub is_anonymous: bool,
    pub contains_pii: bool,
    pub restricted_to_names: Vec<String>,
}

impl CreateMessageRequest {
    /// Anonymous, PII-free and unrestricted unless changed.
    pub fn new(channel: ChannelId, content: impl Into<String>) -> Self {
        Self {
            channel,
            content: content.into(),
            is_anonymous: true,
            contains_pii: false,
            restricted_to_names: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReactionRequest {
    pub message: MessageId,
    pub reaction_type: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DirectMessageRequest {
    pub recipient: UserId,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreateLocationRequest {
    pub area: AreaId,
    pub visited_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited_month: Option<u8>,
}
