use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_END_YEAR, DEFAULT_MAP_CENTER_LAT, DEFAULT_MAP_CENTER_LON, DEFAULT_MAP_SPAN_DEGREES,
    DEFAULT_START_YEAR,
};

// Server-assigned identifiers are opaque strings (UUIDs in practice).

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AreaId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ChannelId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for AreaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A server timestamp, kept exactly as sent.
///
/// The backend emits RFC 3339 with an offset, but naive timestamps
/// (no zone) also occur; neither fails a decode and neither is rewritten
/// on encode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Timestamp(pub String);

impl Timestamp {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The instant in UTC. Naive timestamps are read as UTC; `None` when
    /// the text is not a timestamp at all.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        if let Ok(t) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(t.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.0, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|t| t.and_utc())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Geographic space
// ---------------------------------------------------------------------------

/// A WGS84 coordinate in degrees. Range is not validated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Angular extent of a viewport. Both deltas must be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSpan {
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl CoordinateSpan {
    pub const fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude_delta,
            longitude_delta,
        }
    }
}

/// The visible map region: a centre coordinate plus an angular span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub span: CoordinateSpan,
}

impl Viewport {
    pub const fn new(center: GeoPoint, span: CoordinateSpan) -> Self {
        Self { center, span }
    }

    /// Move the centre, keeping the span (location updates, panning).
    pub fn recenter(&mut self, center: GeoPoint) {
        self.center = center;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(DEFAULT_MAP_CENTER_LAT, DEFAULT_MAP_CENTER_LON),
            span: CoordinateSpan::new(DEFAULT_MAP_SPAN_DEGREES, DEFAULT_MAP_SPAN_DEGREES),
        }
    }
}

/// A rectangle drawn on the map, defined by two opposite corners.
///
/// Corners come straight from the drawing gesture and are not guaranteed to
/// be the geographic north-west / south-east pair; call [`normalized`] before
/// treating them as such.
///
/// [`normalized`]: GeoRectangle::normalized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRectangle {
    pub top_left: GeoPoint,
    pub bottom_right: GeoPoint,
}

impl GeoRectangle {
    pub const fn new(top_left: GeoPoint, bottom_right: GeoPoint) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Reorder the corners so `top_left` is the north-west corner
    /// (max latitude, min longitude) and `bottom_right` the south-east one.
    pub fn normalized(&self) -> Self {
        let (a, b) = (self.top_left, self.bottom_right);
        Self {
            top_left: GeoPoint::new(a.latitude.max(b.latitude), a.longitude.min(b.longitude)),
            bottom_right: GeoPoint::new(a.latitude.min(b.latitude), a.longitude.max(b.longitude)),
        }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.top_left.latitude + self.bottom_right.latitude) / 2.0,
            (self.top_left.longitude + self.bottom_right.longitude) / 2.0,
        )
    }

    pub fn span(&self) -> CoordinateSpan {
        CoordinateSpan::new(
            (self.top_left.latitude - self.bottom_right.latitude).abs(),
            (self.top_left.longitude - self.bottom_right.longitude).abs(),
        )
    }
}

// ---------------------------------------------------------------------------
// Screen space
// ---------------------------------------------------------------------------

/// A point on the drawing surface, in pixels. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned pixel rectangle (origin is the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub origin: ScreenPoint,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    /// Bounding rectangle of two arbitrary corners.
    pub fn from_corners(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            origin: ScreenPoint::new(a.x.min(b.x), a.y.min(b.y)),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn min_corner(&self) -> ScreenPoint {
        self.origin
    }

    pub fn max_corner(&self) -> ScreenPoint {
        ScreenPoint::new(self.origin.x + self.width, self.origin.y + self.height)
    }

    pub fn mid(&self) -> ScreenPoint {
        ScreenPoint::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A year range with optional months, attached to area creation and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriod {
    pub start_year: i32,
    pub end_year: i32,
    pub start_month: Option<u8>,
    pub end_month: Option<u8>,
}

impl TimePeriod {
    pub const fn years(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
            start_month: None,
            end_month: None,
        }
    }

    pub fn with_months(mut self, start_month: u8, end_month: u8) -> Self {
        self.start_month = Some(start_month);
        self.end_month = Some(end_month);
        self
    }

    /// `"3/2020 - 7/2024"` when both months are set, otherwise `"2020 - 2024"`.
    pub fn display_text(&self) -> String {
        match (self.start_month, self.end_month) {
            (Some(sm), Some(em)) => {
                format!("{}/{} - {}/{}", sm, self.start_year, em, self.end_year)
            }
            _ => format!("{} - {}", self.start_year, self.end_year),
        }
    }
}

impl Default for TimePeriod {
    fn default() -> Self {
        Self::years(DEFAULT_START_YEAR, DEFAULT_END_YEAR)
    }
}

impl std::fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_text())
    }
}
