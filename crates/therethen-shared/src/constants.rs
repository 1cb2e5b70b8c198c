/// Application name
pub const APP_NAME: &str = "There Then";

/// Default REST API base address (local development backend)
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Default realtime stream address
pub const DEFAULT_STREAM_URL: &str = "ws://localhost:8000/ws/chat/";

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Map centre used when no location or geometry is available (San Francisco)
pub const DEFAULT_MAP_CENTER_LAT: f64 = 37.7749;
pub const DEFAULT_MAP_CENTER_LON: f64 = -122.4194;

/// Angular span of the initial map viewport, in degrees
pub const DEFAULT_MAP_SPAN_DEGREES: f64 = 0.05;

/// Span the map zooms to after an area is created, in degrees
pub const CREATED_AREA_SPAN_DEGREES: f64 = 0.01;

/// Default time period attached to newly drawn areas
pub const DEFAULT_START_YEAR: i32 = 2020;
pub const DEFAULT_END_YEAR: i32 = 2024;

/// Name given to areas created from a drawn rectangle
pub const DRAWN_AREA_NAME: &str = "Drawn Area";

/// Default radius for location-based area search
pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 10.0;
