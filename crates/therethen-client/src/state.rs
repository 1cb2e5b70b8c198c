//! Application state a host UI keeps for the lifetime of a window.
//!
//! Holds the API client and its session, the realtime stream, the map
//! viewport with its drawing gesture, and the area board. The host owns
//! it (typically behind `Arc<tokio::sync::Mutex<_>>`) and calls into it
//! from its event handlers.

use tokio::sync::mpsc;
use tracing::info;

use therethen_net::{ApiClient, AuthSession, ClientConfig, StreamClient};
use therethen_shared::constants::CREATED_AREA_SPAN_DEGREES;
use therethen_shared::{
    CoordinateSpan, GeoRectangle, GeographicArea, RealtimeEnvelope, RectangleDrawer, ScreenPoint,
    ScreenRect, ScreenSize, Viewport,
};

use crate::commands::areas::AreaBoard;
use crate::error::{ClientError, Result};
use crate::events::forward_envelopes;

const ENVELOPE_CAPACITY: usize = 256;

pub struct ClientState {
    pub config: ClientConfig,

    /// REST client; shares its [`AuthSession`] with every clone.
    pub api: ApiClient,

    pub stream: StreamClient,

    /// Refresh token from the last login or refresh. `None` when signed out.
    pub refresh_token: Option<String>,

    /// Visible map region and the map view's size in points.
    pub viewport: Viewport,
    pub screen: ScreenSize,

    pub drawer: RectangleDrawer,
    pub board: AreaBoard,
}

impl ClientState {
    pub fn new(config: ClientConfig, screen: ScreenSize) -> Result<Self> {
        let api = ApiClient::new(&config, AuthSession::new())?;
        let stream = StreamClient::new(config.stream_url.clone());
        Ok(Self {
            config,
            api,
            stream,
            refresh_token: None,
            viewport: Viewport::default(),
            screen,
            drawer: RectangleDrawer::new(),
            board: AreaBoard::new(),
        })
    }

    pub fn from_env(screen: ScreenSize) -> Result<Self> {
        Self::new(ClientConfig::from_env(), screen)
    }

    pub fn session(&self) -> &AuthSession {
        self.api.session()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let tokens = self.api.login(email, password).await?;
        self.refresh_token = Some(tokens.refresh);
        self.board.clear_authentication_flag();
        Ok(())
    }

    /// Swap the stored refresh token for a fresh pair.
    pub async fn refresh_session(&mut self) -> Result<()> {
        let refresh = self
            .refresh_token
            .clone()
            .ok_or(ClientError::NotAuthenticated)?;
        let tokens = self.api.refresh_token(&refresh).await?;
        self.refresh_token = Some(tokens.refresh);
        Ok(())
    }

    pub async fn sign_out(&mut self) {
        self.api.sign_out();
        self.refresh_token = None;
        self.stream.disconnect().await;
    }

    /// Open the realtime stream and receive its frames as envelopes.
    pub async fn connect_stream(&mut self) -> Result<mpsc::Receiver<RealtimeEnvelope>> {
        let frames = self.stream.connect().await?;
        let (tx, rx) = mpsc::channel(ENVELOPE_CAPACITY);
        tokio::spawn(forward_envelopes(frames, tx));
        info!(url = %self.config.stream_url, "Realtime envelopes flowing");
        Ok(rx)
    }

    /// Persist the drawn rectangle and zoom the map onto the new area.
    pub async fn create_area_from_drawing(&mut self) -> Result<GeographicArea> {
        let area = self.board.create_from_drawing(&self.api).await?;
        self.focus_on(&area);
        Ok(area)
    }

    /// Centre the map on `area` at close zoom.
    pub fn focus_on(&mut self, area: &GeographicArea) {
        self.viewport = Viewport::new(
            area.center(),
            CoordinateSpan::new(CREATED_AREA_SPAN_DEGREES, CREATED_AREA_SPAN_DEGREES),
        );
    }

    // --- Map gestures ---

    pub fn resize(&mut self, screen: ScreenSize) {
        self.screen = screen;
    }

    /// Feed a drag update; returns the rectangle to preview.
    pub fn drag_changed(&mut self, start: ScreenPoint, location: ScreenPoint) -> Option<ScreenRect> {
        self.drawer.gesture_changed(start, location);
        self.drawer.preview()
    }

    /// Finish a drag. The resulting rectangle becomes the board's drawn
    /// area, ready for [`AreaBoard::create_from_drawing`].
    pub fn drag_ended(&mut self, location: ScreenPoint) -> Option<GeoRectangle> {
        let rect = self.drawer.gesture_ended(location, &self.viewport, self.screen)?;
        self.board.set_drawn_rectangle(Some(rect));
        Some(rect)
    }
}
