//! The area board behind the map screen: the user's drawn rectangle, the
//! selected time period and the areas currently pinned on the map.

use std::collections::HashSet;
use std::future::Future;

use tracing::{info, warn};

use therethen_net::ApiClient;
use therethen_shared::constants::DRAWN_AREA_NAME;
use therethen_shared::requests::{CreateAreaRequest, TimeSearchRequest};
use therethen_shared::{AreaId, GeoRectangle, GeographicArea, TimePeriod};

use crate::error::{ClientError, Result};

/// Area operations the board depends on.
pub trait AreaService {
    fn has_valid_auth_token(&self) -> bool;

    fn create_area(
        &self,
        request: &CreateAreaRequest,
    ) -> impl Future<Output = therethen_net::Result<GeographicArea>> + Send;

    fn list_areas(&self) -> impl Future<Output = therethen_net::Result<Vec<GeographicArea>>> + Send;

    fn search_areas_by_time(
        &self,
        request: &TimeSearchRequest,
    ) -> impl Future<Output = therethen_net::Result<Vec<GeographicArea>>> + Send;
}

impl AreaService for ApiClient {
    fn has_valid_auth_token(&self) -> bool {
        ApiClient::has_valid_auth_token(self)
    }

    fn create_area(
        &self,
        request: &CreateAreaRequest,
    ) -> impl Future<Output = therethen_net::Result<GeographicArea>> + Send {
        ApiClient::create_area(self, request)
    }

    fn list_areas(&self) -> impl Future<Output = therethen_net::Result<Vec<GeographicArea>>> + Send {
        ApiClient::list_areas(self)
    }

    fn search_areas_by_time(
        &self,
        request: &TimeSearchRequest,
    ) -> impl Future<Output = therethen_net::Result<Vec<GeographicArea>>> + Send {
        ApiClient::search_areas_by_time(self, request)
    }
}

#[derive(Debug, Default)]
pub struct AreaBoard {
    areas: Vec<GeographicArea>,
    drawn: Option<GeoRectangle>,
    time_period: TimePeriod,
    needs_authentication: bool,
}

impl AreaBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn areas(&self) -> &[GeographicArea] {
        &self.areas
    }

    pub fn drawn_rectangle(&self) -> Option<GeoRectangle> {
        self.drawn
    }

    pub fn set_drawn_rectangle(&mut self, rect: Option<GeoRectangle>) {
        self.drawn = rect;
    }

    pub fn time_period(&self) -> TimePeriod {
        self.time_period
    }

    pub fn set_time_period(&mut self, period: TimePeriod) {
        self.time_period = period;
    }

    /// Set when the backend asked for a login; the host shows its sign-in
    /// screen and calls [`AreaBoard::clear_authentication_flag`] afterwards.
    pub fn needs_authentication(&self) -> bool {
        self.needs_authentication
    }

    pub fn clear_authentication_flag(&mut self) {
        self.needs_authentication = false;
    }

    /// Persist the drawn rectangle as a new area for the board's period.
    ///
    /// On success the area is appended and the drawing cleared. On failure
    /// the drawing is kept so the user can retry.
    pub async fn create_from_drawing<S: AreaService>(&mut self, api: &S) -> Result<GeographicArea> {
        let rect = self.drawn.ok_or(ClientError::NoDrawnArea)?;
        let request =
            CreateAreaRequest::for_rectangle(Some(DRAWN_AREA_NAME.to_string()), &rect, self.time_period);

        let area = api.create_area(&request).await.map_err(|e| {
            warn!(error = %e, "Failed to create area from drawing");
            self.note_failure(e)
        })?;

        info!(area = %area.id, period = %self.time_period, "Area created from drawing");
        self.areas.push(area.clone());
        self.drawn = None;
        Ok(area)
    }

    /// Replace the board with every area the backend lists.
    pub async fn load_all<S: AreaService>(&mut self, api: &S) -> Result<()> {
        let areas = api.list_areas().await.map_err(|e| {
            warn!(error = %e, "Failed to load areas");
            self.note_failure(e)
        })?;
        info!(count = areas.len(), "Areas loaded");
        self.areas = areas;
        Ok(())
    }

    /// Add areas active during the board's time period. Areas already on
    /// the board are skipped. Returns how many were added.
    pub async fn search_by_time<S: AreaService>(&mut self, api: &S) -> Result<usize> {
        if !api.has_valid_auth_token() {
            self.needs_authentication = true;
            return Err(ClientError::NotAuthenticated);
        }

        let request = TimeSearchRequest::from(self.time_period);
        let found = api.search_areas_by_time(&request).await.map_err(|e| {
            warn!(error = %e, period = %self.time_period, "Time search failed");
            self.note_failure(e)
        })?;

        let mut known: HashSet<AreaId> = self.areas.iter().map(|a| a.id.clone()).collect();
        let before = self.areas.len();
        for area in found {
            if known.insert(area.id.clone()) {
                self.areas.push(area);
            }
        }

        let added = self.areas.len() - before;
        info!(added, period = %self.time_period, "Time search merged");
        Ok(added)
    }

    fn note_failure(&mut self, e: therethen_net::ApiError) -> ClientError {
        if e.is_authentication_required() {
            self.needs_authentication = true;
        }
        ClientError::Api(e)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use therethen_net::ApiError;
    use therethen_shared::GeoPoint;

    use super::*;

    fn area(id: &str) -> GeographicArea {
        GeographicArea {
            id: AreaId(id.to_string()),
            name: Some(format!("Area {id}")),
            geometry_wkt: Some("POLYGON((10 10, 11 10, 11 9, 10 9, 10 10))".to_string()),
            start_year: 2020,
            end_year: 2024,
            start_month: None,
            end_month: None,
            created_by: None,
            created_at: None,
        }
    }

    #[derive(Default)]
    struct StubAreas {
        token: bool,
        listed: Vec<GeographicArea>,
        failure: Option<String>,
        created: Mutex<Vec<CreateAreaRequest>>,
        searches: Mutex<Vec<TimeSearchRequest>>,
    }

    impl StubAreas {
        fn outcome<T>(&self, ok: T) -> therethen_net::Result<T> {
            match &self.failure {
                Some(msg) => Err(ApiError::ServerFailure(msg.clone())),
                None => Ok(ok),
            }
        }
    }

    impl AreaService for StubAreas {
        fn has_valid_auth_token(&self) -> bool {
            self.token
        }

        fn create_area(
            &self,
            request: &CreateAreaRequest,
        ) -> impl Future<Output = therethen_net::Result<GeographicArea>> + Send {
            self.created.lock().unwrap().push(request.clone());
            let mut created = area("new");
            created.name = Some(request.name.clone());
            created.geometry_wkt = Some(request.geometry_wkt.clone());
            std::future::ready(self.outcome(created))
        }

        fn list_areas(
            &self,
        ) -> impl Future<Output = therethen_net::Result<Vec<GeographicArea>>> + Send {
            std::future::ready(self.outcome(self.listed.clone()))
        }

        fn search_areas_by_time(
            &self,
            request: &TimeSearchRequest,
        ) -> impl Future<Output = therethen_net::Result<Vec<GeographicArea>>> + Send {
            self.searches.lock().unwrap().push(request.clone());
            std::future::ready(self.outcome(self.listed.clone()))
        }
    }

    fn drawn() -> GeoRectangle {
        GeoRectangle::new(GeoPoint::new(9.0, 11.0), GeoPoint::new(10.0, 10.0))
    }

    #[tokio::test]
    async fn test_create_without_drawing() {
        let api = StubAreas::default();
        let mut board = AreaBoard::new();
        let err = board.create_from_drawing(&api).await.unwrap_err();
        assert!(matches!(err, ClientError::NoDrawnArea));
        assert!(api.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_from_drawing() {
        let api = StubAreas::default();
        let mut board = AreaBoard::new();
        board.set_time_period(TimePeriod::years(2021, 2022).with_months(1, 6));
        board.set_drawn_rectangle(Some(drawn()));

        let created = board.create_from_drawing(&api).await.unwrap();
        assert_eq!(created.name.as_deref(), Some("Drawn Area"));
        assert_eq!(board.areas().len(), 1);
        assert!(board.drawn_rectangle().is_none());

        let sent = api.created.lock().unwrap();
        assert_eq!(sent[0].geometry_wkt, "POLYGON((10 10, 11 10, 11 9, 10 9, 10 10))");
        assert_eq!(sent[0].start_year, 2021);
        assert_eq!(sent[0].end_month, Some(6));
    }

    #[tokio::test]
    async fn test_failed_create_keeps_drawing() {
        let api = StubAreas {
            failure: Some("HTTP 500".into()),
            ..Default::default()
        };
        let mut board = AreaBoard::new();
        board.set_drawn_rectangle(Some(drawn()));

        assert!(board.create_from_drawing(&api).await.is_err());
        assert_eq!(board.drawn_rectangle(), Some(drawn()));
        assert!(board.areas().is_empty());
        assert!(!board.needs_authentication());
    }

    #[tokio::test]
    async fn test_load_all_replaces() {
        let api = StubAreas {
            listed: vec![area("a"), area("b")],
            ..Default::default()
        };
        let mut board = AreaBoard::new();
        board.load_all(&api).await.unwrap();
        board.load_all(&api).await.unwrap();
        assert_eq!(board.areas().len(), 2);
    }

    #[tokio::test]
    async fn test_load_all_flags_authentication() {
        let api = StubAreas {
            failure: Some("Authentication required".into()),
            ..Default::default()
        };
        let mut board = AreaBoard::new();
        let err = board.load_all(&api).await.unwrap_err();
        assert!(matches!(err, ClientError::Api(ApiError::ServerFailure(_))));
        assert!(board.needs_authentication());

        board.clear_authentication_flag();
        assert!(!board.needs_authentication());
    }

    #[tokio::test]
    async fn test_search_requires_token() {
        let api = StubAreas::default();
        let mut board = AreaBoard::new();
        let err = board.search_by_time(&api).await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
        assert!(board.needs_authentication());
        assert!(api.searches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_skips_known_areas() {
        let api = StubAreas {
            token: true,
            listed: vec![area("a"), area("b"), area("b"), area("c")],
            ..Default::default()
        };
        let mut board = AreaBoard::new();
        board.areas.push(area("a"));

        assert_eq!(board.search_by_time(&api).await.unwrap(), 2);
        let ids: Vec<_> = board.areas().iter().map(|a| a.id.0.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);

        assert_eq!(board.search_by_time(&api).await.unwrap(), 0);

        let searches = api.searches.lock().unwrap();
        assert_eq!(searches[0].start_year, Some(2020));
        assert_eq!(searches[0].end_year, Some(2024));
        assert_eq!(searches[0].start_month, None);
    }
}
