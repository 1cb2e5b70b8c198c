use therethen_shared::requests::{
    CreateAreaRequest, IntersectionSearchRequest, LocationSearchRequest, TimeSearchRequest,
};
use therethen_shared::GeographicArea;

use crate::api::ApiClient;
use crate::error::Result;

impl ApiClient {
    pub async fn create_area(&self, request: &CreateAreaRequest) -> Result<GeographicArea> {
        self.post("/areas/", request).await
    }

    pub async fn list_areas(&self) -> Result<Vec<GeographicArea>> {
        self.get("/areas/").await
    }

    pub async fn search_areas_by_location(
        &self,
        request: &LocationSearchRequest,
    ) -> Result<Vec<GeographicArea>> {
        self.post("/areas/search_by_location/", request).await
    }

    pub async fn search_areas_by_time(
        &self,
        request: &TimeSearchRequest,
    ) -> Result<Vec<GeographicArea>> {
        self.post("/areas/search_by_time/", request).await
    }

    /// Areas whose footprint intersects the given WKT geometry.
    pub async fn search_areas_by_intersection(
        &self,
        geometry_wkt: &str,
    ) -> Result<Vec<GeographicArea>> {
        let body = IntersectionSearchRequest {
            geometry: geometry_wkt.to_string(),
        };
        self.post("/areas/search_by_intersection/", &body).await
    }
}
