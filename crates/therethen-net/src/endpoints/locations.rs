use therethen_shared::requests::CreateLocationRequest;
use therethen_shared::{AreaId, UserLocation};

use crate::api::{with_query, ApiClient};
use crate::error::Result;

impl ApiClient {
    /// Record that the current user was in `area` during the given year.
    pub async fn create_location(
        &self,
        area: &AreaId,
        visited_year: i32,
        visited_month: Option<u8>,
    ) -> Result<UserLocation> {
        let body = CreateLocationRequest {
            area: area.clone(),
            visited_year,
            visited_month,
        };
        self.post("/locations/", &body).await
    }

    pub async fn user_locations(&self) -> Result<Vec<UserLocation>> {
        self.get("/locations/").await
    }

    pub async fn user_locations_by_area(&self, area: &AreaId) -> Result<Vec<UserLocation>> {
        self.get(&with_query("/locations/by_area/", "area_id", &area.0))
            .await
    }
}
