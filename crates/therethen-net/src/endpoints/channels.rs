use std::collections::HashMap;

use therethen_shared::requests::CreateChannelRequest;
use therethen_shared::{AreaId, Channel, ChannelId, ChannelMembership};

use crate::api::ApiClient;
use crate::error::Result;

impl ApiClient {
    pub async fn create_channel(
        &self,
        name: &str,
        area: &AreaId,
        is_private: bool,
    ) -> Result<Channel> {
        let body = CreateChannelRequest {
            name: name.to_string(),
            area: area.clone(),
            is_private,
        };
        self.post("/channels/", &body).await
    }

    pub async fn my_channels(&self) -> Result<Vec<Channel>> {
        self.get("/channels/my_channels/").await
    }

    pub async fn join_channel(&self, channel: &ChannelId) -> Result<ChannelMembership> {
        self.post_empty(&format!("/channels/{channel}/join/")).await
    }

    /// Leave a channel. The backend answers with a small status map.
    pub async fn leave_channel(&self, channel: &ChannelId) -> Result<HashMap<String, String>> {
        self.post_empty(&format!("/channels/{channel}/leave/")).await
    }

    pub async fn channel_members(&self, channel: &ChannelId) -> Result<Vec<ChannelMembership>> {
        self.get(&format!("/channels/{channel}/members/")).await
    }
}
