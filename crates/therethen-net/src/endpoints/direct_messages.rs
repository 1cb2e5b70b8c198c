use std::collections::HashMap;

use therethen_shared::requests::DirectMessageRequest;
use therethen_shared::{DirectMessage, UserId};

use crate::api::{with_query, ApiClient};
use crate::error::Result;

impl ApiClient {
    pub async fn send_direct_message(
        &self,
        recipient: &UserId,
        content: &str,
    ) -> Result<DirectMessage> {
        let body = DirectMessageRequest {
            recipient: recipient.clone(),
            content: content.to_string(),
        };
        self.post("/direct-messages/", &body).await
    }

    /// Direct messages exchanged with `user`, in server order.
    pub async fn conversation(&self, user: &UserId) -> Result<Vec<DirectMessage>> {
        self.get(&with_query("/direct-messages/conversation/", "user_id", &user.0))
            .await
    }

    pub async fn mark_direct_message_read(&self, message_id: &str) -> Result<DirectMessage> {
        self.post_empty(&format!("/direct-messages/{message_id}/mark_read/"))
            .await
    }

    pub async fn unread_count(&self) -> Result<HashMap<String, i64>> {
        self.get("/direct-messages/unread_count/").await
    }
}
