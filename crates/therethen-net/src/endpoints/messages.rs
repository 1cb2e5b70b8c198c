use therethen_shared::requests::{CreateMessageRequest, ReactionRequest};
use therethen_shared::{ChannelId, Message, MessageId, MessageReaction};

use crate::api::{with_query, ApiClient};
use crate::error::Result;

impl ApiClient {
    pub async fn create_message(&self, request: &CreateMessageRequest) -> Result<Message> {
        self.post("/messages/", request).await
    }

    pub async fn messages_by_channel(&self, channel: &ChannelId) -> Result<Vec<Message>> {
        self.get(&with_query("/messages/by_channel/", "channel_id", &channel.0))
            .await
    }

    pub async fn react_to_message(
        &self,
        message: &MessageId,
        reaction_type: &str,
    ) -> Result<MessageReaction> {
        let body = ReactionRequest {
            message: message.clone(),
            reaction_type: reaction_type.to_string(),
        };
        self.post("/reactions/", &body).await
    }
}
