//! Channel messaging: history from the API plus live envelopes from the
//! realtime stream.

use std::future::Future;

use tracing::{debug, info, warn};

use therethen_net::{ApiClient, StreamClient};
use therethen_shared::requests::CreateMessageRequest;
use therethen_shared::{ChannelId, Message, RealtimeEnvelope};

use crate::error::Result;

pub trait MessageService {
    fn create_message(
        &self,
        request: &CreateMessageRequest,
    ) -> impl Future<Output = therethen_net::Result<Message>> + Send;

    fn messages_by_channel(
        &self,
        channel: &ChannelId,
    ) -> impl Future<Output = therethen_net::Result<Vec<Message>>> + Send;
}

impl MessageService for ApiClient {
    fn create_message(
        &self,
        request: &CreateMessageRequest,
    ) -> impl Future<Output = therethen_net::Result<Message>> + Send {
        ApiClient::create_message(self, request)
    }

    fn messages_by_channel(
        &self,
        channel: &ChannelId,
    ) -> impl Future<Output = therethen_net::Result<Vec<Message>>> + Send {
        ApiClient::messages_by_channel(self, channel)
    }
}

/// Outbound side of the realtime stream.
pub trait FrameSink {
    /// Fire-and-forget.
    fn send_frame(&self, text: String);
}

impl FrameSink for StreamClient {
    fn send_frame(&self, text: String) {
        self.send(text);
    }
}

/// Create a message through the API, then announce it to other peers on
/// the stream. A failed broadcast is logged; the created message is
/// still returned.
pub async fn post_message<S, F>(api: &S, sink: &F, request: &CreateMessageRequest) -> Result<Message>
where
    S: MessageService,
    F: FrameSink,
{
    let message = api.create_message(request).await?;
    info!(message = %message.id, channel = %message.channel.id, "Message created");

    match RealtimeEnvelope::for_message(&message).to_json() {
        Ok(frame) => sink.send_frame(frame),
        Err(e) => warn!(error = %e, "Failed to encode realtime envelope"),
    }
    Ok(message)
}

/// One channel's conversation as shown on screen.
#[derive(Debug)]
pub struct ChannelFeed {
    channel: ChannelId,
    messages: Vec<Message>,
    live: Vec<RealtimeEnvelope>,
}

impl ChannelFeed {
    pub fn new(channel: ChannelId) -> Self {
        Self {
            channel,
            messages: Vec::new(),
            live: Vec::new(),
        }
    }

    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    /// Messages fetched from or created through the API, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Envelopes received on the stream that are not (yet) in `messages`.
    pub fn live(&self) -> &[RealtimeEnvelope] {
        &self.live
    }

    /// Reload history. Live envelopes that now appear in the history are
    /// dropped.
    pub async fn load<S: MessageService>(&mut self, api: &S) -> Result<()> {
        self.messages = api.messages_by_channel(&self.channel).await?;
        let messages = &self.messages;
        self.live.retain(|env| {
            env.id
                .as_deref()
                .map_or(true, |id| !messages.iter().any(|m| m.id.0 == id))
        });
        debug!(channel = %self.channel, count = self.messages.len(), "Channel history loaded");
        Ok(())
    }

    pub async fn post<S, F>(&mut self, api: &S, sink: &F, content: impl Into<String>) -> Result<Message>
    where
        S: MessageService,
        F: FrameSink,
    {
        let request = CreateMessageRequest::new(self.channel.clone(), content);
        let message = post_message(api, sink, &request).await?;
        self.messages.push(message.clone());
        Ok(message)
    }

    /// Take an envelope from the stream. Returns `false` when it belongs to
    /// another channel or is already shown.
    pub fn apply_envelope(&mut self, envelope: RealtimeEnvelope) -> bool {
        if envelope
            .channel_id
            .as_deref()
            .is_some_and(|c| c != self.channel.0)
        {
            return false;
        }

        if let Some(id) = envelope.id.as_deref() {
            let known = self.messages.iter().any(|m| m.id.0 == id)
                || self.live.iter().any(|e| e.id.as_deref() == Some(id));
            if known {
                return false;
            }
        }

        self.live.push(envelope);
        true
    }
}
