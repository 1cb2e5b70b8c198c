//! Inbound realtime frames as typed envelopes.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use therethen_shared::RealtimeEnvelope;

/// Decode one text frame. Frames that are not envelopes are logged and
/// dropped.
pub fn parse_frame(text: &str) -> Option<RealtimeEnvelope> {
    match RealtimeEnvelope::from_json(text) {
        Ok(envelope) => Some(envelope),
        Err(e) => {
            warn!(error = %e, len = text.len(), "Dropping malformed realtime frame");
            None
        }
    }
}

/// Pump raw frames into `envelopes` until either side closes.
pub async fn forward_envelopes(
    mut frames: mpsc::Receiver<String>,
    envelopes: mpsc::Sender<RealtimeEnvelope>,
) {
    while let Some(text) = frames.recv().await {
        let Some(envelope) = parse_frame(&text) else {
            continue;
        };
        if envelopes.send(envelope).await.is_err() {
            debug!("Envelope receiver dropped, stopping realtime pump");
            return;
        }
    }
    debug!("Realtime frame stream ended");
}
