//! Realtime text-frame stream beside the REST client.
//!
//! The socket is owned by a dedicated tokio task. The [`StreamClient`]
//! talks to it through a command channel and receives inbound text frames
//! on a notification channel, the same split the rest of the client uses
//! for long-lived connections.
//!
//! Connection loss is terminal for a session: the receive loop stops, the
//! state drops to [`ConnectionState::Disconnected`] and the inbound channel
//! closes. Call [`StreamClient::connect`] again to resume. Nothing here
//! reconnects on its own.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message as Frame;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::error::StreamError;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Commands sent *into* the stream task.
#[derive(Debug)]
enum StreamCommand {
    Send(String),
    Close,
}

pub struct StreamClient {
    url: String,
    state: Arc<watch::Sender<ConnectionState>>,
    commands: Option<mpsc::Sender<StreamCommand>>,
    task: Option<JoinHandle<()>>,
}

impl StreamClient {
    pub fn new(url: impl Into<String>) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            url: url.into(),
            state: Arc::new(state),
            commands: None,
            task: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Watch state transitions, e.g. to notice the connection dropping.
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Open the connection and start the receive loop.
    ///
    /// Returns the stream of inbound text frames, one item per frame, in
    /// arrival order. The channel closes when the connection ends.
    pub async fn connect(&mut self) -> Result<mpsc::Receiver<String>, StreamError> {
        if self.state() != ConnectionState::Disconnected {
            return Err(StreamError::AlreadyConnected);
        }

        let url = url::Url::parse(&self.url)
            .map_err(|e| StreamError::InvalidAddress(format!("{}: {e}", self.url)))?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(StreamError::InvalidAddress(format!(
                "{}: unsupported scheme {}",
                self.url,
                url.scheme()
            )));
        }

        self.state.send_replace(ConnectionState::Connecting);
        info!(url = %self.url, "Connecting realtime stream");

        let socket = match connect_async(url.as_str()).await {
            Ok((socket, _response)) => socket,
            Err(e) => {
                self.state.send_replace(ConnectionState::Disconnected);
                warn!(url = %self.url, error = %e, "Realtime stream connect failed");
                return Err(StreamError::Connect(e));
            }
        };

        let (cmd_tx, cmd_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (inbound_tx, inbound_rx) = mpsc::channel(CHANNEL_CAPACITY);

        self.state.send_replace(ConnectionState::Connected);
        info!(url = %self.url, "Realtime stream connected");

        let state = Arc::clone(&self.state);
        self.commands = Some(cmd_tx);
        self.task = Some(tokio::spawn(run_stream(socket, cmd_rx, inbound_tx, state)));

        Ok(inbound_rx)
    }

    /// Connect and hand every inbound text frame to `handler`, once per
    /// frame, on a background task.
    pub async fn connect_with_handler<F>(&mut self, mut handler: F) -> Result<(), StreamError>
    where
        F: FnMut(String) + Send + 'static,
    {
        let mut inbound = self.connect().await?;
        tokio::spawn(async move {
            while let Some(text) = inbound.recv().await {
                handler(text);
            }
        });
        Ok(())
    }

    /// Queue a text frame. Fire-and-forget: failures are logged, never
    /// returned.
    pub fn send(&self, text: impl Into<String>) {
        let Some(commands) = &self.commands else {
            warn!("Realtime stream not connected, dropping outbound frame");
            return;
        };
        if let Err(e) = commands.try_send(StreamCommand::Send(text.into())) {
            warn!(error = %e, "Dropping outbound realtime frame");
        }
    }

    /// Close the connection and wait for the receive loop to stop.
    pub async fn disconnect(&mut self) {
        if let Some(commands) = self.commands.take() {
            // A closed channel means the task already exited.
            let _ = commands.send(StreamCommand::Close).await;
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Realtime stream task panicked");
            }
        }
        self.state.send_replace(ConnectionState::Disconnected);
    }
}

impl Drop for StreamClient {
    fn drop(&mut self) {
        // Dropping the command sender makes the task close the socket.
        self.commands.take();
    }
}

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn run_stream(
    mut socket: Socket,
    mut commands: mpsc::Receiver<StreamCommand>,
    inbound: mpsc::Sender<String>,
    state: Arc<watch::Sender<ConnectionState>>,
) {
    loop {
        tokio::select! {
            // --- Outbound ---
            cmd = commands.recv() => {
                if !apply_command(&mut socket, cmd).await {
                    break;
                }
            }

            // --- Inbound ---
            frame = socket.next() => {
                match frame {
                    Some(Ok(Frame::Text(text))) => {
                        if !deliver(&mut socket, &mut commands, &inbound, text).await {
                            break;
                        }
                    }
                    Some(Ok(Frame::Binary(data))) => {
                        debug!(len = data.len(), "Ignoring binary realtime frame");
                    }
                    Some(Ok(Frame::Close(frame))) => {
                        info!(?frame, "Realtime stream closed by server");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(error = %e, "Realtime receive failed");
                        break;
                    }
                    None => {
                        info!("Realtime stream ended");
                        break;
                    }
                }
            }
        }
    }

    state.send_replace(ConnectionState::Disconnected);
}

/// Run one command. Returns `false` once the socket has been closed.
async fn apply_command(socket: &mut Socket, cmd: Option<StreamCommand>) -> bool {
    match cmd {
        Some(StreamCommand::Send(text)) => {
            if let Err(e) = socket.send(Frame::Text(text)).await {
                warn!(error = %e, "Realtime send failed");
            }
            true
        }
        Some(StreamCommand::Close) | None => {
            if let Err(e) = socket.close(None).await {
                debug!(error = %e, "Realtime close handshake failed");
            }
            info!("Realtime stream closed");
            false
        }
    }
}

/// Hand a text frame to the receiver, waiting for room without starving
/// commands: a slow receiver delays delivery but never blocks a close.
/// Returns `false` when a close arrived while waiting.
async fn deliver(
    socket: &mut Socket,
    commands: &mut mpsc::Receiver<StreamCommand>,
    inbound: &mpsc::Sender<String>,
    text: String,
) -> bool {
    loop {
        tokio::select! {
            permit = inbound.reserve() => {
                match permit {
                    Ok(permit) => permit.send(text),
                    Err(_) => debug!("Realtime receiver dropped, discarding frame"),
                }
                return true;
            }
            cmd = commands.recv() => {
                if !apply_command(socket, cmd).await {
                    return false;
                }
            }
        }
    }
}
