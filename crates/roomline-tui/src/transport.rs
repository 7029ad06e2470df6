//! WebSocket transport for the terminal client.
//!
//! Provides [`Connection`], a pair of channels carrying JSON text frames,
//! and [`connect`], which spawns a task bridging those channels to a
//! WebSocket. The task reconnects with exponential backoff and reports
//! every transition to the session as a synthesized `connect` or
//! `disconnect` frame, so reconnects reach the core through the same decode
//! path as broker events.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use roomline_core::Identity;
use roomline_proto::Inbound;
use thiserror::Error;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{Message, client::IntoClientRequest},
};
use url::Url;

const CHANNEL_CAPACITY: usize = 64;
/// Query parameter carrying the identity on the upgrade request.
const USERNAME_PARAM: &str = "username";
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The broker URL is not a valid WebSocket URL.
    #[error("invalid broker url: {0}")]
    InvalidUrl(String),

    /// Connection failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Stream error on an open connection.
    #[error("stream error: {0}")]
    Stream(String),
}

/// Handle to a running transport task.
///
/// Frames are sent and received via the channels; an internal task owns the
/// actual I/O.
pub struct Connection {
    /// Send frames to the broker.
    pub to_server: mpsc::Sender<String>,
    /// Receive frames from the broker, plus synthesized connection frames.
    pub from_server: mpsc::Receiver<String>,
    abort_handle: tokio::task::AbortHandle,
}

impl Connection {
    pub(crate) fn new(
        to_server: mpsc::Sender<String>,
        from_server: mpsc::Receiver<String>,
        abort_handle: tokio::task::AbortHandle,
    ) -> Self {
        Self { to_server, from_server, abort_handle }
    }

    /// Stop the transport task.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Broker URL for `identity`: `url` with a `username` query parameter.
///
/// Existing query parameters are kept. The broker registers the connection
/// under this name, so its broadcasts carry the same `username` the session
/// classifies as its own.
///
/// # Errors
///
/// Returns [`TransportError::InvalidUrl`] if `url` does not parse.
pub fn broker_url(url: &str, identity: &Identity) -> Result<String, TransportError> {
    let mut url = Url::parse(url).map_err(|e| TransportError::InvalidUrl(e.to_string()))?;
    url.query_pairs_mut().append_pair(USERNAME_PARAM, identity.as_str());
    Ok(url.into())
}

/// Connect to a broker at a `ws://` `url`.
///
/// Returns immediately; the first `connect` frame arrives once the socket is
/// open. Must be called inside a tokio runtime.
///
/// # Errors
///
/// Returns [`TransportError::InvalidUrl`] if `url` cannot form a WebSocket
/// request.
pub fn connect(url: &str) -> Result<Connection, TransportError> {
    url.into_client_request().map_err(|e| TransportError::InvalidUrl(e.to_string()))?;

    let (to_server_tx, to_server_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (from_server_tx, from_server_rx) = mpsc::channel(CHANNEL_CAPACITY);

    let handle = tokio::spawn(run_connection(url.to_owned(), to_server_rx, from_server_tx));

    Ok(Connection::new(to_server_tx, from_server_rx, handle.abort_handle()))
}

/// How an open socket stopped.
enum Closed {
    /// Broker closed the socket.
    Remote,
    /// The session side dropped its channel.
    Local,
}

async fn run_connection(
    url: String,
    mut to_server: mpsc::Receiver<String>,
    from_server: mpsc::Sender<String>,
) {
    let mut backoff = INITIAL_BACKOFF;

    loop {
        match open(&url).await {
            Ok(socket) => {
                tracing::info!(%url, "connected to broker");
                backoff = INITIAL_BACKOFF;
                discard_queued(&mut to_server);
                if !notify(&from_server, &Inbound::Connect).await {
                    return;
                }

                match pump(socket, &mut to_server, &from_server).await {
                    Ok(Closed::Local) => return,
                    Ok(Closed::Remote) => tracing::info!("broker closed the connection"),
                    Err(error) => tracing::warn!(%error, "connection lost"),
                }

                if !notify(&from_server, &Inbound::Disconnect).await {
                    return;
                }
            },
            Err(error) => tracing::warn!(%error, retry_in = ?backoff, "connect failed"),
        }

        discard_queued(&mut to_server);
        tokio::time::sleep(backoff).await;
        backoff = (backoff * 2).min(MAX_BACKOFF);
    }
}

async fn open(url: &str) -> Result<Socket, TransportError> {
    let (socket, _response) =
        connect_async(url).await.map_err(|e| TransportError::Connection(e.to_string()))?;
    Ok(socket)
}

/// Bridge channels and socket until either side goes away.
async fn pump(
    socket: Socket,
    to_server: &mut mpsc::Receiver<String>,
    from_server: &mpsc::Sender<String>,
) -> Result<Closed, TransportError> {
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            outgoing = to_server.recv() => {
                let Some(frame) = outgoing else {
                    if let Err(error) = sink.close().await {
                        tracing::debug!(%error, "close handshake failed");
                    }
                    return Ok(Closed::Local);
                };
                sink.send(Message::Text(frame.into()))
                    .await
                    .map_err(|e| TransportError::Stream(e.to_string()))?;
            }

            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    if from_server.send(text.as_str().to_owned()).await.is_err() {
                        return Ok(Closed::Local);
                    }
                },
                Some(Ok(Message::Close(_))) | None => return Ok(Closed::Remote),
                Some(Ok(_)) => {},
                Some(Err(e)) => return Err(TransportError::Stream(e.to_string())),
            }
        }
    }
}

/// Drop frames the session sent while no socket was open.
///
/// The session re-sends its room transition on `connect`; older intents
/// would replay stale leaves and joins on the new socket.
fn discard_queued(to_server: &mut mpsc::Receiver<String>) {
    let mut dropped = 0_usize;
    while to_server.try_recv().is_ok() {
        dropped += 1;
    }
    if dropped > 0 {
        tracing::debug!(dropped, "discarded frames sent while disconnected");
    }
}

/// Push a synthesized connection frame. `false` once the session is gone.
async fn notify(from_server: &mpsc::Sender<String>, event: &Inbound) -> bool {
    match event.encode() {
        Ok(frame) => from_server.send(frame).await.is_ok(),
        Err(error) => {
            tracing::warn!(%error, event = event.name(), "failed to encode connection frame");
            true
        },
    }
}
