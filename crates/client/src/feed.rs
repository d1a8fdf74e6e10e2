//! WebSocket subscriber for the server's change feed.
//!
//! Every text frame the server pushes means "the countdown changed". The
//! subscriber turns frames into a coalesced notification on an mpsc channel;
//! the main loop re-fetches over HTTP when it sees one. A fresh connection
//! also notifies, since changes may have been missed while disconnected.

use std::time::Duration;

use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

/// Reconnection delay after a WebSocket failure.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// The parts of a pushed frame the client logs.
#[derive(Debug, Deserialize)]
pub struct ChangeFrame {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub change: Option<String>,
}

/// Parse a pushed text frame. Unparseable frames still count as changes.
pub fn parse_frame(text: &str) -> Option<ChangeFrame> {
    serde_json::from_str(text).ok()
}

/// Queue a refresh unless one is already pending.
fn notify(changes: &mpsc::Sender<()>) -> bool {
    match changes.try_send(()) {
        Ok(()) | Err(mpsc::error::TrySendError::Full(())) => true,
        Err(mpsc::error::TrySendError::Closed(())) => false,
    }
}

/// Create the notification channel. Capacity 1 coalesces bursts of pushes
/// into a single pending refresh.
pub fn channel() -> (mpsc::Sender<()>, mpsc::Receiver<()>) {
    mpsc::channel(1)
}

/// Run the subscriber until `cancel` fires or the receiver is dropped,
/// reconnecting with a fixed delay whenever the connection drops.
pub async fn run(ws_url: String, changes: mpsc::Sender<()>, cancel: CancellationToken) {
    loop {
        tracing::info!(url = %ws_url, "Connecting to change feed");

        tokio::select! {
            _ = cancel.cancelled() => break,
            result = connect_async(ws_url.as_str()) => match result {
                Ok((ws_stream, _response)) => {
                    tracing::info!("Change feed connected");
                    if !notify(&changes) {
                        break;
                    }
                    if !run_session(ws_stream, &changes, &cancel).await {
                        break;
                    }
                    tracing::warn!("Change feed session ended, reconnecting");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Change feed connection failed");
                }
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(RECONNECT_DELAY) => {}
        }
    }

    tracing::info!("Change feed subscriber stopped");
}

/// Drive one connection. Returns `false` when the subscriber should stop
/// for good (cancelled or nobody listening), `true` to reconnect.
async fn run_session(
    ws_stream: tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
    changes: &mpsc::Sender<()>,
    cancel: &CancellationToken,
) -> bool {
    let (_sink, mut stream) = ws_stream.split();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return false,
            msg = stream.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    match parse_frame(&text) {
                        Some(frame) => tracing::debug!(
                            kind = %frame.kind,
                            change = frame.change.as_deref().unwrap_or("unknown"),
                            "Countdown change pushed"
                        ),
                        None => tracing::debug!("Unrecognised frame pushed"),
                    }
                    if !notify(changes) {
                        return false;
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::info!(?frame, "Server closed change feed");
                    return true;
                }
                Some(Ok(_)) => {
                    // Ping / Pong / Binary: pings are answered by tungstenite.
                }
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Change feed receive error");
                    return true;
                }
                None => {
                    tracing::info!("Change feed stream exhausted");
                    return true;
                }
            }
        }
    }
}
