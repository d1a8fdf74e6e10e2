//! Countdown change feed.
//!
//! [`ChangeFeed`] subscribes to the [`EventBus`](countdown_events::EventBus)
//! and pushes every [`CountdownEvent`] to all WebSocket subscribers as a JSON
//! text frame. Clients treat any frame as "the countdown changed" and re-read
//! it over HTTP.

use std::sync::Arc;

use axum::extract::ws::Message;
use countdown_events::CountdownEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Forwards countdown events to connected WebSocket clients.
pub struct ChangeFeed {
    ws_manager: Arc<WsManager>,
}

impl ChangeFeed {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the forwarding loop.
    ///
    /// Exits when the channel is closed (i.e. the
    /// [`EventBus`](countdown_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<CountdownEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let delivered = self.forward(&event).await;
                    tracing::debug!(
                        countdown_id = event.countdown_id,
                        change = ?event.change,
                        delivered,
                        "Pushed countdown change"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Change feed lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, change feed shutting down");
                    break;
                }
            }
        }
    }

    /// Push a single event to every subscriber, returning how many received it.
    pub async fn forward(&self, event: &CountdownEvent) -> usize {
        let ws_msg = Message::Text(event.to_message().to_string().into());
        self.ws_manager.broadcast(ws_msg).await
    }
}
