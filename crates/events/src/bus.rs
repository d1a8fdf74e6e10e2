//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`CountdownEvent`]s.
//! It is designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use countdown_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// CountdownEvent
// ---------------------------------------------------------------------------

/// Which write produced a [`CountdownEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Paused,
    Resumed,
    Reset,
}

/// A change to the `countdowns` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownEvent {
    /// What happened.
    pub change: ChangeKind,

    /// Id of the affected row.
    pub countdown_id: DbId,

    /// The row after the write, serialized.
    pub countdown: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl CountdownEvent {
    /// Create an event for the given change and row.
    pub fn new(change: ChangeKind, countdown_id: DbId, countdown: serde_json::Value) -> Self {
        Self {
            change,
            countdown_id,
            countdown,
            timestamp: Utc::now(),
        }
    }

    /// The JSON frame pushed to WebSocket subscribers.
    pub fn to_message(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "countdown_changed",
            "change": self.change,
            "countdown": self.countdown,
            "timestamp": self.timestamp,
        })
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`CountdownEvent`].
pub struct EventBus {
    sender: broadcast::Sender<CountdownEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: CountdownEvent) {
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<CountdownEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
