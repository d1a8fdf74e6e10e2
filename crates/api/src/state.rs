use std::sync::Arc;

use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: countdown_db::DbPool,
    /// WebSocket connection manager (change-feed subscribers).
    pub ws_manager: Arc<WsManager>,
    /// Bus that every countdown write publishes to.
    pub event_bus: Arc<countdown_events::EventBus>,
}
