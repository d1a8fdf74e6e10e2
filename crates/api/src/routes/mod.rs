pub mod countdown;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                    WebSocket change feed
///
/// /countdown             latest (GET), start (POST)
/// /countdown/control     pause | resume | reset (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/countdown", countdown::router())
}
