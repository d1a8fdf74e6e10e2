//! Route definitions for the countdown resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::countdown;
use crate::state::AppState;

/// Routes mounted at `/countdown`.
///
/// ```text
/// GET   /          -> latest countdown
/// POST  /          -> start a new countdown
/// PATCH /control   -> pause | resume | reset
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(countdown::get_latest).post(countdown::create))
        .route("/control", patch(countdown::control))
}
