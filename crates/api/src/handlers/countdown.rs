//! Handlers for the `/countdown` resource.
//!
//! Every handler is stateless: the current countdown lives only in the
//! database. Successful writes are announced on the event bus so the change
//! feed can notify subscribers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use countdown_core::control::{validate_countdown_values, ControlAction};
use countdown_core::error::CoreError;
use countdown_db::models::countdown::{Countdown, CreateCountdown};
use countdown_db::repositories::CountdownRepo;
use countdown_events::{ChangeKind, CountdownEvent};
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `PATCH /countdown/control`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlRequest {
    pub action: String,
    pub start_value: Option<f64>,
    pub rate: Option<f64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/countdown
///
/// Return the most recently created countdown.
pub async fn get_latest(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let countdown = CountdownRepo::find_latest(&state.pool)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Countdown",
        })?;
    Ok(Json(DataResponse { data: countdown }))
}

/// POST /api/countdown
///
/// Stop whatever is running and start a new countdown anchored at now.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCountdown>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    validate_countdown_values(input.start_value, input.rate)?;

    let countdown = CountdownRepo::start(&state.pool, &input).await?;
    tracing::info!(
        countdown_id = countdown.id,
        start_value = countdown.start_value,
        rate_per_second = countdown.rate_per_second,
        "Countdown started"
    );

    publish(&state, ChangeKind::Created, &countdown);
    Ok((StatusCode::CREATED, Json(DataResponse { data: countdown })))
}

/// PATCH /api/countdown/control
///
/// Pause, resume, or reset the current countdown. The action is validated
/// before the database is touched, so an unknown action changes nothing.
pub async fn control(
    State(state): State<AppState>,
    payload: Result<Json<ControlRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let action = ControlAction::parse(&input.action, input.start_value, input.rate)?;

    let (kind, countdown) = match action {
        ControlAction::Pause => (
            ChangeKind::Paused,
            CountdownRepo::pause(&state.pool)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Running countdown",
                })?,
        ),
        ControlAction::Resume => (
            ChangeKind::Resumed,
            CountdownRepo::resume(&state.pool)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Paused countdown",
                })?,
        ),
        ControlAction::Reset { start_value, rate } => (
            ChangeKind::Reset,
            CountdownRepo::reset(&state.pool, start_value, rate)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Countdown",
                })?,
        ),
    };
    tracing::info!(
        countdown_id = countdown.id,
        action = action.name(),
        "Countdown updated"
    );

    publish(&state, kind, &countdown);
    Ok(Json(DataResponse { data: countdown }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Announce a countdown write on the event bus.
fn publish(state: &AppState, kind: ChangeKind, countdown: &Countdown) {
    match serde_json::to_value(countdown) {
        Ok(row) => state
            .event_bus
            .publish(CountdownEvent::new(kind, countdown.id, row)),
        Err(e) => {
            tracing::warn!(error = %e, countdown_id = countdown.id, "Failed to serialize change event")
        }
    }
}
