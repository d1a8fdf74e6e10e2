//! Countdown entity model and DTOs.

use countdown_core::projection::ProjectionInput;
use countdown_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `countdowns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Countdown {
    pub id: DbId,
    pub start_value: f64,
    pub rate_per_second: f64,
    pub started_at: Timestamp,
    pub is_running: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjectionInput for Countdown {
    fn start_value(&self) -> f64 {
        self.start_value
    }

    fn rate_per_second(&self) -> f64 {
        self.rate_per_second
    }

    fn started_at(&self) -> Timestamp {
        self.started_at
    }

    fn is_running(&self) -> bool {
        self.is_running
    }
}

/// DTO for starting a new countdown (`POST /countdown`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCountdown {
    pub start_value: f64,
    pub rate: f64,
}
