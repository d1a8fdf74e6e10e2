use chrono::{DateTime, Utc};
use countdown_core::projection::ProjectionInput;
use countdown_core::types::{DbId, Timestamp};
use serde::Deserialize;

/// A countdown row as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountdownRecord {
    pub id: DbId,
    pub start_value: f64,
    pub rate_per_second: f64,
    pub started_at: DateTime<Utc>,
    pub is_running: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectionInput for CountdownRecord {
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
