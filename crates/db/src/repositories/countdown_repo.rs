//! Repository for the `countdowns` table.
//!
//! The "current" countdown is the most recently created row. Every write is a
//! single statement; none of them hold locks beyond PostgreSQL's own row-level
//! update semantics.

use sqlx::PgPool;

use crate::models::countdown::{Countdown, CreateCountdown};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, start_value, rate_per_second, started_at, is_running, created_at, updated_at";

/// Sub-select yielding the id of the most recently created row.
const LATEST_ID: &str = "SELECT id FROM countdowns ORDER BY created_at DESC, id DESC LIMIT 1";

/// Provides the countdown lifecycle operations.
pub struct CountdownRepo;

impl CountdownRepo {
    /// Stop any running countdown and insert a new running one anchored at
    /// `NOW()`, returning the created row.
    ///
    /// Both writes run in one statement via a data-modifying CTE.
    pub async fn start(pool: &PgPool, input: &CreateCountdown) -> Result<Countdown, sqlx::Error> {
        let query = format!(
            "WITH stopped AS ( \
                UPDATE countdowns SET is_running = false WHERE is_running = true \
             ) \
             INSERT INTO countdowns (start_value, rate_per_second, is_running, started_at) \
             VALUES ($1, $2, true, NOW()) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Countdown>(&query)
            .bind(input.start_value)
            .bind(input.rate)
            .fetch_one(pool)
            .await
    }

    /// Find the most recently created countdown.
    pub async fn find_latest(pool: &PgPool) -> Result<Option<Countdown>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM countdowns ORDER BY created_at DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, Countdown>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Freeze the running countdown. `start_value` is left untouched.
    ///
    /// Returns `None` if nothing is running.
    pub async fn pause(pool: &PgPool) -> Result<Option<Countdown>, sqlx::Error> {
        let query = format!(
            "UPDATE countdowns SET is_running = false \
             WHERE id = ( \
                SELECT id FROM countdowns WHERE is_running = true \
                ORDER BY created_at DESC, id DESC LIMIT 1 \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Countdown>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Restart the latest countdown from its stored `start_value`, anchoring
    /// `started_at` to `NOW()`.
    ///
    /// Returns `None` if there is no countdown or the latest one is already
    /// running.
    pub async fn resume(pool: &PgPool) -> Result<Option<Countdown>, sqlx::Error> {
        let query = format!(
            "UPDATE countdowns SET is_running = true, started_at = NOW() \
             WHERE id = ({LATEST_ID}) AND is_running = false \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Countdown>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Replace the latest countdown's start value and rate and stop it.
    ///
    /// Returns `None` if there is no countdown.
    pub async fn reset(
        pool: &PgPool,
        start_value: f64,
        rate_per_second: f64,
    ) -> Result<Option<Countdown>, sqlx::Error> {
        let query = format!(
            "UPDATE countdowns SET \
                start_value = $1, \
                rate_per_second = $2, \
                is_running = false, \
                started_at = NOW() \
             WHERE id = ({LATEST_ID}) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Countdown>(&query)
            .bind(start_value)
            .bind(rate_per_second)
            .fetch_optional(pool)
            .await
    }
}
