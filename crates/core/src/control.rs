//! Countdown command validation and control-action parsing.
//!
//! The HTTP layer receives loosely-typed JSON (`action` as a string, optional
//! numbers); this module turns it into a [`ControlAction`] or a
//! [`CoreError`] before any datastore access happens.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Action names
// ---------------------------------------------------------------------------

pub const ACTION_PAUSE: &str = "pause";
pub const ACTION_RESUME: &str = "resume";
pub const ACTION_RESET: &str = "reset";

/// All recognised control action names.
pub const VALID_ACTIONS: &[&str] = &[ACTION_PAUSE, ACTION_RESUME, ACTION_RESET];

// ---------------------------------------------------------------------------
// ControlAction
// ---------------------------------------------------------------------------

/// A validated command against the current countdown record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    /// Freeze the running record (`is_running = false`).
    Pause,
    /// Restart the record and re-anchor `started_at` to now.
    Resume,
    /// Replace start value and rate; leaves the record stopped.
    Reset { start_value: f64, rate: f64 },
}

impl ControlAction {
    /// Build an action from the raw request fields.
    ///
    /// `start_value` and `rate` are ignored for pause/resume and required
    /// for reset.
    pub fn parse(
        action: &str,
        start_value: Option<f64>,
        rate: Option<f64>,
    ) -> Result<Self, CoreError> {
        match action {
            ACTION_PAUSE => Ok(Self::Pause),
            ACTION_RESUME => Ok(Self::Resume),
            ACTION_RESET => {
                let start_value = require(start_value, "startValue")?;
                let rate = require(rate, "rate")?;
                validate_countdown_values(start_value, rate)?;
                Ok(Self::Reset { start_value, rate })
            }
            other => Err(CoreError::InvalidAction(format!(
                "'{other}' is not one of: {}",
                VALID_ACTIONS.join(", ")
            ))),
        }
    }

    /// Action name as it appears on the wire and in change events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pause => ACTION_PAUSE,
            Self::Resume => ACTION_RESUME,
            Self::Reset { .. } => ACTION_RESET,
        }
    }
}

fn require(value: Option<f64>, name: &str) -> Result<f64, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("{name} is required")))
}

// ---------------------------------------------------------------------------
// Value validation
// ---------------------------------------------------------------------------

/// Validate a single countdown number: finite and non-negative.
pub fn validate_non_negative(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!(
            "{name} must be a finite number"
        )));
    }
    if value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    Ok(())
}

/// Validate the start value / rate pair supplied to start and reset.
pub fn validate_countdown_values(start_value: f64, rate: f64) -> Result<(), CoreError> {
    validate_non_negative(start_value, "startValue")?;
    validate_non_negative(rate, "rate")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_pause_and_resume_ignoring_numbers() {
        assert_eq!(
            ControlAction::parse("pause", Some(5.0), None).unwrap(),
            ControlAction::Pause
        );
        assert_eq!(
            ControlAction::parse("resume", None, None).unwrap(),
            ControlAction::Resume
        );
    }

    #[test]
    fn parses_reset_with_values() {
        let action = ControlAction::parse("reset", Some(100.0), Some(2.5)).unwrap();
        assert_eq!(
            action,
            ControlAction::Reset {
                start_value: 100.0,
                rate: 2.5
            }
        );
        assert_eq!(action.name(), "reset");
    }

    #[test]
    fn reset_requires_both_values() {
        assert_matches!(
            ControlAction::parse("reset", None, Some(1.0)),
            Err(CoreError::Validation(msg)) if msg.contains("startValue")
        );
        assert_matches!(
            ControlAction::parse("reset", Some(1.0), None),
            Err(CoreError::Validation(msg)) if msg.contains("rate")
        );
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert_matches!(
            ControlAction::parse("explode", None, None),
            Err(CoreError::InvalidAction(_))
        );
        // Action names are case-sensitive.
        assert_matches!(
            ControlAction::parse("Pause", None, None),
            Err(CoreError::InvalidAction(_))
        );
    }

    #[test]
    fn negative_and_non_finite_values_are_rejected() {
        assert!(validate_countdown_values(-1.0, 1.0).is_err());
        assert!(validate_countdown_values(1.0, -0.5).is_err());
        assert!(validate_countdown_values(f64::NAN, 1.0).is_err());
        assert!(validate_countdown_values(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn zero_values_are_accepted() {
        assert!(validate_countdown_values(0.0, 0.0).is_ok());
    }
}
