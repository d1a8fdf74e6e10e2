//! Countdown domain core.
//!
//! Pure types and logic shared by the API server and the terminal client:
//! the error taxonomy, the time-projection model, and control-action parsing.
//! Nothing in this crate performs I/O.

pub mod control;
pub mod error;
pub mod projection;
pub mod types;
