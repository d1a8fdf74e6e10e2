//! Countdown change feed.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`CountdownEvent`]: the envelope published after every successful
//!   countdown write, carrying the row as JSON.

pub mod bus;

pub use bus::{ChangeKind, CountdownEvent, EventBus};
