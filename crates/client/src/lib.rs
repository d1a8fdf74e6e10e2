//! Terminal client for the countdown service.
//!
//! Talks to `countdown-api` over HTTP, listens to its WebSocket change feed,
//! and animates the countdown locally between pushes.

pub mod api;
pub mod command;
pub mod config;
pub mod feed;
pub mod record;
pub mod view;
