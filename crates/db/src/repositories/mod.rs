//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod countdown_repo;

pub use countdown_repo::CountdownRepo;
