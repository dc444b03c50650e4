//! Scheduling logic: recurrence expansion, series grouping and the storage
//! operations built on top of them.

pub mod artwork;
pub mod error;
pub mod schedule;
