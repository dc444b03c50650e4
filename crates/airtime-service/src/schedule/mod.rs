//! Scheduling of tracks onto a station's calendar.

pub mod form;
pub mod group;
pub mod recurrence;
pub mod service;
pub mod summary;
