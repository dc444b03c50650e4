//! HTTP surface of the airtime scheduler.

pub mod app;
pub mod error;
pub mod state;
