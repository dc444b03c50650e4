//! Shared configuration, constants and error types for the Airtime scheduler.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
