//! Persistence for scheduled tracks: diesel schema, models, queries and pooling.

pub mod db;
pub mod error;
pub mod model;
