//! Airtime schedule server - integration test support.
//!
//! Re-exports the workspace crates so integration tests can reach every layer
//! through one dependency.

#![allow(ambiguous_glob_reexports)]

pub mod component {
    pub use airtime_core::*;
    pub use airtime_service::*;

    pub mod db {
        pub use airtime_db::db::*;
    }

    pub mod model {
        pub use airtime_db::model::*;
    }

    pub mod config {
        pub use airtime_core::config::*;
    }
}

pub mod app {
    pub use airtime_app::*;

    pub mod api {
        pub use airtime_app::app::api::*;
    }
}
