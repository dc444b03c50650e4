mod app_specific;
mod station;

use salvo::Router;

pub use airtime_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, STATION_ROUTE_COMPONENT, STATION_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the main API router.
///
/// ## Errors
/// Returns an error if any child route handler fails to initialize.
pub fn routes() -> anyhow::Result<Router> {
    Ok(Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(station::routes()))
}
