mod schedule;
mod types;

use salvo::Router;

use airtime_core::constants::{STATION_ID_PARAM, STATION_ROUTE_COMPONENT};

#[must_use]
pub fn routes() -> Router {
    Router::with_path(STATION_ROUTE_COMPONENT)
        .push(Router::with_path(format!("{{{STATION_ID_PARAM}}}")).push(schedule::routes()))
}
