/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const STATION_ROUTE_COMPONENT: &str = "station";
pub const STATION_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", STATION_ROUTE_COMPONENT);

pub const SCHEDULE_ROUTE_COMPONENT: &str = "schedule";

/// Path parameter carrying the station id.
pub const STATION_ID_PARAM: &str = "station_id";
/// Path parameter carrying a scheduled track id.
pub const OCCURRENCE_ID_PARAM: &str = "id";
