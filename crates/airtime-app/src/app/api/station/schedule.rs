//! Handlers for `/api/station/{station_id}/schedule`.

use airtime_core::constants::{OCCURRENCE_ID_PARAM, SCHEDULE_ROUTE_COMPONENT, STATION_ID_PARAM};
use airtime_service::schedule::form::{ScheduleForm, UpdateScope};
use airtime_service::schedule::group::DeleteMode;
use airtime_service::schedule::service;
use airtime_service::schedule::summary::UtcShift;
use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use super::types::{
    ClearResponse, DaySummaryResponse, DeleteResponse, OccurrenceResponse, SeriesResponse,
};
use crate::error::{AppError, AppResult};
use crate::state::{get_artwork_from_depot, get_db_from_depot, get_series_limits_from_depot};

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SCHEDULE_ROUTE_COMPONENT)
        .get(month_summary)
        .post(create_series)
        .delete(delete_all)
        // Must precede the id route.
        .push(Router::with_path("all").get(list_all))
        .push(
            Router::with_path(format!("{{{OCCURRENCE_ID_PARAM}}}"))
                .get(get_occurrence)
                .put(update_occurrence)
                .delete(delete_occurrence),
        )
}

fn uuid_param(req: &Request, name: &str) -> AppResult<uuid::Uuid> {
    let raw = req
        .param::<String>(name)
        .ok_or_else(|| AppError::BadRequest(format!("missing path parameter {name}")))?;
    uuid::Uuid::parse_str(&raw)
        .map_err(|err| AppError::BadRequest(format!("{name} '{raw}' is not a UUID: {err}")))
}

fn required_query<T>(req: &Request, name: &str) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = req
        .query::<String>(name)
        .ok_or_else(|| AppError::BadRequest(format!("query parameter {name} is required")))?;
    raw.trim()
        .parse()
        .map_err(|err| AppError::BadRequest(format!("invalid {name} '{raw}': {err}")))
}

/// ## Summary
/// Reads the caller's time shift: `tz` (IANA name) wins over `offset` (minutes
/// east of UTC). One of them is required.
fn utc_shift(req: &Request) -> AppResult<UtcShift> {
    if let Some(zone) = req.query::<String>("tz").filter(|z| !z.trim().is_empty()) {
        return Ok(UtcShift::from_zone_name(&zone)?);
    }

    let minutes = req
        .query::<String>("offset")
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("query parameter offset or tz is required".to_string()))?;
    let minutes = minutes
        .trim()
        .parse::<i32>()
        .map_err(|err| AppError::BadRequest(format!("invalid offset '{minutes}': {err}")))?;
    Ok(UtcShift::from_offset_minutes(minutes)?)
}

fn delete_mode(req: &Request) -> AppResult<DeleteMode> {
    match req.query::<String>("scope").as_deref().map(str::trim) {
        None | Some("" | "group") => Ok(DeleteMode::Group),
        Some("single") => Ok(DeleteMode::Single),
        Some(other) => Err(AppError::BadRequest(format!(
            "scope must be 'single' or 'group', got '{other}'"
        ))),
    }
}

async fn parse_form(req: &mut Request) -> AppResult<ScheduleForm> {
    req.parse_json::<ScheduleForm>().await.map_err(|err| {
        tracing::debug!(error = %err, "Failed to parse schedule form");
        AppError::BadRequest(format!("invalid schedule form: {err}"))
    })
}

/// ## Summary
/// GET `/schedule?month=&year=[&offset=|&tz=]` - per-day play counts of a month.
///
/// ## Errors
/// Returns 400 if `month`, `year` or both `offset` and `tz` are missing or
/// invalid, 500/503 on database failure.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn month_summary(req: &mut Request, depot: &Depot) -> AppResult<Json<Vec<DaySummaryResponse>>> {
    let station_id = uuid_param(req, STATION_ID_PARAM)?;
    let month: u32 = required_query(req, "month")?;
    let year: i32 = required_query(req, "year")?;
    let shift = utc_shift(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let days = service::month_summary(&mut conn, station_id, year, month, shift).await?;

    Ok(Json(days.into_iter().map(Into::into).collect()))
}

/// ## Summary
/// POST `/schedule` - schedules a track once or as a recurring series.
///
/// ## Errors
/// Returns 400 for an invalid form or an over-long series, 500/503 on database failure.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn create_series(
    req: &mut Request,
    depot: &Depot,
    res: &mut Response,
) -> AppResult<Json<SeriesResponse>> {
    let station_id = uuid_param(req, STATION_ID_PARAM)?;
    let request = parse_form(req).await?.validate(station_id)?;
    let limits = get_series_limits_from_depot(depot)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let outcome = service::create_series(&mut conn, &request, limits).await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(outcome.into()))
}

/// ## Summary
/// GET `/schedule/all` - every occurrence of the station.
///
/// ## Errors
/// Returns 500/503 on database failure.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn list_all(req: &mut Request, depot: &Depot) -> AppResult<Json<Vec<OccurrenceResponse>>> {
    let station_id = uuid_param(req, STATION_ID_PARAM)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let tracks = service::list_all(&mut conn, station_id).await?;

    Ok(Json(tracks.into_iter().map(Into::into).collect()))
}

/// ## Summary
/// GET `/schedule/{id}` - one occurrence.
///
/// ## Errors
/// Returns 404 if the occurrence does not belong to the station.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn get_occurrence(req: &mut Request, depot: &Depot) -> AppResult<Json<OccurrenceResponse>> {
    let station_id = uuid_param(req, STATION_ID_PARAM)?;
    let id = uuid_param(req, OCCURRENCE_ID_PARAM)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let track = service::get_occurrence(&mut conn, station_id, id).await?;

    Ok(Json(track.into()))
}

/// ## Summary
/// PUT `/schedule/{id}` - rewrites one occurrence, or regenerates its series
/// when the form's `scope` is `series`.
///
/// ## Errors
/// Returns 400 for an invalid form, 404 if the occurrence does not exist.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn update_occurrence(req: &mut Request, depot: &Depot) -> AppResult<Json<SeriesResponse>> {
    let station_id = uuid_param(req, STATION_ID_PARAM)?;
    let id = uuid_param(req, OCCURRENCE_ID_PARAM)?;
    let form = parse_form(req).await?;
    let request = form.validate(station_id)?;
    let artwork = get_artwork_from_depot(depot)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let response = match form.scope {
        UpdateScope::Single => {
            let track =
                service::update_single(&mut conn, &artwork, station_id, id, &request).await?;
            SeriesResponse {
                group_id: track.group_id,
                count: 1,
                tracks: vec![track.into()],
            }
        }
        UpdateScope::Series => {
            let limits = get_series_limits_from_depot(depot)?;
            service::update_series(&mut conn, &artwork, station_id, id, &request, limits)
                .await?
                .into()
        }
    };

    Ok(Json(response))
}

/// ## Summary
/// DELETE `/schedule/{id}[?scope=single|group]` - deletes an occurrence and, by
/// default, the rest of its series.
///
/// ## Errors
/// Returns 404 if the occurrence does not exist, 400 for an unknown scope.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn delete_occurrence(req: &mut Request, depot: &Depot) -> AppResult<Json<DeleteResponse>> {
    let station_id = uuid_param(req, STATION_ID_PARAM)?;
    let id = uuid_param(req, OCCURRENCE_ID_PARAM)?;
    let mode = delete_mode(req)?;
    let artwork = get_artwork_from_depot(depot)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let outcome = service::delete_occurrence(&mut conn, &artwork, station_id, id, mode).await?;

    Ok(Json(outcome.into()))
}

/// ## Summary
/// DELETE `/schedule` - clears the station's whole schedule.
///
/// ## Errors
/// Returns 500/503 on database or artwork storage failure.
#[handler]
#[tracing::instrument(skip_all, fields(path = %req.uri().path()))]
async fn delete_all(req: &mut Request, depot: &Depot) -> AppResult<Json<ClearResponse>> {
    let station_id = uuid_param(req, STATION_ID_PARAM)?;
    let artwork = get_artwork_from_depot(depot)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let deleted = service::delete_all(&mut conn, &artwork, station_id).await?;

    Ok(Json(ClearResponse {
        deleted: deleted.len(),
    }))
}
