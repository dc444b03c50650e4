//! Requests that never reach the database.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn healthcheck_is_served() {
    let res = TestRequest::get("/api/app/healthcheck")
        .send(create_test_service())
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(res.body_string(), "OK");
}

#[test_log::test(tokio::test)]
async fn summary_without_month_is_bad_request() {
    let station = uuid::Uuid::new_v4();
    let res = TestRequest::get(&format!("{}?year=2024&offset=60", schedule_path(station)))
        .send(create_test_service())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(res.json()["error"].as_str().is_some());
}

#[test_log::test(tokio::test)]
async fn summary_with_unknown_zone_is_bad_request() {
    let station = uuid::Uuid::new_v4();
    let _res = TestRequest::get(&format!(
        "{}?month=1&year=2024&tz=Atlantis/Capital",
        schedule_path(station)
    ))
    .send(create_test_service())
    .await
    .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn non_uuid_occurrence_is_bad_request() {
    let station = uuid::Uuid::new_v4();
    let _res = TestRequest::get(&format!("{}/42", schedule_path(station)))
        .send(create_test_service())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn database_errors_hide_details() {
    let station = uuid::Uuid::new_v4();
    let res = TestRequest::get(&format!("{}/all", schedule_path(station)))
        .send(create_test_service())
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json()["error"], "Internal server error");
}
