#![allow(clippy::unused_async)]
//! Integration tests for the month summary.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

async fn seed_march(test_db: &TestDb, station: uuid::Uuid) {
    for value in [
        "2024-02-29T23:00",
        "2024-03-01T08:00",
        "2024-03-01T20:00",
        "2024-03-15T12:00",
        "2024-03-31T23:30",
        "2024-04-01T02:00",
    ] {
        let _track = test_db.seed_track(station, None, at(value)).await.unwrap();
    }
    let _foreign = test_db
        .seed_track(uuid::Uuid::new_v4(), None, at("2024-03-10T12:00"))
        .await
        .unwrap();
}

async fn summary(service: &salvo::Service, station: uuid::Uuid, query: &str) -> serde_json::Value {
    TestRequest::get(&format!("{}?month=3&year=2024{query}", schedule_path(station)))
        .send(service)
        .await
        .assert_status(StatusCode::OK)
        .json()
}

#[test_log::test(tokio::test)]
async fn utc_summary_counts_per_day() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_db_test_service(&test_db).await;
    let station = uuid::Uuid::new_v4();
    seed_march(&test_db, station).await;

    assert_eq!(
        summary(&service, station, "&offset=0").await,
        json!([
            { "date": "2024-03-01", "count": 2, "title": "2 - Tracks" },
            { "date": "2024-03-15", "count": 1, "title": "1 - Track" },
            { "date": "2024-03-31", "count": 1, "title": "1 - Track" },
        ])
    );
}

#[test_log::test(tokio::test)]
async fn east_offset_shifts_days_forward() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_db_test_service(&test_db).await;
    let station = uuid::Uuid::new_v4();
    seed_march(&test_db, station).await;

    assert_eq!(
        summary(&service, station, "&offset=120").await,
        json!([
            { "date": "2024-03-01", "count": 3, "title": "3 - Tracks" },
            { "date": "2024-03-15", "count": 1, "title": "1 - Track" },
        ])
    );
}

#[test_log::test(tokio::test)]
async fn west_offset_pulls_next_month_plays_back() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_db_test_service(&test_db).await;
    let station = uuid::Uuid::new_v4();
    seed_march(&test_db, station).await;

    assert_eq!(
        summary(&service, station, "&offset=-300").await,
        json!([
            { "date": "2024-03-01", "count": 2, "title": "2 - Tracks" },
            { "date": "2024-03-15", "count": 1, "title": "1 - Track" },
            { "date": "2024-03-31", "count": 2, "title": "2 - Tracks" },
        ])
    );
}

#[test_log::test(tokio::test)]
async fn named_zone_is_accepted() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_db_test_service(&test_db).await;
    let station = uuid::Uuid::new_v4();
    seed_march(&test_db, station).await;

    // New York is UTC-05:00 until 2024-03-10 and UTC-04:00 after.
    let body = summary(&service, station, "&tz=America/New_York").await;
    let total: u64 = body
        .as_array()
        .unwrap()
        .iter()
        .map(|day| day["count"].as_u64().unwrap())
        .sum();
    assert_eq!(total, 5);
    assert_eq!(body[0]["date"], "2024-03-01");
}

#[test_log::test(tokio::test)]
async fn empty_month_is_empty_list() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_db_test_service(&test_db).await;

    assert_eq!(summary(&service, uuid::Uuid::new_v4(), "&offset=0").await, json!([]));
}

#[test_log::test(tokio::test)]
async fn summary_without_offset_or_zone_is_rejected() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_db_test_service(&test_db).await;
    let station = uuid::Uuid::new_v4();
    seed_march(&test_db, station).await;

    let body = TestRequest::get(&format!("{}?month=3&year=2024", schedule_path(station)))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert!(body["error"].as_str().unwrap().contains("offset"));
}
