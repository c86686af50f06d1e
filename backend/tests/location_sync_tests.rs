//! Location synchronizer integration tests
//!
//! Exercises the keyed upsert against an in-memory store: merging records
//! with varying column sets, refresh stamp behavior, and rejection of
//! records that fail identifier sanitization.

use proptest::prelude::*;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

use weather_sync_backend::db::{quote_ident, MIGRATOR};
use weather_sync_backend::error::AppError;
use weather_sync_backend::services::locations::{LocationRecord, LocationSyncService};

async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    MIGRATOR.run(&pool).await.expect("migrations");
    pool
}

fn record(value: Value) -> LocationRecord {
    value.as_object().expect("object literal").clone()
}

#[tokio::test]
async fn upsert_creates_then_merges_without_losing_columns() {
    let pool = setup_pool().await;
    let service = LocationSyncService::new(pool.clone());

    service
        .upsert_record(&record(json!({"LOCATION": "NYC", "LAT": 40.7, "TZ": "America/New_York"})), 100)
        .await
        .unwrap();

    // Second record has a different column set: LAT overwritten, LON added,
    // TZ absent from the record and therefore preserved.
    service
        .upsert_record(&record(json!({"LOCATION": "NYC", "LAT": 41.0, "LON": -74.0})), 200)
        .await
        .unwrap();

    let rows = sqlx::query("SELECT LOCATION, LAT, LON, TZ, UPDATED FROM LOCATIONS")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1, "still a single row for NYC");

    let row = &rows[0];
    assert_eq!(row.get::<String, _>("LOCATION"), "NYC");
    assert_eq!(row.get::<f64, _>("LAT"), 41.0);
    assert_eq!(row.get::<f64, _>("LON"), -74.0);
    assert_eq!(row.get::<String, _>("TZ"), "America/New_York");
    assert_eq!(row.get::<i64, _>("UPDATED"), 200);
}

#[tokio::test]
async fn refresh_stamp_strictly_increases_across_runs() {
    let pool = setup_pool().await;
    let service = LocationSyncService::new(pool.clone());
    let rec = record(json!({"LOCATION": "NYC", "LAT": 40.7}));

    service.upsert_record(&rec, 100).await.unwrap();
    let first: i64 = sqlx::query_scalar("SELECT UPDATED FROM LOCATIONS WHERE LOCATION = 'NYC'")
        .fetch_one(&pool)
        .await
        .unwrap();

    service.upsert_record(&rec, 200).await.unwrap();
    let second: i64 = sqlx::query_scalar("SELECT UPDATED FROM LOCATIONS WHERE LOCATION = 'NYC'")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert!(second > first);
}

#[tokio::test]
async fn record_missing_primary_key_is_rejected() {
    let pool = setup_pool().await;
    let service = LocationSyncService::new(pool.clone());

    let err = service
        .upsert_record(&record(json!({"LAT": 40.7, "LON": -74.0})), 100)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Configuration(_)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM LOCATIONS")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn record_with_unsafe_column_name_is_rejected() {
    let pool = setup_pool().await;
    let service = LocationSyncService::new(pool.clone());

    let err = service
        .upsert_record(
            &record(json!({"LOCATION": "NYC", "LAT; DROP TABLE LOCATIONS": 1.0})),
            100,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidIdentifier(_)));

    // The directory table survived.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM LOCATIONS")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn sync_all_fails_fast_but_keeps_prior_records() {
    let pool = setup_pool().await;
    let service = LocationSyncService::new(pool.clone());

    let records = vec![
        record(json!({"LOCATION": "NYC", "LAT": 40.7})),
        record(json!({"LAT": 51.5})), // no LOCATION
        record(json!({"LOCATION": "LDN", "LAT": 51.5})),
    ];

    assert!(service.sync_all(&records).await.is_err());

    let names: Vec<String> = sqlx::query_scalar("SELECT LOCATION FROM LOCATIONS ORDER BY LOCATION")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(names, vec!["NYC".to_string()]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Valid identifiers come back quoted with content unchanged.
    #[test]
    fn prop_valid_identifiers_pass(name in "[A-Za-z0-9_]{1,24}") {
        let quoted = quote_ident(&name).unwrap();
        prop_assert_eq!(quoted, format!("\"{name}\""));
    }

    /// Any identifier carrying a character outside the allow-list fails.
    #[test]
    fn prop_tainted_identifiers_fail(
        prefix in "[A-Za-z0-9_]{0,8}",
        bad in "[ ;.'\"()=-]",
        suffix in "[A-Za-z0-9_]{0,8}",
    ) {
        let name = format!("{prefix}{bad}{suffix}");
        prop_assert!(quote_ident(&name).is_err());
    }
}
