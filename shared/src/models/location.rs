//! Location directory models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the LOCATIONS directory table.
///
/// Rows are created or refreshed by the location synchronizer from
/// configuration and never deleted by the service. The three product flags
/// select which downstream collections run for the location; only the
/// observations flag is consumed here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    #[sqlx(rename = "LOCATION")]
    pub location: String,
    #[sqlx(rename = "LAT")]
    pub lat: Option<f64>,
    #[sqlx(rename = "LON")]
    pub lon: Option<f64>,
    #[sqlx(rename = "TZ")]
    pub tz: Option<String>,
    /// Collect current observations for this location (0/1).
    #[sqlx(rename = "OBSERVATIONS")]
    pub observations: Option<i64>,
    /// Collect the 3-hour forecast product (0/1).
    #[sqlx(rename = "FC3HR")]
    pub fc3hr: Option<i64>,
    /// Collect the 7-day forecast product (0/1).
    #[sqlx(rename = "FC7DAY")]
    pub fc7day: Option<i64>,
    /// Epoch seconds when the row was first created.
    #[sqlx(rename = "CREATED")]
    pub created: Option<i64>,
    /// Epoch seconds of the last synchronization that touched the row.
    #[sqlx(rename = "UPDATED")]
    pub updated: Option<i64>,
}

/// The (name, latitude, longitude) tuple the observation fetcher works from.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ObservationTarget {
    #[sqlx(rename = "LOCATION")]
    pub location: String,
    #[sqlx(rename = "LAT")]
    pub lat: Option<f64>,
    #[sqlx(rename = "LON")]
    pub lon: Option<f64>,
}
