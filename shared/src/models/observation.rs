//! Current-conditions observation models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One current observation per location.
///
/// The OBSERVATIONS table holds the latest reading only, not a series. A row
/// is replaced wholesale whenever an incoming observation is at least as
/// fresh as the stored one (`created` greater than or equal), and left
/// untouched otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Observation {
    #[sqlx(rename = "LOCATION")]
    pub location: String,
    /// Provider observation time, epoch seconds. The freshness key.
    #[sqlx(rename = "CREATED")]
    pub created: i64,
    /// 1 when the provider reports daytime, 0 otherwise.
    #[sqlx(rename = "DAYTIME")]
    pub daytime: i64,
    #[sqlx(rename = "CONDITION")]
    pub condition: Option<String>,
    #[sqlx(rename = "TEMP")]
    pub temp: Option<f64>,
    #[sqlx(rename = "FELLS_LIKE")]
    pub fells_like: Option<f64>,
    #[sqlx(rename = "DEW_POINT")]
    pub dew_point: Option<f64>,
    #[sqlx(rename = "HEAT_INDEX")]
    pub heat_index: Option<f64>,
    #[sqlx(rename = "WIND_CHILL")]
    pub wind_chill: Option<f64>,
    #[sqlx(rename = "HUMIDITY")]
    pub humidity: Option<f64>,
    #[sqlx(rename = "UV_INDEX")]
    pub uv_index: Option<f64>,
    #[sqlx(rename = "PRECIPITATION_PROB")]
    pub precipitation_prob: Option<f64>,
    #[sqlx(rename = "PRECIPITATION_TYPE")]
    pub precipitation_type: Option<String>,
    #[sqlx(rename = "THUNDERSTORM_PROB")]
    pub thunderstorm_prob: Option<f64>,
    #[sqlx(rename = "AIR_PRESSURE")]
    pub air_pressure: Option<f64>,
    #[sqlx(rename = "WIND_DIRECTION")]
    pub wind_direction: Option<f64>,
    #[sqlx(rename = "WIND_CARDINAL")]
    pub wind_cardinal: Option<String>,
    #[sqlx(rename = "WIND_SPEED")]
    pub wind_speed: Option<f64>,
    #[sqlx(rename = "WIND_GUST")]
    pub wind_gust: Option<f64>,
    #[sqlx(rename = "VISIBILITY")]
    pub visibility: Option<f64>,
    #[sqlx(rename = "CLOUD_COVER")]
    pub cloud_cover: Option<f64>,
    #[sqlx(rename = "MAX_TEMP")]
    pub max_temp: Option<f64>,
    #[sqlx(rename = "MIN_TEMP")]
    pub min_temp: Option<f64>,
    #[sqlx(rename = "SNOW_HISTORY")]
    pub snow_history: Option<f64>,
    #[sqlx(rename = "RAIN_HISTORY")]
    pub rain_history: Option<f64>,
}
