//! Current-conditions provider client
//!
//! Fetches the raw provider payload and maps it to an [`Observation`] row.
//! The payload is kept as loose JSON and picked apart with a tolerant
//! path walker instead of typed response structs: a single absent or
//! oddly-shaped optional field must not fail the whole fetch.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime};
use reqwest::Client;
use serde_json::Value;
use shared::models::Observation;

use crate::error::{AppError, AppResult};

/// How much of an error body makes it into log lines.
const BODY_SNIPPET_LEN: usize = 200;

/// Current-conditions API client
#[derive(Clone)]
pub struct ConditionsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ConditionsClient {
    /// Create a new client with the given credential and request timeout.
    pub fn new(api_key: String, base_url: String, timeout_secs: u64) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Fetch the raw current-conditions document for a coordinate pair.
    ///
    /// Non-success statuses become [`AppError::ProviderHttp`] with a
    /// truncated body; network and timeout failures become
    /// [`AppError::ProviderTransport`].
    pub async fn fetch_current(&self, latitude: f64, longitude: f64) -> AppResult<Value> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.clone()),
                ("location.latitude", latitude.to_string()),
                ("location.longitude", longitude.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderHttp {
                status: status.as_u16(),
                body: truncate(&body, BODY_SNIPPET_LEN),
            });
        }

        Ok(response.json().await?)
    }
}

/// Safely fetch nested values: `get_in(data, &["a", "b", "c"])`.
///
/// Yields `None` as soon as any intermediate step is missing or not an
/// object, rather than failing.
pub fn get_in<'a>(data: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = data;
    for key in path {
        cur = cur.as_object()?.get(*key)?;
    }
    Some(cur)
}

fn get_f64(data: &Value, path: &[&str]) -> Option<f64> {
    get_in(data, path).and_then(Value::as_f64)
}

fn get_str(data: &Value, path: &[&str]) -> Option<String> {
    get_in(data, path)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Convert a provider RFC3339 timestamp (up to nanosecond precision, "Z" or
/// explicit offset) to epoch seconds.
///
/// Fractional seconds are truncated, not rounded. Timestamps without a
/// timezone designator are assumed UTC.
pub fn rfc3339_to_epoch_seconds(ts: &str) -> AppResult<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Ok(dt.timestamp());
    }
    // No offset suffix; parse as naive and pin to UTC.
    let naive = NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| AppError::MalformedResponse(format!("bad timestamp {ts:?}: {e}")))?;
    Ok(naive.and_utc().timestamp())
}

/// Map a provider payload onto an [`Observation`] row for one location.
///
/// The top-level observation time is the only required field; everything
/// else degrades to NULL columns. Condition text prefers the coded type
/// and falls back to the human description.
pub fn observation_from_payload(location: &str, data: &Value) -> AppResult<Observation> {
    let current_time = get_str(data, &["currentTime"])
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::MalformedResponse("missing currentTime".to_string()))?;
    let created = rfc3339_to_epoch_seconds(&current_time)?;

    let daytime = get_in(data, &["isDaytime"])
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(Observation {
        location: location.to_string(),
        created,
        daytime: i64::from(daytime),
        condition: get_str(data, &["weatherCondition", "type"])
            .or_else(|| get_str(data, &["weatherCondition", "description", "text"])),
        temp: get_f64(data, &["temperature", "degrees"]),
        fells_like: get_f64(data, &["feelsLikeTemperature", "degrees"]),
        dew_point: get_f64(data, &["dewPoint", "degrees"]),
        heat_index: get_f64(data, &["heatIndex", "degrees"]),
        wind_chill: get_f64(data, &["windChill", "degrees"]),
        humidity: get_f64(data, &["relativeHumidity"]),
        uv_index: get_f64(data, &["uvIndex"]),
        precipitation_prob: get_f64(data, &["precipitation", "probability", "percent"]),
        precipitation_type: get_str(data, &["precipitation", "probability", "type"]),
        thunderstorm_prob: get_f64(data, &["thunderstormProbability"]),
        air_pressure: get_f64(data, &["airPressure", "meanSeaLevelMillibars"]),
        wind_direction: get_f64(data, &["wind", "direction", "degrees"]),
        wind_cardinal: get_str(data, &["wind", "direction", "cardinal"]),
        wind_speed: get_f64(data, &["wind", "speed", "value"]),
        wind_gust: get_f64(data, &["wind", "gust", "value"]),
        visibility: get_f64(data, &["visibility", "distance"]),
        cloud_cover: get_f64(data, &["cloudCover"]),
        max_temp: get_f64(data, &["currentConditionsHistory", "maxTemperature", "degrees"]),
        min_temp: get_f64(data, &["currentConditionsHistory", "minTemperature", "degrees"]),
        snow_history: get_f64(data, &["currentConditionsHistory", "snowQpf", "quantity"]),
        rain_history: get_f64(data, &["currentConditionsHistory", "qpf", "quantity"]),
    })
}

/// Truncate a diagnostic payload for logging.
pub fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
