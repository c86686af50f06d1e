//! Observation fetching and storage
//!
//! For every location flagged for observation collection, fetches current
//! conditions from the provider and merges the result into OBSERVATIONS
//! under the freshness guard: the stored row is only replaced when the
//! incoming observation time is at least the stored one, so the table never
//! regresses to older data.

use sqlx::SqlitePool;

use crate::models::{Observation, ObservationTarget};

use crate::error::{AppError, AppResult};
use crate::external::conditions::observation_from_payload;
use crate::external::ConditionsClient;

/// Outcome of one observation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Locations whose fetch produced an upsert statement.
    pub stored: usize,
    /// Locations skipped after a non-fatal failure.
    pub skipped: usize,
}

/// Observation fetch/store service
#[derive(Clone)]
pub struct ObservationSyncService {
    db: SqlitePool,
    client: ConditionsClient,
}

impl ObservationSyncService {
    pub fn new(db: SqlitePool, client: ConditionsClient) -> Self {
        Self { db, client }
    }

    /// Snapshot the locations eligible for observation collection.
    pub async fn observation_targets(&self) -> AppResult<Vec<ObservationTarget>> {
        let targets = sqlx::query_as::<_, ObservationTarget>(
            "SELECT LOCATION, LAT, LON FROM LOCATIONS WHERE OBSERVATIONS = 1",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(targets)
    }

    /// Run one sequential pass over every eligible location.
    ///
    /// Each location gets exactly one attempt. Fetch and mapping failures
    /// are logged with the location name and skipped; they never abort the
    /// run. Database failures do abort: nothing further can be stored.
    pub async fn run_once(&self) -> AppResult<RunReport> {
        let targets = self.observation_targets().await?;
        let mut report = RunReport::default();

        for target in targets {
            match self.fetch_one(&target).await {
                Ok(observation) => {
                    self.store_observation(&observation).await?;
                    report.stored += 1;
                }
                Err(AppError::Database(e)) => return Err(AppError::Database(e)),
                Err(e) => {
                    tracing::warn!(location = %target.location, "observation skipped: {e}");
                    report.skipped += 1;
                }
            }
        }

        Ok(report)
    }

    async fn fetch_one(&self, target: &ObservationTarget) -> AppResult<Observation> {
        let (lat, lon) = match (target.lat, target.lon) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(AppError::Configuration(
                    "location has no coordinates".to_string(),
                ))
            }
        };

        let payload = self.client.fetch_current(lat, lon).await?;
        observation_from_payload(&target.location, &payload)
    }

    /// Upsert one observation row, guarded by freshness.
    ///
    /// The update branch only fires when the incoming CREATED stamp is
    /// greater than or equal to the stored one; an older payload leaves the
    /// row untouched and the statement is a no-op.
    pub async fn store_observation(&self, obs: &Observation) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO OBSERVATIONS (
                LOCATION, CREATED, DAYTIME, CONDITION,
                TEMP, FELLS_LIKE, DEW_POINT, HEAT_INDEX, WIND_CHILL,
                HUMIDITY, UV_INDEX,
                PRECIPITATION_PROB, PRECIPITATION_TYPE,
                THUNDERSTORM_PROB, AIR_PRESSURE,
                WIND_DIRECTION, WIND_CARDINAL, WIND_SPEED, WIND_GUST,
                VISIBILITY, CLOUD_COVER,
                MAX_TEMP, MIN_TEMP, SNOW_HISTORY, RAIN_HISTORY
            ) VALUES (
                ?, ?, ?, ?,
                ?, ?, ?, ?, ?,
                ?, ?,
                ?, ?,
                ?, ?,
                ?, ?, ?, ?,
                ?, ?,
                ?, ?, ?, ?
            )
            ON CONFLICT(LOCATION) DO UPDATE SET
                CREATED            = excluded.CREATED,
                DAYTIME            = excluded.DAYTIME,
                CONDITION          = excluded.CONDITION,
                TEMP               = excluded.TEMP,
                FELLS_LIKE         = excluded.FELLS_LIKE,
                DEW_POINT          = excluded.DEW_POINT,
                HEAT_INDEX         = excluded.HEAT_INDEX,
                WIND_CHILL         = excluded.WIND_CHILL,
                HUMIDITY           = excluded.HUMIDITY,
                UV_INDEX           = excluded.UV_INDEX,
                PRECIPITATION_PROB = excluded.PRECIPITATION_PROB,
                PRECIPITATION_TYPE = excluded.PRECIPITATION_TYPE,
                THUNDERSTORM_PROB  = excluded.THUNDERSTORM_PROB,
                AIR_PRESSURE       = excluded.AIR_PRESSURE,
                WIND_DIRECTION     = excluded.WIND_DIRECTION,
                WIND_CARDINAL      = excluded.WIND_CARDINAL,
                WIND_SPEED         = excluded.WIND_SPEED,
                WIND_GUST          = excluded.WIND_GUST,
                VISIBILITY         = excluded.VISIBILITY,
                CLOUD_COVER        = excluded.CLOUD_COVER,
                MAX_TEMP           = excluded.MAX_TEMP,
                MIN_TEMP           = excluded.MIN_TEMP,
                SNOW_HISTORY       = excluded.SNOW_HISTORY,
                RAIN_HISTORY       = excluded.RAIN_HISTORY
            WHERE excluded.CREATED >= OBSERVATIONS.CREATED
            "#,
        )
        .bind(&obs.location)
        .bind(obs.created)
        .bind(obs.daytime)
        .bind(&obs.condition)
        .bind(obs.temp)
        .bind(obs.fells_like)
        .bind(obs.dew_point)
        .bind(obs.heat_index)
        .bind(obs.wind_chill)
        .bind(obs.humidity)
        .bind(obs.uv_index)
        .bind(obs.precipitation_prob)
        .bind(&obs.precipitation_type)
        .bind(obs.thunderstorm_prob)
        .bind(obs.air_pressure)
        .bind(obs.wind_direction)
        .bind(&obs.wind_cardinal)
        .bind(obs.wind_speed)
        .bind(obs.wind_gust)
        .bind(obs.visibility)
        .bind(obs.cloud_cover)
        .bind(obs.max_temp)
        .bind(obs.min_temp)
        .bind(obs.snow_history)
        .bind(obs.rain_history)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}
