//! Location directory synchronization
//!
//! Merges configured location records into the LOCATIONS table. Records are
//! ordered column/value mappings whose key sets may vary; each upsert
//! targets exactly the columns present in the record plus the UPDATED
//! refresh stamp, so columns absent from a record survive the merge.

use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value};
use sqlx::SqlitePool;

use crate::db::{bind_scalar, quote_ident};
use crate::error::{AppError, AppResult};

/// A configured location record: ordered field name to scalar value.
pub type LocationRecord = Map<String, Value>;

/// The configuration document carrying the location directory.
#[derive(Debug, Deserialize)]
struct LocationsDocument {
    #[serde(rename = "LOCATIONS")]
    locations: Vec<LocationRecord>,
}

/// Read the location directory from a JSON configuration file.
pub fn load_locations_file(path: &str) -> AppResult<Vec<LocationRecord>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Configuration(format!("cannot read {path}: {e}")))?;
    let doc: LocationsDocument = serde_json::from_str(&raw)
        .map_err(|e| AppError::Configuration(format!("cannot parse {path}: {e}")))?;
    Ok(doc.locations)
}

/// Location directory synchronizer
#[derive(Clone)]
pub struct LocationSyncService {
    db: SqlitePool,
}

impl LocationSyncService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Upsert every record, stamping each with the current wall-clock time.
    ///
    /// Fail-fast: the first bad record (missing LOCATION, invalid column
    /// name, non-scalar value) aborts the remainder of the run. Statements
    /// already executed stay committed; there is no wrapping transaction.
    pub async fn sync_all(&self, records: &[LocationRecord]) -> AppResult<usize> {
        for record in records {
            self.upsert_record(record, Utc::now().timestamp()).await?;
        }
        Ok(records.len())
    }

    /// Upsert one record with an explicit refresh stamp.
    ///
    /// Composes `INSERT ... ON CONFLICT(LOCATION) DO UPDATE SET` over the
    /// record's own columns plus UPDATED. Column names pass [`quote_ident`]
    /// before entering the statement text; values are bound positionally in
    /// field order, with the stamp appended last.
    pub async fn upsert_record(&self, record: &LocationRecord, updated: i64) -> AppResult<()> {
        if !record.contains_key("LOCATION") {
            return Err(AppError::Configuration(
                "location record missing LOCATION field".to_string(),
            ));
        }

        let mut quoted = Vec::with_capacity(record.len() + 1);
        for col in record.keys() {
            quoted.push(quote_ident(col)?);
        }
        quoted.push(quote_ident("UPDATED")?);

        let insert_cols = quoted.join(", ");
        let placeholders = vec!["?"; quoted.len()].join(", ");
        let update_set = quoted
            .iter()
            .map(|q| format!("{q} = excluded.{q}"))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "INSERT INTO LOCATIONS ({insert_cols}) VALUES ({placeholders}) \
             ON CONFLICT(LOCATION) DO UPDATE SET {update_set}"
        );

        let mut query = sqlx::query(&sql);
        for (col, value) in record {
            query = bind_scalar(query, col, value)?;
        }
        query = query.bind(updated);

        query.execute(&self.db).await?;
        Ok(())
    }
}
