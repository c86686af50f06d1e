//! Database helpers: identifier sanitizing, scalar binding, migrations
//!
//! Column sets for the LOCATIONS upsert are data-driven (they come from the
//! configuration file), and identifiers cannot be bound as `?` parameters.
//! Every dynamic identifier therefore passes [`quote_ident`] before it is
//! concatenated into statement text; values are always bound as parameters.

use serde_json::Value;
use sqlx::migrate::Migrator;
use sqlx::sqlite::SqliteArguments;
use sqlx::{query::Query, Sqlite};

use crate::error::{AppError, AppResult};

/// Embedded migrations for the weather store schema.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Safely quote an SQL identifier (e.g. a column name).
///
/// Only alphanumeric + underscore names are allowed; anything else fails
/// with [`AppError::InvalidIdentifier`]. The returned form is wrapped in
/// double quotes, the standard SQLite identifier quoting.
pub fn quote_ident(name: &str) -> AppResult<String> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AppError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{name}\""))
}

/// Bind one JSON scalar as the next positional parameter.
///
/// Arrays and objects are rejected: location records are flat column/value
/// mappings and a nested value means the configuration file is malformed.
pub fn bind_scalar<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    column: &str,
    value: &'q Value,
) -> AppResult<Query<'q, Sqlite, SqliteArguments<'q>>> {
    match value {
        Value::Null => Ok(query.bind(None::<String>)),
        Value::Bool(b) => Ok(query.bind(i64::from(*b))),
        Value::Number(n) if n.is_i64() => Ok(query.bind(n.as_i64().unwrap_or_default())),
        Value::Number(n) => Ok(query.bind(n.as_f64().unwrap_or_default())),
        Value::String(s) => Ok(query.bind(s.as_str())),
        Value::Array(_) | Value::Object(_) => Err(AppError::Configuration(format!(
            "non-scalar value for column {column}"
        ))),
    }
}
