//! Minimal read surface: greeting plus a city echo endpoint

use axum::{extract::Path, Json};
use serde::Serialize;

/// Root endpoint
pub async fn read_root() -> &'static str {
    "Weather Sync Platform API v1.0"
}

#[derive(Serialize)]
pub struct ItemResponse {
    pub item_id: String,
}

/// Echo the requested city back to the caller.
pub async fn read_item(Path(city): Path<String>) -> Json<ItemResponse> {
    Json(ItemResponse { item_id: city })
}
