//! Database models for the Weather Sync Platform
//!
//! Re-exports models from the shared crate.

pub use shared::models::*;
