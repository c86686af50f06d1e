//! Shared types and models for the Weather Sync Platform
//!
//! This crate contains the domain types shared between the backend service
//! and any other consumers of the weather store.

pub mod models;

pub use models::*;
