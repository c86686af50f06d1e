//! HTTP handlers for the read API

mod health;
mod items;

pub use health::*;
pub use items::*;
