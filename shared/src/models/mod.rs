//! Domain models for the Weather Sync Platform

mod location;
mod observation;

pub use location::*;
pub use observation::*;
