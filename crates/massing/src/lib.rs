//! Procedural massing: lot parameters in, stacked floor boxes with windows out.
//!
//! Everything here is pure. [`generate`] keeps no state between calls; the
//! caller owns the resulting [`BuildingModel`] and decides when to replace it.

pub mod generator;
pub mod lot_estimate;
pub mod model;
pub mod params;

pub use generator::*;
pub use lot_estimate::*;
pub use model::*;
pub use params::*;
