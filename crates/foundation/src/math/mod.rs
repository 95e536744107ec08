pub mod geo;
pub mod vec;

pub use geo::*;
pub use vec::*;
