//! Small shared primitives: vectors, geographic points, bounds, handles, time.

pub mod bounds;
pub mod handles;
pub mod math;
pub mod time;

pub use bounds::*;
pub use handles::*;
pub use time::*;
