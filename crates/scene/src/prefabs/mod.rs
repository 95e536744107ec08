pub mod building;
pub mod lights;
pub mod lot;

pub use building::*;
pub use lights::*;
pub use lot::*;
