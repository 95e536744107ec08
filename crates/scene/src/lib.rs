pub mod camera;
pub mod components;
pub mod entity;
pub mod host;
pub mod prefabs;
pub mod world;

pub use camera::*;
pub use host::*;
pub use world::*;
