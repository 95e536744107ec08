pub mod bounds;
pub mod drawable3d;
pub mod light;
pub mod material;
pub mod role;
pub mod transform;

pub use bounds::*;
pub use drawable3d::*;
pub use light::*;
pub use material::*;
pub use role::*;
pub use transform::*;
