use foundation::math::Vec3;
use serde::Serialize;

/// Geometry handed to the renderer. Planes and grids lie in the XZ plane.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape3D {
    Box { size: Vec3 },
    Plane { width: f64, depth: f64 },
    Grid { size: f64, divisions: u32 },
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Drawable3D {
    pub shape: Shape3D,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Drawable3D {
    pub fn cuboid(size: Vec3) -> Self {
        Self {
            shape: Shape3D::Box { size },
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn plane(width: f64, depth: f64) -> Self {
        Self {
            shape: Shape3D::Plane { width, depth },
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn grid(size: f64, divisions: u32) -> Self {
        Self {
            shape: Shape3D::Grid { size, divisions },
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }
}
