use foundation::math::Vec3;

/// World-space placement of an entity's center.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self { position }
    }

    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self::translate(Vec3::new(x, y, z))
    }
}
