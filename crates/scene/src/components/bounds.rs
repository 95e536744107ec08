use foundation::bounds::Aabb3;
use foundation::math::Vec3;

/// World-space bounds of an entity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComponentBounds {
    pub aabb: Aabb3,
}

impl ComponentBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            aabb: Aabb3::new(min, max),
        }
    }

    pub fn centered(center: Vec3, size: Vec3) -> Self {
        Self {
            aabb: Aabb3::from_center_size(center, size),
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.aabb.contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::ComponentBounds;
    use foundation::math::Vec3;

    #[test]
    fn contains_point_inside() {
        let bounds = ComponentBounds::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(bounds.contains(Vec3::new(0.5, 0.0, -0.5)));
    }

    #[test]
    fn rejects_point_outside() {
        let bounds = ComponentBounds::centered(Vec3::ZERO, Vec3::splat(2.0));
        assert!(!bounds.contains(Vec3::new(2.0, 0.0, 0.0)));
    }
}
