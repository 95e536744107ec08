use crate::math::Vec3;

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb3 {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb3 { min, max }
    }

    /// Box centered on `center` with full extents `size`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Aabb3::new(center - half, center + half)
    }

    pub fn union(self, other: Aabb3) -> Self {
        Aabb3::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::Aabb3;
    use crate::math::Vec3;

    #[test]
    fn center_size_round_trip() {
        let b = Aabb3::from_center_size(Vec3::new(0.0, 1.0, 0.0), Vec3::new(4.0, 2.0, 4.0));
        assert_eq!(b.min, Vec3::new(-2.0, 0.0, -2.0));
        assert_eq!(b.center(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(b.size(), Vec3::new(4.0, 2.0, 4.0));
    }

    #[test]
    fn union_covers_both() {
        let a = Aabb3::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let b = Aabb3::from_center_size(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(2.0));
        let u = a.union(b);
        assert!(u.contains(Vec3::new(-1.0, 0.0, 0.0)));
        assert!(u.contains(Vec3::new(6.0, 0.0, 0.0)));
        assert!(!u.contains(Vec3::new(7.0, 0.0, 0.0)));
    }
}
