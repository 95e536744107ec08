use foundation::math::Vec3;

use crate::World;
use crate::components::{
    ComponentBounds, Drawable3D, GRID_MATERIAL, GROUND_MATERIAL, LOT_MATERIAL, Role, Transform,
};
use crate::entity::EntityId;

/// Ground extends past the lot by this factor.
pub const GROUND_MARGIN: f64 = 1.5;
pub const GROUND_ELEVATION: f64 = -0.1;
pub const GRID_DIVISIONS: u32 = 20;

/// Spawns the ground plane, the translucent lot square and a grid helper.
pub fn spawn_lot(world: &mut World, lot_area_m2: f64) -> Vec<EntityId> {
    let lot_side = lot_area_m2.max(0.0).sqrt();
    let ground_size = lot_side * GROUND_MARGIN;

    let ground = world.spawn();
    world.set_transform(ground, Transform::at(0.0, GROUND_ELEVATION, 0.0));
    world.set_drawable_3d(
        ground,
        Drawable3D::plane(ground_size, ground_size).with_shadows(false, true),
    );
    world.set_material(ground, GROUND_MATERIAL);
    world.set_role(ground, Role::Ground);
    world.set_bounds(
        ground,
        ComponentBounds::centered(
            Vec3::new(0.0, GROUND_ELEVATION, 0.0),
            Vec3::new(ground_size, 0.0, ground_size),
        ),
    );

    let lot = world.spawn();
    world.set_transform(lot, Transform::identity());
    world.set_drawable_3d(lot, Drawable3D::plane(lot_side, lot_side));
    world.set_material(lot, LOT_MATERIAL);
    world.set_role(lot, Role::LotOutline);

    let grid = world.spawn();
    world.set_transform(grid, Transform::identity());
    world.set_drawable_3d(grid, Drawable3D::grid(ground_size, GRID_DIVISIONS));
    world.set_material(grid, GRID_MATERIAL);
    world.set_role(grid, Role::Grid);

    vec![ground, lot, grid]
}

#[cfg(test)]
mod tests {
    use super::spawn_lot;
    use crate::World;
    use crate::components::{Role, Shape3D};

    #[test]
    fn ground_is_larger_than_lot() {
        let mut world = World::new();
        let ids = spawn_lot(&mut world, 400.0);
        assert_eq!(ids.len(), 3);

        let ground = world.drawable_3d(ids[0]).unwrap();
        assert_eq!(ground.shape, Shape3D::Plane { width: 30.0, depth: 30.0 });
        assert!(ground.receive_shadow);

        let lot = world.drawable_3d(ids[1]).unwrap();
        assert_eq!(lot.shape, Shape3D::Plane { width: 20.0, depth: 20.0 });
        assert_eq!(world.role(ids[2]), Some(Role::Grid));
    }
}
