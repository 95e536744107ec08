use foundation::math::Vec3;
use massing::{BuildingModel, FLOOR_THICKNESS, FloorSpec, Side, WindowSpec};

use crate::World;
use crate::components::{
    ComponentBounds, Drawable3D, FLOOR_MATERIAL, Role, Transform, WINDOW_MATERIAL,
};
use crate::entity::EntityId;

/// Lifts the building so the ground-floor slab rests on the lot.
pub const BASE_ELEVATION: f64 = FLOOR_THICKNESS / 2.0;
/// Gap between a facade and the window panes in front of it.
pub const WINDOW_STANDOFF: f64 = 0.1;
pub const WINDOW_DEPTH: f64 = 0.1;

/// Center of a window pane relative to the floor center.
pub fn window_local_position(floor_side: f64, window: &WindowSpec) -> Vec3 {
    let face = floor_side / 2.0 + WINDOW_STANDOFF;
    match window.side {
        Side::Front => Vec3::new(window.offset, 0.0, face),
        Side::Right => Vec3::new(face, 0.0, window.offset),
        Side::Back => Vec3::new(window.offset, 0.0, -face),
        Side::Left => Vec3::new(-face, 0.0, window.offset),
    }
}

fn window_size(window: &WindowSpec) -> Vec3 {
    match window.side {
        Side::Front | Side::Back => Vec3::new(window.size, window.size, WINDOW_DEPTH),
        Side::Right | Side::Left => Vec3::new(WINDOW_DEPTH, window.size, window.size),
    }
}

fn spawn_floor(world: &mut World, floor: &FloorSpec, out: &mut Vec<EntityId>) {
    let center = Vec3::new(0.0, BASE_ELEVATION + floor.vertical_offset, 0.0);
    let size = Vec3::new(floor.side_length, FLOOR_THICKNESS, floor.side_length);

    let slab = world.spawn();
    world.set_transform(slab, Transform::translate(center));
    world.set_drawable_3d(slab, Drawable3D::cuboid(size).with_shadows(true, true));
    world.set_material(slab, FLOOR_MATERIAL);
    world.set_role(slab, Role::Floor { index: floor.index });
    world.set_bounds(slab, ComponentBounds::centered(center, size));
    out.push(slab);

    for window in &floor.windows {
        let pane = world.spawn();
        let position = center + window_local_position(floor.side_length, window);
        world.set_transform(pane, Transform::translate(position));
        world.set_drawable_3d(pane, Drawable3D::cuboid(window_size(window)));
        world.set_material(pane, WINDOW_MATERIAL);
        world.set_role(
            pane,
            Role::Window {
                floor: floor.index,
                side: window.side,
            },
        );
        out.push(pane);
    }
}

/// Spawns one slab per floor plus its window panes, bottom to top.
pub fn spawn_building(world: &mut World, model: &BuildingModel) -> Vec<EntityId> {
    let mut out = Vec::with_capacity(model.floor_count() + model.window_count());
    for floor in &model.floors {
        spawn_floor(world, floor, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Shape3D;
    use massing::{LotParameters, generate};

    #[test]
    fn one_slab_per_floor_and_one_pane_per_window() {
        let model = generate(&LotParameters::new(400.0, 2.0, 4).unwrap());
        let mut world = World::new();
        let ids = spawn_building(&mut world, &model);
        assert_eq!(ids.len(), model.floor_count() + model.window_count());

        let slabs = world.entities_with_role(|r| matches!(r, Role::Floor { .. }));
        assert_eq!(slabs.len(), 4);
        let top = world.transform(slabs[3]).unwrap();
        assert_eq!(top.position.y, 1.0 + 12.0);
    }

    #[test]
    fn slab_rests_on_ground() {
        let model = generate(&LotParameters::new(400.0, 2.0, 1).unwrap());
        let mut world = World::new();
        let ids = spawn_building(&mut world, &model);
        let bounds = world.total_bounds().unwrap();
        assert_eq!(bounds.min.y, 0.0);
        let Shape3D::Box { size } = world.drawable_3d(ids[0]).unwrap().shape else {
            panic!("slab should be a box");
        };
        assert_eq!(size.y, FLOOR_THICKNESS);
    }

    #[test]
    fn windows_sit_outside_each_face() {
        let side = 12.0;
        let w = |side_enum| WindowSpec {
            side: side_enum,
            offset: 1.5,
            size: 1.0,
        };
        assert_eq!(window_local_position(side, &w(Side::Front)), Vec3::new(1.5, 0.0, 6.1));
        assert_eq!(window_local_position(side, &w(Side::Right)), Vec3::new(6.1, 0.0, 1.5));
        assert_eq!(window_local_position(side, &w(Side::Back)), Vec3::new(1.5, 0.0, -6.1));
        assert_eq!(window_local_position(side, &w(Side::Left)), Vec3::new(-6.1, 0.0, 1.5));
    }
}
