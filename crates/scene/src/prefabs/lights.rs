use crate::World;
use crate::components::{Light, Role, Transform};
use crate::entity::EntityId;

pub const SUN_POSITION: [f64; 3] = [50.0, 100.0, 50.0];

/// Soft white ambient plus a shadow-casting sun.
pub fn spawn_lights(world: &mut World) -> Vec<EntityId> {
    let ambient = world.spawn();
    world.set_transform(ambient, Transform::identity());
    world.set_light(ambient, Light::ambient(0xffffff, 0.5));
    world.set_role(ambient, Role::Light);

    let sun = world.spawn();
    let [x, y, z] = SUN_POSITION;
    world.set_transform(sun, Transform::at(x, y, z));
    world.set_light(sun, Light::sun(0xffffff, 0.8));
    world.set_role(sun, Role::Light);

    vec![ambient, sun]
}
