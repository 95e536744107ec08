use crate::components::{ComponentBounds, Drawable3D, Light, Material, Role, Transform};
use crate::entity::EntityId;
use foundation::bounds::Aabb3;
use foundation::handles::Handle;

/// Component storage for one scene. Slots are recycled after
/// [`World::despawn`]; stale ids are detected by generation.
#[derive(Debug, Default)]
pub struct World {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u32>,
    transforms: Vec<Option<Transform>>,
    bounds: Vec<Option<ComponentBounds>>,
    drawables_3d: Vec<Option<Drawable3D>>,
    materials: Vec<Option<Material>>,
    lights: Vec<Option<Light>>,
    roles: Vec<Option<Role>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        if let Some(index) = self.free.pop() {
            let idx = index as usize;
            self.alive[idx] = true;
            return EntityId(Handle::new(index, self.generations[idx]));
        }

        let index = self.generations.len() as u32;
        self.ensure_capacity(index as usize);
        self.alive[index as usize] = true;
        EntityId(Handle::new(index, 0))
    }

    /// Clears every component of `entity` and frees its slot.
    ///
    /// Returns `false` for ids that are already dead.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let idx = entity.index() as usize;
        self.alive[idx] = false;
        self.generations[idx] = entity.0.bumped().generation();
        self.transforms[idx] = None;
        self.bounds[idx] = None;
        self.drawables_3d[idx] = None;
        self.materials[idx] = None;
        self.lights[idx] = None;
        self.roles[idx] = None;
        self.free.push(entity.index());
        true
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        let idx = entity.index() as usize;
        self.alive.get(idx).copied().unwrap_or(false)
            && self.generations[idx] == entity.generation()
    }

    pub fn entity_count(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.ensure_capacity(entity.index() as usize);
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn set_bounds(&mut self, entity: EntityId, bounds: ComponentBounds) {
        self.ensure_capacity(entity.index() as usize);
        self.bounds[entity.index() as usize] = Some(bounds);
    }

    pub fn set_drawable_3d(&mut self, entity: EntityId, drawable: Drawable3D) {
        self.ensure_capacity(entity.index() as usize);
        self.drawables_3d[entity.index() as usize] = Some(drawable);
    }

    pub fn set_material(&mut self, entity: EntityId, material: Material) {
        self.ensure_capacity(entity.index() as usize);
        self.materials[entity.index() as usize] = Some(material);
    }

    pub fn set_light(&mut self, entity: EntityId, light: Light) {
        self.ensure_capacity(entity.index() as usize);
        self.lights[entity.index() as usize] = Some(light);
    }

    pub fn set_role(&mut self, entity: EntityId, role: Role) {
        self.ensure_capacity(entity.index() as usize);
        self.roles[entity.index() as usize] = Some(role);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.component(&self.transforms, entity)
    }

    pub fn drawable_3d(&self, entity: EntityId) -> Option<Drawable3D> {
        self.component(&self.drawables_3d, entity)
    }

    pub fn material(&self, entity: EntityId) -> Option<Material> {
        self.component(&self.materials, entity)
    }

    pub fn role(&self, entity: EntityId) -> Option<Role> {
        self.component(&self.roles, entity)
    }

    /// Placed drawables in ascending slot order.
    pub fn drawables_3d(&self) -> Vec<(EntityId, Transform, Drawable3D)> {
        self.collect_placed(&self.drawables_3d)
    }

    pub fn lights(&self) -> Vec<(EntityId, Transform, Light)> {
        self.collect_placed(&self.lights)
    }

    pub fn entities_with_role(&self, pred: impl Fn(&Role) -> bool) -> Vec<EntityId> {
        self.roles
            .iter()
            .enumerate()
            .filter_map(|(idx, role)| {
                let role = role.as_ref()?;
                pred(role).then(|| self.entity_at(idx))
            })
            .collect()
    }

    /// Union of all bounds, or `None` when nothing has bounds.
    pub fn total_bounds(&self) -> Option<Aabb3> {
        self.bounds
            .iter()
            .flatten()
            .map(|b| b.aabb)
            .reduce(Aabb3::union)
    }

    fn component<T: Copy>(&self, store: &[Option<T>], entity: EntityId) -> Option<T> {
        if !self.is_alive(entity) {
            return None;
        }
        store.get(entity.index() as usize).and_then(|c| *c)
    }

    fn entity_at(&self, idx: usize) -> EntityId {
        EntityId(Handle::new(idx as u32, self.generations[idx]))
    }

    // Entities without a transform are not placed yet and are skipped.
    fn collect_placed<T: Copy>(&self, store: &[Option<T>]) -> Vec<(EntityId, Transform, T)> {
        store
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| {
                let item = (*item)?;
                let transform = self.transforms.get(idx).copied().flatten()?;
                Some((self.entity_at(idx), transform, item))
            })
            .collect()
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.generations.len() <= idx {
            let new_len = idx + 1;
            self.generations.resize(new_len, 0);
            self.alive.resize(new_len, false);
            self.transforms.resize(new_len, None);
            self.bounds.resize(new_len, None);
            self.drawables_3d.resize(new_len, None);
            self.materials.resize(new_len, None);
            self.lights.resize(new_len, None);
            self.roles.resize(new_len, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::World;
    use crate::components::{Drawable3D, Role, Transform};
    use foundation::math::Vec3;

    fn spawn_box(world: &mut World) -> crate::entity::EntityId {
        let entity = world.spawn();
        world.set_transform(entity, Transform::identity());
        world.set_drawable_3d(entity, Drawable3D::cuboid(Vec3::splat(1.0)));
        entity
    }

    #[test]
    fn spawn_and_collect_drawables() {
        let mut world = World::new();
        let entity = spawn_box(&mut world);

        let drawables = world.drawables_3d();
        assert_eq!(drawables.len(), 1);
        assert_eq!(drawables[0].0, entity);
    }

    #[test]
    fn unplaced_entities_are_skipped() {
        let mut world = World::new();
        let entity = world.spawn();
        world.set_drawable_3d(entity, Drawable3D::cuboid(Vec3::splat(1.0)));

        assert!(world.drawables_3d().is_empty());
        world.set_transform(entity, Transform::at(0.0, 1.0, 0.0));
        assert_eq!(world.drawables_3d().len(), 1);
    }

    #[test]
    fn despawn_clears_components_and_recycles_slot() {
        let mut world = World::new();
        let a = spawn_box(&mut world);
        assert!(world.despawn(a));
        assert!(!world.despawn(a));
        assert!(world.drawables_3d().is_empty());
        assert_eq!(world.entity_count(), 0);

        let b = world.spawn();
        assert_eq!(b.index(), a.index());
        assert_ne!(b, a);
        assert!(!world.is_alive(a));
        assert!(world.transform(a).is_none());
    }

    #[test]
    fn role_queries() {
        let mut world = World::new();
        let floor = spawn_box(&mut world);
        world.set_role(floor, Role::Floor { index: 0 });
        let ground = spawn_box(&mut world);
        world.set_role(ground, Role::Ground);

        assert_eq!(world.entities_with_role(Role::is_building), vec![floor]);
        assert_eq!(world.role(ground), Some(Role::Ground));
    }
}
