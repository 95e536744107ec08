use foundation::math::Vec3;
use massing::BuildingModel;
use runtime::{Frame, FrameLoop};
use serde::Serialize;

use crate::camera::OrbitCamera;
use crate::components::{Drawable3D, Light, Material, Role};
use crate::entity::EntityId;
use crate::prefabs::{spawn_building, spawn_lights, spawn_lot};
use crate::world::World;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        if self.height <= 0.0 {
            1.0
        } else {
            (self.width / self.height).max(1e-6)
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    NotInitialized,
    InvalidViewport { width: f64, height: f64 },
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::NotInitialized => write!(f, "scene host is not initialized"),
            SceneError::InvalidViewport { width, height } => {
                write!(f, "invalid viewport {width}x{height}")
            }
        }
    }
}

impl std::error::Error for SceneError {}

/// Owner of the 3D viewport: camera, scene graph and render loop.
///
/// The wizard drives it through this trait only. A host that was disposed
/// must be initialized again before it accepts content.
pub trait SceneHost {
    fn initialize(&mut self, viewport: Viewport) -> Result<(), SceneError>;

    fn is_initialized(&self) -> bool;

    fn resize(&mut self, viewport: Viewport) -> Result<(), SceneError>;

    /// Replaces the ground and lot outline for a lot of `lot_area_m2`.
    fn set_ground(&mut self, lot_area_m2: f64) -> Result<(), SceneError>;

    /// Replaces the displayed building. The swap is atomic as seen from the
    /// render loop.
    fn set_building(&mut self, model: &BuildingModel) -> Result<(), SceneError>;

    /// Starts the per-frame loop.
    fn start(&mut self);

    fn stop(&mut self);

    /// Releases the scene and stops the loop.
    fn dispose(&mut self);
}

impl<T: SceneHost + ?Sized> SceneHost for Box<T> {
    fn initialize(&mut self, viewport: Viewport) -> Result<(), SceneError> {
        (**self).initialize(viewport)
    }

    fn is_initialized(&self) -> bool {
        (**self).is_initialized()
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), SceneError> {
        (**self).resize(viewport)
    }

    fn set_ground(&mut self, lot_area_m2: f64) -> Result<(), SceneError> {
        (**self).set_ground(lot_area_m2)
    }

    fn set_building(&mut self, model: &BuildingModel) -> Result<(), SceneError> {
        (**self).set_building(model)
    }

    fn start(&mut self) {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }
}

/// Per-frame summary returned by [`WorldSceneHost::tick`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameStats {
    pub frame: Frame,
    pub draw_items: usize,
    pub camera_moving: bool,
}

/// One renderable, flattened for an external renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawItem {
    pub role: Option<Role>,
    pub position: Vec3,
    pub drawable: Drawable3D,
    pub material: Option<Material>,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct LightItem {
    pub position: Vec3,
    pub light: Light,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub frame_index: u64,
    pub viewport: Viewport,
    pub eye: Vec3,
    pub target: Vec3,
    pub view_proj: [[f32; 4]; 4],
    pub items: Vec<DrawItem>,
    pub lights: Vec<LightItem>,
}

#[derive(Debug)]
struct Live {
    world: World,
    lights: Vec<EntityId>,
    ground: Vec<EntityId>,
    building: Vec<EntityId>,
}

/// Headless scene host backed by a [`World`].
///
/// Front-ends read [`WorldSceneHost::snapshot`] each frame and draw it with
/// whatever renderer they have.
#[derive(Debug, Default)]
pub struct WorldSceneHost {
    live: Option<Live>,
    viewport: Viewport,
    camera: OrbitCamera,
    frame_loop: FrameLoop,
    disposals: u32,
}

impl WorldSceneHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn world(&self) -> Option<&World> {
        self.live.as_ref().map(|l| &l.world)
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn light_count(&self) -> usize {
        self.live.as_ref().map_or(0, |l| l.lights.len())
    }

    pub fn has_building(&self) -> bool {
        self.live.as_ref().is_some_and(|l| !l.building.is_empty())
    }

    /// How many times resources were released.
    pub fn disposals(&self) -> u32 {
        self.disposals
    }

    /// Advances one frame. `None` while stopped or uninitialized.
    pub fn tick(&mut self) -> Option<FrameStats> {
        let live = self.live.as_ref()?;
        let frame = self.frame_loop.tick()?;
        let camera_moving = self.camera.update();
        Some(FrameStats {
            frame,
            draw_items: live.world.drawables_3d().len(),
            camera_moving,
        })
    }

    pub fn snapshot(&self) -> Option<SceneSnapshot> {
        let live = self.live.as_ref()?;
        let world = &live.world;
        let items = world
            .drawables_3d()
            .into_iter()
            .map(|(entity, transform, drawable)| DrawItem {
                role: world.role(entity),
                position: transform.position,
                drawable,
                material: world.material(entity),
            })
            .collect();
        let lights = world
            .lights()
            .into_iter()
            .map(|(_, transform, light)| LightItem {
                position: transform.position,
                light,
            })
            .collect();

        Some(SceneSnapshot {
            frame_index: self.frame_loop.frame_count(),
            viewport: self.viewport,
            eye: self.camera.eye(),
            target: self.camera.current.target,
            view_proj: self.camera.view_proj(self.viewport.aspect()),
            items,
            lights,
        })
    }

    fn live_mut(&mut self) -> Result<&mut Live, SceneError> {
        self.live.as_mut().ok_or(SceneError::NotInitialized)
    }
}

impl SceneHost for WorldSceneHost {
    fn initialize(&mut self, viewport: Viewport) -> Result<(), SceneError> {
        if !viewport.is_valid() {
            return Err(SceneError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if self.live.is_some() {
            self.dispose();
        }

        let mut world = World::new();
        let lights = spawn_lights(&mut world);
        self.live = Some(Live {
            world,
            lights,
            ground: Vec::new(),
            building: Vec::new(),
        });
        self.viewport = viewport;
        self.camera.reset();
        self.frame_loop.reset();
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.live.is_some()
    }

    fn resize(&mut self, viewport: Viewport) -> Result<(), SceneError> {
        if !viewport.is_valid() {
            return Err(SceneError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    fn set_ground(&mut self, lot_area_m2: f64) -> Result<(), SceneError> {
        let live = self.live_mut()?;
        let fresh = spawn_lot(&mut live.world, lot_area_m2);
        for old in std::mem::replace(&mut live.ground, fresh) {
            live.world.despawn(old);
        }
        Ok(())
    }

    fn set_building(&mut self, model: &BuildingModel) -> Result<(), SceneError> {
        let live = self.live_mut()?;
        // Spawn first, then retire the previous building.
        let fresh = spawn_building(&mut live.world, model);
        for old in std::mem::replace(&mut live.building, fresh) {
            live.world.despawn(old);
        }
        if let Some(bounds) = live.world.total_bounds() {
            self.camera.frame(bounds);
        }
        Ok(())
    }

    fn start(&mut self) {
        if self.live.is_some() {
            self.frame_loop.start();
        }
    }

    fn stop(&mut self) {
        self.frame_loop.stop();
    }

    fn dispose(&mut self) {
        if let Some(live) = self.live.take() {
            drop(live);
            self.disposals += 1;
        }
        self.frame_loop.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use massing::{LotParameters, generate};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn model(floors: u32) -> BuildingModel {
        generate(&LotParameters::new(400.0, 2.0, floors).unwrap())
    }

    fn ready_host() -> WorldSceneHost {
        let mut host = WorldSceneHost::new();
        host.initialize(Viewport::default()).unwrap();
        host.set_ground(400.0).unwrap();
        host
    }

    #[test]
    fn content_requires_initialization() {
        let mut host = WorldSceneHost::new();
        assert_eq!(host.set_ground(400.0), Err(SceneError::NotInitialized));
        assert_eq!(host.set_building(&model(2)), Err(SceneError::NotInitialized));
        assert!(host.tick().is_none());
    }

    #[test]
    fn rejects_degenerate_viewport() {
        let mut host = WorldSceneHost::new();
        assert!(matches!(
            host.initialize(Viewport::new(0.0, 600.0)),
            Err(SceneError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn ticking_without_a_building_is_harmless() {
        let mut host = ready_host();
        assert!(host.tick().is_none());
        host.start();
        let stats = host.tick().unwrap();
        assert_eq!(stats.frame.index, 0);
        assert_eq!(stats.draw_items, 3);
        assert_eq!(host.light_count(), 2);
        assert!(!host.has_building());
    }

    #[test]
    fn set_building_replaces_previous_building() {
        let mut host = ready_host();
        let first = model(4);
        host.set_building(&first).unwrap();
        let world = host.world().unwrap();
        let first_count = world.entities_with_role(Role::is_building).len();
        assert_eq!(first_count, first.floor_count() + first.window_count());

        let second = model(2);
        host.set_building(&second).unwrap();
        let world = host.world().unwrap();
        assert_eq!(
            world.entities_with_role(Role::is_building).len(),
            second.floor_count() + second.window_count()
        );
        let slabs = world.entities_with_role(|r| matches!(r, Role::Floor { .. }));
        assert_eq!(slabs.len(), 2);
        // Ground, lot and grid survive the swap.
        assert_eq!(world.entities_with_role(|r| !r.is_building() && *r != Role::Light).len(), 3);
    }

    #[test]
    fn set_ground_replaces_previous_ground() {
        let mut host = ready_host();
        host.set_ground(900.0).unwrap();
        let world = host.world().unwrap();
        assert_eq!(world.entities_with_role(|r| *r == Role::Ground).len(), 1);
    }

    #[test]
    fn dispose_releases_everything() {
        let mut host = ready_host();
        host.set_building(&model(3)).unwrap();
        host.start();
        host.tick();
        host.dispose();
        assert!(!host.is_initialized());
        assert!(!host.is_running());
        assert!(host.tick().is_none());
        assert!(host.snapshot().is_none());
        assert_eq!(host.disposals(), 1);

        host.dispose();
        assert_eq!(host.disposals(), 1);
    }

    #[test]
    fn reinitialize_starts_fresh() {
        let mut host = ready_host();
        host.set_building(&model(3)).unwrap();
        host.initialize(Viewport::new(800.0, 600.0)).unwrap();
        assert!(!host.has_building());
        assert_eq!(host.disposals(), 1);
        assert_eq!(host.viewport(), Viewport::new(800.0, 600.0));
    }

    #[test]
    fn snapshot_json_carries_roles_shapes_and_lights() {
        let mut host = ready_host();
        host.set_building(&model(2)).unwrap();
        let value = serde_json::to_value(host.snapshot().unwrap()).unwrap();

        let items = value["items"].as_array().unwrap();
        let first_floor = items
            .iter()
            .find(|i| i["role"] == json!({ "kind": "floor", "index": 0 }))
            .unwrap();
        assert_eq!(first_floor["drawable"]["shape"]["kind"], json!("box"));
        assert_eq!(first_floor["position"], json!({ "x": 0.0, "y": 1.0, "z": 0.0 }));
        assert_eq!(first_floor["material"]["color"], json!(0x4287f5));

        assert_eq!(value["lights"][0]["light"]["kind"], json!({ "kind": "ambient" }));
        assert_eq!(value["viewport"], json!({ "width": 1280.0, "height": 720.0 }));
    }

    #[test]
    fn snapshot_lists_building_items() {
        let mut host = ready_host();
        let m = model(4);
        host.set_building(&m).unwrap();
        let snap = host.snapshot().unwrap();
        assert_eq!(snap.items.len(), 3 + m.floor_count() + m.window_count());
        assert!(snap.items.iter().all(|i| i.material.is_some()));
        assert_eq!(snap.lights.len(), 2);
        assert_eq!(snap.lights[1].position, Vec3::new(50.0, 100.0, 50.0));
    }
}
