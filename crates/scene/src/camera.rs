use foundation::bounds::Aabb3;
use foundation::math::Vec3;
use serde::Serialize;

pub const DEFAULT_FOV_Y_DEG: f64 = 75.0;
pub const DEFAULT_NEAR: f64 = 0.1;
pub const DEFAULT_FAR: f64 = 1000.0;
pub const DEFAULT_EYE: Vec3 = Vec3 {
    x: 50.0,
    y: 50.0,
    z: 50.0,
};
/// Fraction of the remaining distance to the goal covered per update.
pub const DEFAULT_DAMPING: f64 = 0.25;

const PITCH_LIMIT_RAD: f64 = 1.55;
const MIN_DISTANCE: f64 = 1.0;
const ORBIT_SPEED: f64 = 0.005;
const SETTLE_EPS: f64 = 1e-6;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct OrbitState {
    pub yaw_rad: f64,
    pub pitch_rad: f64,
    pub distance: f64,
    pub target: Vec3,
}

impl OrbitState {
    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length();
        let dir = offset.normalize();
        Self {
            yaw_rad: dir.z.atan2(dir.x),
            pitch_rad: dir.y.clamp(-1.0, 1.0).asin(),
            distance,
            target,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let dir = Vec3::new(
            self.pitch_rad.cos() * self.yaw_rad.cos(),
            self.pitch_rad.sin(),
            self.pitch_rad.cos() * self.yaw_rad.sin(),
        );
        self.target + dir * self.distance
    }

    fn approach(&mut self, goal: &OrbitState, k: f64) {
        self.yaw_rad += (goal.yaw_rad - self.yaw_rad) * k;
        self.pitch_rad += (goal.pitch_rad - self.pitch_rad) * k;
        self.distance += (goal.distance - self.distance) * k;
        self.target = self.target + (goal.target - self.target) * k;
    }

    fn gap(&self, goal: &OrbitState) -> f64 {
        (goal.yaw_rad - self.yaw_rad).abs()
            + (goal.pitch_rad - self.pitch_rad).abs()
            + (goal.distance - self.distance).abs()
            + (goal.target - self.target).length()
    }
}

/// Perspective camera orbiting a target, with damped controls.
///
/// Input methods move the goal; [`OrbitCamera::update`] eases the current
/// state toward it once per frame.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct OrbitCamera {
    pub current: OrbitState,
    pub goal: OrbitState,
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub damping: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let state = OrbitState::from_eye(DEFAULT_EYE, Vec3::ZERO);
        Self {
            current: state,
            goal: state,
            fov_y_deg: DEFAULT_FOV_Y_DEG,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            damping: DEFAULT_DAMPING,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        self.current.eye()
    }

    /// Intended usage: pointer delta in pixels.
    pub fn orbit(&mut self, delta_x_px: f64, delta_y_px: f64) {
        self.goal.yaw_rad += delta_x_px * ORBIT_SPEED;
        self.goal.pitch_rad =
            (self.goal.pitch_rad + delta_y_px * ORBIT_SPEED).clamp(-PITCH_LIMIT_RAD, PITCH_LIMIT_RAD);
    }

    /// Intended usage: pointer delta in pixels.
    pub fn pan(&mut self, delta_x_px: f64, delta_y_px: f64) {
        let forward = (self.goal.target - self.goal.eye()).normalize();
        let right = forward.cross(Vec3::UP).normalize();
        let up = right.cross(forward);

        let pan_scale = self.goal.distance * 0.002;
        let delta = right * (-delta_x_px * pan_scale) + up * (delta_y_px * pan_scale);
        self.goal.target = self.goal.target + delta;
    }

    /// Intended usage: wheel deltaY.
    pub fn zoom(&mut self, wheel_delta_y: f64) {
        let factor = (wheel_delta_y * 0.0015).exp();
        self.goal.distance = (self.goal.distance * factor).clamp(MIN_DISTANCE, self.far * 0.9);
    }

    /// Points the camera at the center of `bounds` from far enough to see it.
    pub fn frame(&mut self, bounds: Aabb3) {
        let radius = bounds.size().length() * 0.5;
        let half_fov = (self.fov_y_deg.to_radians() * 0.5).max(1e-3);
        let distance = (radius / half_fov.sin()).clamp(MIN_DISTANCE, self.far * 0.9);
        self.goal.target = bounds.center();
        self.goal.distance = distance;
    }

    /// Eases toward the goal. Returns `true` while the camera is still moving.
    pub fn update(&mut self) -> bool {
        if self.current.gap(&self.goal) <= SETTLE_EPS {
            self.current = self.goal;
            return false;
        }
        self.current.approach(&self.goal, self.damping.clamp(0.0, 1.0));
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Column-major view-projection matrix, right-handed, depth in [0, 1].
    pub fn view_proj(&self, aspect: f64) -> [[f32; 4]; 4] {
        let view = mat4_look_at_rh(self.eye(), self.current.target, Vec3::UP);
        let proj = mat4_perspective_rh_z0(
            self.fov_y_deg.to_radians(),
            aspect.max(1e-6),
            self.near,
            self.far,
        );
        mat4_mul(proj, view)
    }
}

fn mat4_mul(a: [[f32; 4]; 4], b: [[f32; 4]; 4]) -> [[f32; 4]; 4] {
    // Column-major matrix multiply: c = a * b
    let mut c = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            c[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    c
}

fn mat4_perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> [[f32; 4]; 4] {
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    let m00 = (f / aspect) as f32;
    let m11 = f as f32;
    let m22 = (far / (near - far)) as f32;
    let m23 = ((near * far) / (near - far)) as f32;

    [
        [m00, 0.0, 0.0, 0.0],
        [0.0, m11, 0.0, 0.0],
        [0.0, 0.0, m22, -1.0],
        [0.0, 0.0, m23, 0.0],
    ]
}

fn mat4_look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> [[f32; 4]; 4] {
    let f = (target - eye).normalize();
    let s = f.cross(up).normalize();
    let u = s.cross(f);

    let ex = -s.dot(eye);
    let ey = -u.dot(eye);
    let ez = f.dot(eye);

    [
        [s.x as f32, u.x as f32, (-f.x) as f32, 0.0],
        [s.y as f32, u.y as f32, (-f.y) as f32, 0.0],
        [s.z as f32, u.z as f32, (-f.z) as f32, 0.0],
        [ex as f32, ey as f32, ez as f32, 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn default_camera_sits_at_50_50_50() {
        let cam = OrbitCamera::default();
        let eye = cam.eye();
        assert_close(eye.x, 50.0, 1e-9);
        assert_close(eye.y, 50.0, 1e-9);
        assert_close(eye.z, 50.0, 1e-9);
        assert_eq!(cam.fov_y_deg, 75.0);
    }

    #[test]
    fn damping_eases_toward_goal() {
        let mut cam = OrbitCamera::default();
        let start = cam.current.yaw_rad;
        cam.orbit(100.0, 0.0);
        assert!(cam.update());
        let step = cam.current.yaw_rad - start;
        assert_close(step, 100.0 * ORBIT_SPEED * DEFAULT_DAMPING, 1e-12);

        for _ in 0..200 {
            cam.update();
        }
        assert!(!cam.update());
        assert_eq!(cam.current, cam.goal);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.orbit(0.0, 1.0e6);
        assert_eq!(cam.goal.pitch_rad, PITCH_LIMIT_RAD);
    }

    #[test]
    fn target_projects_to_clip_center() {
        let cam = OrbitCamera::default();
        let m = cam.view_proj(16.0 / 9.0);
        // Origin in homogeneous coords is column 3.
        let clip = m[3];
        assert!(clip[3] > 0.0);
        assert!((clip[0] / clip[3]).abs() < 1e-5);
        assert!((clip[1] / clip[3]).abs() < 1e-5);
    }

    #[test]
    fn framing_moves_target_to_bounds_center() {
        let mut cam = OrbitCamera::default();
        let bounds = Aabb3::from_center_size(Vec3::new(0.0, 7.0, 0.0), Vec3::new(14.0, 14.0, 14.0));
        cam.frame(bounds);
        assert_eq!(cam.goal.target, Vec3::new(0.0, 7.0, 0.0));
        assert!(cam.goal.distance > 12.0);
    }
}
