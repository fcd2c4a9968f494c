use glam::{Mat4, Quat, Vec3};

/// Perspective camera with a cached projection matrix.
///
/// `aspect`, `fov`, `near` and `far` may be mutated freely; the projection
/// only follows after [`PerspectiveCamera::update_projection_matrix`].
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub up: Vec3,
    rotation: Quat,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(50.0, 1.0, 0.1, 2000.0)
    }
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            up: Vec3::Y,
            rotation: Quat::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the projection from the current fov/aspect/clip planes.
    /// A degenerate aspect yields a non-finite matrix, never a panic.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Orient the camera toward `target`. No-op when the target sits on the
    /// camera or straight along the up axis.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        let side = forward.cross(self.up);
        if forward == Vec3::ZERO || side.length_squared() < f32::EPSILON * f32::EPSILON {
            return;
        }
        let view = Mat4::look_at_rh(self.position, target, self.up);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        self.rotation = rotation.normalize();
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn camera_up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.fov, 50.0);
        assert_eq!(cam.near, 0.1);
        assert_eq!(cam.far, 2000.0);
        // Should produce a valid matrix (no NaN)
        assert!(!cam.view_projection().col(0).x.is_nan());
    }

    #[test]
    fn projection_follows_aspect_only_after_update() {
        let mut cam = PerspectiveCamera::default();
        let before = cam.projection_matrix();
        cam.aspect = 2.0;
        assert_eq!(cam.projection_matrix(), before);
        cam.update_projection_matrix();
        assert_ne!(cam.projection_matrix(), before);
        // x scale halves when aspect doubles
        let ratio = before.col(0).x / cam.projection_matrix().col(0).x;
        assert!((ratio - 2.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_aspect_does_not_panic() {
        let mut cam = PerspectiveCamera::default();
        cam.aspect = f32::INFINITY;
        cam.update_projection_matrix();
        cam.aspect = f32::NAN;
        cam.update_projection_matrix();
        assert!(cam.projection_matrix().col(0).x.is_nan());
    }

    #[test]
    fn look_at_faces_target() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(5.0, 0.0, 0.0);
        cam.look_at(Vec3::ZERO);
        assert!((cam.forward() - Vec3::NEG_X).length() < 1e-5);
        assert!((cam.camera_up() - Vec3::Y).length() < 1e-5);

        let projected = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!(projected.x.abs() < 1e-5 && projected.y.abs() < 1e-5);
        assert!((projected.z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn look_at_own_position_is_ignored() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(0.0, 0.0, 5.0);
        cam.look_at(cam.position);
        assert_eq!(cam.rotation(), Quat::IDENTITY);
    }
}
