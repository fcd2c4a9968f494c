use glam::{Vec2, Vec3};
use orbitview_input::ControlAction;
use std::f32::consts::{PI, TAU};

use crate::camera::PerspectiveCamera;

const EPS: f32 = 1e-6;
/// Damping factors are tuned per frame at this rate.
const REFERENCE_FPS: f32 = 60.0;

/// Position on a sphere around the target: polar angle `phi` from +Y,
/// azimuth `theta` around Y starting at +Z.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let ring = self.phi.sin() * self.radius;
        Vec3::new(
            ring * self.theta.sin(),
            self.phi.cos() * self.radius,
            ring * self.theta.cos(),
        )
    }
}

/// Orbit camera manipulator: rotates around, dollies toward and pans a
/// target point, optionally easing every input out over several frames.
///
/// The controls do not own the camera; each frame the driver hands it to
/// [`OrbitControls::update`].
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enabled: bool,
    pub enable_damping: bool,
    /// Share of the pending motion applied per frame at 60 fps.
    pub damping_factor: f32,
    pub enable_rotate: bool,
    pub rotate_speed: f32,
    pub enable_zoom: bool,
    pub zoom_speed: f32,
    pub enable_pan: bool,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,

    theta_delta: f32,
    phi_delta: f32,
    pan_offset: Vec3,
    scale: f32,

    last_position: Option<Vec3>,
    last_target: Vec3,
    saved: Option<(Vec3, Vec3)>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enabled: true,
            enable_damping: false,
            damping_factor: 0.05,
            enable_rotate: true,
            rotate_speed: 1.0,
            enable_zoom: true,
            zoom_speed: 1.0,
            enable_pan: true,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            theta_delta: 0.0,
            phi_delta: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            last_position: None,
            last_target: Vec3::ZERO,
            saved: None,
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            last_target: target,
            ..Self::default()
        }
    }

    /// Feed one input action. Drag deltas are scaled against the viewport
    /// height, so a drag across the full height turns the camera once.
    pub fn apply(
        &mut self,
        action: ControlAction,
        camera: &PerspectiveCamera,
        viewport_height: f64,
    ) {
        if !self.enabled || action.is_noop() {
            return;
        }
        let height = viewport_height as f32;

        match action {
            ControlAction::Rotate(delta) if self.enable_rotate && height > 0.0 => {
                let delta = delta * self.rotate_speed;
                self.rotate_left(TAU * delta.x / height);
                self.rotate_up(TAU * delta.y / height);
            }
            ControlAction::Pan(delta) if self.enable_pan && height > 0.0 => {
                self.pan(delta * self.pan_speed, camera, height);
            }
            ControlAction::Dolly(delta) if self.enable_zoom => {
                let step = 0.95_f32.powf(self.zoom_speed * (delta * 0.01).abs());
                if delta < 0.0 {
                    self.scale *= step;
                } else {
                    self.scale /= step;
                }
            }
            _ => {}
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.theta_delta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.phi_delta -= angle;
    }

    fn pan(&mut self, delta: Vec2, camera: &PerspectiveCamera, height: f32) {
        let offset = camera.position - self.target;
        // visible half-height at the target's depth
        let target_distance = offset.length() * (camera.fov.to_radians() * 0.5).tan();
        let left = 2.0 * delta.x * target_distance / height;
        let up = 2.0 * delta.y * target_distance / height;
        self.pan_offset += camera.right() * -left + camera.camera_up() * up;
    }

    fn step_factor(&self, delta_seconds: f32) -> f32 {
        if !self.enable_damping {
            return 1.0;
        }
        let keep = 1.0 - self.damping_factor.clamp(0.0, 1.0);
        1.0 - keep.powf(delta_seconds.max(0.0) * REFERENCE_FPS)
    }

    fn auto_rotate_angle(&self, delta_seconds: f32) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed * delta_seconds
    }

    /// Advance by `delta_seconds`: apply pending input (all of it, or the
    /// damped share), clamp to the limits, then place and aim the camera.
    /// Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera, delta_seconds: f32) -> bool {
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        if self.enabled && self.auto_rotate {
            self.rotate_left(self.auto_rotate_angle(delta_seconds));
        }

        let factor = self.step_factor(delta_seconds);
        spherical.theta += self.theta_delta * factor;
        spherical.phi += self.phi_delta * factor;
        spherical.phi = spherical
            .phi
            .max(self.min_polar_angle)
            .min(self.max_polar_angle)
            .clamp(EPS, PI - EPS);

        self.target += self.pan_offset * factor;
        spherical.radius = (spherical.radius * self.scale)
            .max(self.min_distance)
            .min(self.max_distance);

        camera.position = self.target + spherical.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            let keep = 1.0 - factor;
            self.theta_delta *= keep;
            self.phi_delta *= keep;
            self.pan_offset *= keep;
            if self.theta_delta.abs() < EPS {
                self.theta_delta = 0.0;
            }
            if self.phi_delta.abs() < EPS {
                self.phi_delta = 0.0;
            }
            if self.pan_offset.length_squared() < EPS * EPS {
                self.pan_offset = Vec3::ZERO;
            }
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        let moved = self
            .last_position
            .is_none_or(|p| p.distance_squared(camera.position) > EPS)
            || self.last_target.distance_squared(self.target) > EPS;
        self.last_position = Some(camera.position);
        self.last_target = self.target;
        moved
    }

    /// True while damped motion is still easing out.
    pub fn is_settling(&self) -> bool {
        self.theta_delta != 0.0 || self.phi_delta != 0.0 || self.pan_offset != Vec3::ZERO
    }

    pub fn distance(&self, camera: &PerspectiveCamera) -> f32 {
        camera.position.distance(self.target)
    }

    pub fn polar_angle(&self, camera: &PerspectiveCamera) -> f32 {
        Spherical::from_offset(camera.position - self.target).phi
    }

    pub fn azimuthal_angle(&self, camera: &PerspectiveCamera) -> f32 {
        Spherical::from_offset(camera.position - self.target).theta
    }

    /// Remember the current target and camera position for [`Self::reset`].
    pub fn save_state(&mut self, camera: &PerspectiveCamera) {
        self.saved = Some((self.target, camera.position));
    }

    /// Return to the saved state and drop any pending motion.
    pub fn reset(&mut self, camera: &mut PerspectiveCamera) {
        if let Some((target, position)) = self.saved {
            self.target = target;
            camera.position = position;
            camera.look_at(target);
        }
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHT: f64 = 600.0;
    const FRAME: f32 = 1.0 / 60.0;

    fn setup(damping: bool) -> (OrbitControls, PerspectiveCamera) {
        let mut camera = PerspectiveCamera::new(50.0, 4.0 / 3.0, 0.1, 2000.0);
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.enable_damping = damping;
        (controls, camera)
    }

    /// Horizontal drag that turns the camera a quarter circle.
    fn quarter_turn() -> ControlAction {
        ControlAction::Rotate(Vec2::new(HEIGHT as f32 / 4.0, 0.0))
    }

    #[test]
    fn first_update_aims_at_target() {
        let (mut controls, mut camera) = setup(true);
        assert!(controls.update(&mut camera, 0.0));
        assert!((camera.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-5);
        assert!(!controls.update(&mut camera, FRAME));
    }

    #[test]
    fn undamped_rotation_applies_in_one_step() {
        let (mut controls, mut camera) = setup(false);
        controls.apply(quarter_turn(), &camera, HEIGHT);
        assert!(controls.update(&mut camera, FRAME));

        assert!((camera.position - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-4);
        assert!((controls.distance(&camera) - 5.0).abs() < 1e-4);
        assert!(!controls.is_settling());
        assert!(!controls.update(&mut camera, FRAME));
    }

    #[test]
    fn damped_rotation_eases_and_converges() {
        let (mut controls, mut camera) = setup(true);
        controls.apply(quarter_turn(), &camera, HEIGHT);

        controls.update(&mut camera, FRAME);
        let first = controls.azimuthal_angle(&camera);
        assert!((first - (-PI / 2.0 * 0.05)).abs() < 1e-4);
        assert!(controls.is_settling());

        controls.update(&mut camera, FRAME);
        assert!(controls.azimuthal_angle(&camera) < first);

        for _ in 0..600 {
            controls.update(&mut camera, FRAME);
        }
        assert!((controls.azimuthal_angle(&camera) + PI / 2.0).abs() < 1e-3);
        assert!(!controls.is_settling());
    }

    #[test]
    fn damping_is_frame_rate_independent() {
        let (mut fast, mut fast_cam) = setup(true);
        let (mut slow, mut slow_cam) = setup(true);
        fast.apply(quarter_turn(), &fast_cam, HEIGHT);
        slow.apply(quarter_turn(), &slow_cam, HEIGHT);

        for _ in 0..4 {
            fast.update(&mut fast_cam, FRAME / 2.0);
        }
        slow.update(&mut slow_cam, FRAME * 2.0);

        let diff = fast.azimuthal_angle(&fast_cam) - slow.azimuthal_angle(&slow_cam);
        assert!(diff.abs() < 1e-4);
    }

    #[test]
    fn zero_delta_with_damping_holds_still() {
        let (mut controls, mut camera) = setup(true);
        controls.update(&mut camera, 0.0);
        controls.apply(quarter_turn(), &camera, HEIGHT);
        assert!(!controls.update(&mut camera, 0.0));
        assert!(controls.is_settling());
    }

    #[test]
    fn dolly_in_and_out() {
        let (mut controls, mut camera) = setup(false);
        controls.apply(ControlAction::Dolly(-100.0), &camera, HEIGHT);
        controls.update(&mut camera, FRAME);
        assert!((controls.distance(&camera) - 4.75).abs() < 1e-4);

        controls.apply(ControlAction::Dolly(100.0), &camera, HEIGHT);
        controls.update(&mut camera, FRAME);
        assert!((controls.distance(&camera) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn distance_limits_clamp() {
        let (mut controls, mut camera) = setup(false);
        controls.min_distance = 3.0;
        controls.max_distance = 6.0;

        controls.apply(ControlAction::Dolly(-5000.0), &camera, HEIGHT);
        controls.update(&mut camera, FRAME);
        assert!((controls.distance(&camera) - 3.0).abs() < 1e-4);

        controls.apply(ControlAction::Dolly(5000.0), &camera, HEIGHT);
        controls.update(&mut camera, FRAME);
        assert!((controls.distance(&camera) - 6.0).abs() < 1e-4);
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let (mut controls, mut camera) = setup(false);
        controls.apply(ControlAction::Pan(Vec2::new(100.0, 0.0)), &camera, HEIGHT);
        controls.update(&mut camera, FRAME);

        let expected = 2.0 * 100.0 * 5.0 * 25.0_f32.to_radians().tan() / 600.0;
        assert!((controls.target.x + expected).abs() < 1e-4);
        assert!(controls.target.y.abs() < 1e-5);
        assert!((camera.position - controls.target - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn polar_angle_never_flips_over_the_pole() {
        let (mut controls, mut camera) = setup(false);
        controls.apply(ControlAction::Rotate(Vec2::new(0.0, 10_000.0)), &camera, HEIGHT);
        controls.update(&mut camera, FRAME);
        let phi = controls.polar_angle(&camera);
        assert!(!phi.is_nan() && phi < 1e-3);
        assert!((camera.position.y - 5.0).abs() < 1e-3);
        assert!(!camera.view_projection().col(0).x.is_nan());
    }

    #[test]
    fn polar_limits_apply() {
        let (mut controls, mut camera) = setup(false);
        controls.min_polar_angle = PI / 4.0;
        controls.apply(ControlAction::Rotate(Vec2::new(0.0, 10_000.0)), &camera, HEIGHT);
        controls.update(&mut camera, FRAME);
        assert!((controls.polar_angle(&camera) - PI / 4.0).abs() < 1e-4);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let (mut controls, mut camera) = setup(false);
        controls.enabled = false;
        controls.apply(quarter_turn(), &camera, HEIGHT);
        controls.update(&mut camera, FRAME);
        assert!((camera.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);

        controls.enabled = true;
        controls.enable_zoom = false;
        controls.apply(ControlAction::Dolly(-500.0), &camera, HEIGHT);
        controls.update(&mut camera, FRAME);
        assert!((controls.distance(&camera) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn zero_height_viewport_ignores_drags() {
        let (mut controls, mut camera) = setup(false);
        controls.apply(quarter_turn(), &camera, 0.0);
        controls.apply(ControlAction::Pan(Vec2::new(10.0, 10.0)), &camera, 0.0);
        controls.update(&mut camera, FRAME);
        assert!((camera.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert!(camera.position.is_finite());
    }

    #[test]
    fn auto_rotate_follows_elapsed_time() {
        let (mut controls, mut camera) = setup(false);
        controls.auto_rotate = true;
        // speed 2.0 turns 2π/30 rad per second
        controls.update(&mut camera, 1.0);
        assert!((controls.azimuthal_angle(&camera) + TAU / 30.0).abs() < 1e-4);
    }

    #[test]
    fn reset_restores_saved_state() {
        let (mut controls, mut camera) = setup(false);
        controls.save_state(&camera);
        controls.apply(quarter_turn(), &camera, HEIGHT);
        controls.apply(ControlAction::Pan(Vec2::new(50.0, 0.0)), &camera, HEIGHT);
        controls.update(&mut camera, FRAME);
        assert_ne!(controls.target, Vec3::ZERO);

        controls.reset(&mut camera);
        assert_eq!(controls.target, Vec3::ZERO);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert!(!controls.is_settling());
    }
}
