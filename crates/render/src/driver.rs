use glam::Vec3;
use orbitview_common::{ObjectId, Viewport};
use orbitview_input::ControlAction;
use std::time::Instant;

use crate::camera::PerspectiveCamera;
use crate::clock::Clock;
use crate::config::DriverConfig;
use crate::controls::OrbitControls;
use crate::geometry::BoxGeometry;
use crate::renderer::Renderer;
use crate::scene::{BasicMaterial, Mesh, Scene};
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

/// Result of one host tick.
#[derive(Debug, PartialEq)]
pub enum FrameStatus<T> {
    /// The frame was stepped and rendered; the host should schedule another.
    Rendered(T),
    /// The driver is stopped; the host should stop scheduling frames.
    Stopped,
}

impl<T> FrameStatus<T> {
    pub fn should_continue(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// Per-frame counters for instrumentation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub last_delta: f32,
    pub elapsed: f64,
}

/// Owns the surface, camera, scene, orbit controls and clock, and drives
/// one step + render per host tick.
///
/// The host owns repetition: it calls [`FrameDriver::tick`] whenever the
/// display is ready for a frame and schedules the next tick only after the
/// current one returned, so frames never overlap.
pub struct FrameDriver<R: Renderer> {
    renderer: R,
    surface: Surface,
    camera: PerspectiveCamera,
    scene: Scene,
    controls: OrbitControls,
    clock: Clock,
    cube: ObjectId,
    state: DriverState,
    stats: FrameStats,
}

impl<R: Renderer> FrameDriver<R> {
    /// Build the camera, controls and single-cube scene, size everything
    /// to `viewport`, and start running.
    pub fn initialize(renderer: R, viewport: Viewport, config: &DriverConfig) -> Self {
        let mut camera =
            PerspectiveCamera::new(config.fov, viewport.aspect(), config.near, config.far);
        camera.position.z = config.camera_distance;

        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.enable_damping = config.enable_damping;
        controls.damping_factor = config.damping_factor;
        controls.auto_rotate = config.auto_rotate;
        controls.auto_rotate_speed = config.auto_rotate_speed;
        controls.save_state(&camera);

        let mut scene = Scene::new();
        let cube = scene.add(Mesh::new(
            BoxGeometry::default(),
            BasicMaterial {
                color: config.cube_color,
                wireframe: config.wireframe,
            },
        ));

        let clock = match config.max_frame_delta {
            Some(max) => Clock::with_max_delta(max),
            None => Clock::new(),
        };

        let mut driver = Self {
            renderer,
            surface: Surface::new(viewport),
            camera,
            scene,
            controls,
            clock,
            cube,
            state: DriverState::Running,
            stats: FrameStats::default(),
        };
        driver.on_resize(viewport);
        tracing::info!(
            "frame driver running: fov={} near={} far={} damping={}",
            config.fov,
            config.near,
            config.far,
            config.enable_damping
        );
        driver
    }

    /// Resize the surface and renderer to `viewport` and keep the camera
    /// aspect in step with it. Safe to call with a zero height.
    pub fn on_resize(&mut self, viewport: Viewport) {
        tracing::info!("resizing to {} x {}", viewport.width, viewport.height);

        self.surface.resize(viewport);
        self.renderer.resize(self.surface.buffer_size());

        self.camera.aspect = viewport.aspect();
        self.camera.update_projection_matrix();
    }

    /// Advance the orbit controls by `delta_seconds`.
    pub fn step(&mut self, delta_seconds: f32) {
        self.controls.update(&mut self.camera, delta_seconds);
    }

    /// Draw the scene through the camera once.
    pub fn render(&mut self) -> R::Output {
        self.renderer.render(&self.scene, &self.camera)
    }

    /// One loop iteration using the wall clock.
    pub fn tick(&mut self) -> FrameStatus<R::Output> {
        self.tick_at(Instant::now())
    }

    /// One loop iteration with the clock sampled at `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameStatus<R::Output> {
        if self.state == DriverState::Stopped {
            return FrameStatus::Stopped;
        }
        let delta = self.clock.delta_at(now);
        self.step(delta);
        let output = self.render();

        self.stats.frames += 1;
        self.stats.last_delta = delta;
        self.stats.elapsed = self.clock.elapsed();
        tracing::trace!(frame = self.stats.frames, delta, "frame");
        FrameStatus::Rendered(output)
    }

    /// Route an input action to the orbit controls.
    pub fn handle_action(&mut self, action: ControlAction) {
        self.controls
            .apply(action, &self.camera, self.surface.height());
    }

    /// Put the camera back where it started.
    pub fn reset_view(&mut self) {
        self.controls.reset(&mut self.camera);
    }

    /// Stop the loop. Later ticks neither step nor render.
    pub fn stop(&mut self) {
        if self.state == DriverState::Running {
            tracing::info!("frame driver stopped after {} frames", self.stats.frames);
        }
        self.state = DriverState::Stopped;
    }

    /// Tear the driver down and hand back the renderer.
    pub fn into_renderer(mut self) -> R {
        self.stop();
        self.renderer
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Id of the cube placed by [`FrameDriver::initialize`].
    pub fn cube(&self) -> ObjectId {
        self.cube
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
