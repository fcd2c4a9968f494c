use orbitview_common::Color;
use serde::{Deserialize, Serialize};

/// Everything [`crate::FrameDriver::initialize`] needs to build its scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Initial camera offset along +Z from the origin.
    pub camera_distance: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub auto_rotate: bool,
    /// Full turns per minute at 60 fps; 2.0 is one turn every 30 seconds.
    pub auto_rotate_speed: f32,
    pub cube_color: Color,
    pub wireframe: bool,
    /// Upper bound on the per-frame delta in seconds.
    pub max_frame_delta: Option<f32>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            fov: 50.0,
            near: 0.1,
            far: 2000.0,
            camera_distance: 5.0,
            enable_damping: true,
            damping_factor: 0.05,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            cube_color: Color::from_hex(0xff0000),
            wireframe: true,
            max_frame_delta: None,
        }
    }
}
