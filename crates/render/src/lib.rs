//! Frame driving: surface sizing, camera projection, orbit controls and the
//! per-frame step/render cycle, independent of any GPU backend.
//!
//! # Invariants
//! - After every resize pass `camera.aspect == surface.width / surface.height`.
//! - Within one frame the controls are stepped exactly once, strictly before
//!   the single render call.
//! - Renderers read the scene and camera; they never mutate them.

mod camera;
mod clock;
mod config;
mod controls;
mod driver;
mod geometry;
mod renderer;
mod scene;
mod surface;

pub use camera::PerspectiveCamera;
pub use clock::Clock;
pub use config::DriverConfig;
pub use controls::OrbitControls;
pub use driver::{DriverState, FrameDriver, FrameStats, FrameStatus};
pub use geometry::{BoxGeometry, MeshData};
pub use renderer::{Renderer, TextRenderer};
pub use scene::{BasicMaterial, Mesh, Scene};
pub use surface::Surface;
