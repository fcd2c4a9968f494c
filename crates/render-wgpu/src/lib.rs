//! wgpu render backend for orbitview.
//!
//! Draws every mesh of a scene with an unlit material, either filled or as
//! a triangle-edge wireframe, into a window surface.
//!
//! # Invariants
//! - The renderer never mutates the scene or the camera.
//! - GPU surfaces and depth targets are at least 1x1, whatever size the
//!   driver reports.

mod error;
mod gpu;
mod shaders;

pub use error::RenderError;
pub use gpu::WgpuRenderer;
