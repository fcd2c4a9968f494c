//! Shared types used across the orbitview crates.
//!
//! # Invariants
//! - Viewport dimensions are logical (pre-scale) pixels; the device pixel
//!   ratio converts them to physical backing-buffer pixels.

mod types;
mod viewport;

pub use types::{Color, ObjectId, Transform};
pub use viewport::{BufferSize, Viewport, ViewportError};
