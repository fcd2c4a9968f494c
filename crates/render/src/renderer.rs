use orbitview_common::BufferSize;

use crate::camera::PerspectiveCamera;
use crate::scene::Scene;

/// Renderer-agnostic interface. All backends implement this trait.
///
/// A renderer draws a scene through a camera into its own output target. It
/// never mutates the scene or the camera.
pub trait Renderer {
    /// The output type produced by one frame.
    type Output;

    /// The drawable backing buffer changed size (physical pixels). Sizes may
    /// be zero; backends that cannot allocate empty targets clamp them.
    fn resize(&mut self, size: BufferSize);

    /// Draw one frame.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Self::Output;
}

/// Headless renderer that describes each frame as text.
///
/// Used by the CLI and by tests that need a renderer without a GPU.
#[derive(Debug, Default)]
pub struct TextRenderer {
    size: BufferSize,
    frames: u64,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> BufferSize {
        self.size
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn resize(&mut self, size: BufferSize) {
        self.size = size;
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> String {
        self.frames += 1;
        let p = camera.position;
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} ({}x{}) ===\n",
            self.frames, self.size.width, self.size.height
        ));
        out.push_str(&format!(
            "Camera: pos=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.4}\n",
            p.x, p.y, p.z, camera.fov, camera.aspect
        ));
        out.push_str(&format!("Objects: {}\n", scene.len()));
        for mesh in scene.children() {
            let g = mesh.geometry;
            out.push_str(&format!(
                "  [{}] box {}x{}x{} color=#{:06x}{}\n",
                mesh.id().short(),
                g.width,
                g.height,
                g.depth,
                mesh.material.color.to_hex(),
                if mesh.material.wireframe {
                    " wireframe"
                } else {
                    ""
                }
            ));
        }
        out
    }
}
