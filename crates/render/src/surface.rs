use orbitview_common::{BufferSize, Viewport};

/// Drawable output target: a logical size for layout plus the physical
/// backing-buffer size the renderer draws into.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Surface {
    viewport: Viewport,
    buffer: BufferSize,
}

impl Surface {
    pub fn new(viewport: Viewport) -> Self {
        let mut surface = Self::default();
        surface.resize(viewport);
        surface
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.buffer = viewport.buffer_size();
    }

    /// Logical width.
    pub fn width(&self) -> f64 {
        self.viewport.width
    }

    /// Logical height.
    pub fn height(&self) -> f64 {
        self.viewport.height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.viewport.pixel_ratio
    }

    pub fn buffer_size(&self) -> BufferSize {
        self.buffer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_tracks_logical_and_physical() {
        let mut surface = Surface::new(Viewport::new(800.0, 600.0, 1.0));
        assert_eq!(surface.buffer_size(), BufferSize::new(800, 600));

        surface.resize(Viewport::new(1920.0, 1080.0, 2.0));
        assert_eq!(surface.width(), 1920.0);
        assert_eq!(surface.height(), 1080.0);
        assert_eq!(surface.pixel_ratio(), 2.0);
        assert_eq!(surface.buffer_size(), BufferSize::new(3840, 2160));
    }
}
