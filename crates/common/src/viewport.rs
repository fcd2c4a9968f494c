use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Host viewport: logical window size plus the device pixel ratio.
///
/// Missing dimensions are represented as zero. A zero height is a valid
/// viewport; consumers must not panic on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Build a viewport from a physical size and the scale factor that
    /// produced it.
    pub fn from_physical(width: u32, height: u32, pixel_ratio: f64) -> Self {
        let ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        Self::new(width as f64 / ratio, height as f64 / ratio, ratio)
    }

    /// `width / height`. Infinite or NaN when the height is zero.
    pub fn aspect(&self) -> f32 {
        (self.width / self.height) as f32
    }

    /// Backing-buffer size: logical size times the pixel ratio, floored.
    pub fn buffer_size(&self) -> BufferSize {
        // `as` saturates and maps NaN to zero.
        BufferSize {
            width: (self.width * self.pixel_ratio).floor() as u32,
            height: (self.height * self.pixel_ratio).floor() as u32,
        }
    }
}

/// Physical pixel size of a drawable backing buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferSize {
    pub width: u32,
    pub height: u32,
}

impl BufferSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Same size with each side clamped to at least one pixel, as GPU
    /// surfaces and textures require.
    pub fn non_zero(&self) -> Self {
        Self {
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ViewportError {
    #[error("expected WIDTHxHEIGHT[@RATIO], got {0:?}")]
    Format(String),
    #[error("invalid number {value:?} in viewport")]
    Number { value: String },
    #[error("pixel ratio must be positive, got {0}")]
    PixelRatio(f64),
}

impl FromStr for Viewport {
    type Err = ViewportError;

    /// Parse `800x600` or `1920x1080@2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (size, ratio) = match s.split_once('@') {
            Some((size, ratio)) => (size, Some(ratio)),
            None => (s, None),
        };
        let (w, h) = size
            .split_once(['x', 'X'])
            .ok_or_else(|| ViewportError::Format(s.to_string()))?;

        let number = |v: &str| {
            v.trim().parse::<f64>().map_err(|_| ViewportError::Number {
                value: v.to_string(),
            })
        };

        let pixel_ratio = match ratio {
            Some(r) => number(r)?,
            None => 1.0,
        };
        if pixel_ratio <= 0.0 || !pixel_ratio.is_finite() {
            return Err(ViewportError::PixelRatio(pixel_ratio));
        }

        Ok(Self::new(number(w)?, number(h)?, pixel_ratio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_size_scales_by_pixel_ratio() {
        let vp = Viewport::new(1920.0, 1080.0, 2.0);
        assert_eq!(vp.buffer_size(), BufferSize::new(3840, 2160));
        assert!((vp.aspect() - 16.0 / 9.0).abs() < 1e-5);
    }

    #[test]
    fn fractional_ratio_floors() {
        let vp = Viewport::new(801.0, 601.0, 1.5);
        assert_eq!(vp.buffer_size(), BufferSize::new(1201, 901));
    }

    #[test]
    fn zero_height_is_degenerate_not_fatal() {
        let vp = Viewport::new(800.0, 0.0, 1.0);
        assert!(vp.aspect().is_infinite());
        assert_eq!(vp.buffer_size(), BufferSize::new(800, 0));
        assert_eq!(vp.buffer_size().non_zero(), BufferSize::new(800, 1));

        let empty = Viewport::default();
        assert!(empty.aspect().is_nan());
        assert_eq!(empty.buffer_size(), BufferSize::new(0, 0));
    }

    #[test]
    fn from_physical_divides_out_ratio() {
        let vp = Viewport::from_physical(3840, 2160, 2.0);
        assert_eq!(vp.width, 1920.0);
        assert_eq!(vp.height, 1080.0);
        assert_eq!(vp.buffer_size(), BufferSize::new(3840, 2160));
    }

    #[test]
    fn parse_viewport_specs() {
        let vp: Viewport = "800x600".parse().unwrap();
        assert_eq!(vp, Viewport::new(800.0, 600.0, 1.0));

        let hidpi: Viewport = "1920x1080@2".parse().unwrap();
        assert_eq!(hidpi, Viewport::new(1920.0, 1080.0, 2.0));

        assert!(matches!(
            "800".parse::<Viewport>(),
            Err(ViewportError::Format(_))
        ));
        assert!(matches!(
            "axb".parse::<Viewport>(),
            Err(ViewportError::Number { .. })
        ));
        assert_eq!(
            "800x600@0".parse::<Viewport>(),
            Err(ViewportError::PixelRatio(0.0))
        );
    }
}
