use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Axis-aligned box centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// Indexed triangle data ready for upload.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u16>,
}

impl BoxGeometry {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Four vertices per face, two counter-clockwise triangles each.
    pub fn mesh(&self) -> MeshData {
        let x = self.width * 0.5;
        let y = self.height * 0.5;
        let z = self.depth * 0.5;

        #[rustfmt::skip]
        let faces: [[[f32; 3]; 4]; 6] = [
            [[-x, -y,  z], [ x, -y,  z], [ x,  y,  z], [-x,  y,  z]], // +z
            [[ x, -y, -z], [-x, -y, -z], [-x,  y, -z], [ x,  y, -z]], // -z
            [[ x, -y,  z], [ x, -y, -z], [ x,  y, -z], [ x,  y,  z]], // +x
            [[-x, -y, -z], [-x, -y,  z], [-x,  y,  z], [-x,  y, -z]], // -x
            [[-x,  y,  z], [ x,  y,  z], [ x,  y, -z], [-x,  y, -z]], // +y
            [[-x, -y, -z], [ x, -y, -z], [ x, -y,  z], [-x, -y,  z]], // -y
        ];

        let mut data = MeshData::default();
        for (face, corners) in faces.iter().enumerate() {
            let base = (face * 4) as u16;
            data.positions
                .extend(corners.iter().map(|corner| Vec3::from_array(*corner)));
            data.indices
                .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }
        data
    }
}

impl MeshData {
    /// Line-list indices covering every triangle edge once.
    pub fn wireframe_indices(&self) -> Vec<u16> {
        let mut edges = BTreeSet::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                edges.insert((a.min(b), a.max(b)));
            }
        }
        edges.into_iter().flat_map(|(a, b)| [a, b]).collect()
    }
}
