use orbitview_common::{Color, ObjectId, Transform};
use serde::{Deserialize, Serialize};

use crate::geometry::BoxGeometry;

/// Unlit material: every fragment gets the same color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasicMaterial {
    pub color: Color,
    /// Draw triangle edges instead of filled faces.
    pub wireframe: bool,
}

impl Default for BasicMaterial {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0xffffff),
            wireframe: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Mesh {
    id: ObjectId,
    pub geometry: BoxGeometry,
    pub material: BasicMaterial,
    pub transform: Transform,
}

impl Mesh {
    pub fn new(geometry: BoxGeometry, material: BasicMaterial) -> Self {
        Self {
            id: ObjectId::new(),
            geometry,
            material,
            transform: Transform::default(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }
}

/// Flat container of renderable objects, drawn in insertion order.
#[derive(Debug, Clone)]
pub struct Scene {
    children: Vec<Mesh>,
    pub background: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            background: Color::BLACK,
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh and return its id.
    pub fn add(&mut self, mesh: Mesh) -> ObjectId {
        let id = mesh.id();
        tracing::debug!("scene: added mesh {}", id.short());
        self.children.push(mesh);
        id
    }

    pub fn children(&self) -> &[Mesh] {
        &self.children
    }

    pub fn get(&self, id: ObjectId) -> Option<&Mesh> {
        self.children.iter().find(|m| m.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Mesh> {
        self.children.iter_mut().find(|m| m.id() == id)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn empty_scene() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.background, Color::BLACK);
    }

    #[test]
    fn add_and_lookup() {
        let mut scene = Scene::new();
        let material = BasicMaterial {
            color: Color::RED,
            wireframe: true,
        };
        let id = scene.add(Mesh::new(BoxGeometry::default(), material));
        assert_eq!(scene.len(), 1);

        let mesh = scene.get(id).unwrap();
        assert!(mesh.material.wireframe);
        assert_eq!(mesh.material.color, Color::RED);

        scene.get_mut(id).unwrap().transform.position = Vec3::X;
        assert_eq!(scene.children()[0].transform.position, Vec3::X);
        assert!(scene.get(ObjectId::new()).is_none());
    }
}
