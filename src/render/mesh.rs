use crate::data::cgmath_ext::{Affine2Ext, Vector2Ext};
use crate::data::{Color, Rect};
use cgmath::{Matrix3, Vector2};

/// A single-colored triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPart {
    pub color: Color,
    pub vertices: Vec<Vector2<f32>>,
    /// Triangle indices into `vertices`, three per triangle.
    pub indices: Vec<u16>,
}

impl MeshPart {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Tessellated geometry, painted part by part in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub parts: Vec<MeshPart>,
}

impl Mesh {
    pub fn new() -> Mesh {
        Mesh::default()
    }

    /// Returns true if the mesh contains no triangles.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|part| part.indices.is_empty())
    }

    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(MeshPart::triangle_count).sum()
    }

    /// Appends a part, skipping parts without triangles.
    pub fn push(&mut self, part: MeshPart) {
        if !part.indices.is_empty() {
            self.parts.push(part);
        }
    }

    /// Returns the bounds of all vertices, or `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<Rect> {
        let mut verts = self
            .parts
            .iter()
            .flat_map(|part| part.vertices.iter())
            .map(|v| v.into_f64());
        let first = verts.next()?;
        let mut bounds = Rect::point(first);
        verts.for_each(|v| bounds.include(v));
        Some(bounds)
    }

    /// Returns a copy with all vertices mapped through `transform`.
    pub fn transformed(&self, transform: &Matrix3<f64>) -> Mesh {
        Mesh {
            parts: self
                .parts
                .iter()
                .map(|part| MeshPart {
                    color: part.color,
                    vertices: part
                        .vertices
                        .iter()
                        .map(|v| transform.transform_point2(v.into_f64()).into_f32())
                        .collect(),
                    indices: part.indices.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshPart {
        MeshPart {
            color: Color::BLACK,
            vertices: vec![
                Vector2::new(0., 0.),
                Vector2::new(2., 0.),
                Vector2::new(0., 1.),
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn empty_parts_are_skipped() {
        let mut mesh = Mesh::new();
        mesh.push(MeshPart {
            color: Color::WHITE,
            vertices: vec![Vector2::new(1., 1.)],
            indices: Vec::new(),
        });
        assert!(mesh.parts.is_empty());
        assert!(mesh.is_empty());
        assert_eq!(mesh.bounds(), None);

        mesh.push(triangle());
        assert!(!mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn bounds_and_transform() {
        let mut mesh = Mesh::new();
        mesh.push(triangle());
        assert_eq!(
            mesh.bounds(),
            Some(Rect::new(Vector2::new(0., 0.), Vector2::new(2., 1.)))
        );

        let moved = mesh.transformed(&Matrix3::from_translation2(Vector2::new(1., -1.)));
        assert_eq!(
            moved.bounds(),
            Some(Rect::new(Vector2::new(1., -1.), Vector2::new(3., 0.)))
        );
        assert_eq!(moved.parts[0].indices, mesh.parts[0].indices);
    }
}
