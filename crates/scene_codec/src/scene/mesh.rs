//! Triangle mesh data
//!
//! Pure geometry container shared by the exporter (which serializes it) and
//! the importer (which builds it from resolved assets or generated
//! primitives).

use crate::foundation::math::{Transform, Vec2, Vec3};

/// Triangle mesh geometry
///
/// Normals and tangents are optional at construction time; the binary format
/// always carries them, so the exporter recomputes whichever set is missing.
/// A single presence flag governs UVs for the whole mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Per-vertex normals; empty means "recompute on export"
    pub normals: Vec<Vec3>,
    /// Per-vertex tangents; empty means "recompute on export"
    pub tangents: Vec<Vec3>,
    /// Optional per-vertex texture coordinates
    pub uvs: Option<Vec<Vec2>>,
    /// Flat triangle index list (three entries per triangle)
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Create a mesh from positions and a flat triangle index list
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            ..Default::default()
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// True when the stored normals cover every vertex
    pub fn has_normals(&self) -> bool {
        !self.positions.is_empty() && self.normals.len() == self.positions.len()
    }

    /// True when the stored tangents cover every vertex
    pub fn has_tangents(&self) -> bool {
        !self.positions.is_empty() && self.tangents.len() == self.positions.len()
    }

    /// Area-weighted smooth vertex normals computed from triangle geometry
    pub fn computed_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::zeros(); self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let p0 = self.positions[i0];
            let face = (self.positions[i1] - p0).cross(&(self.positions[i2] - p0));
            normals[i0] += face;
            normals[i1] += face;
            normals[i2] += face;
        }
        for n in &mut normals {
            let len = n.norm();
            *n = if len > 0.0 {
                *n / len
            } else {
                Vec3::new(0.0, 1.0, 0.0)
            };
        }
        normals
    }

    /// Per-vertex tangents from the UV gradient, or an arbitrary basis vector
    /// orthogonal to the normal when the mesh carries no UVs
    pub fn computed_tangents(&self, normals: &[Vec3]) -> Vec<Vec3> {
        let mut tangents = vec![Vec3::zeros(); self.positions.len()];
        if let Some(uvs) = &self.uvs {
            for tri in self.indices.chunks_exact(3) {
                let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
                let e1 = self.positions[i1] - self.positions[i0];
                let e2 = self.positions[i2] - self.positions[i0];
                let duv1 = uvs[i1] - uvs[i0];
                let duv2 = uvs[i2] - uvs[i0];
                let det = duv1.x * duv2.y - duv2.x * duv1.y;
                if det.abs() <= f32::EPSILON {
                    continue;
                }
                let r = 1.0 / det;
                let tangent = (e1 * duv2.y - e2 * duv1.y) * r;
                tangents[i0] += tangent;
                tangents[i1] += tangent;
                tangents[i2] += tangent;
            }
        }
        for (i, t) in tangents.iter_mut().enumerate() {
            let n = normals.get(i).copied().unwrap_or_else(Vec3::y);
            // Gram-Schmidt against the normal; degenerate gradients fall back
            // to whichever axis is least aligned with the normal.
            let mut v = *t - n * n.dot(t);
            if v.norm_squared() <= f32::EPSILON {
                let axis = if n.x.abs() < 0.9 { Vec3::x() } else { Vec3::z() };
                v = axis - n * n.dot(&axis);
            }
            *t = v.normalize();
        }
        tangents
    }

    /// Total surface area of the mesh after applying `transform`
    pub fn surface_area(&self, transform: &Transform) -> f32 {
        let mut area = 0.0;
        for tri in self.indices.chunks_exact(3) {
            let p0 = transform.transform_point(self.positions[tri[0] as usize]);
            let p1 = transform.transform_point(self.positions[tri[1] as usize]);
            let p2 = transform.transform_point(self.positions[tri[2] as usize]);
            area += 0.5 * (p1 - p0).cross(&(p2 - p0)).norm();
        }
        area
    }

    /// The renderer's canonical rectangle: a two-triangle quad of half-extent
    /// 5 units in the XZ plane, up-facing normals, unit UV corners
    pub fn rectangle() -> Self {
        Self {
            positions: vec![
                Vec3::new(-5.0, 0.0, 5.0),
                Vec3::new(5.0, 0.0, 5.0),
                Vec3::new(-5.0, 0.0, -5.0),
                Vec3::new(5.0, 0.0, -5.0),
            ],
            normals: vec![Vec3::y(); 4],
            tangents: Vec::new(),
            uvs: Some(vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
            ]),
            indices: vec![0, 1, 2, 1, 3, 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_quad() -> MeshData {
        MeshData::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 1, 3, 2],
        )
    }

    #[test]
    fn test_computed_normals_flat_quad() {
        let mesh = unit_quad();
        let normals = mesh.computed_normals();
        assert_eq!(normals.len(), 4);
        for n in normals {
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_surface_area_unit_quad() {
        let mesh = unit_quad();
        assert_relative_eq!(mesh.surface_area(&Transform::identity()), 1.0, epsilon = 1e-6);

        let scaled = Transform {
            scale: Vec3::new(2.0, 2.0, 1.0),
            ..Transform::identity()
        };
        assert_relative_eq!(mesh.surface_area(&scaled), 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rectangle_geometry() {
        let rect = MeshData::rectangle();
        assert_eq!(rect.vertex_count(), 4);
        assert_eq!(rect.indices, vec![0, 1, 2, 1, 3, 2]);
        assert!(rect.has_normals());
        assert!(!rect.has_tangents());
        assert_relative_eq!(
            rect.surface_area(&Transform::identity()),
            100.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_tangents_orthogonal_to_normals() {
        let mut mesh = unit_quad();
        mesh.uvs = Some(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        ]);
        let normals = mesh.computed_normals();
        let tangents = mesh.computed_tangents(&normals);
        for (t, n) in tangents.iter().zip(&normals) {
            assert_relative_eq!(t.dot(n), 0.0, epsilon = 1e-5);
            assert_relative_eq!(t.norm(), 1.0, epsilon = 1e-5);
        }
    }
}
