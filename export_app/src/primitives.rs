//! Built-in mesh primitive generators
//!
//! Implements the codec's `PrimitiveSource` collaborator with the canonical
//! primitives scene documents may reference by name.

use scene_codec::foundation::math::{Vec2, Vec3};
use scene_codec::import::{PrimitiveKind, PrimitiveSource};
use scene_codec::scene::MeshData;

const DISK_SEGMENTS: usize = 12;
const SPHERE_RINGS: usize = 12;
const SPHERE_SEGMENTS: usize = 24;

/// Generator for the named primitives
pub struct BuiltinPrimitives;

impl PrimitiveSource for BuiltinPrimitives {
    fn generate(&self, kind: PrimitiveKind) -> MeshData {
        match kind {
            PrimitiveKind::Plane | PrimitiveKind::Quad => unit_quad(),
            PrimitiveKind::Disk => disk(),
            PrimitiveKind::Cube => cube(),
            PrimitiveKind::Sphere => sphere(),
        }
    }
}

/// Unit quad in the XZ plane, facing up
fn unit_quad() -> MeshData {
    let mut mesh = MeshData::new(
        vec![
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(0.5, 0.0, -0.5),
            Vec3::new(-0.5, 0.0, -0.5),
            Vec3::new(-0.5, 0.0, 0.5),
        ],
        vec![0, 1, 2, 0, 2, 3],
    );
    mesh.normals = vec![Vec3::y(); 4];
    mesh.uvs = Some(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
    ]);
    mesh
}

/// Unit-radius disk in the XZ plane, triangulated as a fan
fn disk() -> MeshData {
    let mut positions = Vec::with_capacity(DISK_SEGMENTS);
    for i in 0..DISK_SEGMENTS {
        let angle = std::f32::consts::TAU * i as f32 / DISK_SEGMENTS as f32;
        positions.push(Vec3::new(angle.sin(), 0.0, angle.cos()));
    }
    let mut indices = Vec::with_capacity((DISK_SEGMENTS - 2) * 3);
    for i in 0..DISK_SEGMENTS as u32 - 2 {
        indices.extend_from_slice(&[0, i + 1, i + 2]);
    }
    let mut mesh = MeshData::new(positions, indices);
    mesh.normals = vec![Vec3::y(); DISK_SEGMENTS];
    mesh
}

/// Cube of half-extent 1 with four vertices per face
fn cube() -> MeshData {
    // (normal, face right axis, face up axis) per face
    let faces = [
        (Vec3::z(), Vec3::x(), Vec3::y()),
        (-Vec3::z(), -Vec3::x(), Vec3::y()),
        (Vec3::y(), Vec3::x(), -Vec3::z()),
        (-Vec3::y(), Vec3::x(), Vec3::z()),
        (Vec3::x(), -Vec3::z(), Vec3::y()),
        (-Vec3::x(), Vec3::z(), Vec3::y()),
    ];

    let mut mesh = MeshData::default();
    let mut uvs = Vec::new();
    for (normal, right, up) in faces {
        let base = mesh.positions.len() as u32;
        for (u, v) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.positions.push(normal + right * u + up * v);
            mesh.normals.push(normal);
            uvs.push(Vec2::new((u + 1.0) * 0.5, (v + 1.0) * 0.5));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh.uvs = Some(uvs);
    mesh
}

/// Unit-radius latitude/longitude sphere
fn sphere() -> MeshData {
    let mut mesh = MeshData::default();
    let mut uvs = Vec::new();

    for ring in 0..=SPHERE_RINGS {
        let v = ring as f32 / SPHERE_RINGS as f32;
        let polar = std::f32::consts::PI * v;
        let y = polar.cos();
        let radius = polar.sin();
        for segment in 0..=SPHERE_SEGMENTS {
            let u = segment as f32 / SPHERE_SEGMENTS as f32;
            let azimuth = std::f32::consts::TAU * u;
            let position = Vec3::new(radius * azimuth.cos(), y, radius * azimuth.sin());
            mesh.positions.push(position);
            mesh.normals.push(position);
            uvs.push(Vec2::new(1.0 - u, 1.0 - v));
        }
    }

    let stride = (SPHERE_SEGMENTS + 1) as u32;
    for ring in 0..SPHERE_RINGS as u32 {
        for segment in 0..SPHERE_SEGMENTS as u32 {
            let a = ring * stride + segment;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    mesh.uvs = Some(uvs);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_codec::foundation::math::Transform;

    #[test]
    fn test_quad_is_unit_area() {
        let quad = unit_quad();
        let area = quad.surface_area(&Transform::identity());
        assert!((area - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_cube_has_per_face_vertices() {
        let cube = cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert!(cube.has_normals());
    }

    #[test]
    fn test_sphere_normals_are_unit_positions() {
        let sphere = sphere();
        for (p, n) in sphere.positions.iter().zip(&sphere.normals) {
            assert!((p - n).norm() < 1e-6);
            assert!((n.norm() - 1.0).abs() < 1e-4);
        }
    }
}
