//! OBJ mesh loading for the filesystem resolver

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use scene_codec::foundation::math::{Vec2, Vec3};
use scene_codec::scene::MeshData;

/// Load an OBJ file into mesh data
///
/// Handles `v`/`vn`/`vt`/`f` records and fan-triangulates polygonal faces.
/// Vertices are duplicated per face corner, so meshes with per-face attribute
/// indices come out consistent; normals missing from the file are left for
/// the codec to recompute.
pub fn load_obj(path: &Path) -> Option<MeshData> {
    let file = File::open(path).ok()?;
    let reader = BufReader::new(file);

    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut tex_coords: Vec<Vec2> = Vec::new();
    let mut mesh = MeshData::default();
    let mut uvs: Vec<Vec2> = Vec::new();
    let mut any_normal = false;
    let mut any_uv = false;

    for line in reader.lines() {
        let line = line.ok()?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                positions.push(parse_vec3(&mut parts)?);
            }
            Some("vn") => {
                normals.push(parse_vec3(&mut parts)?);
            }
            Some("vt") => {
                let u: f32 = parts.next()?.parse().ok()?;
                let v: f32 = parts.next()?.parse().ok()?;
                tex_coords.push(Vec2::new(u, v));
            }
            Some("f") => {
                let mut corners = Vec::new();
                for corner in parts {
                    let mut refs = corner.split('/');
                    // OBJ indices are 1-based; 0 is malformed
                    let pos_idx: usize = refs.next()?.parse::<usize>().ok()?.checked_sub(1)?;
                    let uv_idx: Option<usize> = refs
                        .next()
                        .filter(|s| !s.is_empty())
                        .and_then(|s| s.parse::<usize>().ok())
                        .and_then(|i| i.checked_sub(1));
                    let normal_idx: Option<usize> = refs
                        .next()
                        .filter(|s| !s.is_empty())
                        .and_then(|s| s.parse::<usize>().ok())
                        .and_then(|i| i.checked_sub(1));

                    let index = mesh.positions.len() as u32;
                    mesh.positions.push(*positions.get(pos_idx)?);
                    if let Some(n) = normal_idx.and_then(|i| normals.get(i)) {
                        mesh.normals.push(*n);
                        any_normal = true;
                    } else {
                        mesh.normals.push(Vec3::y());
                    }
                    if let Some(uv) = uv_idx.and_then(|i| tex_coords.get(i)) {
                        uvs.push(*uv);
                        any_uv = true;
                    } else {
                        uvs.push(Vec2::zeros());
                    }
                    corners.push(index);
                }
                for i in 1..corners.len().saturating_sub(1) {
                    mesh.indices
                        .extend_from_slice(&[corners[0], corners[i], corners[i + 1]]);
                }
            }
            _ => {}
        }
    }

    if mesh.positions.is_empty() {
        return None;
    }
    if !any_normal {
        mesh.normals.clear();
    }
    if any_uv {
        mesh.uvs = Some(uvs);
    }
    Some(mesh)
}

fn parse_vec3<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Option<Vec3> {
    let x: f32 = parts.next()?.parse().ok()?;
    let y: f32 = parts.next()?.parse().ok()?;
    let z: f32 = parts.next()?.parse().ok()?;
    Some(Vec3::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_triangle_with_normals() {
        let path = write_temp(
            "scene_codec_obj_test.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n",
        );
        let mesh = load_obj(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert!(mesh.has_normals());
        assert!(mesh.uvs.is_none());
    }

    #[test]
    fn test_quad_face_is_fan_triangulated() {
        let path = write_temp(
            "scene_codec_obj_quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );
        let mesh = load_obj(&path).unwrap();
        assert_eq!(mesh.indices.len(), 6);
        // no vn records: normals are left for the codec to recompute
        assert!(!mesh.has_normals());
    }

    #[test]
    fn test_missing_file_is_none() {
        assert!(load_obj(Path::new("/nonexistent/model.obj")).is_none());
    }
}
