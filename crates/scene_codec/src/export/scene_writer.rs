//! Scene binary writer
//!
//! Encodes every entity kind and orchestrates the two output streams. One
//! `SceneWriter` owns the per-run lookup tables; it must not be shared across
//! concurrent exports, and [`clear`](SceneWriter::clear) is a required step
//! between independent runs so no table state leaks into the next one.
//!
//! Stream layout (all fields little-endian, booleans 4-byte):
//!
//! ```text
//! scene:  [mediumCount][Medium]* [Camera] [lightCount][Light]* [shapeCount][Shape]*
//! meshes: [meshCount][Mesh]*
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::export::tables::{MediumTable, MeshSlot, MeshTable};
use crate::export::writer::BinaryWriter;
use crate::export::ExportError;
use crate::foundation::math::{deg_to_rad, Transform, Vec3};
use crate::scene::camera::CameraNode;
use crate::scene::graph::{Scene, SceneNode};
use crate::scene::light::{LightKind, RtLight};
use crate::scene::material::{BsdfMaterial, FloatTexture, ImageTexture, SpectrumTexture, UvMapping};
use crate::scene::medium::{Medium, MediumKind};
use crate::scene::mesh::MeshData;
use crate::scene::shape::{Shape, ShapeKind};

/// Width of the fixed medium-name slot
pub const MEDIUM_NAME_SLOT: usize = 128;

/// Width of the fixed image-path slot
pub const IMAGE_PATH_SLOT: usize = 256;

/// Binary scene/mesh stream writer
#[derive(Debug, Default)]
pub struct SceneWriter {
    meshes: MeshTable,
    media: MediumTable,
}

impl SceneWriter {
    /// Create a writer with empty tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the scene-description stream to `path`, returning bytes written
    pub fn write_scene(&mut self, scene: &Scene, path: impl AsRef<Path>) -> Result<u64, ExportError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut w = BinaryWriter::new(BufWriter::new(file));
        self.write_scene_to(scene, &mut w)?;
        w.flush()?;
        let total = w.offset();
        log::info!("{} write completed, total bytes = {}", path.display(), total);
        Ok(total)
    }

    /// Write the geometry stream to `path`, returning bytes written
    ///
    /// Serializes the meshes interned while writing the scene stream, so it
    /// must run after [`write_scene`](Self::write_scene) of the same run.
    pub fn write_meshes(&self, scene: &Scene, path: impl AsRef<Path>) -> Result<u64, ExportError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut w = BinaryWriter::new(BufWriter::new(file));
        self.write_meshes_to(scene, &mut w)?;
        w.flush()?;
        let total = w.offset();
        log::info!("{} write completed, total bytes = {}", path.display(), total);
        Ok(total)
    }

    /// Reset table state between independent export runs
    pub fn clear(&mut self) {
        self.meshes.clear();
        self.media.clear();
    }

    /// Encode the scene-description stream into an arbitrary sink
    pub fn write_scene_to<W: Write>(
        &mut self,
        scene: &Scene,
        w: &mut BinaryWriter<W>,
    ) -> Result<(), ExportError> {
        // Media first: interfaces encoded later resolve against a fully
        // populated table.
        let media: Vec<_> = scene.assets.media().collect();
        w.write_i32(media.len() as i32)?;
        for (handle, medium) in media {
            self.media.intern(handle);
            Self::encode_medium(w, medium)?;
        }

        let cameras: Vec<_> = scene
            .nodes
            .iter()
            .filter_map(|n| n.camera.as_ref().map(|c| (n, c)))
            .collect();
        let (camera_node, camera) = match cameras.len() {
            0 => return Err(ExportError::MissingCamera),
            1 => cameras[0],
            n => return Err(ExportError::AmbiguousCamera(n)),
        };
        Self::encode_camera(w, camera_node, camera)?;

        let lights: Vec<_> = scene
            .nodes
            .iter()
            .filter_map(|n| n.light.as_ref().map(|l| (n, l)))
            .collect();
        w.write_i32(lights.len() as i32)?;
        for (node, light) in lights {
            self.encode_light(w, node, light)?;
        }

        let shapes: Vec<_> = scene
            .nodes
            .iter()
            .filter_map(|n| n.shape.as_ref().map(|s| (n, s)))
            .collect();
        w.write_i32(shapes.len() as i32)?;
        for (node, shape) in shapes {
            self.encode_shape(w, node, shape)?;
        }
        Ok(())
    }

    /// Encode the geometry stream into an arbitrary sink
    pub fn write_meshes_to<W: Write>(
        &self,
        scene: &Scene,
        w: &mut BinaryWriter<W>,
    ) -> Result<(), ExportError> {
        w.write_i32(self.meshes.len() as i32)?;
        for (i, slot) in self.meshes.entries().iter().enumerate() {
            let mesh = match slot {
                MeshSlot::Asset(handle) => scene
                    .assets
                    .mesh(*handle)
                    .ok_or(ExportError::StaleMesh(i))?,
                MeshSlot::Rectangle => self
                    .meshes
                    .rectangle_mesh()
                    .ok_or(ExportError::StaleMesh(i))?,
            };
            Self::encode_mesh(w, mesh)?;
        }
        Ok(())
    }

    /// Encode a node pose: position, rotation, scale flag, conditional scale
    fn encode_transform<W: Write>(
        w: &mut BinaryWriter<W>,
        transform: &Transform,
        include_scale: bool,
    ) -> Result<(), ExportError> {
        w.write_vec3(transform.position)?;
        w.write_quat(transform.rotation)?;
        w.write_bool(include_scale)?;
        if include_scale {
            w.write_vec3(transform.scale)?;
        }
        Ok(())
    }

    /// Encode a node's medium interface: presence flag, conditional indices
    ///
    /// Indices come from table lookup only; a medium that was never
    /// enumerated encodes as the vacuum sentinel `-1`.
    fn encode_medium_interface<W: Write>(
        &self,
        w: &mut BinaryWriter<W>,
        node: &SceneNode,
    ) -> Result<(), ExportError> {
        match node.medium_interface {
            None => w.write_bool(false),
            Some(interface) => {
                w.write_bool(true)?;
                let lookup = |handle: Option<crate::scene::graph::MediumHandle>| {
                    handle
                        .and_then(|h| self.media.find(h))
                        .map_or(-1, |idx| idx as i32)
                };
                w.write_i32(lookup(interface.inside))?;
                w.write_i32(lookup(interface.outside))
            }
        }
    }

    fn encode_image<W: Write>(
        w: &mut BinaryWriter<W>,
        image: &ImageTexture,
    ) -> Result<(), ExportError> {
        w.write_fixed_str(&image.path, IMAGE_PATH_SLOT)?;
        w.write_f32(image.gamma)?;
        w.write_i32(image.wrap.tag())?;
        w.write_i32(image.mapping.tag())?;
        match image.mapping {
            // Scale/offset fields are integer-truncated on the wire; the
            // renderer reads them as i32.
            UvMapping::UvMapping2d { su, sv, du, dv } => {
                w.write_i32(su as i32)?;
                w.write_i32(sv as i32)?;
                w.write_i32(du as i32)?;
                w.write_i32(dv as i32)?;
            }
        }
        Ok(())
    }

    fn encode_spectrum_texture<W: Write>(
        w: &mut BinaryWriter<W>,
        texture: &SpectrumTexture,
    ) -> Result<(), ExportError> {
        w.write_i32(texture.tag())?;
        match texture {
            SpectrumTexture::Constant(spectrum) => w.write_vec3(*spectrum),
            SpectrumTexture::Image(image) => Self::encode_image(w, image),
        }
    }

    fn encode_float_texture<W: Write>(
        w: &mut BinaryWriter<W>,
        texture: &FloatTexture,
    ) -> Result<(), ExportError> {
        w.write_i32(texture.tag())?;
        match texture {
            FloatTexture::Constant(value) => w.write_f32(*value),
            FloatTexture::Image(image) => Self::encode_image(w, image),
        }
    }

    /// Encode a material: kind tag, then the fixed texture set of that kind
    fn encode_material<W: Write>(
        w: &mut BinaryWriter<W>,
        material: &BsdfMaterial,
    ) -> Result<(), ExportError> {
        w.write_i32(material.tag())?;
        match material {
            BsdfMaterial::Matte { kd, sigma } => {
                Self::encode_spectrum_texture(w, kd)?;
                Self::encode_float_texture(w, sigma)
            }
            BsdfMaterial::Plastic { kd, ks, roughness } => {
                Self::encode_spectrum_texture(w, kd)?;
                Self::encode_spectrum_texture(w, ks)?;
                Self::encode_float_texture(w, roughness)
            }
            BsdfMaterial::Mirror { kr } => Self::encode_spectrum_texture(w, kr),
            BsdfMaterial::Glass {
                kr,
                ks,
                u_roughness,
                v_roughness,
                index,
            } => {
                Self::encode_spectrum_texture(w, kr)?;
                Self::encode_spectrum_texture(w, ks)?;
                Self::encode_float_texture(w, u_roughness)?;
                Self::encode_float_texture(w, v_roughness)?;
                Self::encode_float_texture(w, index)
            }
        }
    }

    fn encode_light<W: Write>(
        &self,
        w: &mut BinaryWriter<W>,
        node: &SceneNode,
        light: &RtLight,
    ) -> Result<(), ExportError> {
        Self::encode_transform(w, &node.transform, false)?;
        w.write_i32(light.kind.tag())?;
        w.write_vec3(light.color)?;
        w.write_f32(light.intensity)?;
        self.encode_medium_interface(w, node)?;
        match light.kind {
            LightKind::DeltaDistant => w.write_vec3(-node.transform.forward()),
            LightKind::DeltaPoint => w.write_f32(light.point_radius),
            LightKind::Area => Ok(()),
        }
    }

    fn encode_shape<W: Write>(
        &mut self,
        w: &mut BinaryWriter<W>,
        node: &SceneNode,
        shape: &Shape,
    ) -> Result<(), ExportError> {
        w.write_i32(shape.kind.tag())?;
        Self::encode_transform(w, &node.transform, shape.kind.includes_scale())?;
        self.encode_medium_interface(w, node)?;

        match shape.emission {
            None => w.write_bool(false)?,
            Some(emission) => {
                w.write_bool(true)?;
                w.write_vec3(emission.radiance)?;
                w.write_f32(emission.intensity)?;
            }
        }

        match shape.kind {
            ShapeKind::Sphere => {
                w.write_f32(node.transform.scale.x * 0.5)?;
            }
            ShapeKind::TriangleMesh => {
                let handle = node
                    .mesh
                    .ok_or_else(|| ExportError::ShapeWithoutMesh(node.name.clone()))?;
                let index = self.meshes.intern(handle);
                w.write_i32(index as i32)?;
            }
            ShapeKind::Rectangle => {
                let index = self.meshes.intern_rectangle();
                w.write_i32(index as i32)?;
            }
        }

        match &node.material {
            None => w.write_bool(false),
            Some(material) => {
                w.write_bool(true)?;
                Self::encode_material(w, material)
            }
        }
    }

    fn encode_camera<W: Write>(
        w: &mut BinaryWriter<W>,
        node: &SceneNode,
        camera: &CameraNode,
    ) -> Result<(), ExportError> {
        Self::encode_transform(w, &node.transform, false)?;
        w.write_f32(deg_to_rad(camera.fov_degrees))?;
        w.write_bool(camera.orthographic)
    }

    fn encode_medium<W: Write>(
        w: &mut BinaryWriter<W>,
        medium: &Medium,
    ) -> Result<(), ExportError> {
        w.write_fixed_str(&medium.name, MEDIUM_NAME_SLOT)?;
        w.write_i32(medium.kind.tag())?;
        match medium.kind {
            MediumKind::Homogeneous {
                sigma_a,
                sigma_s,
                g,
            } => {
                w.write_vec3(sigma_a)?;
                w.write_vec3(sigma_s)?;
                w.write_f32(g)?;
            }
            MediumKind::Heterogeneous => {}
        }
        Ok(())
    }

    fn encode_mesh<W: Write>(w: &mut BinaryWriter<W>, mesh: &MeshData) -> Result<(), ExportError> {
        let vertex_count = mesh.vertex_count();
        w.write_i32(vertex_count as i32)?;
        for &position in &mesh.positions {
            w.write_vec3(position)?;
        }

        let computed;
        let normals: &[Vec3] = if mesh.has_normals() {
            &mesh.normals
        } else {
            computed = mesh.computed_normals();
            &computed
        };
        for &normal in normals {
            w.write_vec3(normal)?;
        }

        let computed_tan;
        let tangents: &[Vec3] = if mesh.has_tangents() {
            &mesh.tangents
        } else {
            computed_tan = mesh.computed_tangents(normals);
            &computed_tan
        };
        for &tangent in tangents {
            w.write_vec3(tangent)?;
        }

        match &mesh.uvs {
            Some(uvs) => {
                w.write_bool(true)?;
                for uv in uvs {
                    w.write_f32(uv.x)?;
                    w.write_f32(uv.y)?;
                }
            }
            None => w.write_bool(false)?,
        }

        // Count field is the flat index-list length, the convention the
        // renderer's reader expects.
        w.write_i32(mesh.indices.len() as i32)?;
        for &index in &mesh.indices {
            w.write_i32(index as i32)?;
        }
        Ok(())
    }
}
