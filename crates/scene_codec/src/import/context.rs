//! Import collaborators and reconstruction context
//!
//! The reconstructor consumes three host-provided interfaces: an asset
//! resolver (textures, materials, meshes), a primitive generator, and a
//! metal-IOR table. `ImportContext` bundles them with the per-run texture
//! cache so the collaborating state is an explicit object with a clear
//! lifetime rather than a set of captured closures.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::foundation::math::Vec3;
use crate::scene::material::AssetHandle;
use crate::scene::mesh::MeshData;

/// Complex refractive index of a named metal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetalIor {
    /// Per-channel eta
    pub eta: Vec3,
    /// Per-channel absorption k
    pub k: Vec3,
    /// Metal kind tag understood by the shader; 0 is "custom"
    pub kind: i32,
}

/// Lookup table mapping named real-world metals to refractive-index triples
pub trait MetalLookup {
    /// The IOR of `name`, if the table knows it
    fn metal_ior(&self, name: &str) -> Option<MetalIor>;
}

/// Named mesh primitives an entity may reference instead of a mesh asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Unit cube
    Cube,
    /// Unit sphere
    Sphere,
    /// Unit plane in XZ
    Plane,
    /// Unit quad in XZ
    Quad,
    /// Unit disk in XZ
    Disk,
}

impl PrimitiveKind {
    /// Parse a primitive name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "cube" => Some(PrimitiveKind::Cube),
            "sphere" => Some(PrimitiveKind::Sphere),
            "plane" => Some(PrimitiveKind::Plane),
            "quad" => Some(PrimitiveKind::Quad),
            "disk" => Some(PrimitiveKind::Disk),
            _ => None,
        }
    }
}

/// Generator for named mesh primitives
pub trait PrimitiveSource {
    /// Generate the geometry of `kind`
    fn generate(&self, kind: PrimitiveKind) -> MeshData;
}

/// Host-side asset resolution
///
/// `resolve` mints opaque handles for assets the engine loads itself
/// (textures, skybox materials, kernel resources); `load_mesh` returns actual
/// geometry, because reconstruction needs triangle data to derive radiance
/// from power.
pub trait AssetResolver {
    /// Resolve an asset path to an engine handle
    fn resolve(&mut self, path: &Path) -> Option<AssetHandle>;

    /// Load mesh geometry from an asset path
    fn load_mesh(&mut self, path: &Path) -> Option<MeshData>;
}

/// Per-run reconstruction context
///
/// Owns the texture-path cache: repeated references to the same texture
/// resolve once per reconstruction call.
pub struct ImportContext<'a> {
    /// Metal-IOR table
    pub metals: &'a dyn MetalLookup,
    /// Primitive generator
    pub primitives: &'a dyn PrimitiveSource,
    resolver: &'a mut dyn AssetResolver,
    base_dir: PathBuf,
    texture_cache: HashMap<PathBuf, AssetHandle>,
}

impl<'a> ImportContext<'a> {
    /// Create a context resolving relative paths against `base_dir`
    pub fn new(
        base_dir: impl Into<PathBuf>,
        metals: &'a dyn MetalLookup,
        primitives: &'a dyn PrimitiveSource,
        resolver: &'a mut dyn AssetResolver,
    ) -> Self {
        Self {
            metals,
            primitives,
            resolver,
            base_dir: base_dir.into(),
            texture_cache: HashMap::new(),
        }
    }

    /// Directory asset references resolve against
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a texture path relative to the document, memoized per run
    pub fn texture(&mut self, relative: &str) -> Option<AssetHandle> {
        let path = self.base_dir.join(relative);
        if let Some(&handle) = self.texture_cache.get(&path) {
            return Some(handle);
        }
        let handle = self.resolver.resolve(&path)?;
        self.texture_cache.insert(path, handle);
        Some(handle)
    }

    /// Load mesh geometry from a path relative to the document
    pub fn mesh(&mut self, relative: &str) -> Option<MeshData> {
        self.resolver.load_mesh(&self.base_dir.join(relative))
    }

    /// Resolve a non-texture asset path as given (engine resources use
    /// absolute, environment-configured paths)
    pub fn resource(&mut self, path: &Path) -> Option<AssetHandle> {
        self.resolver.resolve(path)
    }
}
