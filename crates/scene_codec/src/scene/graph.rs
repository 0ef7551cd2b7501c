//! Scene container and nodes
//!
//! The scene graph both codec directions work against: a flat node list plus
//! an asset store for shared geometry and media. Nodes own their transforms
//! and components by value; shared assets are addressed through typed handles
//! whose identity drives export-side deduplication.

use std::sync::Arc;

use crate::foundation::collections::{HandleMap, TypedHandle};
use crate::foundation::math::Transform;
use crate::scene::camera::CameraNode;
use crate::scene::light::RtLight;
use crate::scene::material::{BsdfMaterial, RendererMaterial};
use crate::scene::medium::{Medium, MediumInterface};
use crate::scene::mesh::MeshData;
use crate::scene::shape::Shape;

/// Handle to a mesh in the asset store
pub type MeshHandle = TypedHandle<MeshData>;

/// Handle to a medium in the asset store
pub type MediumHandle = TypedHandle<Medium>;

/// Shared geometry and media owned by a scene
///
/// Insertion order of media is preserved: the exporter enumerates and
/// serializes them in exactly this order, which is what makes medium-interface
/// indices stable.
#[derive(Debug, Default)]
pub struct AssetStore {
    meshes: HandleMap<MeshData>,
    media: HandleMap<Medium>,
    media_order: Vec<MediumHandle>,
}

impl AssetStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mesh and return its handle
    ///
    /// Every call mints a fresh identity; callers that want two shapes to
    /// share one serialized mesh record must share the handle.
    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshHandle {
        MeshHandle::new(self.meshes.insert(mesh))
    }

    /// Look up a mesh
    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(handle.key())
    }

    /// Insert a medium and return its handle
    pub fn add_medium(&mut self, medium: Medium) -> MediumHandle {
        let handle = MediumHandle::new(self.media.insert(medium));
        self.media_order.push(handle);
        handle
    }

    /// Look up a medium
    pub fn medium(&self, handle: MediumHandle) -> Option<&Medium> {
        self.media.get(handle.key())
    }

    /// Handles of all media in insertion order
    pub fn media_handles(&self) -> &[MediumHandle] {
        &self.media_order
    }

    /// All media with their handles, in insertion order
    pub fn media(&self) -> impl Iterator<Item = (MediumHandle, &Medium)> + '_ {
        self.media_order
            .iter()
            .filter_map(move |&h| self.media.get(h.key()).map(|m| (h, m)))
    }

    /// Number of stored meshes
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}

/// A single node of the scene graph
///
/// Pure data with optional components; absent components simply do not
/// participate in the corresponding export pass.
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    /// Node name
    pub name: String,
    /// Local pose, copied by value into the binary stream
    pub transform: Transform,
    /// Geometry, for mesh-backed shapes and imported entities
    pub mesh: Option<MeshHandle>,
    /// Shape component
    pub shape: Option<Shape>,
    /// Explicit light component
    pub light: Option<RtLight>,
    /// Inside/outside medium assignment
    pub medium_interface: Option<MediumInterface>,
    /// Camera component
    pub camera: Option<CameraNode>,
    /// Authored BSDF material
    pub material: Option<BsdfMaterial>,
    /// Engine material binding produced by the reconstructor; shared between
    /// nodes that reference the same named material
    pub renderer_material: Option<Arc<RendererMaterial>>,
    /// Marks a reconstructed entity as an emissive light source
    pub area_light: bool,
}

impl SceneNode {
    /// Create an empty node with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Complete scene: nodes plus shared assets
#[derive(Debug, Default)]
pub struct Scene {
    /// All nodes, in creation order
    pub nodes: Vec<SceneNode>,
    /// Shared geometry and media
    pub assets: AssetStore,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its index
    pub fn add_node(&mut self, node: SceneNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Nodes carrying a camera component
    pub fn cameras(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(|n| n.camera.is_some())
    }

    /// Nodes carrying a light component
    pub fn lights(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(|n| n.light.is_some())
    }

    /// Nodes carrying a shape component
    pub fn shapes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(|n| n.shape.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_media_enumeration_preserves_insertion_order() {
        let mut assets = AssetStore::new();
        let a = assets.add_medium(Medium::homogeneous(
            "fog",
            Vec3::zeros(),
            Vec3::zeros(),
            0.0,
        ));
        let b = assets.add_medium(Medium::homogeneous(
            "smoke",
            Vec3::zeros(),
            Vec3::zeros(),
            0.0,
        ));
        assert_eq!(assets.media_handles(), &[a, b]);
        assert_eq!(assets.medium(a).unwrap().name, "fog");
    }

    #[test]
    fn test_component_filters() {
        let mut scene = Scene::new();
        let mut cam = SceneNode::new("cam");
        cam.camera = Some(CameraNode::default());
        scene.add_node(cam);
        scene.add_node(SceneNode::new("empty"));

        assert_eq!(scene.cameras().count(), 1);
        assert_eq!(scene.lights().count(), 0);
        assert_eq!(scene.shapes().count(), 0);
    }
}
