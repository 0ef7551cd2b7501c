//! # Scene Codec
//!
//! Interchange codec between an interactive scene editor and a path-tracing
//! renderer that cannot read the editor's native scene graph.
//!
//! Two representations are supported:
//!
//! - a compact fixed-layout **binary format** the renderer consumes directly
//!   (a scene-description stream and a geometry stream), produced by
//!   [`export::SceneWriter`];
//! - a human-editable **structured-text format** (JSON) used for authoring and
//!   diffing scenes outside the editor, consumed by the reconstructor in
//!   [`import`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use scene_codec::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scene = Scene::new();
//!     let mut camera = SceneNode::new("camera");
//!     camera.camera = Some(CameraNode::default());
//!     scene.add_node(camera);
//!
//!     let mut writer = SceneWriter::new();
//!     writer.write_scene(&scene, "scene.rt")?;
//!     writer.write_meshes(&scene, "scene.m")?;
//!     writer.clear();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod export;
pub mod foundation;
pub mod import;
pub mod scene;

/// Common imports for codec users
pub mod prelude {
    pub use crate::config::{Config, EngineResourcesConfig};
    pub use crate::export::{ExportError, SceneWriter};
    pub use crate::foundation::math::{Quat, Transform, Vec2, Vec3};
    pub use crate::import::{
        import_scene_file, AssetResolver, ImportContext, ImportError, ImportResult, MetalLookup,
        PrimitiveKind, PrimitiveSource, SceneDoc,
    };
    pub use crate::scene::{
        AssetHandle, BsdfMaterial, CameraNode, FloatTexture, LightKind, Medium, MediumInterface,
        MeshData, RendererMaterial, RtLight, Scene, SceneNode, ShaderKind, Shape, ShapeKind,
        SpectrumTexture,
    };
}
