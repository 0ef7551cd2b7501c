//! Scene-graph model
//!
//! The in-memory representation both codec directions work against: nodes
//! with transform/shape/light/camera/material components, plus an asset store
//! for shared geometry and participating media.

pub mod camera;
pub mod graph;
pub mod light;
pub mod material;
pub mod medium;
pub mod mesh;
pub mod shape;

pub use camera::CameraNode;
pub use graph::{AssetStore, MediumHandle, MeshHandle, Scene, SceneNode};
pub use light::{LightKind, RtLight};
pub use material::{
    AssetHandle, BsdfMaterial, FloatTexture, ImageTexture, RendererMaterial, ShaderKind,
    SpectrumTexture, UvMapping, WrapMode,
};
pub use medium::{Medium, MediumInterface, MediumKind};
pub use mesh::MeshData;
pub use shape::{AreaEmission, Shape, ShapeKind};
