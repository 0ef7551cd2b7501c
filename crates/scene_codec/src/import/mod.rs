//! Structured-text scene import
//!
//! Parses the human-editable JSON scene document and reconstructs a scene
//! graph plus engine resource bindings from it. Asset references in the
//! document resolve relative to the document's own directory, through
//! collaborator interfaces supplied by the host (asset resolver, primitive
//! generator, metal-IOR table).

pub mod context;
pub mod reconstruct;
pub mod schema;

pub use context::{
    AssetResolver, ImportContext, MetalIor, MetalLookup, PrimitiveKind, PrimitiveSource,
};
pub use reconstruct::{
    import_scene_file, reconstruct, EngineBindings, EnvironmentBinding, ImportFailure,
    ImportResult,
};
pub use schema::{CameraDoc, EntityDoc, EnvLightDoc, MaterialDoc, RendererDoc, SceneDoc};

use thiserror::Error;

/// Errors raised while importing a structured-text scene
#[derive(Error, Debug)]
pub enum ImportError {
    /// IO failure; fatal for the whole import call
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not a valid scene description
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A referenced external asset did not resolve
    #[error("entity '{entity}': asset '{path}' did not resolve")]
    MissingAsset {
        /// Entity or material that referenced the asset
        entity: String,
        /// The unresolved path
        path: String,
    },

    /// A material names a shader the renderer does not provide
    #[error("material '{material}': unknown shader '{shader}'")]
    UnknownShader {
        /// Material name
        material: String,
        /// Shader name from the document
        shader: String,
    },

    /// An entity names a material the document does not define
    #[error("entity '{entity}': material '{name}' is not defined")]
    MissingMaterial {
        /// Entity name
        entity: String,
        /// Referenced material name
        name: String,
    },

    /// Power-based emission over geometry with zero surface area
    #[error("entity '{entity}': emissive mesh has zero surface area")]
    ZeroAreaEmitter {
        /// Entity name
        entity: String,
    },

    /// An engine resource from the configuration did not resolve
    #[error("engine resource '{name}' at '{path}' did not resolve")]
    MissingResource {
        /// Resource name in the configuration
        name: String,
        /// Configured path
        path: String,
    },

    /// Configuration failure
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
