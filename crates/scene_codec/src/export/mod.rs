//! Binary scene export
//!
//! Walks a [`Scene`](crate::scene::Scene) and emits the renderer's two binary
//! streams: the scene description (media, camera, lights, shapes) and the
//! geometry file (deduplicated triangle meshes).

pub mod scene_writer;
pub mod tables;
pub mod writer;

pub use scene_writer::SceneWriter;
pub use tables::{MediumTable, MeshTable};
pub use writer::BinaryWriter;

use thiserror::Error;

/// Errors raised while exporting a scene
#[derive(Error, Debug)]
pub enum ExportError {
    /// IO failure; fatal for the whole export call
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The scene contains no camera node
    #[error("scene contains no camera")]
    MissingCamera,

    /// More than one camera node; the format carries exactly one
    #[error("scene contains {0} cameras, expected exactly one")]
    AmbiguousCamera(usize),

    /// A string does not fit its fixed-width slot
    #[error("string '{name}' is {len} bytes, exceeding the {limit}-byte slot")]
    NameTooLong {
        /// The offending string
        name: String,
        /// Encoded length in bytes
        len: usize,
        /// Slot width
        limit: usize,
    },

    /// A triangle-mesh shape has no mesh handle attached
    #[error("shape '{0}' has no mesh attached")]
    ShapeWithoutMesh(String),

    /// A mesh-table entry does not resolve in the scene being written;
    /// the writer was not cleared between export runs
    #[error("mesh table entry {0} does not resolve in this scene; call clear() between exports")]
    StaleMesh(usize),
}
