//! Filesystem asset resolver
//!
//! Implements the codec's `AssetResolver` collaborator against the local
//! filesystem: existing files get opaque handles, OBJ paths load as geometry.

use std::path::{Path, PathBuf};

use scene_codec::import::AssetResolver;
use scene_codec::scene::{AssetHandle, MeshData};

use crate::obj;

/// Resolver handing out sequential handles for files that exist on disk
#[derive(Default)]
pub struct FsResolver {
    resolved: Vec<PathBuf>,
}

impl FsResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths resolved so far, indexed by handle id
    pub fn resolved(&self) -> &[PathBuf] {
        &self.resolved
    }
}

impl AssetResolver for FsResolver {
    fn resolve(&mut self, path: &Path) -> Option<AssetHandle> {
        if !path.exists() {
            return None;
        }
        self.resolved.push(path.to_path_buf());
        Some(AssetHandle::new(self.resolved.len() as u64 - 1))
    }

    fn load_mesh(&mut self, path: &Path) -> Option<MeshData> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("obj") => obj::load_obj(path),
            _ => {
                log::warn!("unsupported mesh format: {}", path.display());
                None
            }
        }
    }
}
