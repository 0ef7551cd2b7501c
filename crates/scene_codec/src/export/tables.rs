//! Identity-keyed export tables
//!
//! Both tables assign stable indices in first-seen order and key strictly on
//! handle identity: two structurally identical assets under distinct handles
//! occupy two slots. Each table is an entry arena plus a handle-to-index side
//! map, owned by one writer for the duration of one export run.

use std::collections::HashMap;

use crate::scene::graph::{MediumHandle, MeshHandle};
use crate::scene::mesh::MeshData;

/// Medium lookup table
#[derive(Debug, Default)]
pub struct MediumTable {
    entries: Vec<MediumHandle>,
    index: HashMap<MediumHandle, usize>,
}

impl MediumTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a medium, returning its stable index
    pub fn intern(&mut self, handle: MediumHandle) -> usize {
        if let Some(&idx) = self.index.get(&handle) {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push(handle);
        self.index.insert(handle, idx);
        idx
    }

    /// Look up a previously interned medium without inserting
    pub fn find(&self, handle: MediumHandle) -> Option<usize> {
        self.index.get(&handle).copied()
    }

    /// Number of interned media
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no medium has been interned
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reset for a new export run
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

/// A mesh-table slot: either scene-owned geometry or the synthesized
/// rectangle primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshSlot {
    /// Mesh stored in the scene's asset store
    Asset(MeshHandle),
    /// The writer-owned rectangle quad
    Rectangle,
}

/// Mesh lookup table
///
/// Owns the rectangle primitive synthesized lazily for rectangle shapes; it
/// lives in its own slot, shared by every rectangle in the scene, and is
/// released by [`clear`](MeshTable::clear).
#[derive(Debug, Default)]
pub struct MeshTable {
    entries: Vec<MeshSlot>,
    index: HashMap<MeshHandle, usize>,
    rectangle: Option<(usize, MeshData)>,
}

impl MeshTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a scene mesh, returning its stable index
    pub fn intern(&mut self, handle: MeshHandle) -> usize {
        if let Some(&idx) = self.index.get(&handle) {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push(MeshSlot::Asset(handle));
        self.index.insert(handle, idx);
        idx
    }

    /// Intern the rectangle primitive, synthesizing it on first use
    pub fn intern_rectangle(&mut self) -> usize {
        if let Some((idx, _)) = self.rectangle {
            return idx;
        }
        let idx = self.entries.len();
        self.entries.push(MeshSlot::Rectangle);
        self.rectangle = Some((idx, MeshData::rectangle()));
        idx
    }

    /// Look up a previously interned mesh without inserting
    pub fn find(&self, handle: MeshHandle) -> Option<usize> {
        self.index.get(&handle).copied()
    }

    /// All slots in index order
    pub fn entries(&self) -> &[MeshSlot] {
        &self.entries
    }

    /// The synthesized rectangle geometry, if any rectangle shape was interned
    pub fn rectangle_mesh(&self) -> Option<&MeshData> {
        self.rectangle.as_ref().map(|(_, mesh)| mesh)
    }

    /// Number of interned meshes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no mesh has been interned
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reset for a new export run, releasing the synthesized rectangle
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.rectangle = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::graph::AssetStore;
    use crate::scene::medium::Medium;

    #[test]
    fn test_intern_is_first_seen_order_and_idempotent() {
        let mut assets = AssetStore::new();
        let a = assets.add_medium(Medium::homogeneous("a", Vec3::zeros(), Vec3::zeros(), 0.0));
        let b = assets.add_medium(Medium::homogeneous("b", Vec3::zeros(), Vec3::zeros(), 0.0));
        let c = assets.add_medium(Medium::homogeneous("c", Vec3::zeros(), Vec3::zeros(), 0.0));

        let mut table = MediumTable::new();
        assert_eq!(table.intern(a), 0);
        assert_eq!(table.intern(b), 1);
        assert_eq!(table.intern(a), 0);
        assert_eq!(table.intern(c), 2);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_identical_content_distinct_identity() {
        let mut assets = AssetStore::new();
        let a = assets.add_medium(Medium::homogeneous("fog", Vec3::zeros(), Vec3::zeros(), 0.0));
        let b = assets.add_medium(Medium::homogeneous("fog", Vec3::zeros(), Vec3::zeros(), 0.0));

        let mut table = MediumTable::new();
        assert_eq!(table.intern(a), 0);
        assert_eq!(table.intern(b), 1);
    }

    #[test]
    fn test_find_never_inserts() {
        let mut assets = AssetStore::new();
        let a = assets.add_medium(Medium::homogeneous("a", Vec3::zeros(), Vec3::zeros(), 0.0));

        let table = MediumTable::new();
        assert_eq!(table.find(a), None);
        assert!(table.is_empty());
    }

    #[test]
    fn test_mesh_table_dedup_by_handle() {
        let mut assets = AssetStore::new();
        let mesh = assets.add_mesh(MeshData::new(vec![Vec3::zeros()], vec![]));

        let mut table = MeshTable::new();
        assert_eq!(table.intern(mesh), 0);
        assert_eq!(table.intern(mesh), 0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rectangle_synthesized_once_and_released_on_clear() {
        let mut table = MeshTable::new();
        assert!(table.rectangle_mesh().is_none());

        let idx = table.intern_rectangle();
        assert_eq!(idx, table.intern_rectangle());
        assert_eq!(table.len(), 1);
        assert!(table.rectangle_mesh().is_some());

        table.clear();
        assert!(table.rectangle_mesh().is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_rectangle_slot_interleaves_with_assets() {
        let mut assets = AssetStore::new();
        let mesh = assets.add_mesh(MeshData::new(vec![Vec3::zeros()], vec![]));

        let mut table = MeshTable::new();
        assert_eq!(table.intern(mesh), 0);
        assert_eq!(table.intern_rectangle(), 1);
        assert_eq!(table.entries()[1], MeshSlot::Rectangle);
    }
}
