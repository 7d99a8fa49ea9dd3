/// Scene: the set of renderables seen by culling and rendering.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys.
/// Renderables are stored contiguously for cache-friendly iteration.

use slotmap::SlotMap;
use crate::engine_debug;
use crate::spatial::{SpatialIndex, AABB2D};
use super::renderable::{MeshRenderer, RenderableKey, RenderableObject};

/// A renderable scene containing MeshRenderers.
///
/// Renderables are managed via stable keys (RenderableKey).
/// Keys remain valid even after other renderables are removed.
#[derive(Debug, Default)]
pub struct Scene {
    renderables: SlotMap<RenderableKey, MeshRenderer>,
}

impl Scene {
    pub fn new() -> Self {
        Self { renderables: SlotMap::with_key() }
    }

    /// Add a renderable and return its stable key.
    ///
    /// Static renderables only become visible to index-backed culling after
    /// the next `rebuild_spatial_index`.
    pub fn create_renderable(&mut self, renderable: MeshRenderer) -> RenderableKey {
        self.renderables.insert(renderable)
    }

    /// Remove a renderable. Returns it, or None if the key is invalid.
    pub fn remove_renderable(&mut self, key: RenderableKey) -> Option<MeshRenderer> {
        self.renderables.remove(key)
    }

    pub fn renderable(&self, key: RenderableKey) -> Option<&MeshRenderer> {
        self.renderables.get(key)
    }

    pub fn renderable_mut(&mut self, key: RenderableKey) -> Option<&mut MeshRenderer> {
        self.renderables.get_mut(key)
    }

    pub fn contains(&self, key: RenderableKey) -> bool {
        self.renderables.contains_key(key)
    }

    /// Iterate over all (key, renderable) pairs.
    pub fn renderables(&self) -> impl Iterator<Item = (RenderableKey, &MeshRenderer)> + '_ {
        self.renderables.iter()
    }

    /// Iterate over all renderable keys.
    pub fn renderable_keys(&self) -> impl Iterator<Item = RenderableKey> + '_ {
        self.renderables.keys()
    }

    pub fn renderable_count(&self) -> usize {
        self.renderables.len()
    }

    pub fn clear(&mut self) {
        self.renderables.clear();
    }

    /// Ground-plane union of every static renderable's footprint.
    ///
    /// None when the scene has no static renderable.
    pub fn static_bounds(&self) -> Option<AABB2D> {
        self.renderables
            .values()
            .filter(|r| r.is_static())
            .map(|r| r.world_aabb().footprint())
            .reduce(|acc, rect| acc.union(&rect))
    }

    /// Clear `index`, create it over `bounds` and insert every static
    /// renderable. Returns the number of inserted renderables.
    ///
    /// Must not run while a frame is being rendered.
    pub fn rebuild_spatial_index(&self, index: &mut dyn SpatialIndex, bounds: AABB2D) -> usize {
        index.clear();
        index.create(bounds);

        let mut inserted = 0;
        for (key, renderable) in self.renderables.iter().filter(|(_, r)| r.is_static()) {
            index.insert(key, renderable);
            inserted += 1;
        }

        engine_debug!("orion::Scene", "Spatial index rebuilt with {} static renderables", inserted);
        inserted
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
