/// RenderView: result of frustum culling.
///
/// Created by a `Culler`. Contains the view volume and eye position used for
/// the query and the keys of the renderables that passed it.
///
/// Ephemeral: lives for one pass. No Arc, no Mutex.

use glam::Vec3;
use crate::scene::RenderableKey;
use super::frustum::Frustum;

/// Result of frustum culling. Ephemeral: it lives for one pass.
#[derive(Debug, Clone)]
pub struct RenderView {
    frustum: Frustum,
    eye_position: Vec3,
    visible: Vec<RenderableKey>,
}

impl RenderView {
    /// Create a new RenderView (crate-internal: only cullers create these).
    pub(crate) fn new(frustum: Frustum, eye_position: Vec3, visible: Vec<RenderableKey>) -> Self {
        Self { frustum, eye_position, visible }
    }

    /// View volume the culling ran against.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Eye position used for distance sorting.
    pub fn eye_position(&self) -> Vec3 {
        self.eye_position
    }

    /// Keys of visible renderables. Unique, in no guaranteed order.
    pub fn visible(&self) -> &[RenderableKey] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn contains(&self, key: RenderableKey) -> bool {
        self.visible.contains(&key)
    }
}

#[cfg(test)]
#[path = "render_view_tests.rs"]
mod tests;
