/// Spatial acceleration structures for static renderables.
///
/// A SpatialIndex buckets static objects by their ground-plane footprint
/// for efficient frustum queries. Objects are never removed individually:
/// structural edits go through `clear()` + `create()` + re-insertion.
///
/// Ownership: the caller creates and owns the SpatialIndex.
/// It is passed by reference to the culler and the viewport.

use crate::camera::Frustum;
use crate::scene::{RenderableKey, RenderableObject};
use super::bounds::AABB2D;

/// Trait for spatial indexing of static renderables.
pub trait SpatialIndex: Send + Sync {
    /// Allocate a fresh root covering `bounds`.
    ///
    /// No-op when the index already exists; call `clear()` first to rebuild.
    fn create(&mut self, bounds: AABB2D);

    /// Drop every node (the index becomes uncreated).
    fn clear(&mut self);

    /// Returns true between `create()` and `clear()`.
    fn is_created(&self) -> bool;

    /// Insert a static object. Non-static objects are ignored.
    fn insert(&mut self, key: RenderableKey, object: &dyn RenderableObject);

    /// All objects stored in nodes overlapping the frustum's ground
    /// projection, each key exactly once.
    ///
    /// Returns an empty list when the index is not created.
    fn collect_intersect(&self, frustum: &Frustum) -> Vec<RenderableKey>;
}
