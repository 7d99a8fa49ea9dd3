//! Spatial partitioning module
//!
//! Bounding volumes and the static-object spatial index queried by the
//! culler.

mod bounds;
mod spatial_index;
mod quadtree_spatial_index;

pub use bounds::{AABB, AABB2D};
pub use spatial_index::SpatialIndex;
pub use quadtree_spatial_index::{QuadtreeConfig, QuadtreeSpatialIndex};
