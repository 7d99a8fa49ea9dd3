/// QuadtreeSpatialIndex: dynamic quadtree over ground-plane footprints.
///
/// Nodes live in a flat arena (`nodes`), which doubles as the registry used
/// by queries: a query scans the arena in creation order instead of
/// recursing. Children are arena indices.
///
/// Insertion is footprint based: an object is stored in every leaf its X/Z
/// rectangle touches. A full leaf below `max_depth` splits into four empty
/// children (existing objects stay where they are) and the insertion is
/// restarted from the root. Leaves at `max_depth` grow without bound.

use rustc_hash::FxHashSet;
use crate::camera::Frustum;
use crate::scene::{RenderableKey, RenderableObject};
use crate::{engine_debug, engine_error, engine_warn};
use super::bounds::AABB2D;
use super::spatial_index::SpatialIndex;

/// Index of the root node in the flat node array.
const ROOT: usize = 0;

/// Quadtree tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadtreeConfig {
    /// Objects a leaf holds before it splits
    pub bucket_size: usize,
    /// Depth at which leaves stop splitting (root = 0)
    pub max_depth: u32,
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self { bucket_size: 8, max_depth: 4 }
    }
}

/// A single node in the quadtree.
#[derive(Debug)]
struct QuadtreeNode {
    rect: AABB2D,
    depth: u32,
    /// Objects deposited while this node was a leaf
    objects: Vec<RenderableKey>,
    /// Arena indices of the four quadrants (see `AABB2D::quadrant`)
    children: Option<[usize; 4]>,
}

impl QuadtreeNode {
    fn new(rect: AABB2D, depth: u32) -> Self {
        Self { rect, depth, objects: Vec::new(), children: None }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Quadtree spatial index for static renderables.
#[derive(Debug, Default)]
pub struct QuadtreeSpatialIndex {
    config: QuadtreeConfig,
    /// Flat arena of all nodes, root first, in creation order
    nodes: Vec<QuadtreeNode>,
}

impl QuadtreeSpatialIndex {
    /// Create an empty (uncreated) index with the given tuning.
    pub fn new(config: QuadtreeConfig) -> Self {
        Self { config, nodes: Vec::new() }
    }

    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    /// Root rectangle, `None` when not created.
    pub fn bounds(&self) -> Option<AABB2D> {
        self.nodes.first().map(|root| root.rect)
    }

    /// Total number of nodes (internal + leaves).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Deepest level reached so far.
    pub fn depth(&self) -> u32 {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Number of stored references (an object spanning several leaves
    /// counts once per leaf).
    pub fn reference_count(&self) -> usize {
        self.nodes.iter().map(|node| node.objects.len()).sum()
    }

    /// All objects stored in nodes overlapping `rect`, deduplicated,
    /// in first-seen order.
    pub fn collect_in_rect(&self, rect: &AABB2D) -> Vec<RenderableKey> {
        let mut seen = FxHashSet::default();
        let mut results = Vec::new();

        for node in &self.nodes {
            if !node.rect.intersects(rect) {
                continue;
            }
            for key in &node.objects {
                if seen.insert(*key) {
                    results.push(*key);
                }
            }
        }

        results
    }

    /// Leaves whose rectangle touches `footprint`, in depth-first order.
    fn intersecting_leaves(&self, footprint: &AABB2D) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![ROOT];

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if !node.rect.intersects(footprint) {
                continue;
            }
            match node.children {
                None => leaves.push(index),
                // Reversed so quadrant 0 is visited first
                Some(children) => stack.extend(children.iter().rev()),
            }
        }

        leaves
    }

    /// Turn leaf `index` into an internal node with four empty children.
    fn split(&mut self, index: usize) {
        let rect = self.nodes[index].rect;
        let depth = self.nodes[index].depth + 1;
        let first = self.nodes.len();

        for quadrant in 0..4u8 {
            self.nodes.push(QuadtreeNode::new(rect.quadrant(quadrant), depth));
        }
        self.nodes[index].children = Some([first, first + 1, first + 2, first + 3]);
    }
}

impl SpatialIndex for QuadtreeSpatialIndex {
    fn create(&mut self, bounds: AABB2D) {
        if !self.nodes.is_empty() {
            engine_warn!("orion::Quadtree", "create() ignored: index already exists, call clear() first");
            return;
        }
        self.nodes.push(QuadtreeNode::new(bounds, 0));
        engine_debug!(
            "orion::Quadtree",
            "Created quadtree [{:?} .. {:?}] (bucket {}, max depth {})",
            bounds.min, bounds.max, self.config.bucket_size, self.config.max_depth
        );
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }

    fn is_created(&self) -> bool {
        !self.nodes.is_empty()
    }

    fn insert(&mut self, key: RenderableKey, object: &dyn RenderableObject) {
        if !object.is_static() {
            return;
        }

        let footprint = object.world_aabb().footprint();

        let Some(root) = self.nodes.first() else {
            debug_assert!(false, "insert into an uncreated quadtree");
            engine_error!("orion::Quadtree", "Insert into an uncreated quadtree dropped");
            return;
        };
        if !root.rect.intersects(&footprint) {
            debug_assert!(false, "object footprint {:?} outside quadtree bounds {:?}", footprint, root.rect);
            engine_error!(
                "orion::Quadtree",
                "Object footprint [{:?} .. {:?}] outside quadtree bounds, insert dropped",
                footprint.min, footprint.max
            );
            return;
        }

        loop {
            let mut reinsert = false;

            for leaf in self.intersecting_leaves(&footprint) {
                let node = &mut self.nodes[leaf];
                if node.objects.contains(&key) {
                    continue;
                }

                if node.depth >= self.config.max_depth
                    || node.objects.len() < self.config.bucket_size
                {
                    node.objects.push(key);
                } else {
                    // Leaf set changed: restart from the root
                    self.split(leaf);
                    reinsert = true;
                    break;
                }
            }

            if !reinsert {
                break;
            }
        }
    }

    fn collect_intersect(&self, frustum: &Frustum) -> Vec<RenderableKey> {
        if self.nodes.is_empty() {
            return Vec::new();
        }
        self.collect_in_rect(&frustum.ground_rect())
    }
}

#[cfg(test)]
#[path = "quadtree_spatial_index_tests.rs"]
mod tests;
