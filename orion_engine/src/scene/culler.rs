/// Frustum culling.
///
/// A Culler determines which renderables are visible from a view volume.
/// Static renderables come from the SpatialIndex (coarse ground-plane
/// query refined by the 3D frustum test); dynamic renderables are scanned
/// linearly. The union is deduplicated and filtered by enabled state and
/// render purpose.

use glam::Vec3;
use rustc_hash::FxHashSet;
use crate::camera::{Camera, Frustum, RenderView};
use crate::spatial::SpatialIndex;
use super::scene::Scene;
use super::renderable::{RenderableKey, RenderableObject};

/// What the culled set will be drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPurpose {
    /// Every enabled renderable
    #[default]
    All,
    /// Only renderables flagged as shadow casters
    ShadowCaster,
}

impl RenderPurpose {
    /// Returns true if `object` is drawn for this purpose.
    pub fn accepts(&self, object: &dyn RenderableObject) -> bool {
        match self {
            RenderPurpose::All => true,
            RenderPurpose::ShadowCaster => object.is_shadow_caster(),
        }
    }
}

/// Strategy for determining visible renderables from a view volume.
///
/// Called once per pass. The returned RenderView is ephemeral.
///
/// `&mut self` allows stateful implementations (e.g. caching)
/// to maintain state across frames.
pub trait Culler: Send + Sync {
    /// Cull the scene against `frustum`.
    ///
    /// `eye_position` is only carried into the RenderView (distance sorting).
    /// Without a spatial index, static renderables are scanned like dynamic ones.
    fn cull(
        &mut self,
        scene: &Scene,
        frustum: &Frustum,
        eye_position: Vec3,
        spatial_index: Option<&dyn SpatialIndex>,
        purpose: RenderPurpose,
    ) -> RenderView;

    /// Cull the scene against a camera's frustum.
    fn cull_camera(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        spatial_index: Option<&dyn SpatialIndex>,
        purpose: RenderPurpose,
    ) -> RenderView {
        self.cull(scene, camera.frustum(), camera.world_position(), spatial_index, purpose)
    }
}

/// Frustum culler: index query for static renderables, linear scan for
/// the rest, six-plane AABB test for both.
#[derive(Debug, Default)]
pub struct FrustumCuller;

impl FrustumCuller {
    pub fn new() -> Self {
        Self
    }
}

impl Culler for FrustumCuller {
    fn cull(
        &mut self,
        scene: &Scene,
        frustum: &Frustum,
        eye_position: Vec3,
        spatial_index: Option<&dyn SpatialIndex>,
        purpose: RenderPurpose,
    ) -> RenderView {
        let index = spatial_index.filter(|index| index.is_created());

        // Static candidates from the index, refined in 3D
        let mut candidates: Vec<RenderableKey> = match index {
            Some(index) => index
                .collect_intersect(frustum)
                .into_iter()
                .filter(|key| {
                    scene.renderable(*key).is_some_and(|r| {
                        r.is_static() && frustum.intersects_aabb(&r.world_aabb())
                    })
                })
                .collect(),
            None => Vec::new(),
        };

        // Dynamic renderables (and static ones when there is no index)
        candidates.extend(
            scene
                .renderables()
                .filter(|(_, r)| index.is_none() || !r.is_static())
                .filter(|(_, r)| frustum.intersects_aabb(&r.world_aabb()))
                .map(|(key, _)| key),
        );

        let mut seen = FxHashSet::default();
        let visible: Vec<RenderableKey> = candidates
            .into_iter()
            .filter(|key| seen.insert(*key))
            .filter(|key| {
                scene
                    .renderable(*key)
                    .is_some_and(|r| r.is_enabled() && purpose.accepts(r))
            })
            .collect();

        RenderView::new(*frustum, eye_position, visible)
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
