/// Renderable capabilities for the scene system.
///
/// Instead of a component class tree, the culling and rendering code only
/// sees two capabilities: `Transformable` (where is it) and
/// `RenderableObject` (what bounds, which flags, is it drawable).
/// `MeshRenderer` is the concrete capability holder stored by `Scene`.

use bitflags::bitflags;
use glam::{Mat4, Vec3};
use slotmap::new_key_type;
use crate::graphics_device::{MaterialHandle, MeshHandle};
use crate::spatial::AABB;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a renderable within a Scene.
    ///
    /// Keys remain valid even after other renderables are removed.
    /// A key becomes invalid only when its own renderable is removed.
    pub struct RenderableKey;
}

// ===== FLAGS =====

bitflags! {
    /// Per-renderable state bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderableFlags: u32 {
        /// Never moves after registration; indexed by the quadtree
        const STATIC        = 1 << 0;
        /// Participates in rendering
        const ENABLED       = 1 << 1;
        /// Drawn into shadow cascades
        const SHADOW_CASTER = 1 << 2;
        /// Material needs alpha blending (sorted back-to-front)
        const TRANSPARENT   = 1 << 3;
    }
}

impl Default for RenderableFlags {
    fn default() -> Self {
        RenderableFlags::ENABLED | RenderableFlags::SHADOW_CASTER
    }
}

// ===== CAPABILITIES =====

/// Anything with a world transform.
pub trait Transformable {
    /// Local-to-world matrix
    fn world_matrix(&self) -> &Mat4;

    /// World-space position (translation column of the world matrix)
    fn world_translation(&self) -> Vec3 {
        self.world_matrix().col(3).truncate()
    }
}

/// Anything the culler and the viewport can draw.
pub trait RenderableObject: Transformable {
    /// World-space bounding box
    fn world_aabb(&self) -> AABB;

    fn flags(&self) -> RenderableFlags;

    /// Mesh to draw, `None` while the asset is still loading
    fn mesh(&self) -> Option<MeshHandle>;

    /// Material to bind, `None` while the asset is still loading
    fn material(&self) -> Option<MaterialHandle>;

    fn is_static(&self) -> bool {
        self.flags().contains(RenderableFlags::STATIC)
    }

    fn is_enabled(&self) -> bool {
        self.flags().contains(RenderableFlags::ENABLED)
    }

    fn is_shadow_caster(&self) -> bool {
        self.flags().contains(RenderableFlags::SHADOW_CASTER)
    }

    fn is_transparent(&self) -> bool {
        self.flags().contains(RenderableFlags::TRANSPARENT)
    }

    /// Both mesh and material are available
    fn is_ready(&self) -> bool {
        self.mesh().is_some() && self.material().is_some()
    }
}

// ===== MESH RENDERER =====

/// A mesh placed in the world with a material.
#[derive(Debug, Clone)]
pub struct MeshRenderer {
    /// Axis-Aligned Bounding Box in local space
    local_aabb: AABB,
    /// World transform matrix
    world_matrix: Mat4,
    /// Cached `local_aabb` transformed by `world_matrix`
    world_aabb: AABB,
    flags: RenderableFlags,
    mesh: Option<MeshHandle>,
    material: Option<MaterialHandle>,
}

impl MeshRenderer {
    pub fn new(local_aabb: AABB, world_matrix: Mat4, flags: RenderableFlags) -> Self {
        Self {
            local_aabb,
            world_matrix,
            world_aabb: local_aabb.transformed(&world_matrix),
            flags,
            mesh: None,
            material: None,
        }
    }

    /// Builder-style: attach mesh and material handles
    pub fn with_assets(mut self, mesh: MeshHandle, material: MaterialHandle) -> Self {
        self.mesh = Some(mesh);
        self.material = Some(material);
        self
    }

    pub fn local_aabb(&self) -> &AABB {
        &self.local_aabb
    }

    pub fn set_world_matrix(&mut self, world_matrix: Mat4) {
        self.world_matrix = world_matrix;
        self.world_aabb = self.local_aabb.transformed(&world_matrix);
    }

    pub fn set_flags(&mut self, flags: RenderableFlags) {
        self.flags = flags;
    }

    /// Set or clear a single flag
    pub fn set_flag(&mut self, flag: RenderableFlags, value: bool) {
        self.flags.set(flag, value);
    }

    pub fn set_mesh(&mut self, mesh: Option<MeshHandle>) {
        self.mesh = mesh;
    }

    pub fn set_material(&mut self, material: Option<MaterialHandle>) {
        self.material = material;
    }
}

impl Transformable for MeshRenderer {
    fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }
}

impl RenderableObject for MeshRenderer {
    fn world_aabb(&self) -> AABB {
        self.world_aabb
    }

    fn flags(&self) -> RenderableFlags {
        self.flags
    }

    fn mesh(&self) -> Option<MeshHandle> {
        self.mesh
    }

    fn material(&self) -> Option<MaterialHandle> {
        self.material
    }
}

#[cfg(test)]
#[path = "renderable_tests.rs"]
mod tests;
