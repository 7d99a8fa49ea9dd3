/// Frame target manager.
///
/// Owns the frame targets of one viewport, keyed by role. Resizing the
/// manager only touches targets created with `resize_with_viewport`;
/// other targets (shadow cascades) are sized by their pass.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::GraphicsDevice;
use crate::light::CascadeKind;
use super::frame_target::{FrameTarget, FrameTargetDesc};

/// Role of a frame target within a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameTargetId {
    /// Scene color + depth
    Main,
    /// Output of the post-process shader
    PostProcess,
    /// Offscreen copy of the final image (texture display)
    Blit,
    /// Shadow cascade depth target
    Depth(CascadeKind),
}

impl FrameTargetId {
    /// Debug label, also used for attachment labels.
    pub fn label(&self) -> &'static str {
        match self {
            FrameTargetId::Main => "main",
            FrameTargetId::PostProcess => "postprocess",
            FrameTargetId::Blit => "blit",
            FrameTargetId::Depth(CascadeKind::Near) => "depth_near",
            FrameTargetId::Depth(CascadeKind::Mid) => "depth_mid",
            FrameTargetId::Depth(CascadeKind::Far) => "depth_far",
            FrameTargetId::Depth(CascadeKind::Full) => "depth_full",
        }
    }
}

/// Frame targets of one viewport.
#[derive(Debug, Default)]
pub struct TargetManager {
    targets: FxHashMap<FrameTargetId, FrameTarget>,
}

impl TargetManager {
    /// Create a new empty target manager
    pub fn new() -> Self {
        Self { targets: FxHashMap::default() }
    }

    /// Create a frame target (without attachments)
    ///
    /// # Errors
    ///
    /// Returns an error if a target with the same id already exists.
    pub fn create_target(&mut self, id: FrameTargetId, desc: FrameTargetDesc) -> Result<&mut FrameTarget> {
        if self.targets.contains_key(&id) {
            engine_bail!("orion::TargetManager", "FrameTarget '{}' already exists", id.label());
        }

        Ok(self.targets.entry(id).or_insert_with(|| FrameTarget::new(id.label(), desc)))
    }

    pub fn target(&self, id: FrameTargetId) -> Option<&FrameTarget> {
        self.targets.get(&id)
    }

    pub fn target_mut(&mut self, id: FrameTargetId) -> Option<&mut FrameTarget> {
        self.targets.get_mut(&id)
    }

    /// Remove a target, releasing its attachments.
    pub fn remove_target(&mut self, id: FrameTargetId) -> Option<FrameTarget> {
        self.targets.remove(&id)
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn target_ids(&self) -> Vec<FrameTargetId> {
        self.targets.keys().copied().collect()
    }

    /// Resize every `resize_with_viewport` target.
    ///
    /// Returns the number of targets that were reallocated.
    pub fn set_size(&mut self, device: &mut dyn GraphicsDevice, width: u32, height: u32) -> Result<usize> {
        let mut reallocated = 0;
        for target in self.targets.values_mut().filter(|t| t.desc().resize_with_viewport) {
            if target.set_size(device, width, height)? {
                reallocated += 1;
            }
        }
        Ok(reallocated)
    }

    /// Release the attachments of every target (targets stay registered).
    pub fn clear_attachments(&mut self) {
        for target in self.targets.values_mut() {
            target.clear_attachments();
        }
    }

    /// Remove all targets
    pub fn clear(&mut self) {
        self.targets.clear();
    }
}

#[cfg(test)]
#[path = "target_manager_tests.rs"]
mod tests;
