/// Frame target: an offscreen framebuffer with owned attachments.
///
/// A frame target owns one color attachment and optionally one combined
/// depth/stencil attachment. Attachments exist only between
/// `generate_attachments()` and the next `clear_attachments()`; they are
/// reference counted GPU handles released when dropped.
///
/// Binding goes through `bind()`, which returns a `BoundTarget` guard: the
/// target stays bound while the guard lives and is unbound on every exit
/// path, including `?` early returns.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use crate::error::{Error, Result};
use crate::engine_error;
use crate::graphics_device::{
    GraphicsDevice, CommandList, Texture, Framebuffer,
    TextureDesc, TextureFormat, TextureUsage, FramebufferDesc, FramebufferBinding,
};

/// Sample count used when a target is multisampled.
pub const MSAA_SAMPLES: u32 = 4;

/// Format and behaviour flags of a frame target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTargetDesc {
    /// Color (and depth) attachments are multisampled
    pub multisampled: bool,
    /// Color attachment uses a 16-bit float format (HDR)
    pub floating_point: bool,
    /// Allocate a combined depth/stencil attachment
    pub depth_stencil: bool,
    /// Follow the owning viewport's size in `TargetManager::set_size`
    pub resize_with_viewport: bool,
}

impl FrameTargetDesc {
    fn color_format(&self) -> TextureFormat {
        if self.floating_point {
            TextureFormat::R16G16B16A16_SFLOAT
        } else {
            TextureFormat::R8G8B8A8_UNORM
        }
    }

    fn samples(&self) -> u32 {
        if self.multisampled { MSAA_SAMPLES } else { 1 }
    }
}

/// Allocated GPU resources of a frame target.
struct FrameAttachments {
    color: Arc<dyn Texture>,
    depth_stencil: Option<Arc<dyn Texture>>,
    framebuffer: Arc<dyn Framebuffer>,
}

/// Offscreen render destination.
pub struct FrameTarget {
    label: String,
    desc: FrameTargetDesc,
    width: u32,
    height: u32,
    attachments: Option<FrameAttachments>,
}

impl FrameTarget {
    /// Create a target with no attachments.
    pub fn new(label: impl Into<String>, desc: FrameTargetDesc) -> Self {
        Self {
            label: label.into(),
            desc,
            width: 0,
            height: 0,
            attachments: None,
        }
    }

    // ===== GETTERS =====

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn desc(&self) -> &FrameTargetDesc {
        &self.desc
    }

    /// Size of the current attachments (0x0 before the first allocation).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns true while attachments are allocated.
    pub fn is_ready(&self) -> bool {
        self.attachments.is_some()
    }

    pub fn color_attachment(&self) -> Option<&Arc<dyn Texture>> {
        self.attachments.as_ref().map(|a| &a.color)
    }

    pub fn depth_stencil_attachment(&self) -> Option<&Arc<dyn Texture>> {
        self.attachments.as_ref().and_then(|a| a.depth_stencil.as_ref())
    }

    pub fn framebuffer(&self) -> Option<&Arc<dyn Framebuffer>> {
        self.attachments.as_ref().map(|a| &a.framebuffer)
    }

    // ===== ATTACHMENT LIFECYCLE =====

    /// Allocate attachments of exactly `width` x `height`.
    ///
    /// Previously held attachments are released first. Zero sizes are
    /// rejected with `Error::InvalidSize`.
    pub fn generate_attachments(
        &mut self,
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
    ) -> Result<()> {
        if width == 0 || height == 0 {
            engine_error!("orion::FrameTarget",
                "Cannot allocate '{}' with size {}x{}", self.label, width, height);
            return Err(Error::InvalidSize { width, height });
        }

        self.clear_attachments();

        let samples = self.desc.samples();
        let color = device.create_texture(TextureDesc {
            label: format!("{}.color", self.label),
            width,
            height,
            format: self.desc.color_format(),
            usage: TextureUsage::SampledAndRenderTarget,
            samples,
        })?;

        let depth_stencil = if self.desc.depth_stencil {
            Some(device.create_texture(TextureDesc {
                label: format!("{}.depth", self.label),
                width,
                height,
                format: TextureFormat::D24_UNORM_S8_UINT,
                usage: TextureUsage::DepthStencil,
                samples,
            })?)
        } else {
            None
        };

        let framebuffer = device.create_framebuffer(FramebufferDesc {
            label: &self.label,
            color_attachment: Arc::clone(&color),
            depth_stencil_attachment: depth_stencil.clone(),
            width,
            height,
        })?;

        self.width = width;
        self.height = height;
        self.attachments = Some(FrameAttachments { color, depth_stencil, framebuffer });
        Ok(())
    }

    /// Release attachments. No-op when none are held.
    pub fn clear_attachments(&mut self) {
        self.attachments = None;
    }

    /// Resize. No-op (returns false) when already allocated at this size.
    ///
    /// A rejected size keeps the current attachments.
    pub fn set_size(
        &mut self,
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
    ) -> Result<bool> {
        if self.is_ready() && self.width == width && self.height == height {
            return Ok(false);
        }
        self.generate_attachments(device, width, height)?;
        Ok(true)
    }

    /// Reallocate at the current size after a format change.
    ///
    /// No-op for a target that was never allocated.
    pub fn reallocate(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        self.generate_attachments(device, self.width, self.height)
    }

    /// Change the sample count used by the next allocation.
    pub fn set_multisampled(&mut self, multisampled: bool) {
        self.desc.multisampled = multisampled;
    }

    /// Change the color format used by the next allocation.
    pub fn set_floating_point(&mut self, floating_point: bool) {
        self.desc.floating_point = floating_point;
    }

    // ===== BINDING =====

    /// Bind this target on `cmd` until the returned guard is dropped.
    ///
    /// # Errors
    ///
    /// `Error::TargetNotReady` when no attachments are allocated.
    pub fn bind<'c>(
        &self,
        cmd: &'c mut dyn CommandList,
        binding: FramebufferBinding,
    ) -> Result<BoundTarget<'c>> {
        let Some(framebuffer) = self.framebuffer() else {
            engine_error!("orion::FrameTarget", "Bind of unallocated target '{}'", self.label);
            return Err(Error::TargetNotReady(self.label.clone()));
        };
        cmd.bind_framebuffer(Some(framebuffer), binding)?;
        Ok(BoundTarget { cmd, binding, bound: true })
    }
}

impl std::fmt::Debug for FrameTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameTarget")
            .field("label", &self.label)
            .field("desc", &self.desc)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("ready", &self.is_ready())
            .finish()
    }
}

// ===== BOUND TARGET =====

/// Scoped binding of a frame target.
///
/// Derefs to the command list so draws can be issued through it. Dropping
/// the guard restores the default framebuffer on the same binding point.
pub struct BoundTarget<'c> {
    cmd: &'c mut dyn CommandList,
    binding: FramebufferBinding,
    bound: bool,
}

impl BoundTarget<'_> {
    /// Unbind now and report a failing unbind instead of logging it.
    pub fn unbind(mut self) -> Result<()> {
        self.bound = false;
        self.cmd.bind_framebuffer(None, self.binding)
    }
}

impl<'c> Deref for BoundTarget<'c> {
    type Target = dyn CommandList + 'c;

    fn deref(&self) -> &Self::Target {
        &*self.cmd
    }
}

impl<'c> DerefMut for BoundTarget<'c> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.cmd
    }
}

impl Drop for BoundTarget<'_> {
    fn drop(&mut self) {
        if !self.bound {
            return;
        }
        if let Err(err) = self.cmd.bind_framebuffer(None, self.binding) {
            engine_error!("orion::FrameTarget", "Unbind failed: {}", err);
        }
    }
}

#[cfg(test)]
#[path = "frame_target_tests.rs"]
mod tests;
