/// Framebuffer trait - groups attachments into a bindable render target
///
/// Created once per attachment set. Must be recreated only when
/// attachments change (e.g., viewport resize, format toggle).

use std::sync::Arc;
use super::texture::Texture;

/// Framebuffer: groups a color and an optional depth/stencil attachment
///
/// Created via `GraphicsDevice::create_framebuffer()`.
pub trait Framebuffer: Send + Sync {
    /// Get the width in pixels
    fn width(&self) -> u32;

    /// Get the height in pixels
    fn height(&self) -> u32;

    /// Debug label (frame target name)
    fn label(&self) -> &str;
}

/// Descriptor for creating a framebuffer
pub struct FramebufferDesc<'a> {
    /// Debug label
    pub label: &'a str,
    /// Color attachment
    pub color_attachment: Arc<dyn Texture>,
    /// Optional depth/stencil attachment
    pub depth_stencil_attachment: Option<Arc<dyn Texture>>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}
