/// GraphicsDevice trait and opaque resource handles

use std::sync::Arc;
use crate::error::Result;
use super::texture::{Texture, TextureDesc};
use super::frame_buffer::{Framebuffer, FramebufferDesc};

// ===== HANDLES =====

/// Opaque handle to an uploaded mesh (owned by the asset collaborator)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Opaque handle to a material (owned by the asset collaborator)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u32);

/// Opaque handle to a linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

// ===== DEVICE =====

/// Factory for GPU resources used by frame targets.
///
/// Resources are reference counted: dropping the last `Arc` releases the
/// GPU object. Calls must originate from the render thread.
pub trait GraphicsDevice {
    /// Create a texture (color or depth/stencil attachment)
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a framebuffer grouping previously created attachments
    fn create_framebuffer(&mut self, desc: FramebufferDesc) -> Result<Arc<dyn Framebuffer>>;
}
