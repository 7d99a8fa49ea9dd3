/// CommandList trait - for recording rendering commands

use std::sync::Arc;
use crate::error::Result;
use super::frame_buffer::Framebuffer;
use super::graphics_device::{MaterialHandle, MeshHandle, ProgramHandle};
use super::texture::Texture;

/// Command list for recording rendering commands
///
/// Commands are issued in order on the render thread. Implementations may
/// execute them immediately (GL-style) or record them for later submission.
pub trait CommandList: Send + Sync {
    /// Bind a framebuffer as the active render target
    ///
    /// # Arguments
    ///
    /// * `framebuffer` - Framebuffer to bind, `None` for the default display surface
    /// * `binding` - Which binding point(s) to update
    fn bind_framebuffer(
        &mut self,
        framebuffer: Option<&Arc<dyn Framebuffer>>,
        binding: FramebufferBinding,
    ) -> Result<()>;

    /// Set the viewport
    fn set_viewport(&mut self, viewport: ViewportRect) -> Result<()>;

    /// Clear the attachments of the bound framebuffer
    fn clear(&mut self, values: &[ClearValue]) -> Result<()>;

    /// Set the blend state (`None` disables blending)
    fn set_blend_state(&mut self, blend: Option<BlendState>) -> Result<()>;

    /// Make a shader program current
    fn bind_program(&mut self, program: ProgramHandle) -> Result<()>;

    /// Upload a shared uniform block (camera, light frustums)
    ///
    /// # Arguments
    ///
    /// * `block` - Target block
    /// * `data` - Raw bytes (`bytemuck::bytes_of` of the block struct)
    fn write_uniforms(&mut self, block: UniformBlock, data: &[u8]) -> Result<()>;

    /// Push per-draw constants to the current program
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset in bytes into the push constant range
    /// * `data` - Data to push
    fn push_constants(&mut self, offset: u32, data: &[u8]) -> Result<()>;

    /// Bind a texture to a sampler slot of the current program
    fn bind_texture(&mut self, slot: u32, texture: &Arc<dyn Texture>) -> Result<()>;

    /// Bind a material's parameters and textures
    fn bind_material(&mut self, material: MaterialHandle) -> Result<()>;

    /// Draw a mesh with the current program and bindings
    fn draw_mesh(&mut self, mesh: MeshHandle) -> Result<()>;

    /// Draw vertices without a vertex buffer (fullscreen triangles)
    ///
    /// # Arguments
    ///
    /// * `vertex_count` - Number of vertices to draw
    /// * `first_vertex` - Index of first vertex
    fn draw(&mut self, vertex_count: u32, first_vertex: u32) -> Result<()>;

    /// Copy the color attachment of `src` into `dst`
    ///
    /// # Arguments
    ///
    /// * `src` - Source framebuffer
    /// * `dst` - Destination framebuffer, `None` for the default display surface
    /// * `width` / `height` - Copied region, starting at the origin
    fn blit_framebuffer(
        &mut self,
        src: &Arc<dyn Framebuffer>,
        dst: Option<&Arc<dyn Framebuffer>>,
        width: u32,
        height: u32,
    ) -> Result<()>;
}

/// Framebuffer binding point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferBinding {
    /// Read and draw
    Both,
    Read,
    Draw,
}

/// Viewport dimensions and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl ViewportRect {
    /// Full-size viewport with the default 0..1 depth range
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// Clear value for an attachment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearValue {
    /// Color clear value (RGBA)
    Color([f32; 4]),
    /// Depth/stencil clear value
    DepthStencil { depth: f32, stencil: u32 },
}

/// Blend factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

/// Blend equation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendOp {
    Add,
    Subtract,
}

/// Color blend state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendState {
    pub src_factor: BlendFactor,
    pub dst_factor: BlendFactor,
    pub op: BlendOp,
}

impl BlendState {
    /// Standard alpha blending: `src * a + dst * (1 - a)`
    pub const ALPHA_BLENDING: BlendState = BlendState {
        src_factor: BlendFactor::SrcAlpha,
        dst_factor: BlendFactor::OneMinusSrcAlpha,
        op: BlendOp::Add,
    };
}

/// Shared uniform blocks written once per pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformBlock {
    /// `CameraUniforms`
    Camera,
    /// `LightUniforms`
    LightFrustums,
}
