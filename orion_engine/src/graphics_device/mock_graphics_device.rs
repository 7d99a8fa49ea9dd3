/// Mock graphics device for unit tests (no GPU required)
///
/// Counts every allocation and records every command as a string so tests
/// can assert allocation counts and pass order.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::error::{Error, Result};
use crate::engine_error;
use super::{
    GraphicsDevice, Texture, Framebuffer, CommandList,
    TextureDesc, TextureInfo, FramebufferDesc,
    FramebufferBinding, ViewportRect, ClearValue, BlendState, UniformBlock,
    MeshHandle, MaterialHandle, ProgramHandle,
};

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    live: Arc<AtomicUsize>,
}

impl MockTexture {
    fn new(desc: TextureDesc, live: Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self {
            info: TextureInfo {
                label: desc.label,
                width: desc.width,
                height: desc.height,
                format: desc.format,
                usage: desc.usage,
                samples: desc.samples,
            },
            live,
        }
    }
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

impl Drop for MockTexture {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock Framebuffer
// ============================================================================

pub struct MockFramebuffer {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub color: Arc<dyn Texture>,
    pub depth_stencil: Option<Arc<dyn Texture>>,
}

impl Framebuffer for MockFramebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn label(&self) -> &str {
        &self.label
    }
}

// ============================================================================
// Mock Graphics Device
// ============================================================================

/// Mock device that tracks created resources without GPU
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    /// Labels of every texture ever created, in creation order
    pub created_textures: Vec<String>,
    /// Labels of every framebuffer ever created, in creation order
    pub created_framebuffers: Vec<String>,
    /// Textures currently alive (decremented on drop)
    pub live_textures: Arc<AtomicUsize>,
    /// Textures that can still be created before `Error::OutOfMemory`
    /// (`None` = unlimited)
    pub texture_budget: Option<usize>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture_count(&self) -> usize {
        self.created_textures.len()
    }

    pub fn framebuffer_count(&self) -> usize {
        self.created_framebuffers.len()
    }

    pub fn live_texture_count(&self) -> usize {
        self.live_textures.load(Ordering::SeqCst)
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>> {
        if let Some(budget) = self.texture_budget.as_mut() {
            if *budget == 0 {
                engine_error!("orion::MockGraphicsDevice", "Out of memory allocating '{}'", desc.label);
                return Err(Error::OutOfMemory);
            }
            *budget -= 1;
        }
        self.created_textures.push(desc.label.clone());
        Ok(Arc::new(MockTexture::new(desc, Arc::clone(&self.live_textures))))
    }

    fn create_framebuffer(&mut self, desc: FramebufferDesc) -> Result<Arc<dyn Framebuffer>> {
        self.created_framebuffers.push(desc.label.to_string());
        Ok(Arc::new(MockFramebuffer {
            label: desc.label.to_string(),
            width: desc.width,
            height: desc.height,
            color: desc.color_attachment,
            depth_stencil: desc.depth_stencil_attachment,
        }))
    }
}

// ============================================================================
// Mock Command List
// ============================================================================

#[derive(Debug, Default)]
pub struct MockCommandList {
    pub commands: Vec<String>,
    /// Raw bytes of every uniform upload, in order
    pub uniform_writes: Vec<(UniformBlock, Vec<u8>)>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the first command equal to `command`
    pub fn position(&self, command: &str) -> Option<usize> {
        self.commands.iter().position(|c| c == command)
    }

    /// Commands starting with `prefix`, in order
    pub fn matching(&self, prefix: &str) -> Vec<&str> {
        self.commands
            .iter()
            .filter(|c| c.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }
}

fn target_label(framebuffer: Option<&Arc<dyn Framebuffer>>) -> String {
    framebuffer.map_or_else(|| "display".to_string(), |fb| fb.label().to_string())
}

impl CommandList for MockCommandList {
    fn bind_framebuffer(
        &mut self,
        framebuffer: Option<&Arc<dyn Framebuffer>>,
        binding: FramebufferBinding,
    ) -> Result<()> {
        let label = target_label(framebuffer);
        self.commands.push(match binding {
            FramebufferBinding::Both => format!("bind_framebuffer({})", label),
            other => format!("bind_framebuffer({}, {:?})", label, other),
        });
        Ok(())
    }

    fn set_viewport(&mut self, viewport: ViewportRect) -> Result<()> {
        self.commands.push(format!("set_viewport({}x{})", viewport.width, viewport.height));
        Ok(())
    }

    fn clear(&mut self, _values: &[ClearValue]) -> Result<()> {
        self.commands.push("clear".to_string());
        Ok(())
    }

    fn set_blend_state(&mut self, blend: Option<BlendState>) -> Result<()> {
        self.commands.push(match blend {
            Some(state) => format!(
                "set_blend_state({:?}, {:?}, {:?})",
                state.src_factor, state.dst_factor, state.op
            ),
            None => "set_blend_state(none)".to_string(),
        });
        Ok(())
    }

    fn bind_program(&mut self, program: ProgramHandle) -> Result<()> {
        self.commands.push(format!("bind_program({})", program.0));
        Ok(())
    }

    fn write_uniforms(&mut self, block: UniformBlock, data: &[u8]) -> Result<()> {
        self.commands.push(format!("write_uniforms({:?})", block));
        self.uniform_writes.push((block, data.to_vec()));
        Ok(())
    }

    fn push_constants(&mut self, offset: u32, data: &[u8]) -> Result<()> {
        self.commands.push(format!("push_constants({}, {})", offset, data.len()));
        Ok(())
    }

    fn bind_texture(&mut self, slot: u32, texture: &Arc<dyn Texture>) -> Result<()> {
        self.commands.push(format!("bind_texture({}, {})", slot, texture.info().label));
        Ok(())
    }

    fn bind_material(&mut self, material: MaterialHandle) -> Result<()> {
        self.commands.push(format!("bind_material({})", material.0));
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: MeshHandle) -> Result<()> {
        self.commands.push(format!("draw_mesh({})", mesh.0));
        Ok(())
    }

    fn draw(&mut self, vertex_count: u32, first_vertex: u32) -> Result<()> {
        self.commands.push(format!("draw({}, {})", vertex_count, first_vertex));
        Ok(())
    }

    fn blit_framebuffer(
        &mut self,
        src: &Arc<dyn Framebuffer>,
        dst: Option<&Arc<dyn Framebuffer>>,
        width: u32,
        height: u32,
    ) -> Result<()> {
        self.commands.push(format!(
            "blit({} -> {}, {}x{})",
            src.label(),
            target_label(dst),
            width,
            height
        ));
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
