/// Graphics device module - the seam between the render pipeline and a GPU backend
///
/// The pipeline only talks to these traits. Backends (OpenGL, Vulkan, ...)
/// implement them outside this crate.

// Module declarations
pub mod graphics_device;
pub mod texture;
pub mod frame_buffer;
pub mod command_list;
pub mod uniforms;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use texture::*;
pub use frame_buffer::*;
pub use command_list::*;
pub use uniforms::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
