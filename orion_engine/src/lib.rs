/*!
# Orion Engine

Visibility and frame pipeline of the Orion 3D engine.

This crate provides the platform-agnostic core that turns a scene into a
rendered frame: a quadtree index over static geometry, frustum culling,
shadow cascade fitting, offscreen frame targets and the per-camera
viewport pipeline. GPU backends plug in through the `GraphicsDevice` and
`CommandList` traits.

## Architecture

- **SpatialIndex**: quadtree over the X/Z footprints of static renderables
- **Culler**: index query + linear scan of dynamic renderables, six-plane AABB test
- **LightCascades**: near/mid/far/full orthographic light frustums
- **TargetManager**: frame targets with RAII attachments and scoped binding
- **Viewport**: shadow, mesh, overlay, post-process and blit passes

Everything a frame needs is passed explicitly through a `FrameContext`.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod spatial;
pub mod scene;
pub mod light;
pub mod graphics_device;
pub mod target;
pub mod viewport;

// Main orion namespace module
pub mod orion {
    // Error types
    pub use crate::error::{Error, Result};

    // Logger entry points
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Graphics device seam (textures, framebuffers, command lists, uniforms)
    pub mod render {
        pub use crate::graphics_device::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod spatial {
        pub use crate::spatial::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod light {
        pub use crate::light::*;
    }

    pub mod target {
        pub use crate::target::*;
    }

    pub mod viewport {
        pub use crate::viewport::*;
    }
}

// Re-export math library at crate root
pub use glam;
