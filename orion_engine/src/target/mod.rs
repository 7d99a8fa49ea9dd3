//! Frame target management module
//!
//! Offscreen framebuffers owned by a viewport (main color, post-process,
//! blit and the four shadow cascade depth targets) and their manager.

mod frame_target;
mod target_manager;

pub use frame_target::{FrameTarget, FrameTargetDesc, BoundTarget, MSAA_SAMPLES};
pub use target_manager::{TargetManager, FrameTargetId};
