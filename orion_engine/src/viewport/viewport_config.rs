/// Viewport configuration and per-frame statistics.

use bitflags::bitflags;
use crate::graphics_device::CASCADE_COUNT;
use crate::light::{CascadeBands, CascadeKind};

bitflags! {
    /// Construction options of a viewport
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ViewportOptions: u32 {
        /// Editor scene view: enables debug and editor overlay passes
        const SCENE_MODE       = 1 << 0;
        /// Route the final image to the offscreen blit target instead of the display
        const BLIT_FRAMEBUFFER = 1 << 1;
    }
}

impl Default for ViewportOptions {
    fn default() -> Self {
        ViewportOptions::empty()
    }
}

bitflags! {
    /// Optional stages of the frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PassFlags: u32 {
        /// Shadow cascade depth passes
        const SHADOWS    = 1 << 0;
        /// Full-screen effects on the main target
        const EFFECTS    = 1 << 1;
        /// UI overlay
        const UI         = 1 << 2;
        /// Engine debug visualization (scene mode only)
        const DEBUG      = 1 << 3;
        /// Debug-draw overlay
        const DEBUG_DRAW = 1 << 4;
    }
}

impl Default for PassFlags {
    fn default() -> Self {
        PassFlags::SHADOWS | PassFlags::UI | PassFlags::DEBUG_DRAW
    }
}

/// Which texture is exposed as the last displayed texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportOutput {
    /// Final color image (blit target)
    #[default]
    Color,
    DepthNear,
    DepthMid,
    DepthFar,
    DepthFull,
}

impl ViewportOutput {
    /// Cascade whose depth target is shown, `None` for the color image.
    pub fn cascade(&self) -> Option<CascadeKind> {
        match self {
            ViewportOutput::Color => None,
            ViewportOutput::DepthNear => Some(CascadeKind::Near),
            ViewportOutput::DepthMid => Some(CascadeKind::Mid),
            ViewportOutput::DepthFar => Some(CascadeKind::Far),
            ViewportOutput::DepthFull => Some(CascadeKind::Full),
        }
    }
}

/// Viewport configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportConfig {
    pub options: ViewportOptions,
    pub output: ViewportOutput,
    pub passes: PassFlags,
    /// Multisampled main target
    pub antialiasing: bool,
    /// Floating-point main target
    pub hdr: bool,
    pub cascade_bands: CascadeBands,
}

impl ViewportConfig {
    /// Editor scene view rendering into an offscreen texture.
    pub fn scene_view() -> Self {
        Self {
            options: ViewportOptions::SCENE_MODE | ViewportOptions::BLIT_FRAMEBUFFER,
            ..Self::default()
        }
    }

    pub fn is_option_set(&self, option: ViewportOptions) -> bool {
        self.options.contains(option)
    }
}

/// Counters of the last rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Objects visible from the rendering camera
    pub culled: usize,
    pub opaque_draws: usize,
    pub transparent_draws: usize,
    /// Caster draws per cascade, in cascade storage order
    pub shadow_draws: [usize; CASCADE_COUNT],
    /// Draws skipped because the object was not ready
    pub skipped_draws: usize,
}

impl FrameStats {
    pub fn total_draws(&self) -> usize {
        self.opaque_draws + self.transparent_draws + self.shadow_draws.iter().sum::<usize>()
    }
}
