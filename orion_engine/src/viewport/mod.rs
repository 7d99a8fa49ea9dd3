//! Viewport module - the per-camera render pipeline
//!
//! A `Viewport` owns the frame targets of one view (main, post-process,
//! blit and the four shadow cascade depth targets) and renders a frame from
//! a `FrameContext` that lends it the scene, the culler, the shader binder
//! and the optional overlay renderers.

mod viewport_config;
mod shader_binder;
mod frame_context;
mod viewport;

pub use viewport_config::{ViewportOptions, ViewportOutput, PassFlags, ViewportConfig, FrameStats};
pub use shader_binder::{
    ShaderBinder, ForwardShaderBinder, ProgramVariant, ShaderVariation,
    MODEL_MATRIX_OFFSET, LIGHT_POSITION_OFFSET,
};
pub use frame_context::{
    FrameContext, MainCamera, EditorState,
    EffectsRenderer, UiRenderer, DebugRenderer, DebugDraw,
};
pub use viewport::{Viewport, POST_PROCESS_PROGRAM, SCREEN_TEXTURE_SLOT, SHADOW_MAP_SLOTS};
