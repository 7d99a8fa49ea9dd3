/// Everything a viewport reads while rendering one frame.
///
/// The viewport owns no scene state: the scene, its spatial index, the
/// culler, the shader binder and the optional overlay renderers are lent
/// to it for the duration of `Viewport::render()`.

use glam::Mat4;
use crate::error::Result;
use crate::camera::Camera;
use crate::graphics_device::CommandList;
use crate::light::DirectionalLight;
use crate::scene::{Culler, Scene};
use crate::spatial::SpatialIndex;
use super::shader_binder::ShaderBinder;

// ===== COLLABORATORS =====

/// Full-screen effects applied in place on the main target.
pub trait EffectsRenderer {
    fn render(&mut self, cmd: &mut dyn CommandList, width: u32, height: u32) -> Result<()>;
}

/// UI overlay composited onto the main target.
pub trait UiRenderer {
    /// `scene_mode` is set for editor scene views.
    fn render(&mut self, cmd: &mut dyn CommandList, width: u32, height: u32, scene_mode: bool) -> Result<()>;
}

/// Engine debug visualization.
pub trait DebugRenderer {
    fn render(&mut self, cmd: &mut dyn CommandList) -> Result<()>;
}

/// Debug-draw and editor overlays.
pub trait DebugDraw {
    /// Queued debug shapes.
    fn render(&mut self, cmd: &mut dyn CommandList, width: u32, height: u32, view_projection: Mat4) -> Result<()>;

    fn render_grid(&mut self, cmd: &mut dyn CommandList) -> Result<()>;

    fn render_navmesh(&mut self, cmd: &mut dyn CommandList, camera: &Camera) -> Result<()>;

    fn render_billboards(&mut self, cmd: &mut dyn CommandList) -> Result<()>;

    /// Outline of the selected object.
    fn render_outline(&mut self, cmd: &mut dyn CommandList) -> Result<()>;
}

// ===== CONTEXT =====

/// Camera the shadow cascades are fitted to.
#[derive(Debug, Clone, Copy, Default)]
pub enum MainCamera<'a> {
    /// No main camera: the shadow stage is skipped
    #[default]
    Missing,
    /// The camera passed to `Viewport::render()` is the main camera
    Rendered,
    /// Another camera (editor view of a game scene)
    Other(&'a Camera),
}

/// Editor state read by the overlay passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorState {
    pub show_navmesh: bool,
    pub has_selection: bool,
}

/// Borrowed collaborators of one frame.
pub struct FrameContext<'a> {
    pub scene: &'a Scene,
    pub spatial_index: Option<&'a dyn SpatialIndex>,
    pub culler: &'a mut dyn Culler,
    pub shader_binder: &'a dyn ShaderBinder,
    pub main_camera: MainCamera<'a>,
    pub light: Option<&'a DirectionalLight>,
    pub effects: Option<&'a mut dyn EffectsRenderer>,
    pub ui: Option<&'a mut dyn UiRenderer>,
    pub debug: Option<&'a mut dyn DebugRenderer>,
    pub debug_draw: Option<&'a mut dyn DebugDraw>,
    pub editor: EditorState,
}

impl<'a> FrameContext<'a> {
    /// Context with no index, no light, no main camera and no overlays.
    pub fn new(scene: &'a Scene, culler: &'a mut dyn Culler, shader_binder: &'a dyn ShaderBinder) -> Self {
        Self {
            scene,
            spatial_index: None,
            culler,
            shader_binder,
            main_camera: MainCamera::Missing,
            light: None,
            effects: None,
            ui: None,
            debug: None,
            debug_draw: None,
            editor: EditorState::default(),
        }
    }

    pub fn with_spatial_index(mut self, spatial_index: &'a dyn SpatialIndex) -> Self {
        self.spatial_index = Some(spatial_index);
        self
    }

    pub fn with_main_camera(mut self, main_camera: MainCamera<'a>) -> Self {
        self.main_camera = main_camera;
        self
    }

    pub fn with_light(mut self, light: &'a DirectionalLight) -> Self {
        self.light = Some(light);
        self
    }

    pub fn with_effects(mut self, effects: &'a mut dyn EffectsRenderer) -> Self {
        self.effects = Some(effects);
        self
    }

    pub fn with_ui(mut self, ui: &'a mut dyn UiRenderer) -> Self {
        self.ui = Some(ui);
        self
    }

    pub fn with_debug(mut self, debug: &'a mut dyn DebugRenderer) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn with_debug_draw(mut self, debug_draw: &'a mut dyn DebugDraw) -> Self {
        self.debug_draw = Some(debug_draw);
        self
    }

    pub fn with_editor_state(mut self, editor: EditorState) -> Self {
        self.editor = editor;
        self
    }
}
