/// Viewport - renders one camera into its own set of frame targets.
///
/// A frame runs a fixed sequence of passes:
///
/// 1. resize (pending `request_size`)
/// 2. cull against the rendering camera
/// 3. shadow cascade depth passes (full, near, mid, far) + light uniforms
/// 4. mesh pass: opaque, then transparent back-to-front with alpha blending
/// 5. effects, UI, debug, debug-draw and editor overlays on the main target
/// 6. post-process into the post-process target
/// 7. blit to the blit target or the display surface
/// 8. output selection (`last_displayed_texture`)
///
/// Every target binding goes through a `BoundTarget` guard, so a failing
/// pass never leaves a target bound.

use std::sync::Arc;
use glam::{Mat4, Vec3};
use crate::error::{Error, Result};
use crate::{engine_debug, engine_err, engine_error, engine_trace};
use crate::camera::Camera;
use crate::graphics_device::{
    GraphicsDevice, CommandList, Texture, Framebuffer, FramebufferBinding, ViewportRect, ClearValue,
    BlendState, UniformBlock, CameraUniforms, MeshHandle,
};
use crate::light::{CascadeKind, LightCascades, LightFrustum};
use crate::scene::{RenderPurpose, RenderableKey, RenderableObject, Transformable, Scene};
use crate::target::{FrameTarget, FrameTargetDesc, FrameTargetId, TargetManager};
use super::frame_context::{FrameContext, MainCamera};
use super::shader_binder::{ProgramVariant, ShaderBinder, ShaderVariation};
use super::viewport_config::{FrameStats, PassFlags, ViewportConfig, ViewportOptions, ViewportOutput};

/// Named program of the post-process pass
pub const POST_PROCESS_PROGRAM: &str = "PostProcessing";

/// Sampler slot of the main color attachment in the post-process pass
pub const SCREEN_TEXTURE_SLOT: u32 = 0;

/// Sampler slots of the cascade depth maps in the mesh pass
pub const SHADOW_MAP_SLOTS: [(CascadeKind, u32); 3] = [
    (CascadeKind::Near, 12),
    (CascadeKind::Mid, 13),
    (CascadeKind::Far, 14),
];

const SOURCE: &str = "orion::Viewport";

/// Render pipeline of one camera view.
pub struct Viewport {
    config: ViewportConfig,
    targets: TargetManager,
    width: u32,
    height: u32,
    /// Size applied at the start of the next frame
    requested_size: Option<(u32, u32)>,
    last_displayed_texture: Option<Arc<dyn Texture>>,
    stats: FrameStats,
}

impl Viewport {
    /// Create a viewport and its frame targets (unallocated until sized).
    pub fn new(config: ViewportConfig) -> Result<Self> {
        let mut targets = TargetManager::new();

        let viewport_sized = FrameTargetDesc { resize_with_viewport: true, ..FrameTargetDesc::default() };
        targets.create_target(FrameTargetId::Main, FrameTargetDesc {
            multisampled: config.antialiasing,
            floating_point: config.hdr,
            depth_stencil: true,
            resize_with_viewport: true,
        })?;
        targets.create_target(FrameTargetId::PostProcess, viewport_sized)?;
        targets.create_target(FrameTargetId::Blit, viewport_sized)?;

        // Depth targets are reallocated by their own pass
        for kind in CascadeKind::ALL {
            targets.create_target(FrameTargetId::Depth(kind), FrameTargetDesc {
                depth_stencil: true,
                ..FrameTargetDesc::default()
            })?;
        }

        Ok(Self {
            config,
            targets,
            width: 0,
            height: 0,
            requested_size: None,
            last_displayed_texture: None,
            stats: FrameStats::default(),
        })
    }

    // ===== GETTERS =====

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn targets(&self) -> &TargetManager {
        &self.targets
    }

    /// Counters of the last rendered frame
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Texture selected by the configured output after the last frame
    pub fn last_displayed_texture(&self) -> Option<&Arc<dyn Texture>> {
        self.last_displayed_texture.as_ref()
    }

    pub fn is_option_set(&self, option: ViewportOptions) -> bool {
        self.config.is_option_set(option)
    }

    // ===== CONFIGURATION =====

    /// Resize every viewport-sized target now.
    ///
    /// Returns false (no reallocation) when the size is unchanged.
    pub fn set_size(&mut self, device: &mut dyn GraphicsDevice, width: u32, height: u32) -> Result<bool> {
        if width == 0 || height == 0 {
            engine_error!(SOURCE, "Invalid viewport size {}x{}", width, height);
            return Err(Error::InvalidSize { width, height });
        }
        if self.width == width && self.height == height {
            return Ok(false);
        }

        self.targets.set_size(device, width, height)?;
        self.width = width;
        self.height = height;
        engine_debug!(SOURCE, "Resized to {}x{}", width, height);
        Ok(true)
    }

    /// Resize at the start of the next frame.
    pub fn request_size(&mut self, width: u32, height: u32) {
        self.requested_size = Some((width, height));
    }

    /// Toggle multisampling of the main target (reallocated immediately).
    pub fn set_antialiasing(&mut self, device: &mut dyn GraphicsDevice, antialiasing: bool) -> Result<()> {
        self.config.antialiasing = antialiasing;
        let main = self.target_mut(FrameTargetId::Main)?;
        main.set_multisampled(antialiasing);
        main.reallocate(device)
    }

    /// Toggle the floating-point main target (reallocated immediately).
    pub fn set_hdr(&mut self, device: &mut dyn GraphicsDevice, hdr: bool) -> Result<()> {
        self.config.hdr = hdr;
        let main = self.target_mut(FrameTargetId::Main)?;
        main.set_floating_point(hdr);
        main.reallocate(device)
    }

    pub fn set_output(&mut self, output: ViewportOutput) {
        self.config.output = output;
    }

    pub fn set_passes(&mut self, passes: PassFlags) {
        self.config.passes = passes;
    }

    // ===== FRAME =====

    /// Render one frame of `camera`.
    ///
    /// The camera's aspect ratio is set to the viewport's. Objects that are
    /// not ready to draw are skipped; errors from the device abort the frame.
    pub fn render(
        &mut self,
        device: &mut dyn GraphicsDevice,
        cmd: &mut dyn CommandList,
        camera: &mut Camera,
        ctx: &mut FrameContext<'_>,
    ) -> Result<()> {
        if let Some((width, height)) = self.requested_size.take() {
            if let Err(err) = self.set_size(device, width, height) {
                // Retried next frame unless the size itself was rejected
                if !matches!(err, Error::InvalidSize { .. }) {
                    self.requested_size = Some((width, height));
                }
                return Err(err);
            }
        }
        if self.width == 0 || self.height == 0 {
            engine_error!(SOURCE, "Render of an unsized viewport");
            return Err(Error::InvalidSize { width: self.width, height: self.height });
        }

        let mut stats = FrameStats::default();
        camera.set_aspect_ratio(self.width as f32 / self.height as f32);
        let camera: &Camera = camera;

        let culled = ctx.culler.cull_camera(ctx.scene, camera, ctx.spatial_index, RenderPurpose::All);
        stats.culled = culled.visible_count();

        self.shadow_passes(device, cmd, camera, ctx, &mut stats)?;

        write_camera_uniforms(cmd, *camera.projection_matrix(), *camera.view_matrix())?;
        cmd.set_viewport(ViewportRect::from_size(self.width, self.height))?;

        self.mesh_pass(cmd, camera, ctx, culled.visible(), &mut stats)?;
        self.effects_pass(cmd, ctx)?;
        self.ui_pass(cmd, ctx)?;
        self.debug_pass(cmd, ctx)?;
        self.debug_draw_pass(cmd, camera, ctx)?;
        self.editor_pass(cmd, camera, ctx)?;
        self.post_process_pass(cmd, ctx.shader_binder)?;
        self.blit_pass(cmd)?;
        self.select_last_displayed_texture();

        engine_trace!(SOURCE, "Frame: {:?}", stats);
        self.stats = stats;
        Ok(())
    }

    // ===== SHADOWS =====

    fn shadow_passes(
        &mut self,
        device: &mut dyn GraphicsDevice,
        cmd: &mut dyn CommandList,
        camera: &Camera,
        ctx: &mut FrameContext<'_>,
        stats: &mut FrameStats,
    ) -> Result<()> {
        if !self.config.passes.contains(PassFlags::SHADOWS) {
            return Ok(());
        }
        let main_camera = match ctx.main_camera {
            MainCamera::Missing => {
                engine_debug!(SOURCE, "No main camera, shadow passes skipped");
                return Ok(());
            }
            MainCamera::Rendered => camera,
            MainCamera::Other(main_camera) => main_camera,
        };
        let Some(light) = ctx.light else {
            engine_debug!(SOURCE, "No directional light, shadow passes skipped");
            return Ok(());
        };

        let cascades = LightCascades::build(main_camera, light, &self.config.cascade_bands);
        for kind in CascadeKind::RENDER_ORDER {
            let draws = self.depth_map_pass(device, cmd, cascades.get(kind), main_camera, ctx, stats)?;
            stats.shadow_draws[kind.index()] = draws;
        }

        cmd.write_uniforms(UniformBlock::LightFrustums, bytemuck::bytes_of(&cascades.uniforms()))
    }

    /// Render the casters of one cascade into its depth target.
    ///
    /// The depth target is reallocated at the viewport size every pass.
    fn depth_map_pass(
        &mut self,
        device: &mut dyn GraphicsDevice,
        cmd: &mut dyn CommandList,
        cascade: &LightFrustum,
        main_camera: &Camera,
        ctx: &mut FrameContext<'_>,
        stats: &mut FrameStats,
    ) -> Result<usize> {
        let (width, height) = (self.width, self.height);
        let target = self.target_mut(FrameTargetId::Depth(cascade.kind))?;
        target.generate_attachments(device, width, height)?;
        let target: &FrameTarget = target;

        let mut bound = target.bind(cmd, FramebufferBinding::Both)?;
        write_camera_uniforms(&mut *bound, cascade.projection, cascade.view)?;
        bound.clear(&clear_values(main_camera))?;
        bound.set_viewport(ViewportRect::from_size(width, height))?;

        let casters = ctx.culler.cull(
            ctx.scene,
            &cascade.frustum,
            cascade.eye_position(),
            ctx.spatial_index,
            RenderPurpose::ShadowCaster,
        );

        let mut draws = 0;
        for &key in casters.visible() {
            let Some(object) = ctx.scene.renderable(key) else {
                continue;
            };
            let Some(mesh) = drawable_mesh(key, object) else {
                stats.skipped_draws += 1;
                continue;
            };
            let program = ctx.shader_binder.bind_object_program(&mut *bound, object, ProgramVariant::DepthOnly)?;
            ctx.shader_binder.bind_mesh_uniforms(&mut *bound, program, object)?;
            bound.draw_mesh(mesh)?;
            draws += 1;
        }

        bound.unbind()?;
        Ok(draws)
    }

    // ===== MESHES =====

    fn mesh_pass(
        &self,
        cmd: &mut dyn CommandList,
        camera: &Camera,
        ctx: &FrameContext<'_>,
        visible: &[RenderableKey],
        stats: &mut FrameStats,
    ) -> Result<()> {
        let mut bound = self.target(FrameTargetId::Main)?.bind(cmd, FramebufferBinding::Both)?;
        bound.clear(&clear_values(camera))?;

        let (opaque, transparent) = split_by_transparency(ctx.scene, visible, camera.world_position());

        bound.set_blend_state(None)?;
        for (key, object) in opaque {
            if self.draw_object(&mut *bound, ctx.shader_binder, key, object)? {
                stats.opaque_draws += 1;
            } else {
                stats.skipped_draws += 1;
            }
        }

        bound.set_blend_state(Some(BlendState::ALPHA_BLENDING))?;
        for (key, object) in transparent {
            if self.draw_object(&mut *bound, ctx.shader_binder, key, object)? {
                stats.transparent_draws += 1;
            } else {
                stats.skipped_draws += 1;
            }
        }
        bound.set_blend_state(None)?;

        bound.unbind()
    }

    /// Returns false when the object was skipped.
    fn draw_object(
        &self,
        cmd: &mut dyn CommandList,
        binder: &dyn ShaderBinder,
        key: RenderableKey,
        object: &dyn RenderableObject,
    ) -> Result<bool> {
        let Some(mesh) = drawable_mesh(key, object) else {
            return Ok(false);
        };

        let program = binder.bind_object_program(cmd, object, ProgramVariant::Standard)?;
        binder.bind_mesh_uniforms(cmd, program, object)?;
        binder.bind_material_uniforms(cmd, program, object)?;
        self.bind_depth_maps(cmd)?;
        binder.bind_light_uniforms(cmd, program, object.world_translation())?;
        cmd.draw_mesh(mesh)?;
        Ok(true)
    }

    /// Depth programs write light-space depth into the color attachment.
    fn bind_depth_maps(&self, cmd: &mut dyn CommandList) -> Result<()> {
        for (kind, slot) in SHADOW_MAP_SLOTS {
            let depth_map = self
                .targets
                .target(FrameTargetId::Depth(kind))
                .and_then(|target| target.color_attachment());
            if let Some(texture) = depth_map {
                cmd.bind_texture(slot, texture)?;
            }
        }
        Ok(())
    }

    // ===== OVERLAYS =====

    fn effects_pass(&self, cmd: &mut dyn CommandList, ctx: &mut FrameContext<'_>) -> Result<()> {
        if !self.config.passes.contains(PassFlags::EFFECTS) {
            return Ok(());
        }
        let Some(effects) = ctx.effects.as_deref_mut() else {
            return Ok(());
        };

        let mut bound = self.target(FrameTargetId::Main)?.bind(cmd, FramebufferBinding::Both)?;
        effects.render(&mut *bound, self.width, self.height)?;
        bound.unbind()
    }

    fn ui_pass(&self, cmd: &mut dyn CommandList, ctx: &mut FrameContext<'_>) -> Result<()> {
        if !self.config.passes.contains(PassFlags::UI) {
            return Ok(());
        }
        let Some(ui) = ctx.ui.as_deref_mut() else {
            return Ok(());
        };

        let scene_mode = self.is_option_set(ViewportOptions::SCENE_MODE);
        let mut bound = self.target(FrameTargetId::Main)?.bind(cmd, FramebufferBinding::Both)?;
        ui.render(&mut *bound, self.width, self.height, scene_mode)?;
        bound.unbind()
    }

    fn debug_pass(&self, cmd: &mut dyn CommandList, ctx: &mut FrameContext<'_>) -> Result<()> {
        if !self.config.passes.contains(PassFlags::DEBUG) || !self.is_option_set(ViewportOptions::SCENE_MODE) {
            return Ok(());
        }
        let Some(debug) = ctx.debug.as_deref_mut() else {
            return Ok(());
        };

        let mut bound = self.target(FrameTargetId::Main)?.bind(cmd, FramebufferBinding::Both)?;
        debug.render(&mut *bound)?;
        bound.unbind()
    }

    fn debug_draw_pass(&self, cmd: &mut dyn CommandList, camera: &Camera, ctx: &mut FrameContext<'_>) -> Result<()> {
        if !self.config.passes.contains(PassFlags::DEBUG_DRAW) {
            return Ok(());
        }
        let Some(debug_draw) = ctx.debug_draw.as_deref_mut() else {
            return Ok(());
        };

        let mut bound = self.target(FrameTargetId::Main)?.bind(cmd, FramebufferBinding::Both)?;
        debug_draw.render(&mut *bound, self.width, self.height, camera.view_projection_matrix())?;
        bound.unbind()
    }

    /// Grid, navmesh, billboards and selection outline (scene mode only).
    fn editor_pass(&self, cmd: &mut dyn CommandList, camera: &Camera, ctx: &mut FrameContext<'_>) -> Result<()> {
        if !self.is_option_set(ViewportOptions::SCENE_MODE) {
            return Ok(());
        }
        let editor = ctx.editor;
        let Some(debug_draw) = ctx.debug_draw.as_deref_mut() else {
            return Ok(());
        };

        let mut bound = self.target(FrameTargetId::Main)?.bind(cmd, FramebufferBinding::Both)?;
        debug_draw.render_grid(&mut *bound)?;
        if editor.show_navmesh {
            debug_draw.render_navmesh(&mut *bound, camera)?;
        }
        debug_draw.render_billboards(&mut *bound)?;
        if editor.has_selection {
            debug_draw.render_outline(&mut *bound)?;
        }
        bound.unbind()
    }

    // ===== OUTPUT =====

    fn post_process_pass(&self, cmd: &mut dyn CommandList, binder: &dyn ShaderBinder) -> Result<()> {
        let main = self.target(FrameTargetId::Main)?;
        let Some(screen) = main.color_attachment() else {
            return Err(Error::TargetNotReady(main.label().to_string()));
        };

        let mut variation = ShaderVariation::empty();
        variation.set(ShaderVariation::ENABLE_MSAA, self.config.antialiasing);
        variation.set(ShaderVariation::ENABLE_HDR, self.config.hdr);

        let mut bound = self.target(FrameTargetId::PostProcess)?.bind(cmd, FramebufferBinding::Both)?;
        binder.use_program(&mut *bound, POST_PROCESS_PROGRAM, variation)?;
        bound.bind_texture(SCREEN_TEXTURE_SLOT, screen)?;
        // Fullscreen triangle
        bound.draw(3, 0)?;
        bound.unbind()
    }

    fn blit_pass(&self, cmd: &mut dyn CommandList) -> Result<()> {
        let source = self.framebuffer_of(FrameTargetId::PostProcess)?;
        let destination = if self.is_option_set(ViewportOptions::BLIT_FRAMEBUFFER) {
            Some(self.framebuffer_of(FrameTargetId::Blit)?)
        } else {
            None
        };

        cmd.blit_framebuffer(source, destination, self.width, self.height)
    }

    fn select_last_displayed_texture(&mut self) {
        let id = match self.config.output.cascade() {
            Some(kind) => FrameTargetId::Depth(kind),
            None => FrameTargetId::Blit,
        };
        self.last_displayed_texture = self
            .targets
            .target(id)
            .and_then(|target| target.color_attachment())
            .cloned();
    }

    // ===== HELPERS =====

    fn target(&self, id: FrameTargetId) -> Result<&FrameTarget> {
        self.targets
            .target(id)
            .ok_or_else(|| engine_err!(SOURCE, "Missing frame target '{}'", id.label()))
    }

    fn target_mut(&mut self, id: FrameTargetId) -> Result<&mut FrameTarget> {
        self.targets
            .target_mut(id)
            .ok_or_else(|| engine_err!(SOURCE, "Missing frame target '{}'", id.label()))
    }

    fn framebuffer_of(&self, id: FrameTargetId) -> Result<&Arc<dyn Framebuffer>> {
        let target = self.target(id)?;
        target
            .framebuffer()
            .ok_or_else(|| Error::TargetNotReady(target.label().to_string()))
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("config", &self.config)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("targets", &self.targets)
            .field("stats", &self.stats)
            .finish()
    }
}

// ===== FREE HELPERS =====

fn write_camera_uniforms(cmd: &mut dyn CommandList, projection: Mat4, view: Mat4) -> Result<()> {
    cmd.write_uniforms(UniformBlock::Camera, bytemuck::bytes_of(&CameraUniforms::new(projection, view)))
}

fn clear_values(camera: &Camera) -> [ClearValue; 2] {
    [
        ClearValue::Color(camera.clear_color().to_array()),
        ClearValue::DepthStencil { depth: 1.0, stencil: 0 },
    ]
}

/// Mesh of an object that can be drawn now.
fn drawable_mesh(key: RenderableKey, object: &dyn RenderableObject) -> Option<MeshHandle> {
    match (object.mesh(), object.material()) {
        (Some(mesh), Some(_)) if object.is_enabled() => Some(mesh),
        _ => {
            engine_trace!(SOURCE, "Skipped draw of {:?}: not ready", key);
            None
        }
    }
}

type Drawable<'s> = (RenderableKey, &'s dyn RenderableObject);

/// Split visible objects into opaque (unsorted) and transparent sorted
/// back-to-front from `eye`.
fn split_by_transparency<'s>(
    scene: &'s Scene,
    visible: &[RenderableKey],
    eye: Vec3,
) -> (Vec<Drawable<'s>>, Vec<Drawable<'s>>) {
    let mut opaque = Vec::new();
    let mut transparent = Vec::new();

    for &key in visible {
        let Some(object) = scene.renderable(key) else {
            continue;
        };
        if object.is_transparent() {
            transparent.push((key, object as &dyn RenderableObject, eye.distance(object.world_translation())));
        } else {
            opaque.push((key, object as &dyn RenderableObject));
        }
    }

    transparent.sort_by(|a, b| b.2.total_cmp(&a.2));
    let transparent = transparent.into_iter().map(|(key, object, _)| (key, object)).collect();

    (opaque, transparent)
}

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;
