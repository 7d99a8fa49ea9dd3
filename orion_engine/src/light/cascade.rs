/// Shadow cascades for a directional light.
///
/// The camera's view volume is cut into distance bands (near, mid, far and
/// a full band covering everything). Each band gets an orthographic light
/// frustum that fully contains the band's slice of the camera frustum,
/// pulled back toward the light by `caster_margin` so casters standing
/// between the light and the slice still land in the depth map.
///
/// Cascades are transient: rebuilt every frame the shadow stage runs.

use glam::{Mat4, Vec3};
use crate::camera::{Camera, Frustum};
use crate::graphics_device::{LightUniforms, CASCADE_COUNT};

/// Extra room around the fitted slice (world units).
const BOUNDS_PADDING: f32 = 0.5;

// ===== LIGHT =====

/// Sun-style light with parallel rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the light toward the scene
    direction: Vec3,
}

impl DirectionalLight {
    /// Create a light shining along `direction` (normalized).
    ///
    /// A zero direction falls back to straight down.
    pub fn new(direction: Vec3) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec3::NEG_Y);
        Self { direction }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        *self = Self::new(direction);
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::new(-0.3, -1.0, -0.4))
    }
}

// ===== CASCADES =====

/// Cascade identity. Discriminants index `LightCascades` and `LightUniforms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CascadeKind {
    Near = 0,
    Mid = 1,
    Far = 2,
    Full = 3,
}

impl CascadeKind {
    /// Storage order (matches `LightUniforms::cascades`)
    pub const ALL: [CascadeKind; CASCADE_COUNT] =
        [CascadeKind::Near, CascadeKind::Mid, CascadeKind::Far, CascadeKind::Full];

    /// Order in which the depth passes are rendered
    pub const RENDER_ORDER: [CascadeKind; CASCADE_COUNT] =
        [CascadeKind::Full, CascadeKind::Near, CascadeKind::Mid, CascadeKind::Far];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Distance bands, as fractions of the camera's near..far range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeBands {
    pub near: [f32; 2],
    pub mid: [f32; 2],
    pub far: [f32; 2],
    pub full: [f32; 2],
    /// How far (world units) light frustums extend toward the light
    pub caster_margin: f32,
}

impl CascadeBands {
    /// `[start, end]` fractions of a cascade, clamped to 0..1 and ordered.
    pub fn band(&self, kind: CascadeKind) -> [f32; 2] {
        let [start, end] = match kind {
            CascadeKind::Near => self.near,
            CascadeKind::Mid => self.mid,
            CascadeKind::Far => self.far,
            CascadeKind::Full => self.full,
        };
        let start = start.clamp(0.0, 1.0);
        let end = end.clamp(0.0, 1.0);
        [start.min(end), start.max(end)]
    }
}

impl Default for CascadeBands {
    fn default() -> Self {
        Self {
            near: [0.0, 0.1],
            mid: [0.1, 0.35],
            far: [0.35, 1.0],
            full: [0.0, 1.0],
            caster_margin: 20.0,
        }
    }
}

/// One cascade: an orthographic light view volume.
#[derive(Debug, Clone, Copy)]
pub struct LightFrustum {
    pub kind: CascadeKind,
    pub view: Mat4,
    pub projection: Mat4,
    pub frustum: Frustum,
    /// Camera-space distance range covered by this cascade
    pub range: [f32; 2],
}

impl LightFrustum {
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Eye used for the depth pass (light-space origin in world space).
    pub fn eye_position(&self) -> Vec3 {
        self.view.inverse().col(3).truncate()
    }
}

/// The four cascades of one frame.
#[derive(Debug, Clone)]
pub struct LightCascades {
    cascades: [LightFrustum; CASCADE_COUNT],
}

impl LightCascades {
    /// Fit every cascade to `camera` for `light`.
    pub fn build(camera: &Camera, light: &DirectionalLight, bands: &CascadeBands) -> Self {
        let depth = camera.far() - camera.near();
        let cascades = CascadeKind::ALL.map(|kind| {
            let [start, end] = bands.band(kind);
            let range = [camera.near() + depth * start, camera.near() + depth * end];
            fit_cascade(kind, &slice_corners(camera, range[0], range[1]), light, bands.caster_margin, range)
        });

        Self { cascades }
    }

    pub fn get(&self, kind: CascadeKind) -> &LightFrustum {
        &self.cascades[kind.index()]
    }

    /// Cascades in storage order (near, mid, far, full).
    pub fn iter(&self) -> impl Iterator<Item = &LightFrustum> {
        self.cascades.iter()
    }

    /// Uniform block with every cascade's view-projection matrix.
    pub fn uniforms(&self) -> LightUniforms {
        LightUniforms {
            cascades: self.cascades.map(|cascade| cascade.view_projection()),
        }
    }
}

/// World-space corners of the camera frustum between two view distances.
///
/// Index bits: bit0 = right, bit1 = top, bit2 = far.
pub fn slice_corners(camera: &Camera, near: f32, far: f32) -> [Vec3; 8] {
    let position = camera.world_position();
    let forward = camera.forward();
    let right = camera.right();
    let up = camera.up();
    let tan_half_fov = (camera.fov_y() * 0.5).tan();

    let mut corners = [Vec3::ZERO; 8];
    for (index, corner) in corners.iter_mut().enumerate() {
        let distance = if index & 4 == 0 { near } else { far };
        let half_h = distance * tan_half_fov;
        let half_w = half_h * camera.aspect_ratio();
        let sx = if index & 1 == 0 { -1.0 } else { 1.0 };
        let sy = if index & 2 == 0 { -1.0 } else { 1.0 };
        *corner = position + forward * distance + right * (half_w * sx) + up * (half_h * sy);
    }
    corners
}

fn fit_cascade(
    kind: CascadeKind,
    corners: &[Vec3; 8],
    light: &DirectionalLight,
    caster_margin: f32,
    range: [f32; 2],
) -> LightFrustum {
    let center = corners.iter().copied().sum::<Vec3>() / corners.len() as f32;
    let radius = corners
        .iter()
        .map(|corner| corner.distance(center))
        .fold(0.0f32, f32::max);

    let direction = light.direction();
    let up = if direction.dot(Vec3::Y).abs() > 0.99 { Vec3::X } else { Vec3::Y };
    let eye = center - direction * (radius + caster_margin);
    let view = Mat4::look_at_rh(eye, center, up);

    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for corner in corners {
        let light_space = view.transform_point3(*corner);
        min = min.min(light_space);
        max = max.max(light_space);
    }

    // Light looks down -Z: the closest point has the largest z
    let projection = Mat4::orthographic_rh(
        min.x - BOUNDS_PADDING,
        max.x + BOUNDS_PADDING,
        min.y - BOUNDS_PADDING,
        max.y + BOUNDS_PADDING,
        (-max.z - caster_margin).max(0.0),
        -min.z + BOUNDS_PADDING,
    );

    LightFrustum {
        kind,
        view,
        projection,
        frustum: Frustum::from_view_projection(&(projection * view)),
        range,
    }
}

#[cfg(test)]
#[path = "cascade_tests.rs"]
mod tests;
