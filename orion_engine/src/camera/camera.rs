/// Camera: perspective view parameters plus a world transform.
///
/// Unlike a passive matrix container, the camera recomputes its view,
/// projection and frustum whenever a parameter changes, so the getters are
/// always coherent. Cameras are owned by the caller (scene, editor) and
/// passed to the viewport for each frame.

use glam::{Mat4, Vec3, Vec4};
use super::frustum::Frustum;

/// Perspective camera.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view (radians)
    fov_y: f32,
    /// Width / height
    aspect_ratio: f32,
    near: f32,
    far: f32,
    /// Camera-to-world transform
    transform: Mat4,
    clear_color: Vec4,

    // Derived
    view_matrix: Mat4,
    projection_matrix: Mat4,
    frustum: Frustum,
}

impl Camera {
    /// Create a perspective camera at the origin looking down -Z.
    pub fn new(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_y,
            aspect_ratio,
            near,
            far,
            transform: Mat4::IDENTITY,
            clear_color: Vec4::new(0.1, 0.1, 0.1, 1.0),
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            frustum: Frustum::from_view_projection(&Mat4::IDENTITY),
        };
        camera.recompute();
        camera
    }

    fn recompute(&mut self) {
        self.view_matrix = self.transform.inverse();
        self.projection_matrix =
            Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far);
        self.frustum = Frustum::from_view_projection(&self.view_projection_matrix());
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Frustum matching the current view and projection.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    pub fn world_position(&self) -> Vec3 {
        self.transform.col(3).truncate()
    }

    /// Unit viewing direction (camera -Z in world space).
    pub fn forward(&self) -> Vec3 {
        (-self.transform.col(2).truncate()).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.transform.col(0).truncate().normalize_or_zero()
    }

    pub fn up(&self) -> Vec3 {
        self.transform.col(1).truncate().normalize_or_zero()
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn clear_color(&self) -> Vec4 {
        self.clear_color
    }

    // ===== SETTERS =====

    /// Set the camera-to-world transform.
    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
        self.recompute();
    }

    /// Place the camera at `eye`, looking at `target`.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.set_transform(Mat4::look_at_rh(eye, target, up).inverse());
    }

    /// Ignored for non-positive or non-finite ratios (minimized window).
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return;
        }
        if self.aspect_ratio != aspect_ratio {
            self.aspect_ratio = aspect_ratio;
            self.recompute();
        }
    }

    pub fn set_fov_y(&mut self, fov_y: f32) {
        self.fov_y = fov_y;
        self.recompute();
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.recompute();
    }

    pub fn set_clear_color(&mut self, color: Vec4) {
        self.clear_color = color;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(60f32.to_radians(), 16.0 / 9.0, 0.1, 500.0)
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
