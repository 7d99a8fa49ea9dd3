/// GPU-layout uniform blocks shared by every program.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Number of shadow cascades uploaded in `LightUniforms`
pub const CASCADE_COUNT: usize = 4;

/// Camera block (`UniformBlock::Camera`)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    pub projection: Mat4,
    pub view: Mat4,
}

impl CameraUniforms {
    pub fn new(projection: Mat4, view: Mat4) -> Self {
        Self { projection, view }
    }
}

/// Light block (`UniformBlock::LightFrustums`)
///
/// View-projection matrix of each cascade, ordered near, mid, far, full.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightUniforms {
    pub cascades: [Mat4; CASCADE_COUNT],
}
