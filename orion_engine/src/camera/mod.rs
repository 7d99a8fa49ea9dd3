//! Camera module: perspective camera, frustum, and render view.
//!
//! Cameras are owned and driven by the caller; the engine only reads them
//! for culling and uniform upload.

mod camera;
mod frustum;
mod render_view;

pub use camera::Camera;
pub use frustum::{
    Frustum, FrustumTest,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use render_view::RenderView;
