//! Scene management module
//!
//! Provides the renderable capabilities, the scene container and the
//! frustum culler.

mod renderable;
mod scene;
mod culler;

pub use renderable::{
    RenderableKey, RenderableFlags, Transformable, RenderableObject, MeshRenderer,
};
pub use scene::Scene;
pub use culler::{Culler, FrustumCuller, RenderPurpose};
