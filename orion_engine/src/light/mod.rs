//! Light module: directional light and shadow cascade frustums.

mod cascade;

pub use cascade::{
    DirectionalLight, CascadeKind, CascadeBands, LightFrustum, LightCascades, slice_corners,
};
