use glam::{Mat4, Vec3};
use crate::graphics_device::mock_graphics_device::MockCommandList;
use crate::graphics_device::{MaterialHandle, MeshHandle};
use crate::scene::{MeshRenderer, RenderableFlags, Transformable};
use crate::spatial::AABB;
use super::*;

fn binder() -> ForwardShaderBinder {
    ForwardShaderBinder::new(ProgramHandle(1), ProgramHandle(2))
}

fn object() -> MeshRenderer {
    MeshRenderer::new(
        AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0)),
        Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0)),
        RenderableFlags::default(),
    )
    .with_assets(MeshHandle(10), MaterialHandle(20))
}

#[test]
fn test_object_program_per_variant() {
    let binder = binder();
    let mut cmd = MockCommandList::new();

    assert_eq!(binder.bind_object_program(&mut cmd, &object(), ProgramVariant::Standard).unwrap(), ProgramHandle(1));
    assert_eq!(binder.bind_object_program(&mut cmd, &object(), ProgramVariant::DepthOnly).unwrap(), ProgramHandle(2));
    assert_eq!(cmd.commands, vec!["bind_program(1)", "bind_program(2)"]);
}

#[test]
fn test_mesh_material_and_light_uniforms() {
    let binder = binder();
    let mut cmd = MockCommandList::new();
    let object = object();

    binder.bind_mesh_uniforms(&mut cmd, ProgramHandle(1), &object).unwrap();
    binder.bind_material_uniforms(&mut cmd, ProgramHandle(1), &object).unwrap();
    binder.bind_light_uniforms(&mut cmd, ProgramHandle(1), object.world_translation()).unwrap();

    assert_eq!(
        cmd.commands,
        vec!["push_constants(0, 64)", "bind_material(20)", "push_constants(64, 12)"]
    );
}

#[test]
fn test_material_uniforms_without_material_is_noop() {
    let binder = binder();
    let mut cmd = MockCommandList::new();
    let bare = MeshRenderer::new(AABB::new(Vec3::ZERO, Vec3::ONE), Mat4::IDENTITY, RenderableFlags::default());

    binder.bind_material_uniforms(&mut cmd, ProgramHandle(1), &bare).unwrap();
    assert!(cmd.commands.is_empty());
}

#[test]
fn test_named_program_lookup() {
    let mut binder = binder();
    binder.register_program("PostProcessing", ShaderVariation::empty(), ProgramHandle(30));
    binder.register_program("PostProcessing", ShaderVariation::ENABLE_MSAA, ProgramHandle(31));
    let mut cmd = MockCommandList::new();

    let msaa = binder.use_program(&mut cmd, "PostProcessing", ShaderVariation::ENABLE_MSAA).unwrap();
    assert_eq!(msaa, ProgramHandle(31));

    // Unregistered variation falls back to the plain program
    let hdr = binder.use_program(&mut cmd, "PostProcessing", ShaderVariation::ENABLE_HDR).unwrap();
    assert_eq!(hdr, ProgramHandle(30));

    assert_eq!(cmd.commands, vec!["bind_program(31)", "bind_program(30)"]);
}

#[test]
fn test_unknown_program_fails() {
    let binder = binder();
    let mut cmd = MockCommandList::new();

    let result = binder.use_program(&mut cmd, "Missing", ShaderVariation::empty());
    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert!(cmd.commands.is_empty());
}
