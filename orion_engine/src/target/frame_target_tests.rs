/// Tests for FrameTarget
///
/// These tests validate attachment allocation, resize behaviour, format
/// toggles and scoped binding.

use super::*;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::{MockCommandList, MockGraphicsDevice};
use crate::graphics_device::MeshHandle;

fn color_depth_desc() -> FrameTargetDesc {
    FrameTargetDesc { depth_stencil: true, ..FrameTargetDesc::default() }
}

// ============================================================================
// Tests: Creation
// ============================================================================

#[test]
fn test_new_target_has_no_attachments() {
    let target = FrameTarget::new("main", color_depth_desc());

    assert_eq!(target.label(), "main");
    assert!(!target.is_ready());
    assert_eq!(target.size(), (0, 0));
    assert!(target.color_attachment().is_none());
    assert!(target.framebuffer().is_none());
}

// ============================================================================
// Tests: GenerateAttachments / ClearAttachments
// ============================================================================

#[test]
fn test_generate_attachments_with_depth() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", color_depth_desc());

    target.generate_attachments(&mut device, 800, 600).unwrap();

    assert!(target.is_ready());
    assert_eq!(target.size(), (800, 600));
    assert_eq!(device.created_textures, vec!["main.color", "main.depth"]);
    assert_eq!(device.framebuffer_count(), 1);

    let color = target.color_attachment().unwrap().info();
    assert_eq!((color.width, color.height), (800, 600));
    assert_eq!(color.format, TextureFormat::R8G8B8A8_UNORM);
    assert_eq!(color.samples, 1);
    let depth = target.depth_stencil_attachment().unwrap().info();
    assert_eq!(depth.format, TextureFormat::D24_UNORM_S8_UINT);
}

#[test]
fn test_generate_attachments_color_only() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("blit", FrameTargetDesc::default());

    target.generate_attachments(&mut device, 64, 64).unwrap();

    assert!(target.depth_stencil_attachment().is_none());
    assert_eq!(device.texture_count(), 1);
}

#[test]
fn test_generate_attachments_rejects_zero_size() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", color_depth_desc());

    let result = target.generate_attachments(&mut device, 0, 600);
    assert!(matches!(result, Err(Error::InvalidSize { width: 0, height: 600 })));

    let result = target.generate_attachments(&mut device, 800, 0);
    assert!(matches!(result, Err(Error::InvalidSize { width: 800, height: 0 })));

    assert!(!target.is_ready());
    assert_eq!(device.texture_count(), 0);
}

#[test]
fn test_generate_releases_previous_attachments() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", color_depth_desc());

    target.generate_attachments(&mut device, 100, 100).unwrap();
    target.generate_attachments(&mut device, 200, 200).unwrap();

    assert_eq!(device.texture_count(), 4);
    assert_eq!(device.live_texture_count(), 2);
}

#[test]
fn test_clear_attachments_releases_and_is_idempotent() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", color_depth_desc());

    target.clear_attachments();
    target.generate_attachments(&mut device, 100, 100).unwrap();
    assert_eq!(device.live_texture_count(), 2);

    target.clear_attachments();
    target.clear_attachments();
    assert!(!target.is_ready());
    assert_eq!(device.live_texture_count(), 0);
}

#[test]
fn test_device_failure_leaves_target_unready() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", color_depth_desc());
    device.texture_budget = Some(1);

    // Color succeeds, depth/stencil runs out of memory
    assert!(matches!(target.generate_attachments(&mut device, 100, 100), Err(Error::OutOfMemory)));
    assert!(!target.is_ready());
    assert_eq!(device.live_texture_count(), 0);
}

// ============================================================================
// Tests: SetSize
// ============================================================================

#[test]
fn test_set_size_same_size_allocates_once() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", FrameTargetDesc::default());

    assert!(target.set_size(&mut device, 1280, 720).unwrap());
    assert!(!target.set_size(&mut device, 1280, 720).unwrap());

    assert_eq!(device.texture_count(), 1);
    assert_eq!(device.framebuffer_count(), 1);
}

#[test]
fn test_set_size_new_size_reallocates() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", FrameTargetDesc::default());

    target.set_size(&mut device, 1280, 720).unwrap();
    assert!(target.set_size(&mut device, 1920, 1080).unwrap());

    assert_eq!(target.size(), (1920, 1080));
    assert_eq!(device.texture_count(), 2);
    assert_eq!(device.live_texture_count(), 1);
}

#[test]
fn test_set_size_after_clear_reallocates() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", FrameTargetDesc::default());

    target.set_size(&mut device, 320, 240).unwrap();
    target.clear_attachments();
    assert!(target.set_size(&mut device, 320, 240).unwrap());
    assert_eq!(device.texture_count(), 2);
}

#[test]
fn test_set_size_zero_keeps_current_attachments() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", color_depth_desc());
    target.set_size(&mut device, 640, 480).unwrap();

    let result = target.set_size(&mut device, 0, 480);

    assert!(matches!(result, Err(Error::InvalidSize { width: 0, height: 480 })));
    assert!(target.is_ready());
    assert_eq!(target.size(), (640, 480));
    assert_eq!(target.color_attachment().unwrap().info().width, 640);
    assert_eq!(device.texture_count(), 2);
    assert_eq!(device.live_texture_count(), 2);
}

// ============================================================================
// Tests: Format toggles
// ============================================================================

#[test]
fn test_format_toggles_apply_on_reallocate() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", color_depth_desc());
    target.set_size(&mut device, 640, 480).unwrap();

    target.set_multisampled(true);
    target.set_floating_point(true);
    target.reallocate(&mut device).unwrap();

    let color = target.color_attachment().unwrap().info();
    assert_eq!(color.format, TextureFormat::R16G16B16A16_SFLOAT);
    assert_eq!(color.samples, MSAA_SAMPLES);
    assert_eq!((color.width, color.height), (640, 480));
    assert_eq!(target.depth_stencil_attachment().unwrap().info().samples, MSAA_SAMPLES);
}

#[test]
fn test_reallocate_unallocated_target_is_noop() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", FrameTargetDesc::default());

    target.reallocate(&mut device).unwrap();
    assert_eq!(device.texture_count(), 0);
}

// ============================================================================
// Tests: Bind / UnBind
// ============================================================================

#[test]
fn test_bind_unready_target_fails() {
    let target = FrameTarget::new("main", FrameTargetDesc::default());
    let mut cmd = MockCommandList::new();

    let not_ready = matches!(
        target.bind(&mut cmd, FramebufferBinding::Both),
        Err(Error::TargetNotReady(ref label)) if label == "main"
    );
    assert!(not_ready);
    assert!(cmd.commands.is_empty());
}

#[test]
fn test_bind_guard_unbinds_on_drop() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", FrameTargetDesc::default());
    target.set_size(&mut device, 10, 10).unwrap();
    let mut cmd = MockCommandList::new();

    {
        let mut bound = target.bind(&mut cmd, FramebufferBinding::Both).unwrap();
        bound.draw_mesh(MeshHandle(7)).unwrap();
    }

    assert_eq!(
        cmd.commands,
        vec!["bind_framebuffer(main)", "draw_mesh(7)", "bind_framebuffer(display)"]
    );
}

#[test]
fn test_bind_guard_unbinds_on_early_return() {
    fn failing_pass(target: &FrameTarget, cmd: &mut dyn CommandList) -> Result<()> {
        let _bound = target.bind(cmd, FramebufferBinding::Draw)?;
        Err(Error::InvalidResource("material".to_string()))
    }

    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", FrameTargetDesc::default());
    target.set_size(&mut device, 10, 10).unwrap();
    let mut cmd = MockCommandList::new();

    assert!(failing_pass(&target, &mut cmd).is_err());
    assert_eq!(
        cmd.commands,
        vec!["bind_framebuffer(main, Draw)", "bind_framebuffer(display, Draw)"]
    );
}

#[test]
fn test_explicit_unbind_happens_once() {
    let mut device = MockGraphicsDevice::new();
    let mut target = FrameTarget::new("main", FrameTargetDesc::default());
    target.set_size(&mut device, 10, 10).unwrap();
    let mut cmd = MockCommandList::new();

    let bound = target.bind(&mut cmd, FramebufferBinding::Both).unwrap();
    bound.unbind().unwrap();

    assert_eq!(cmd.matching("bind_framebuffer").len(), 2);
}
