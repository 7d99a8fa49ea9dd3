use glam::{Mat4, Vec3};
use crate::spatial::AABB;
use super::*;

/// Camera at (0, 0, 5) looking at the origin, 45° FOV, near 0.5, far 100.
fn perspective_frustum() -> Frustum {
    let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.5, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    Frustum::from_view_projection(&(projection * view))
}

fn cube(center: Vec3, half: f32) -> AABB {
    AABB::from_center_half_extents(center, Vec3::splat(half))
}

// ============================================================================
// Frustum::from_view_projection
// ============================================================================

#[test]
fn test_frustum_planes_are_normalized() {
    let frustum = perspective_frustum();

    for plane in &frustum.planes {
        let normal_len = Vec3::new(plane.x, plane.y, plane.z).length();
        assert!((normal_len - 1.0).abs() < 1e-4, "plane normal should be unit length");
    }
}

#[test]
fn test_frustum_near_plane_faces_view_direction() {
    let frustum = perspective_frustum();

    // Camera looks down -Z, so the near plane normal points to -Z
    let near = frustum.planes[PLANE_NEAR];
    assert!(near.z < -0.99);
    // Near plane sits at z = 5 - 0.5
    assert!((near.truncate().dot(Vec3::new(0.0, 0.0, 4.5)) + near.w).abs() < 1e-3);
}

#[test]
fn test_frustum_corners_match_near_and_far_distances() {
    let frustum = perspective_frustum();

    for (index, corner) in frustum.corners.iter().enumerate() {
        let expected_z = if index & 4 == 0 { 4.5 } else { -95.0 };
        assert!(
            (corner.z - expected_z).abs() < 0.1,
            "corner {} z = {} (expected {})", index, corner.z, expected_z
        );
    }

    // bit0 = right, bit1 = top
    assert!(frustum.corners[0].x < frustum.corners[1].x);
    assert!(frustum.corners[0].y < frustum.corners[2].y);
}

#[test]
fn test_frustum_orthographic_corners() {
    let projection = Mat4::orthographic_rh(-10.0, 10.0, -5.0, 5.0, 1.0, 50.0);
    let frustum = Frustum::from_view_projection(&projection);

    assert!((frustum.corners[0] - Vec3::new(-10.0, -5.0, -1.0)).length() < 1e-3);
    assert!((frustum.corners[7] - Vec3::new(10.0, 5.0, -50.0)).length() < 1e-3);
}

// ============================================================================
// AABB tests
// ============================================================================

#[test]
fn test_aabb_in_front_of_camera_is_visible() {
    let frustum = perspective_frustum();
    assert!(frustum.intersects_aabb(&cube(Vec3::ZERO, 1.0)));
}

#[test]
fn test_aabb_behind_near_plane_is_culled() {
    let frustum = perspective_frustum();
    assert!(!frustum.intersects_aabb(&cube(Vec3::new(0.0, 0.0, 10.0), 1.0)));
}

#[test]
fn test_aabb_beyond_far_plane_is_culled() {
    let frustum = perspective_frustum();
    assert!(!frustum.intersects_aabb(&cube(Vec3::new(0.0, 0.0, -200.0), 1.0)));
}

#[test]
fn test_aabb_outside_side_plane_is_culled() {
    let frustum = perspective_frustum();
    assert!(!frustum.intersects_aabb(&cube(Vec3::new(100.0, 0.0, 0.0), 1.0)));
}

#[test]
fn test_aabb_straddling_near_plane_is_visible() {
    let frustum = perspective_frustum();
    let straddling = cube(Vec3::new(0.0, 0.0, 5.0), 1.0);

    assert!(frustum.intersects_aabb(&straddling));
    assert_eq!(frustum.classify_aabb(&straddling), FrustumTest::Partial);
}

#[test]
fn test_classify_aabb() {
    let frustum = perspective_frustum();

    assert_eq!(frustum.classify_aabb(&cube(Vec3::ZERO, 0.5)), FrustumTest::Inside);
    assert_eq!(frustum.classify_aabb(&cube(Vec3::new(0.0, 0.0, 20.0), 0.5)), FrustumTest::Outside);
    assert_eq!(frustum.classify_aabb(&cube(Vec3::new(0.0, 0.0, -95.0), 2.0)), FrustumTest::Partial);
}

#[test]
fn test_contains_point() {
    let frustum = perspective_frustum();

    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -40.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 10.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 80.0, -40.0)));
}

// ============================================================================
// Ground rect
// ============================================================================

#[test]
fn test_ground_rect_spans_the_view_volume() {
    let frustum = perspective_frustum();
    let rect = frustum.ground_rect();

    // Z range covers near (4.5) to far (-95)
    assert!(rect.max.y > 4.4 && rect.min.y < -94.0);
    // Symmetric horizontal spread
    assert!((rect.min.x + rect.max.x).abs() < 0.1);
    assert!(rect.max.x > 50.0);
}
