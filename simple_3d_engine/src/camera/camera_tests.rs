use glam::{Mat4, Vec3};
use crate::spatial::BoundingBox;
use super::*;
use crate::camera::FrustumRelation;

fn create_test_camera() -> Camera {
    Camera::look_at(
        Vec3::new(0.0, 0.0, 5.0),
        Vec3::ZERO,
        std::f32::consts::FRAC_PI_4,
        16.0 / 9.0,
        0.1,
        100.0,
    )
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_camera_new() {
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let camera = Camera::new(view, std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);

    assert_eq!(*camera.view_matrix(), view);
    assert_eq!(camera.fov_y(), std::f32::consts::FRAC_PI_4);
    assert_eq!(camera.aspect(), 16.0 / 9.0);
    assert_eq!(camera.near(), 0.1);
    assert_eq!(camera.far(), 100.0);
}

#[test]
fn test_frustum_matches_parameters() {
    let camera = create_test_camera();
    let expected = Frustum::from_perspective(camera.view_matrix(), camera.fov_y(), camera.aspect(), 0.1, 100.0);
    assert_eq!(*camera.frustum(), expected);
}

#[test]
fn test_position_from_view() {
    let camera = create_test_camera();
    assert!((camera.position() - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
}

// ============================================================================
// Matrices
// ============================================================================

#[test]
fn test_view_projection_matrix() {
    let camera = create_test_camera();
    let expected = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0) * *camera.view_matrix();
    assert_eq!(camera.view_projection_matrix(), expected);
}

// ============================================================================
// Setters keep the frustum in sync
// ============================================================================

#[test]
fn test_set_view_recomputes_frustum() {
    let mut camera = create_test_camera();
    let bbox = BoundingBox::from_center(Vec3::ZERO, Vec3::ONE);
    assert_eq!(camera.frustum().test(&bbox), FrustumRelation::Include);

    // turn around: the origin is now behind the camera
    camera.set_view(Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 10.0), Vec3::Y));
    assert_eq!(camera.frustum().test(&bbox), FrustumRelation::Separate);
}

#[test]
fn test_set_perspective_recomputes_frustum() {
    let mut camera = create_test_camera();
    let bbox = BoundingBox::from_center(Vec3::ZERO, Vec3::ONE);

    camera.set_perspective(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 3.0);
    assert_eq!(camera.far(), 3.0);
    assert_eq!(camera.frustum().test(&bbox), FrustumRelation::Separate);
}

#[test]
fn test_set_aspect_recomputes_frustum() {
    let mut camera = create_test_camera();
    let before = *camera.frustum();
    camera.set_aspect(1.0);
    assert_eq!(camera.aspect(), 1.0);
    assert_ne!(*camera.frustum(), before);
}
