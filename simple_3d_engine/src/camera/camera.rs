/// Camera: low-level perspective camera.
///
/// Holds the view matrix and the perspective parameters, and keeps the
/// culling frustum in sync with them: every setter recomputes it.
///
/// The engine does NOT store or manage cameras. They are tools provided
/// by the engine, owned and driven by the caller.

use glam::{Mat4, Vec3};
use super::frustum::Frustum;

#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
    frustum: Frustum,
}

impl Camera {
    /// Create a camera from a view matrix and perspective parameters.
    ///
    /// `fov_y` is the full vertical field of view in radians.
    pub fn new(view: Mat4, fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            view_matrix: view,
            fov_y,
            aspect,
            near,
            far,
            frustum: Frustum::from_perspective(&view, fov_y, aspect, near, far),
        }
    }

    /// Camera at `eye` looking at `target`, Y up.
    pub fn look_at(eye: Vec3, target: Vec3, fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::new(Mat4::look_at_rh(eye, target, Vec3::Y), fov_y, aspect, near, far)
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    /// Right-handed perspective projection with a [0, 1] depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix
    }

    /// Frustum planes for culling, in world space.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.view_matrix.inverse().w_axis.truncate()
    }

    // ===== SETTERS =====

    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
        self.refresh_frustum();
    }

    pub fn set_perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        self.fov_y = fov_y;
        self.aspect = aspect;
        self.near = near;
        self.far = far;
        self.refresh_frustum();
    }

    /// Aspect ratio only, e.g. after a resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.refresh_frustum();
    }

    fn refresh_frustum(&mut self) {
        self.frustum = Frustum::from_perspective(&self.view_matrix, self.fov_y, self.aspect, self.near, self.far);
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
