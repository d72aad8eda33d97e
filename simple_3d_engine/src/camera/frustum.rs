/// Frustum: six clipping planes for visibility culling.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing unit normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// Planes are stored in world space. `from_perspective` builds them in view
/// space from the camera parameters and carries them over with the transpose
/// of the view matrix, so classification needs no per-box transform.

use glam::{Mat4, Vec3, Vec4};
use crate::spatial::BoundingBox;

/// Result of a 3-way frustum/box classification.
///
/// Used by the octree culler:
/// - `Separate` → skip the entire subtree
/// - `Include` → collect all items without further testing
/// - `Intersect` → test individual items and recurse into children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumRelation {
    /// Box is entirely inside the frustum
    Include,
    /// Box straddles at least one plane
    Intersect,
    /// Box is entirely outside at least one plane
    Separate,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Build the frustum of a right-handed perspective camera looking down
    /// its local -Z axis.
    ///
    /// `fov_y` is the full vertical field of view in radians.
    pub fn from_perspective(view: &Mat4, fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let th = (fov_y * 0.5).tan();
        let tw = th * aspect;

        // (inward normal, point on plane), in view space
        let view_planes = [
            (Vec3::new(1.0, 0.0, -tw).normalize(), Vec3::ZERO),
            (Vec3::new(-1.0, 0.0, -tw).normalize(), Vec3::ZERO),
            (Vec3::new(0.0, 1.0, -th).normalize(), Vec3::ZERO),
            (Vec3::new(0.0, -1.0, -th).normalize(), Vec3::ZERO),
            (Vec3::NEG_Z, Vec3::new(0.0, 0.0, -near)),
            (Vec3::Z, Vec3::new(0.0, 0.0, -far)),
        ];

        let to_world = view.transpose();
        let planes = view_planes.map(|(normal, point)| {
            normalized(to_world * normal.extend(-normal.dot(point)))
        });
        Self { planes }
    }

    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method. Works for both perspective
    /// and orthographic projections with a [0, 1] depth range.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();

        let planes = [
            // Left:   row3 + row0
            Vec4::new(m[0][3] + m[0][0], m[1][3] + m[1][0], m[2][3] + m[2][0], m[3][3] + m[3][0]),
            // Right:  row3 - row0
            Vec4::new(m[0][3] - m[0][0], m[1][3] - m[1][0], m[2][3] - m[2][0], m[3][3] - m[3][0]),
            // Bottom: row3 + row1
            Vec4::new(m[0][3] + m[0][1], m[1][3] + m[1][1], m[2][3] + m[2][1], m[3][3] + m[3][1]),
            // Top:    row3 - row1
            Vec4::new(m[0][3] - m[0][1], m[1][3] - m[1][1], m[2][3] - m[2][1], m[3][3] - m[3][1]),
            // Near:   row2 (glam projections map depth to [0, 1])
            Vec4::new(m[0][2], m[1][2], m[2][2], m[3][2]),
            // Far:    row3 - row2
            Vec4::new(m[0][3] - m[0][2], m[1][3] - m[1][2], m[2][3] - m[2][2], m[3][3] - m[3][2]),
        ];

        Self { planes: planes.map(normalized) }
    }

    /// Classify a box against the frustum using its tight bounds.
    pub fn test(&self, bbox: &BoundingBox) -> FrustumRelation {
        self.test_bounds(bbox.min, bbox.max)
    }

    /// Classify a box against the frustum using its loose bounds.
    pub fn loose_test(&self, bbox: &BoundingBox) -> FrustumRelation {
        self.test_bounds(bbox.loose_min(), bbox.loose_max())
    }

    /// Tests the positive vertex (p-vertex) and negative vertex (n-vertex)
    /// of the box against each plane:
    /// - p-vertex outside any plane → `Separate` (early out)
    /// - n-vertex outside any plane → at least `Intersect`
    /// - otherwise → `Include`
    pub fn test_bounds(&self, min: Vec3, max: Vec3) -> FrustumRelation {
        let mut all_inside = true;

        for plane in &self.planes {
            let normal = plane.truncate();

            let p_vertex = Vec3::select(normal.cmpge(Vec3::ZERO), max, min);
            if normal.dot(p_vertex) + plane.w < 0.0 {
                return FrustumRelation::Separate;
            }

            let n_vertex = Vec3::select(normal.cmpge(Vec3::ZERO), min, max);
            if normal.dot(n_vertex) + plane.w < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumRelation::Include } else { FrustumRelation::Intersect }
    }

    /// Whether a point lies inside (or on) every plane.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.truncate().dot(point) + plane.w >= 0.0)
    }
}

fn normalized(plane: Vec4) -> Vec4 {
    let normal_len = plane.truncate().length();
    if normal_len > 0.0 { plane / normal_len } else { plane }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
