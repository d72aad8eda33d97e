/// Axis-aligned bounding box with precomputed loose bounds.
///
/// The loose bounds scale the box by `loose_factor` around its center.
/// Octree nodes use them so that an object drifting slightly past a node
/// boundary is not relocated on every update.

use glam::{Mat4, Vec3};

/// Relation of a box to another box, seen from the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxRelation {
    /// Receiver contains the other box
    Include,
    /// Other box contains the receiver
    InvInclude,
    /// Boxes overlap without containment
    Intersect,
    /// Boxes are disjoint (touching faces count as disjoint)
    Separate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
    loose_min: Vec3,
    loose_max: Vec3,
    loose_factor: f32,
}

/// Loose extents of `[min, max]` scaled by `factor` around the center.
pub fn loosened(min: Vec3, max: Vec3, factor: f32) -> (Vec3, Vec3) {
    let lo = 0.5 * (1.0 + factor);
    let hi = 0.5 * (1.0 - factor);
    (min * lo + max * hi, min * hi + max * lo)
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3, loose_factor: f32) -> Self {
        let (loose_min, loose_max) = loosened(min, max, loose_factor);
        Self { min, max, loose_min, loose_max, loose_factor }
    }

    /// Box whose loose bounds equal its bounds
    pub fn tight(min: Vec3, max: Vec3) -> Self {
        Self::new(min, max, 1.0)
    }

    /// Cube of half-size `half_extent` around `center`
    pub fn from_center(center: Vec3, half_extent: Vec3) -> Self {
        Self::tight(center - half_extent, center + half_extent)
    }

    pub fn with_loose_factor(&self, loose_factor: f32) -> Self {
        Self::new(self.min, self.max, loose_factor)
    }

    // ===== GETTERS =====

    pub fn loose_min(&self) -> Vec3 {
        self.loose_min
    }

    pub fn loose_max(&self) -> Vec3 {
        self.loose_max
    }

    pub fn loose_factor(&self) -> f32 {
        self.loose_factor
    }

    /// The loose extents as a tight box.
    pub fn loose_bounds(&self) -> BoundingBox {
        Self::tight(self.loose_min, self.loose_max)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// The 8 corners. Bit 0 of the index selects max x, bit 1 max y, bit 2 max z.
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 != 0 { self.max.x } else { self.min.x },
                if i & 2 != 0 { self.max.y } else { self.min.y },
                if i & 4 != 0 { self.max.z } else { self.min.z },
            )
        })
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Closest point of the box to `point` (the point itself when inside).
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Child box for octant `index` (4 = high x, 2 = high y, 1 = high z),
    /// keeping this box's loose factor.
    pub fn octant(&self, index: usize) -> BoundingBox {
        let mid = self.center();
        let pick = |bit: usize, axis: usize| {
            if index & bit != 0 { (mid[axis], self.max[axis]) } else { (self.min[axis], mid[axis]) }
        };
        let (x0, x1) = pick(4, 0);
        let (y0, y1) = pick(2, 1);
        let (z0, z1) = pick(1, 2);
        Self::new(Vec3::new(x0, y0, z0), Vec3::new(x1, y1, z1), self.loose_factor)
    }

    /// Transform this box by a matrix, returning the enclosing world box.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the extents
    /// for a tight result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> BoundingBox {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        Self::new(new_min, new_max, self.loose_factor)
    }

    // ===== RELATIONS =====

    /// Classify `other` against this box.
    pub fn test(&self, other: &BoundingBox) -> BoxRelation {
        self.classify(self.min, self.max, other)
    }

    /// Like [`test`](Self::test), but containment is checked against the
    /// loose bounds of this box.
    pub fn loose_test(&self, other: &BoundingBox) -> BoxRelation {
        self.classify(self.loose_min, self.loose_max, other)
    }

    fn classify(&self, include_min: Vec3, include_max: Vec3, other: &BoundingBox) -> BoxRelation {
        if include_min.cmple(other.min).all() && other.max.cmple(include_max).all() {
            return BoxRelation::Include;
        }
        if other.min.cmple(self.min).all() && self.max.cmple(other.max).all() {
            return BoxRelation::InvInclude;
        }
        if self.min.cmpge(other.max).any() || other.min.cmpge(self.max).any() {
            return BoxRelation::Separate;
        }
        BoxRelation::Intersect
    }
}

#[cfg(test)]
#[path = "bounding_box_tests.rs"]
mod tests;
