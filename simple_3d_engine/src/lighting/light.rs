/// Light descriptors and the light/box influence test.

use std::fmt;
use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};
use crate::spatial::BoundingBox;

/// Sample value above which a point counts as lit.
pub const LIGHT_THRESHOLD: f32 = 0.1;

/// Identifier handed out by `LightManager::insert` (never 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightId(pub u32);

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "light#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightType {
    Point,
    Spot,
    Directional,
}

impl LightType {
    pub const COUNT: usize = 3;

    pub const ALL: [LightType; Self::COUNT] = [LightType::Point, LightType::Spot, LightType::Directional];

    pub fn index(self) -> usize {
        match self {
            LightType::Point => 0,
            LightType::Spot => 1,
            LightType::Directional => 2,
        }
    }
}

/// How much of a box a light reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightBoxRelation {
    /// Every sample of the box is lit
    Include,
    /// Some samples are lit
    Intersect,
    /// No sample is lit
    Separate,
}

/// GPU layout of a light: three `vec4`s, uploaded as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InnerLightParameters {
    /// xyz: world position, w: intensity
    pub position: Vec4,
    /// rgb: color, w: range
    pub color: Vec4,
    /// xyz: direction, w: spot cutoff (cosine of the cone half-angle)
    pub direction: Vec4,
}

impl InnerLightParameters {
    pub fn new(position: Vec3, intensity: f32, color: Vec3, range: f32, direction: Vec3, cutoff: f32) -> Self {
        Self {
            position: position.extend(intensity),
            color: color.extend(range),
            direction: direction.extend(cutoff),
        }
    }

    /// `intensity * |color|`
    pub fn strength(&self) -> f32 {
        self.position.w * self.color.truncate().length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParameters {
    pub light_type: LightType,
    pub cast_shadow: bool,
    pub inner: InnerLightParameters,
}

impl LightParameters {
    pub fn new(light_type: LightType, cast_shadow: bool, inner: InnerLightParameters) -> Self {
        Self { light_type, cast_shadow, inner }
    }

    pub fn point(position: Vec3, color: Vec3, intensity: f32, range: f32) -> Self {
        Self::new(
            LightType::Point,
            false,
            InnerLightParameters::new(position, intensity, color, range, Vec3::ZERO, 0.0),
        )
    }

    pub fn spot(position: Vec3, direction: Vec3, cutoff: f32, color: Vec3, intensity: f32) -> Self {
        Self::new(
            LightType::Spot,
            false,
            InnerLightParameters::new(position, intensity, color, 0.0, direction, cutoff),
        )
    }

    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self::new(
            LightType::Directional,
            false,
            InnerLightParameters::new(Vec3::ZERO, intensity, color, 0.0, direction, 0.0),
        )
    }

    pub fn position(&self) -> Vec3 {
        self.inner.position.truncate()
    }

    pub fn direction(&self) -> Vec3 {
        self.inner.direction.truncate()
    }

    /// Light reaching `point`.
    ///
    /// Distance attenuation is `1 / (1 + 0.14 d + 0.07 d²)`. Spot lights fade
    /// out over the last 20% of the cutoff. Directional lights do not attenuate.
    pub fn sample(&self, point: Vec3) -> f32 {
        let strength = self.inner.strength();
        if self.light_type == LightType::Directional {
            return strength;
        }

        let to_light = self.position() - point;
        let dist = to_light.length();
        let attenuation = 1.0 / (1.0 + 0.14 * dist + 0.07 * dist * dist);
        if self.light_type == LightType::Point {
            return attenuation * strength;
        }

        let cutoff = self.inner.direction.w;
        let facing = if dist > f32::EPSILON {
            to_light.normalize().dot((-self.direction()).normalize_or_zero())
        } else {
            1.0
        };
        let cone = 1.0 - ((cutoff - facing) / (0.2 * cutoff)).clamp(0.0, 1.0);
        cone * attenuation * strength
    }

    /// Classify `bbox` against this light and return the mean corner sample
    /// as impact.
    ///
    /// Point and spot lights also sample the box point nearest to the light
    /// for classification, so a light inside a large box is never `Separate`.
    pub fn test(&self, bbox: &BoundingBox) -> (LightBoxRelation, f32) {
        let mut lit = 0usize;
        let mut impact = 0.0;

        for corner in bbox.corners() {
            let sample = self.sample(corner);
            if sample > LIGHT_THRESHOLD {
                lit += 1;
            }
            impact += sample;
        }
        impact /= 8.0;

        let nearest_lit = self.light_type != LightType::Directional
            && self.sample(bbox.closest_point(self.position())) > LIGHT_THRESHOLD;

        let relation = match lit {
            8 => LightBoxRelation::Include,
            0 if !nearest_lit => LightBoxRelation::Separate,
            _ => LightBoxRelation::Intersect,
        };
        (relation, impact)
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
