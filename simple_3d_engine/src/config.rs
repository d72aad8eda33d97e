/// Configuration for the spatial render queue and light manager.
///
/// Plain structs with public fields and `Default`. Call `validate()` (or let
/// `Renderer::new` do it) before use.

use glam::Vec3;
use crate::error::Result;

const SOURCE: &str = "simple3d::Config";

/// Render queue (octree) configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderQueueConfig {
    /// World-space bounds of every layer's root node (min, max)
    pub world_bounds: (Vec3, Vec3),

    /// Maximum octree depth (root is depth 0)
    pub max_depth: u32,

    /// Depth from which a leaf only splits once it holds more than
    /// `split_threshold` items. `None` splits eagerly.
    pub shallow_depth: Option<u32>,

    /// Items a leaf may hold before it splits (with `shallow_depth` only)
    pub split_threshold: usize,

    /// Loose factor of node bounds (1.0 = tight)
    pub loose_factor: f32,

    /// Lights handed to the dispatcher per drawn item
    pub max_lights_per_item: usize,
}

impl Default for RenderQueueConfig {
    fn default() -> Self {
        Self {
            world_bounds: (Vec3::splat(-1000.0), Vec3::splat(1000.0)),
            max_depth: 10,
            shallow_depth: None,
            split_threshold: 4,
            loose_factor: 1.1,
            max_lights_per_item: 8,
        }
    }
}

impl RenderQueueConfig {
    /// Reject configurations the octree cannot work with
    pub fn validate(&self) -> Result<()> {
        let (min, max) = self.world_bounds;
        if !min.is_finite() || !max.is_finite() || min.cmpgt(max).any() {
            crate::engine_bail!(
                SOURCE,
                InvalidConfig,
                "world_bounds min {:?} must be finite and <= max {:?}",
                min,
                max
            );
        }
        if !self.loose_factor.is_finite() || self.loose_factor < 1.0 {
            crate::engine_bail!(
                SOURCE,
                InvalidConfig,
                "loose_factor must be a finite value >= 1.0 (got {})",
                self.loose_factor
            );
        }
        if self.shallow_depth.is_some() && self.split_threshold == 0 {
            crate::engine_bail!(SOURCE, InvalidConfig, "split_threshold must be > 0 with shallow_depth");
        }
        Ok(())
    }
}

/// Per-type light capacities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightManagerConfig {
    pub max_directional: usize,
    pub max_point: usize,
    pub max_spot: usize,
}

impl Default for LightManagerConfig {
    fn default() -> Self {
        Self {
            max_directional: 8,
            max_point: 512,
            max_spot: 512,
        }
    }
}

/// Renderer configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RendererConfig {
    pub render_queue: RenderQueueConfig,
    pub lights: LightManagerConfig,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
