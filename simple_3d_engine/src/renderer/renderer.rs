/// Renderer: owns the render layers and the lights, and runs frames.
///
/// There is no global renderer: the caller owns it and passes it (or
/// `&mut` to it) to whatever needs to register objects or lights.
///
/// A frame walks the enabled layers in creation order; for each layer the
/// `Opaque` queue is culled and drawn, then the `Transparent` queue.

use crate::camera::{Camera, CullStats, Frustum};
use crate::config::RendererConfig;
use crate::error::Result;
use crate::lighting::{LightId, LightManager, LightParameters};
use crate::render_queue::{
    RenderArguments, RenderId, RenderLayer, RenderLayerManager, RenderMode, RenderQueueItem,
    UpdateOutcome,
};
use super::culler::{CameraCuller, OctreeCuller};
use super::drawer::{DrawDispatcher, DrawStats, Drawer, MaterialSortedDrawer};

const SOURCE: &str = "simple3d::Renderer";

/// Statistics of one `render_frame` or `render_shadow_casters` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame counter, starting at 1
    pub frame: u64,
    pub layers_drawn: usize,
    pub cull: CullStats,
    pub draw: DrawStats,
}

pub struct Renderer {
    config: RendererConfig,
    layers: RenderLayerManager,
    lights: LightManager,
    culler: Box<dyn CameraCuller>,
    drawer: Box<dyn Drawer>,
    frame: u64,
    last_stats: FrameStats,
}

impl Renderer {
    /// Create a renderer with the octree culler and the material-sorted
    /// drawer. Fails if the configuration does not validate.
    pub fn new(config: RendererConfig) -> Result<Self> {
        config.render_queue.validate()?;
        crate::engine_info!(
            SOURCE,
            "Renderer created (max depth {}, loose factor {})",
            config.render_queue.max_depth,
            config.render_queue.loose_factor
        );
        Ok(Self {
            config,
            layers: RenderLayerManager::new(config.render_queue),
            lights: LightManager::new(config.lights),
            culler: Box::new(OctreeCuller::new()),
            drawer: Box::new(MaterialSortedDrawer::new()),
            frame: 0,
            last_stats: FrameStats::default(),
        })
    }

    // ===== GETTERS =====

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn layers(&self) -> &RenderLayerManager {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&RenderLayer> {
        self.layers.layer(name)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut RenderLayer> {
        self.layers.layer_mut(name)
    }

    pub fn lights(&self) -> &LightManager {
        &self.lights
    }

    /// Mutable access for buffer upload bookkeeping (`take_dirty`).
    pub fn lights_mut(&mut self) -> &mut LightManager {
        &mut self.lights
    }

    pub fn last_frame_stats(&self) -> &FrameStats {
        &self.last_stats
    }

    // ===== STRATEGIES =====

    pub fn set_culler(&mut self, culler: Box<dyn CameraCuller>) {
        self.culler = culler;
    }

    pub fn set_drawer(&mut self, drawer: Box<dyn Drawer>) {
        self.drawer = drawer;
    }

    // ===== LAYERS =====

    /// Create a layer. Lights already registered are indexed in it.
    pub fn create_layer(&mut self, name: &str) -> Result<&mut RenderLayer> {
        let layer = self.layers.create_layer(name)?;
        for (id, params) in self.lights.iter() {
            layer.insert_light(id, *params);
        }
        Ok(layer)
    }

    pub fn remove_layer(&mut self, name: &str) -> Option<RenderLayer> {
        self.layers.remove_layer(name)
    }

    // ===== OBJECTS =====

    pub fn allocate_render_id(&mut self) -> RenderId {
        self.layers.allocate_render_id()
    }

    pub fn release_render_id(&mut self, id: RenderId) {
        self.layers.release_render_id(id);
    }

    pub fn insert_object(&mut self, layer: &str, mode: RenderMode, item: RenderQueueItem) -> Result<()> {
        self.layers.require_layer_mut(layer)?.insert_object(mode, item);
        Ok(())
    }

    pub fn update_object(
        &mut self,
        layer: &str,
        mode: RenderMode,
        id: RenderId,
        args: RenderArguments,
    ) -> Result<Option<UpdateOutcome>> {
        Ok(self.layers.require_layer_mut(layer)?.update_object(mode, id, args))
    }

    pub fn remove_object(&mut self, layer: &str, mode: RenderMode, id: RenderId) -> Result<Option<RenderQueueItem>> {
        Ok(self.layers.require_layer_mut(layer)?.remove_object(mode, id))
    }

    // ===== LIGHTS =====

    /// Register a light in the light buffers and in every layer.
    pub fn insert_light(&mut self, params: LightParameters) -> Result<LightId> {
        let id = self.lights.insert(params)?;
        for layer in self.layers.iter_mut() {
            layer.insert_light(id, params);
        }
        Ok(id)
    }

    pub fn update_light(&mut self, id: LightId, params: LightParameters) -> Result<()> {
        self.lights.update(id, params)?;
        for layer in self.layers.iter_mut() {
            layer.update_light(id, params);
        }
        Ok(())
    }

    pub fn remove_light(&mut self, id: LightId) -> Option<LightParameters> {
        let params = self.lights.remove(id)?;
        for layer in self.layers.iter_mut() {
            layer.remove_light(id);
        }
        Some(params)
    }

    // ===== FRAMES =====

    /// Cull and draw the `Opaque` then `Transparent` queues of every enabled
    /// layer against the camera frustum.
    pub fn render_frame(&mut self, camera: &Camera, dispatcher: &mut dyn DrawDispatcher) -> Result<FrameStats> {
        let stats = self.run(camera.frustum(), &[RenderMode::Opaque, RenderMode::Transparent], dispatcher)?;
        crate::engine_trace!(
            SOURCE,
            "Frame {}: {} layers, {} nodes visited, {} pruned, {} items accepted, {} draws, {} material switches",
            stats.frame,
            stats.layers_drawn,
            stats.cull.nodes_visited,
            stats.cull.nodes_pruned,
            stats.cull.items_accepted,
            stats.draw.draw_calls,
            stats.draw.material_switches
        );
        Ok(stats)
    }

    /// Cull and draw the `OpaqueShadow` queues against a light frustum.
    pub fn render_shadow_casters(&mut self, frustum: &Frustum, dispatcher: &mut dyn DrawDispatcher) -> Result<FrameStats> {
        let stats = self.run(frustum, &[RenderMode::OpaqueShadow], dispatcher)?;
        crate::engine_trace!(
            SOURCE,
            "Shadow pass {}: {} casters drawn",
            stats.frame,
            stats.draw.draw_calls
        );
        Ok(stats)
    }

    fn run(&mut self, frustum: &Frustum, modes: &[RenderMode], dispatcher: &mut dyn DrawDispatcher) -> Result<FrameStats> {
        self.frame += 1;
        let mut stats = FrameStats { frame: self.frame, ..Default::default() };
        let max_lights = self.config.render_queue.max_lights_per_item;

        for layer in self.layers.iter().filter(|layer| layer.is_enabled()) {
            for &mode in modes {
                let view = self.culler.cull(layer, mode, frustum);
                stats.cull.accumulate(view.stats());
                let drawn = self.drawer.draw(layer, view, max_lights, dispatcher)?;
                stats.draw.accumulate(&drawn);
            }
            stats.layers_drawn += 1;
        }

        self.last_stats = stats;
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
