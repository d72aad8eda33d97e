/// RenderLayerManager: named render layers and render id allocation.
///
/// Owned by the `Renderer`; there is no global instance. Layers are kept in
/// creation order, which is the order they are drawn in.

use crate::config::RenderQueueConfig;
use crate::error::Result;
use super::render_id_allocator::RenderIdAllocator;
use super::render_layer::RenderLayer;
use super::render_queue_item::RenderId;

const SOURCE: &str = "simple3d::RenderLayerManager";

pub struct RenderLayerManager {
    config: RenderQueueConfig,
    layers: Vec<RenderLayer>,
    ids: RenderIdAllocator,
}

impl RenderLayerManager {
    pub fn new(config: RenderQueueConfig) -> Self {
        Self {
            config,
            layers: Vec::new(),
            ids: RenderIdAllocator::new(),
        }
    }

    pub fn config(&self) -> &RenderQueueConfig {
        &self.config
    }

    // ===== LAYERS =====

    /// Create an empty layer. Names must be unique.
    pub fn create_layer(&mut self, name: &str) -> Result<&mut RenderLayer> {
        if self.layer(name).is_some() {
            crate::engine_bail!(SOURCE, InvalidArgument, "Render layer '{}' already exists", name);
        }
        self.layers.push(RenderLayer::new(name, self.config));
        crate::engine_debug!(SOURCE, "Created render layer '{}'", name);
        let last = self.layers.len() - 1;
        Ok(&mut self.layers[last])
    }

    pub fn remove_layer(&mut self, name: &str) -> Option<RenderLayer> {
        let position = self.layers.iter().position(|layer| layer.name() == name)?;
        Some(self.layers.remove(position))
    }

    pub fn layer(&self, name: &str) -> Option<&RenderLayer> {
        self.layers.iter().find(|layer| layer.name() == name)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut RenderLayer> {
        self.layers.iter_mut().find(|layer| layer.name() == name)
    }

    /// Like `layer_mut`, but a missing layer is an error
    pub fn require_layer_mut(&mut self, name: &str) -> Result<&mut RenderLayer> {
        match self.layers.iter_mut().find(|layer| layer.name() == name) {
            Some(layer) => Ok(layer),
            None => Err(crate::engine_err!(SOURCE, NotFound, "Render layer '{}' does not exist", name)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderLayer> {
        self.layers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RenderLayer> {
        self.layers.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    // ===== RENDER IDS =====

    pub fn allocate_render_id(&mut self) -> RenderId {
        self.ids.alloc()
    }

    pub fn release_render_id(&mut self, id: RenderId) {
        self.ids.free(id);
    }

    pub fn render_id_count(&self) -> u32 {
        self.ids.len()
    }
}

impl Default for RenderLayerManager {
    fn default() -> Self {
        Self::new(RenderQueueConfig::default())
    }
}

#[cfg(test)]
#[path = "render_layer_manager_tests.rs"]
mod tests;
