//! Spatial render queue: per-layer loose octrees of renderables and lights.

mod render_id_allocator;
mod render_layer;
mod render_layer_manager;
mod render_queue_item;
mod render_queue_node;

pub use render_id_allocator::RenderIdAllocator;
pub use render_layer::{RenderLayer, UpdateOutcome};
pub use render_layer_manager::RenderLayerManager;
pub use render_queue_item::{
    MaterialHandle, MeshHandle, RenderArguments, RenderFlags, RenderId, RenderMode,
    RenderQueueIndex, RenderQueueItem,
};
pub use render_queue_node::{
    NodeLight, RenderQueueContent, RenderQueueNode, RenderQueueTag, RenderQueueTree,
};
