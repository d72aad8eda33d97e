/// Payloads of the render queue octree nodes.

use crate::lighting::{LightBoxRelation, LightId};
use crate::spatial::{OctNode, Octree};
use super::render_queue_item::{RenderMode, RenderQueueItem};

/// A light recorded at a node, with its impact on the node's box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLight {
    pub id: LightId,
    pub impact: f32,
    pub relation: LightBoxRelation,
}

#[derive(Debug, Default)]
pub struct RenderQueueContent {
    pub(crate) objects: [Vec<RenderQueueItem>; RenderMode::COUNT],
    /// Sorted by impact, strongest first
    pub(crate) lights: Vec<NodeLight>,
    pub(crate) subtree_objcnt: usize,
}

impl RenderQueueContent {
    pub fn objects(&self, mode: RenderMode) -> &[RenderQueueItem] {
        &self.objects[mode.index()]
    }

    pub fn lights(&self) -> &[NodeLight] {
        &self.lights
    }

    /// Items stored in this node and all of its descendants
    pub fn subtree_objcnt(&self) -> usize {
        self.subtree_objcnt
    }

    /// Items stored in this node itself, all queues together
    pub fn own_count(&self) -> usize {
        self.objects.iter().map(Vec::len).sum()
    }

    /// Insert keeping the impact order (equal impacts keep insertion order).
    pub(crate) fn record_light(&mut self, light: NodeLight) {
        let at = self.lights.partition_point(|l| l.impact >= light.impact);
        self.lights.insert(at, light);
    }
}

/// Lights still to be pushed into this node's children when it splits.
#[derive(Debug, Default)]
pub struct RenderQueueTag {
    pub(crate) pending_lights: Vec<LightId>,
}

impl RenderQueueTag {
    pub fn pending_lights(&self) -> &[LightId] {
        &self.pending_lights
    }

    pub fn is_empty(&self) -> bool {
        self.pending_lights.is_empty()
    }
}

pub type RenderQueueNode = OctNode<RenderQueueTag, RenderQueueContent>;
pub type RenderQueueTree = Octree<RenderQueueTag, RenderQueueContent>;
