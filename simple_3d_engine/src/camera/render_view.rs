/// RenderView: result of frustum culling one render queue.
///
/// Created by a `CameraCuller`. Contains a snapshot of the frustum used,
/// the visible items (copied out of the queue with the node they were found
/// in, for light lookup) and the traversal statistics.
///
/// Ephemeral: lives for one frame.

use crate::render_queue::{RenderMode, RenderQueueItem};
use crate::spatial::OctNodeKey;
use super::frustum::Frustum;

/// A queue item accepted by culling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleItem {
    pub item: RenderQueueItem,
    /// Node the item is stored in
    pub node: OctNodeKey,
}

/// Counters of one culling traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    pub nodes_visited: usize,
    /// Subtrees skipped because their node box was outside the frustum
    pub nodes_pruned: usize,
    /// Items whose box was tested individually
    pub items_tested: usize,
    pub items_accepted: usize,
}

impl CullStats {
    pub fn accumulate(&mut self, other: &CullStats) {
        self.nodes_visited += other.nodes_visited;
        self.nodes_pruned += other.nodes_pruned;
        self.items_tested += other.items_tested;
        self.items_accepted += other.items_accepted;
    }
}

#[derive(Debug, Clone)]
pub struct RenderView {
    mode: RenderMode,
    frustum: Frustum,
    visible: Vec<VisibleItem>,
    stats: CullStats,
}

impl RenderView {
    pub(crate) fn new(mode: RenderMode, frustum: Frustum) -> Self {
        Self {
            mode,
            frustum,
            visible: Vec::new(),
            stats: CullStats::default(),
        }
    }

    pub(crate) fn push(&mut self, item: RenderQueueItem, node: OctNodeKey) {
        self.visible.push(VisibleItem { item, node });
        self.stats.items_accepted += 1;
    }

    pub(crate) fn stats_mut(&mut self) -> &mut CullStats {
        &mut self.stats
    }

    /// Queue this view was culled from.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Frustum snapshot at the time of culling.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn visible(&self) -> &[VisibleItem] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn stats(&self) -> &CullStats {
        &self.stats
    }

    /// Take the visible items out of the view, e.g. to sort them in place.
    pub fn into_visible(self) -> Vec<VisibleItem> {
        self.visible
    }
}

#[cfg(test)]
#[path = "render_view_tests.rs"]
mod tests;
