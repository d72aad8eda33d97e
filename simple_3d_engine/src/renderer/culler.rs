/// Camera culling strategies.
///
/// A CameraCuller determines which items of one render queue are visible
/// from a frustum. `OctreeCuller` walks the layer's loose octree and skips
/// whole subtrees; `BruteForceCuller` tests every item and serves as the
/// reference for completeness checks.

use crate::camera::{Frustum, FrustumRelation, RenderView};
use crate::render_queue::{RenderLayer, RenderMode, RenderQueueTree};
use crate::spatial::OctNodeKey;

/// Strategy for determining visible items from a frustum.
///
/// Called once per queue per frame before drawing. The returned RenderView
/// is ephemeral and consumed by a Drawer.
///
/// `&mut self` allows stateful implementations (e.g. caching)
/// to maintain state across frames.
pub trait CameraCuller: Send + Sync {
    /// Cull the `mode` queue of a layer against the frustum.
    fn cull(&mut self, layer: &RenderLayer, mode: RenderMode, frustum: &Frustum) -> RenderView;
}

/// Hierarchical culler over the loose octree.
///
/// Depth-first with an `include` flag: once a node's loose box is inside the
/// frustum, its whole subtree is accepted without further tests. Node boxes
/// are classified with their loose bounds since items are placed by loose
/// inclusion. The root is never classified: it also holds the items larger
/// than the world, so its own items are always tested one by one.
#[derive(Debug, Default)]
pub struct OctreeCuller;

impl OctreeCuller {
    pub fn new() -> Self {
        Self
    }

    fn visit(
        tree: &RenderQueueTree,
        key: OctNodeKey,
        include: bool,
        mode: RenderMode,
        frustum: &Frustum,
        view: &mut RenderView,
    ) {
        let node = &tree[key];
        view.stats_mut().nodes_visited += 1;

        for item in node.content.objects(mode) {
            if include {
                view.push(*item, key);
                continue;
            }
            view.stats_mut().items_tested += 1;
            if frustum.test(item.bounding_box()) != FrustumRelation::Separate {
                view.push(*item, key);
            }
        }

        let Some(children) = node.children() else {
            return;
        };
        for &child in children {
            // empty subtrees have nothing to offer
            if tree[child].content.subtree_objcnt() == 0 {
                continue;
            }
            if include {
                Self::visit(tree, child, true, mode, frustum, view);
                continue;
            }
            match frustum.loose_test(tree[child].bbox()) {
                FrustumRelation::Include => Self::visit(tree, child, true, mode, frustum, view),
                FrustumRelation::Intersect => Self::visit(tree, child, false, mode, frustum, view),
                FrustumRelation::Separate => view.stats_mut().nodes_pruned += 1,
            }
        }
    }
}

impl CameraCuller for OctreeCuller {
    fn cull(&mut self, layer: &RenderLayer, mode: RenderMode, frustum: &Frustum) -> RenderView {
        let mut view = RenderView::new(mode, *frustum);
        let tree = layer.tree();
        Self::visit(tree, tree.root(), false, mode, frustum, &mut view);
        view
    }
}

/// Brute-force culler: tests every item of the queue individually.
///
/// Suitable for small layers or as a baseline for comparison.
#[derive(Debug, Default)]
pub struct BruteForceCuller;

impl BruteForceCuller {
    pub fn new() -> Self {
        Self
    }
}

impl CameraCuller for BruteForceCuller {
    fn cull(&mut self, layer: &RenderLayer, mode: RenderMode, frustum: &Frustum) -> RenderView {
        let mut view = RenderView::new(mode, *frustum);
        for (key, node) in layer.tree().iter() {
            view.stats_mut().nodes_visited += 1;
            for item in node.content.objects(mode) {
                view.stats_mut().items_tested += 1;
                if frustum.test(item.bounding_box()) != FrustumRelation::Separate {
                    view.push(*item, key);
                }
            }
        }
        view
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
