use glam::{Mat4, Vec3};
use slotmap::KeyData;
use crate::render_queue::{MaterialHandle, MeshHandle, RenderArguments, RenderId};
use crate::spatial::BoundingBox;
use super::*;

fn test_frustum() -> Frustum {
    Frustum::from_view_projection(&Mat4::IDENTITY)
}

fn test_item(id: u32) -> RenderQueueItem {
    let args = RenderArguments {
        transform: Mat4::IDENTITY,
        bounding_box: BoundingBox::from_center(Vec3::ZERO, Vec3::ONE),
    };
    RenderQueueItem::new(RenderId(id), MaterialHandle(0), MeshHandle(id), args, 3)
}

fn test_node() -> OctNodeKey {
    OctNodeKey::from(KeyData::from_ffi(1))
}

#[test]
fn test_render_view_new_is_empty() {
    let view = RenderView::new(RenderMode::Opaque, test_frustum());
    assert_eq!(view.mode(), RenderMode::Opaque);
    assert!(view.is_empty());
    assert_eq!(view.visible_count(), 0);
    assert_eq!(*view.stats(), CullStats::default());
}

#[test]
fn test_push_counts_accepted() {
    let mut view = RenderView::new(RenderMode::Transparent, test_frustum());
    view.push(test_item(1), test_node());
    view.push(test_item(2), test_node());

    assert_eq!(view.visible_count(), 2);
    assert_eq!(view.stats().items_accepted, 2);
    assert_eq!(view.visible()[1].item.id, RenderId(2));
    assert_eq!(view.visible()[0].node, test_node());
}

#[test]
fn test_frustum_snapshot() {
    let frustum = test_frustum();
    let view = RenderView::new(RenderMode::Opaque, frustum);
    assert_eq!(*view.frustum(), frustum);
}

#[test]
fn test_stats_accumulate() {
    let mut total = CullStats { nodes_visited: 3, nodes_pruned: 1, items_tested: 5, items_accepted: 2 };
    total.accumulate(&CullStats { nodes_visited: 2, nodes_pruned: 0, items_tested: 1, items_accepted: 1 });
    assert_eq!(total, CullStats { nodes_visited: 5, nodes_pruned: 1, items_tested: 6, items_accepted: 3 });
}

#[test]
fn test_into_visible() {
    let mut view = RenderView::new(RenderMode::Opaque, test_frustum());
    view.push(test_item(4), test_node());
    let items = view.into_visible();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item.mesh, MeshHandle(4));
}
