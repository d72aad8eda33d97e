/// Drawing strategies.
///
/// A Drawer hands the visible items of a RenderView to a caller-supplied
/// `DrawDispatcher`, together with the strongest lights of the node each
/// item was found in. Implementations differ in submission order.

use rdst::{RadixKey, RadixSort};
use rustc_hash::FxHashMap;
use crate::camera::{RenderView, VisibleItem};
use crate::error::Result;
use crate::render_queue::{MaterialHandle, NodeLight, RenderLayer, RenderQueueItem};
use crate::spatial::OctNodeKey;

/// Receives draw submissions. Implemented by the caller (GPU backend,
/// recorder, logger...).
pub trait DrawDispatcher {
    /// Called before the first item of a run sharing `material`.
    fn begin_material(&mut self, _material: MaterialHandle) -> Result<()> {
        Ok(())
    }

    /// Draw one item with the lights affecting it, strongest first.
    fn draw(&mut self, item: &RenderQueueItem, lights: &[NodeLight]) -> Result<()>;
}

/// Counters of one or more draw passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub draw_calls: usize,
    pub material_switches: usize,
    pub vertices: u64,
}

impl DrawStats {
    pub fn accumulate(&mut self, other: &DrawStats) {
        self.draw_calls += other.draw_calls;
        self.material_switches += other.material_switches;
        self.vertices += other.vertices;
    }
}

/// Strategy for drawing the visible items of a view.
///
/// Drawing is stateless: the same Drawer can be reused across layers and
/// frames.
pub trait Drawer: Send + Sync {
    /// Submit every visible item of `view` to the dispatcher, each with at
    /// most `max_lights` lights looked up in `layer`.
    fn draw(
        &self,
        layer: &RenderLayer,
        view: RenderView,
        max_lights: usize,
        dispatcher: &mut dyn DrawDispatcher,
    ) -> Result<DrawStats>;
}

/// Submit items in the given order, opening a new material run whenever
/// the material changes.
fn submit(
    layer: &RenderLayer,
    items: &[VisibleItem],
    max_lights: usize,
    dispatcher: &mut dyn DrawDispatcher,
) -> Result<DrawStats> {
    let mut stats = DrawStats::default();
    let mut current: Option<MaterialHandle> = None;
    // items of the same node share their light list
    let mut lights: FxHashMap<OctNodeKey, Vec<NodeLight>> = FxHashMap::default();

    for visible in items {
        let item = &visible.item;
        if current != Some(item.material) {
            dispatcher.begin_material(item.material)?;
            current = Some(item.material);
            stats.material_switches += 1;
        }

        let node_lights = lights.entry(visible.node).or_insert_with(|| {
            let mut found = layer.lights_for_node(visible.node);
            found.truncate(max_lights);
            found
        });
        dispatcher.draw(item, node_lights)?;

        stats.draw_calls += 1;
        stats.vertices += u64::from(item.vertex_count);
    }

    Ok(stats)
}

/// Forward drawer: draws items in traversal order (no sorting).
#[derive(Debug, Default)]
pub struct ForwardDrawer;

impl ForwardDrawer {
    pub fn new() -> Self {
        Self
    }
}

impl Drawer for ForwardDrawer {
    fn draw(
        &self,
        layer: &RenderLayer,
        view: RenderView,
        max_lights: usize,
        dispatcher: &mut dyn DrawDispatcher,
    ) -> Result<DrawStats> {
        submit(layer, view.visible(), max_lights, dispatcher)
    }
}

/// Sort key: material in the high half, traversal position in the low
/// half, so runs keep traversal order within a material.
#[derive(Debug, Clone, Copy)]
struct MaterialSortKey(u64);

impl MaterialSortKey {
    fn new(material: MaterialHandle, position: usize) -> Self {
        Self((u64::from(material.0) << 32) | (position as u64 & 0xFFFF_FFFF))
    }

    fn position(self) -> usize {
        (self.0 & 0xFFFF_FFFF) as usize
    }
}

impl RadixKey for MaterialSortKey {
    const LEVELS: usize = 8;

    #[inline]
    fn get_level(&self, level: usize) -> u8 {
        (self.0 >> (level * 8)) as u8
    }
}

/// Material-sorted drawer: groups items by material with a radix sort so
/// each material is bound once per view.
#[derive(Debug, Default)]
pub struct MaterialSortedDrawer;

impl MaterialSortedDrawer {
    pub fn new() -> Self {
        Self
    }
}

impl Drawer for MaterialSortedDrawer {
    fn draw(
        &self,
        layer: &RenderLayer,
        view: RenderView,
        max_lights: usize,
        dispatcher: &mut dyn DrawDispatcher,
    ) -> Result<DrawStats> {
        let visible = view.into_visible();
        let mut keys: Vec<MaterialSortKey> = visible
            .iter()
            .enumerate()
            .map(|(position, item)| MaterialSortKey::new(item.item.material, position))
            .collect();
        keys.radix_sort_unstable();

        let sorted: Vec<VisibleItem> = keys.iter().map(|key| visible[key.position()]).collect();
        submit(layer, &sorted, max_lights, dispatcher)
    }
}

#[cfg(test)]
#[path = "drawer_tests.rs"]
mod tests;
