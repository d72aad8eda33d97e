/// RenderLayer: spatial render queue of one layer.
///
/// A loose octree whose nodes hold, per render mode, the items whose box fits
/// the node but none of its children. Every item is reachable in O(1) through
/// `object_index`, which records its node and position in the node's list.
///
/// Lights are indexed in the same tree: a light is recorded at the highest
/// nodes it fully covers, and at every node it partially covers down to the
/// leaves. Leaves keep partially covering lights in their tag and push them
/// into their children when they split.
///
/// Invariants:
/// - every non-root node's loose bounds include the boxes of its items
/// - `subtree_objcnt` counts the items of a node and of all its descendants
/// - `object_index` and the node lists describe the same set of items

use rustc_hash::FxHashMap;
use crate::config::RenderQueueConfig;
use crate::lighting::{LightBoxRelation, LightId, LightParameters};
use crate::spatial::{BoundingBox, BoxRelation, OctNodeKey};
use super::render_queue_item::{RenderArguments, RenderMode, RenderQueueIndex, RenderQueueItem, RenderId};
use super::render_queue_node::{NodeLight, RenderQueueTree};

const SOURCE: &str = "simple3d::RenderLayer";

/// What `update_object` did with an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Item stays in its node
    Unchanged,
    /// Item moved down into a child of its node
    Descended,
    /// Item left its node's loose bounds and was reinserted from the root
    Reinserted,
}

pub struct RenderLayer {
    name: String,
    enabled: bool,
    config: RenderQueueConfig,
    tree: RenderQueueTree,
    object_index: [FxHashMap<RenderId, RenderQueueIndex>; RenderMode::COUNT],
    lights: FxHashMap<LightId, LightParameters>,
    /// Every node referencing a light, in its list or its tag
    light_index: FxHashMap<LightId, Vec<OctNodeKey>>,
}

impl RenderLayer {
    pub fn new(name: impl Into<String>, config: RenderQueueConfig) -> Self {
        let (min, max) = config.world_bounds;
        Self {
            name: name.into(),
            enabled: true,
            config,
            tree: RenderQueueTree::new(BoundingBox::new(min, max, config.loose_factor)),
            object_index: Default::default(),
            lights: FxHashMap::default(),
            light_index: FxHashMap::default(),
        }
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn config(&self) -> &RenderQueueConfig {
        &self.config
    }

    pub fn tree(&self) -> &RenderQueueTree {
        &self.tree
    }

    pub fn object_index(&self, mode: RenderMode, id: RenderId) -> Option<RenderQueueIndex> {
        self.object_index[mode.index()].get(&id).copied()
    }

    pub fn object(&self, mode: RenderMode, id: RenderId) -> Option<&RenderQueueItem> {
        let index = self.object_index(mode, id)?;
        self.tree.node(index.node)?.content.objects(mode).get(index.slot)
    }

    pub fn contains_object(&self, mode: RenderMode, id: RenderId) -> bool {
        self.object_index[mode.index()].contains_key(&id)
    }

    pub fn object_count(&self, mode: RenderMode) -> usize {
        self.object_index[mode.index()].len()
    }

    pub fn object_ids(&self, mode: RenderMode) -> impl Iterator<Item = RenderId> + '_ {
        self.object_index[mode.index()].keys().copied()
    }

    pub fn light(&self, id: LightId) -> Option<&LightParameters> {
        self.lights.get(&id)
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Nodes currently referencing a light
    pub fn light_nodes(&self, id: LightId) -> &[OctNodeKey] {
        self.light_index.get(&id).map_or(&[], Vec::as_slice)
    }

    // ===== OBJECTS =====

    /// Insert an item into the `mode` queue. An item with the same id
    /// already in that queue is replaced.
    pub fn insert_object(&mut self, mode: RenderMode, item: RenderQueueItem) {
        if self.contains_object(mode, item.id) {
            crate::engine_warn!(
                SOURCE,
                "Render item {} already in {:?} queue of layer '{}', replacing it",
                item.id,
                mode,
                self.name
            );
            self.remove_object(mode, item.id);
        }
        let root = self.tree.root();
        self.insert_from(root, mode, item);
    }

    /// Remove an item. Unknown ids are ignored.
    pub fn remove_object(&mut self, mode: RenderMode, id: RenderId) -> Option<RenderQueueItem> {
        let Some((item, emptied)) = self.detach(mode, id) else {
            crate::engine_debug!(SOURCE, "Remove of unknown render item {} ({:?}) ignored", id, mode);
            return None;
        };

        if let Some(emptied) = emptied {
            self.collapse(emptied);
            // One level up, release the father's fan-out once it is empty too.
            if let Some(father) = self.tree.father(emptied) {
                let node = &self.tree[father];
                if node.content.subtree_objcnt() == node.content.own_count() {
                    self.collapse(father);
                }
            }
        }
        Some(item)
    }

    /// Store new arguments for an item and relocate it if its box moved out
    /// of its node or now fits a child. Unknown ids return `None`.
    pub fn update_object(&mut self, mode: RenderMode, id: RenderId, args: RenderArguments) -> Option<UpdateOutcome> {
        let m = mode.index();
        let Some(index) = self.object_index[m].get(&id).copied() else {
            crate::engine_debug!(SOURCE, "Update of unknown render item {} ({:?}) ignored", id, mode);
            return None;
        };

        self.tree[index.node].content.objects[m][index.slot].args = args;
        let bbox = args.bounding_box;

        let node = &self.tree[index.node];
        if !node.is_root() && node.bbox().loose_test(&bbox) != BoxRelation::Include {
            if let Some(item) = self.remove_object(mode, id) {
                self.insert_object(mode, item);
            }
            return Some(UpdateOutcome::Reinserted);
        }

        if node.depth() >= self.config.max_depth {
            return Some(UpdateOutcome::Unchanged);
        }

        let Some(octant) = self.tree.sub_node_test(index.node, &bbox) else {
            return Some(UpdateOutcome::Unchanged);
        };

        if self.tree.is_leaf(index.node) {
            if !self.should_split(index.node, 0) {
                return Some(UpdateOutcome::Unchanged);
            }
            self.split_node(index.node);
            // the split already moved the occupants that fit a child
            if self.object_index[m].get(&id).map(|i| i.node) != Some(index.node) {
                return Some(UpdateOutcome::Descended);
            }
        }

        let Some(child) = self.tree.children(index.node).map(|children| children[octant]) else {
            return Some(UpdateOutcome::Unchanged);
        };
        if let Some((item, _)) = self.detach(mode, id) {
            self.insert_from(child, mode, item);
        }
        Some(UpdateOutcome::Descended)
    }

    /// Drop every item and light, keeping only an empty root.
    pub fn clear(&mut self) {
        let (min, max) = self.config.world_bounds;
        self.tree = RenderQueueTree::new(BoundingBox::new(min, max, self.config.loose_factor));
        self.object_index = Default::default();
        self.lights.clear();
        self.light_index.clear();
    }

    // ===== LIGHTS =====

    /// Index a light. A light with the same id is replaced.
    pub fn insert_light(&mut self, id: LightId, params: LightParameters) {
        if self.lights.contains_key(&id) {
            self.remove_light(id);
        }
        self.lights.insert(id, params);
        let root = self.tree.root();
        self.insert_light_at(root, id, &params);
    }

    pub fn remove_light(&mut self, id: LightId) -> Option<LightParameters> {
        let params = self.lights.remove(&id)?;
        for node in self.light_index.remove(&id).unwrap_or_default() {
            if let Some(node) = self.tree.node_mut(node) {
                node.content.lights.retain(|light| light.id != id);
                node.tag.pending_lights.retain(|pending| *pending != id);
            }
        }
        Some(params)
    }

    /// Re-index a light with new parameters. Returns `false` for unknown ids.
    pub fn update_light(&mut self, id: LightId, params: LightParameters) -> bool {
        if self.remove_light(id).is_none() {
            crate::engine_debug!(SOURCE, "Update of unknown {} ignored", id);
            return false;
        }
        self.insert_light(id, params);
        true
    }

    /// Lights affecting a node: its own list plus the lights fully covering
    /// one of its ancestors, strongest first.
    pub fn lights_for_node(&self, node: OctNodeKey) -> Vec<NodeLight> {
        let mut lights: Vec<NodeLight> = Vec::new();
        for (depth, key) in self.tree.ancestors(node).enumerate() {
            let own = self.tree[key].content.lights();
            if depth == 0 {
                lights.extend_from_slice(own);
            } else {
                lights.extend(own.iter().filter(|light| light.relation == LightBoxRelation::Include));
            }
        }
        lights.sort_by(|a, b| b.impact.total_cmp(&a.impact));
        lights
    }

    /// The `k` strongest lights for a box, looked up at the node the box
    /// would be stored in.
    pub fn lights_for_box(&self, bbox: &BoundingBox, k: usize) -> Vec<NodeLight> {
        let mut node = self.tree.root();
        while let Some(children) = self.tree.children(node) {
            match self.tree.sub_node_test(node, bbox) {
                Some(octant) => node = children[octant],
                None => break,
            }
        }
        let mut lights = self.lights_for_node(node);
        lights.truncate(k);
        lights
    }

    // ===== INTERNAL: OBJECTS =====

    fn insert_from(&mut self, start: OctNodeKey, mode: RenderMode, item: RenderQueueItem) {
        let bbox = item.args.bounding_box;
        let mut node = start;
        while self.tree[node].depth() < self.config.max_depth {
            let Some(octant) = self.tree.sub_node_test(node, &bbox) else {
                break;
            };
            if self.tree.is_leaf(node) {
                if !self.should_split(node, 1) {
                    break;
                }
                self.split_node(node);
            }
            match self.tree.children(node) {
                Some(children) => node = children[octant],
                None => break,
            }
        }
        self.attach(node, mode, item);
    }

    /// Whether a leaf may split to receive `incoming` more items.
    fn should_split(&self, node: OctNodeKey, incoming: usize) -> bool {
        match self.config.shallow_depth {
            None => true,
            Some(shallow_depth) => {
                let node = &self.tree[node];
                node.depth() < shallow_depth
                    || node.content.own_count() + incoming > self.config.split_threshold
            }
        }
    }

    fn attach(&mut self, node: OctNodeKey, mode: RenderMode, item: RenderQueueItem) {
        let m = mode.index();
        let id = item.id;
        let list = &mut self.tree[node].content.objects[m];
        list.push(item);
        let slot = list.len() - 1;

        let mut cursor = Some(node);
        while let Some(key) = cursor {
            let current = &mut self.tree[key];
            current.content.subtree_objcnt += 1;
            cursor = current.father();
        }

        self.object_index[m].insert(id, RenderQueueIndex { node, mode, slot });
    }

    /// Take an item out of its node. Returns it with the highest node whose
    /// subtree became empty.
    fn detach(&mut self, mode: RenderMode, id: RenderId) -> Option<(RenderQueueItem, Option<OctNodeKey>)> {
        let m = mode.index();
        let index = self.object_index[m].remove(&id)?;

        let list = &mut self.tree[index.node].content.objects[m];
        let item = list.swap_remove(index.slot);
        let moved = list.get(index.slot).map(|moved| moved.id);
        if let Some(moved) = moved {
            if let Some(record) = self.object_index[m].get_mut(&moved) {
                record.slot = index.slot;
            }
        }

        let mut emptied = None;
        let mut cursor = Some(index.node);
        while let Some(key) = cursor {
            let current = &mut self.tree[key];
            current.content.subtree_objcnt -= 1;
            if current.content.subtree_objcnt == 0 {
                emptied = Some(key);
            }
            cursor = current.father();
        }

        Some((item, emptied))
    }

    /// Materialize the children of a leaf, push its pending lights into them
    /// and move down the occupants that fit a child.
    fn split_node(&mut self, node: OctNodeKey) {
        if !self.tree.split(node) {
            return;
        }
        let Some(children) = self.tree.children(node).copied() else {
            return;
        };
        crate::engine_trace!(
            SOURCE,
            "Layer '{}': split node at depth {}",
            self.name,
            self.tree[node].depth()
        );

        let pending = std::mem::take(&mut self.tree[node].tag.pending_lights);
        for id in pending {
            if let Some(params) = self.lights.get(&id).copied() {
                for child in children {
                    self.insert_light_at(child, id, &params);
                }
            }
        }

        for mode in RenderMode::ALL {
            let movable: Vec<(RenderId, usize)> = self.tree[node]
                .content
                .objects(mode)
                .iter()
                .filter_map(|item| {
                    self.tree
                        .sub_node_test(node, item.bounding_box())
                        .map(|octant| (item.id, octant))
                })
                .collect();

            for (id, octant) in movable {
                if let Some((item, _)) = self.detach(mode, id) {
                    self.insert_from(children[octant], mode, item);
                }
            }
        }
    }

    /// Drop the children of `node` and forget them in the light index.
    fn collapse(&mut self, node: OctNodeKey) {
        let removed = self.tree.combine(node);
        if removed.is_empty() {
            return;
        }
        crate::engine_trace!(
            SOURCE,
            "Layer '{}': collapsed {} nodes",
            self.name,
            removed.len()
        );

        for (key, dropped) in &removed {
            debug_assert_eq!(dropped.content.subtree_objcnt(), 0);
            for light in dropped.content.lights().iter().map(|l| l.id).chain(dropped.tag.pending_lights().iter().copied()) {
                if let Some(nodes) = self.light_index.get_mut(&light) {
                    nodes.retain(|n| n != key);
                }
            }
        }

        // partially covering lights go back to pending for the next split
        let node = &mut self.tree[node];
        for light in &node.content.lights {
            if light.relation == LightBoxRelation::Intersect && !node.tag.pending_lights.contains(&light.id) {
                node.tag.pending_lights.push(light.id);
            }
        }
    }

    // ===== INTERNAL: LIGHTS =====

    fn insert_light_at(&mut self, node: OctNodeKey, id: LightId, params: &LightParameters) {
        let loose = self.tree[node].bbox().loose_bounds();
        let (relation, impact) = params.test(&loose);
        if relation == LightBoxRelation::Separate {
            return;
        }

        self.tree[node].content.record_light(NodeLight { id, impact, relation });
        let nodes = self.light_index.entry(id).or_default();
        if !nodes.contains(&node) {
            nodes.push(node);
        }

        if relation == LightBoxRelation::Include || self.tree[node].depth() >= self.config.max_depth {
            return;
        }

        match self.tree.children(node).copied() {
            Some(children) => {
                for child in children {
                    self.insert_light_at(child, id, params);
                }
            }
            None => self.tree[node].tag.pending_lights.push(id),
        }
    }
}

#[cfg(test)]
#[path = "render_layer_tests.rs"]
mod tests;
