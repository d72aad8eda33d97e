/// Generic arena-backed octree.
///
/// Nodes live in a `SlotMap` keyed by [`OctNodeKey`]. Each node has either
/// all 8 children or none, and keeps its father as a key, so walking up the
/// tree never needs a back pointer. The octree only manages structure: what a
/// node stores is the `content` payload, and `tag` carries work that has to be
/// pushed into children once they exist.

use std::ops::{Index, IndexMut};
use slotmap::{new_key_type, SlotMap};
use super::bounding_box::{loosened, BoundingBox, BoxRelation};

new_key_type! {
    /// Stable key of an octree node
    pub struct OctNodeKey;
}

#[derive(Debug)]
pub struct OctNode<T, C> {
    depth: u32,
    father: Option<OctNodeKey>,
    children: Option<[OctNodeKey; 8]>,
    bbox: BoundingBox,
    /// Pending work for the (future) children of this node
    pub tag: T,
    pub content: C,
}

impl<T, C> OctNode<T, C> {
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn father(&self) -> Option<OctNodeKey> {
        self.father
    }

    pub fn children(&self) -> Option<&[OctNodeKey; 8]> {
        self.children.as_ref()
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_root(&self) -> bool {
        self.father.is_none()
    }
}

#[derive(Debug)]
pub struct Octree<T, C> {
    nodes: SlotMap<OctNodeKey, OctNode<T, C>>,
    root: OctNodeKey,
}

/// Octant of `point` relative to `split` (4 = high x, 2 = high y, 1 = high z).
fn octant_index(point: glam::Vec3, split: glam::Vec3) -> usize {
    ((point.x > split.x) as usize) << 2
        | ((point.y > split.y) as usize) << 1
        | (point.z > split.z) as usize
}

impl<T: Default, C: Default> Octree<T, C> {
    /// Tree with a single root node covering `bbox`.
    pub fn new(bbox: BoundingBox) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(OctNode {
            depth: 0,
            father: None,
            children: None,
            bbox,
            tag: T::default(),
            content: C::default(),
        });
        Self { nodes, root }
    }

    /// Materialize the 8 children of a leaf. Returns `false` (and does
    /// nothing) when the node already has children.
    pub fn split(&mut self, key: OctNodeKey) -> bool {
        let (bbox, depth) = match self.nodes.get(key) {
            Some(node) if node.is_leaf() => (node.bbox, node.depth),
            _ => return false,
        };

        let children: [OctNodeKey; 8] = std::array::from_fn(|octant| {
            self.nodes.insert(OctNode {
                depth: depth + 1,
                father: Some(key),
                children: None,
                bbox: bbox.octant(octant),
                tag: T::default(),
                content: C::default(),
            })
        });

        self.nodes[key].children = Some(children);
        true
    }
}

impl<T, C> Octree<T, C> {
    // ===== ACCESSORS =====

    pub fn root(&self) -> OctNodeKey {
        self.root
    }

    pub fn node(&self, key: OctNodeKey) -> Option<&OctNode<T, C>> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: OctNodeKey) -> Option<&mut OctNode<T, C>> {
        self.nodes.get_mut(key)
    }

    pub fn contains(&self, key: OctNodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn children(&self, key: OctNodeKey) -> Option<&[OctNodeKey; 8]> {
        self.nodes.get(key).and_then(|node| node.children())
    }

    pub fn father(&self, key: OctNodeKey) -> Option<OctNodeKey> {
        self.nodes.get(key).and_then(|node| node.father)
    }

    pub fn is_leaf(&self, key: OctNodeKey) -> bool {
        self.nodes.get(key).is_some_and(|node| node.is_leaf())
    }

    pub fn depth_of(&self, key: OctNodeKey) -> Option<u32> {
        self.nodes.get(key).map(|node| node.depth)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes, in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (OctNodeKey, &OctNode<T, C>)> {
        self.nodes.iter()
    }

    /// `key`, its father, ..., the root.
    pub fn ancestors(&self, key: OctNodeKey) -> Ancestors<'_, T, C> {
        Ancestors {
            tree: self,
            next: self.nodes.contains_key(key).then_some(key),
        }
    }

    // ===== STRUCTURE =====

    /// Octant of `key` that loosely includes `bbox`, or `None` when the box
    /// has to stay at this node. Children do not need to exist: would-be child
    /// boxes are computed on the fly.
    pub fn sub_node_test(&self, key: OctNodeKey, bbox: &BoundingBox) -> Option<usize> {
        let node = self.nodes.get(key)?;
        if node.bbox.test(bbox) == BoxRelation::InvInclude {
            return None;
        }

        let relation = match node.children {
            Some(children) => {
                let split = self.nodes.get(children[0])?.bbox.max;
                let octant = octant_index(bbox.max, split);
                (octant, self.nodes.get(children[octant])?.bbox.loose_test(bbox))
            }
            None => {
                let (_, split) = loosened(node.bbox.min, node.bbox.center(), node.bbox.loose_factor());
                let octant = octant_index(bbox.max, split);
                (octant, node.bbox.octant(octant).loose_test(bbox))
            }
        };

        match relation {
            (octant, BoxRelation::Include) => Some(octant),
            _ => None,
        }
    }

    /// Drop every descendant of `key`, leaving it a leaf. Returns the removed
    /// nodes (with their payloads) so callers can clean external indexes.
    pub fn combine(&mut self, key: OctNodeKey) -> Vec<(OctNodeKey, OctNode<T, C>)> {
        let mut removed = Vec::new();
        let mut pending: Vec<OctNodeKey> = match self.nodes.get_mut(key).and_then(|node| node.children.take()) {
            Some(children) => children.to_vec(),
            None => return removed,
        };

        while let Some(child) = pending.pop() {
            if let Some(node) = self.nodes.remove(child) {
                if let Some(grand_children) = node.children {
                    pending.extend_from_slice(&grand_children);
                }
                removed.push((child, node));
            }
        }
        removed
    }
}

impl<T, C> Index<OctNodeKey> for Octree<T, C> {
    type Output = OctNode<T, C>;

    fn index(&self, key: OctNodeKey) -> &Self::Output {
        &self.nodes[key]
    }
}

impl<T, C> IndexMut<OctNodeKey> for Octree<T, C> {
    fn index_mut(&mut self, key: OctNodeKey) -> &mut Self::Output {
        &mut self.nodes[key]
    }
}

/// Iterator from a node up to the root
pub struct Ancestors<'a, T, C> {
    tree: &'a Octree<T, C>,
    next: Option<OctNodeKey>,
}

impl<T, C> Iterator for Ancestors<'_, T, C> {
    type Item = OctNodeKey;

    fn next(&mut self) -> Option<OctNodeKey> {
        let current = self.next?;
        self.next = self.tree.father(current);
        Some(current)
    }
}

#[cfg(test)]
#[path = "octree_tests.rs"]
mod tests;
