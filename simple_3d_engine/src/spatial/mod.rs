//! Spatial structures: bounding boxes and the loose octree.

mod bounding_box;
mod octree;

pub use bounding_box::{loosened, BoundingBox, BoxRelation};
pub use octree::{Ancestors, OctNode, OctNodeKey, Octree};
