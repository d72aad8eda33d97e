/// Items stored in the render queue and the records that locate them.

use std::fmt;
use bitflags::bitflags;
use glam::Mat4;
use crate::spatial::{BoundingBox, OctNodeKey};

/// Identifier of a renderable within a layer, allocated by
/// `RenderLayerManager::allocate_render_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderId(pub u32);

impl fmt::Display for RenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque material handle, owned by the caller's material system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialHandle(pub u32);

/// Opaque mesh handle, owned by the caller's geometry system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u32);

/// Render queue a renderable is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    Opaque,
    OpaqueShadow,
    Transparent,
}

impl RenderMode {
    pub const COUNT: usize = 3;

    pub const ALL: [RenderMode; Self::COUNT] = [
        RenderMode::Opaque,
        RenderMode::OpaqueShadow,
        RenderMode::Transparent,
    ];

    pub fn index(self) -> usize {
        match self {
            RenderMode::Opaque => 0,
            RenderMode::OpaqueShadow => 1,
            RenderMode::Transparent => 2,
        }
    }
}

bitflags! {
    /// How a renderable participates in the frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u32 {
        /// Drawn in the transparent queue instead of the opaque one
        const TRANSPARENT = 1 << 0;
        /// Also filed in the shadow-caster queue (opaque only)
        const CAST_SHADOW = 1 << 1;
    }
}

impl RenderFlags {
    /// Queues a renderable with these flags is inserted into.
    pub fn modes(self) -> Vec<RenderMode> {
        if self.contains(RenderFlags::TRANSPARENT) {
            vec![RenderMode::Transparent]
        } else if self.contains(RenderFlags::CAST_SHADOW) {
            vec![RenderMode::Opaque, RenderMode::OpaqueShadow]
        } else {
            vec![RenderMode::Opaque]
        }
    }
}

/// Per-frame arguments of a renderable: world transform and world box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderArguments {
    pub transform: Mat4,
    pub bounding_box: BoundingBox,
}

impl RenderArguments {
    /// Arguments for a local-space box placed by `transform`.
    pub fn from_local(transform: Mat4, local_box: &BoundingBox) -> Self {
        Self {
            transform,
            bounding_box: local_box.transformed(&transform),
        }
    }
}

/// One renderable in a render queue. The queue only looks at
/// `args.bounding_box`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderQueueItem {
    pub id: RenderId,
    pub material: MaterialHandle,
    pub mesh: MeshHandle,
    pub args: RenderArguments,
    pub vertex_count: u32,
}

impl RenderQueueItem {
    pub fn new(
        id: RenderId,
        material: MaterialHandle,
        mesh: MeshHandle,
        args: RenderArguments,
        vertex_count: u32,
    ) -> Self {
        Self { id, material, mesh, args, vertex_count }
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.args.bounding_box
    }
}

/// Where an item currently lives: node, queue and position in the node's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderQueueIndex {
    pub node: OctNodeKey,
    pub mode: RenderMode,
    pub slot: usize,
}
