//! Renderer module: culling, drawing and per-frame orchestration.

mod culler;
mod drawer;
mod renderer;

pub use culler::{BruteForceCuller, CameraCuller, OctreeCuller};
pub use drawer::{DrawDispatcher, DrawStats, Drawer, ForwardDrawer, MaterialSortedDrawer};
pub use renderer::{FrameStats, Renderer};
