/*!
# Simple 3D Engine

Scene-side core of the Simple3D engine: spatial render queues, lights,
culling and draw traversal. GPU work is left to the caller through the
`DrawDispatcher` trait.

## Architecture

- **RenderLayer**: named loose octree holding render queue items per mode, plus a light index
- **LightManager**: typed light buffers with stable ids
- **Camera / Frustum**: view and projection, six-plane classification of boxes
- **Renderer**: owns layers and lights, culls with a `CameraCuller`, draws with a `Drawer`
- **Scene**: game objects whose components register with the renderer
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod spatial;
pub mod render_queue;
pub mod lighting;
pub mod camera;
pub mod renderer;
pub mod scene;

// Main simple3d namespace module
pub mod simple3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging façade
    pub use crate::engine::Engine;

    // Configuration
    pub use crate::config::{LightManagerConfig, RenderQueueConfig, RendererConfig};

    // Renderer front door
    pub use crate::renderer::Renderer;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod spatial {
        pub use crate::spatial::*;
    }

    pub mod render_queue {
        pub use crate::render_queue::*;
    }

    pub mod lighting {
        pub use crate::lighting::*;
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod render {
        pub use crate::renderer::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
