//! Scene module
//!
//! Game objects, their transforms and components, and the scene holding
//! them. Components register renderables and lights with the `Renderer`.

mod component;
mod game_object;
mod scene;
mod transform;

pub use component::{
    CameraComponent, Component, ComponentDesc, ComponentKind, LightComponent, RenderableObject,
};
pub use game_object::GameObject;
pub use scene::{GameObjectKey, Scene};
pub use transform::Transform;

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
