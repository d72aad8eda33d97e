//! Lights: descriptors, influence test and the light manager.

mod light;
mod light_manager;

pub use light::{
    InnerLightParameters, LightBoxRelation, LightId, LightParameters, LightType, LIGHT_THRESHOLD,
};
pub use light_manager::LightManager;
