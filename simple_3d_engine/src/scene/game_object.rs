/// GameObject: a named transform carrying components.
///
/// The object drives its components' lifecycle: started once, notified on
/// every transform change while started, disposed once.

use glam::Vec3;
use crate::error::Result;
use crate::renderer::Renderer;
use super::component::{Component, ComponentKind};
use super::transform::Transform;

#[derive(Debug, Clone)]
pub struct GameObject {
    name: String,
    transform: Transform,
    components: Vec<Component>,
    started: bool,
}

impl GameObject {
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            components: Vec::new(),
            started: false,
        }
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// First component of the given kind.
    pub fn component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|component| component.kind() == kind)
    }

    pub fn component_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.components.iter_mut().find(|component| component.kind() == kind)
    }

    // ===== LIFECYCLE =====

    /// Attach a component. On a started object it starts right away.
    pub fn add_component(&mut self, mut component: Component, renderer: &mut Renderer) -> Result<()> {
        if self.started {
            component.on_start(renderer, &self.transform)?;
        }
        self.components.push(component);
        Ok(())
    }

    pub fn on_start(&mut self, renderer: &mut Renderer) -> Result<()> {
        if self.started {
            return Ok(());
        }
        for component in &mut self.components {
            component.on_start(renderer, &self.transform)?;
        }
        self.started = true;
        Ok(())
    }

    pub fn set_transform(&mut self, transform: Transform, renderer: &mut Renderer) -> Result<()> {
        self.transform = transform;
        self.notify_transformed(renderer)
    }

    pub fn translate(&mut self, delta: Vec3, renderer: &mut Renderer) -> Result<()> {
        self.transform.translate(delta);
        self.notify_transformed(renderer)
    }

    pub fn rotate(&mut self, yaw: f32, pitch: f32, renderer: &mut Renderer) -> Result<()> {
        self.transform.rotate(yaw, pitch);
        self.notify_transformed(renderer)
    }

    /// Dispose every component. The object can be started again afterwards.
    pub fn dispose(&mut self, renderer: &mut Renderer) -> Result<()> {
        let mut result = Ok(());
        for component in &mut self.components {
            if let Err(err) = component.dispose(renderer) {
                result = Err(err);
            }
        }
        self.started = false;
        result
    }

    fn notify_transformed(&mut self, renderer: &mut Renderer) -> Result<()> {
        if !self.started {
            return Ok(());
        }
        for component in &mut self.components {
            component.on_transformed(renderer, &self.transform)?;
        }
        Ok(())
    }
}
