/// Components: behaviours attached to a game object.
///
/// Components are a closed set dispatched through the `Component` enum.
/// Each one follows the same lifecycle, driven by its game object:
/// - `on_start`: register with the renderer
/// - `on_transformed`: push the owner's new transform to the renderer
/// - `dispose`: unregister
///
/// `ComponentKind` tags (`"renderable_obj"`, `"camera"`, `"light"`) name the
/// variants in scene descriptions; `Component::from_desc` builds one.

use glam::{Mat4, Vec3};
use crate::camera::Camera;
use crate::error::Result;
use crate::lighting::{LightId, LightParameters, LightType};
use crate::render_queue::{
    MaterialHandle, MeshHandle, RenderArguments, RenderFlags, RenderId, RenderQueueItem,
};
use crate::renderer::Renderer;
use crate::spatial::BoundingBox;
use super::transform::Transform;

const SOURCE: &str = "simple3d::Component";

/// Component variants, as named in scene descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Renderable,
    Camera,
    Light,
}

impl ComponentKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "renderable_obj" => Some(ComponentKind::Renderable),
            "camera" => Some(ComponentKind::Camera),
            "light" => Some(ComponentKind::Light),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ComponentKind::Renderable => "renderable_obj",
            ComponentKind::Camera => "camera",
            ComponentKind::Light => "light",
        }
    }
}

/// Everything needed to build a component.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentDesc {
    Renderable {
        layer: String,
        material: MaterialHandle,
        mesh: MeshHandle,
        vertex_count: u32,
        flags: RenderFlags,
        /// Box in the object's local space
        local_bounds: BoundingBox,
    },
    Camera {
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Light {
        /// Position and direction are relative to the owning object
        params: LightParameters,
    },
}

impl ComponentDesc {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentDesc::Renderable { .. } => ComponentKind::Renderable,
            ComponentDesc::Camera { .. } => ComponentKind::Camera,
            ComponentDesc::Light { .. } => ComponentKind::Light,
        }
    }
}

// ===== RENDERABLE =====

/// Puts a mesh into the render queues of one layer.
#[derive(Debug, Clone)]
pub struct RenderableObject {
    layer: String,
    material: MaterialHandle,
    mesh: MeshHandle,
    vertex_count: u32,
    flags: RenderFlags,
    local_bounds: BoundingBox,
    render_id: Option<RenderId>,
}

impl RenderableObject {
    pub fn new(
        layer: impl Into<String>,
        material: MaterialHandle,
        mesh: MeshHandle,
        vertex_count: u32,
        flags: RenderFlags,
        local_bounds: BoundingBox,
    ) -> Self {
        Self {
            layer: layer.into(),
            material,
            mesh,
            vertex_count,
            flags,
            local_bounds,
            render_id: None,
        }
    }

    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Id in the render queues, while started.
    pub fn render_id(&self) -> Option<RenderId> {
        self.render_id
    }

    pub fn flags(&self) -> RenderFlags {
        self.flags
    }

    fn on_start(&mut self, renderer: &mut Renderer, transform: &Transform) -> Result<()> {
        if self.render_id.is_some() {
            return Ok(());
        }
        let id = renderer.allocate_render_id();
        let args = RenderArguments::from_local(transform.matrix(), &self.local_bounds);
        let item = RenderQueueItem::new(id, self.material, self.mesh, args, self.vertex_count);

        for mode in self.flags.modes() {
            if let Err(err) = renderer.insert_object(&self.layer, mode, item) {
                renderer.release_render_id(id);
                return Err(err);
            }
        }
        self.render_id = Some(id);
        Ok(())
    }

    fn on_transformed(&mut self, renderer: &mut Renderer, transform: &Transform) -> Result<()> {
        let Some(id) = self.render_id else {
            return Ok(());
        };
        let args = RenderArguments::from_local(transform.matrix(), &self.local_bounds);
        for mode in self.flags.modes() {
            renderer.update_object(&self.layer, mode, id, args)?;
        }
        Ok(())
    }

    fn dispose(&mut self, renderer: &mut Renderer) -> Result<()> {
        let Some(id) = self.render_id.take() else {
            return Ok(());
        };
        let mut result = Ok(());
        for mode in self.flags.modes() {
            if let Err(err) = renderer.remove_object(&self.layer, mode, id) {
                result = Err(err);
            }
        }
        renderer.release_render_id(id);
        result
    }
}

// ===== CAMERA =====

/// Keeps a `Camera` attached to the owning object. The camera looks down
/// the object's local -Z axis.
#[derive(Debug, Clone)]
pub struct CameraComponent {
    camera: Camera,
}

impl CameraComponent {
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            camera: Camera::new(Mat4::IDENTITY, fov_y, aspect, near, far),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn follow(&mut self, transform: &Transform) {
        // view matrices ignore scale
        let eye = transform.translation;
        let view = Mat4::look_to_rh(eye, transform.forward(), transform.rotation * Vec3::Y);
        self.camera.set_view(view);
    }
}

// ===== LIGHT =====

/// Registers a light that moves with the owning object.
#[derive(Debug, Clone)]
pub struct LightComponent {
    local: LightParameters,
    light_id: Option<LightId>,
}

impl LightComponent {
    pub fn new(params: LightParameters) -> Self {
        Self { local: params, light_id: None }
    }

    /// Id in the light manager, while started.
    pub fn light_id(&self) -> Option<LightId> {
        self.light_id
    }

    /// Parameters placed in world space by `transform`.
    pub fn world_params(&self, transform: &Transform) -> LightParameters {
        let mut params = self.local;
        if params.light_type != LightType::Directional {
            let position = transform.matrix().transform_point3(self.local.position());
            params.inner.position = position.extend(self.local.inner.position.w);
        }
        if params.light_type != LightType::Point {
            let direction = (transform.rotation * self.local.direction()).normalize_or_zero();
            params.inner.direction = direction.extend(self.local.inner.direction.w);
        }
        params
    }

    fn on_start(&mut self, renderer: &mut Renderer, transform: &Transform) -> Result<()> {
        if self.light_id.is_none() {
            self.light_id = Some(renderer.insert_light(self.world_params(transform))?);
        }
        Ok(())
    }

    fn on_transformed(&mut self, renderer: &mut Renderer, transform: &Transform) -> Result<()> {
        match self.light_id {
            Some(id) => renderer.update_light(id, self.world_params(transform)),
            None => Ok(()),
        }
    }

    fn dispose(&mut self, renderer: &mut Renderer) {
        if let Some(id) = self.light_id.take() {
            renderer.remove_light(id);
        }
    }
}

// ===== DISPATCH =====

#[derive(Debug, Clone)]
pub enum Component {
    Renderable(RenderableObject),
    Camera(CameraComponent),
    Light(LightComponent),
}

impl Component {
    /// Build a component from its description. Nothing is registered until
    /// `on_start`.
    pub fn from_desc(desc: ComponentDesc) -> Self {
        crate::engine_trace!(SOURCE, "Creating '{}' component", desc.kind().tag());
        match desc {
            ComponentDesc::Renderable { layer, material, mesh, vertex_count, flags, local_bounds } => {
                Component::Renderable(RenderableObject::new(layer, material, mesh, vertex_count, flags, local_bounds))
            }
            ComponentDesc::Camera { fov_y, aspect, near, far } => {
                Component::Camera(CameraComponent::new(fov_y, aspect, near, far))
            }
            ComponentDesc::Light { params } => Component::Light(LightComponent::new(params)),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Renderable(_) => ComponentKind::Renderable,
            Component::Camera(_) => ComponentKind::Camera,
            Component::Light(_) => ComponentKind::Light,
        }
    }

    pub fn on_start(&mut self, renderer: &mut Renderer, transform: &Transform) -> Result<()> {
        match self {
            Component::Renderable(renderable) => renderable.on_start(renderer, transform),
            Component::Camera(camera) => {
                camera.follow(transform);
                Ok(())
            }
            Component::Light(light) => light.on_start(renderer, transform),
        }
    }

    pub fn on_transformed(&mut self, renderer: &mut Renderer, transform: &Transform) -> Result<()> {
        match self {
            Component::Renderable(renderable) => renderable.on_transformed(renderer, transform),
            Component::Camera(camera) => {
                camera.follow(transform);
                Ok(())
            }
            Component::Light(light) => light.on_transformed(renderer, transform),
        }
    }

    pub fn dispose(&mut self, renderer: &mut Renderer) -> Result<()> {
        match self {
            Component::Renderable(renderable) => renderable.dispose(renderer),
            Component::Camera(_) => Ok(()),
            Component::Light(light) => {
                light.dispose(renderer);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "component_tests.rs"]
mod tests;
