use glam::Vec3;
use crate::config::RendererConfig;
use crate::lighting::LightParameters;
use crate::render_queue::{MaterialHandle, MeshHandle, RenderFlags, RenderMode};
use crate::renderer::Renderer;
use crate::spatial::BoundingBox;
use super::*;

fn renderer() -> Renderer {
    let mut renderer = Renderer::new(RendererConfig::default()).unwrap();
    renderer.create_layer("world").unwrap();
    renderer
}

fn cube(flags: RenderFlags) -> Component {
    Component::from_desc(ComponentDesc::Renderable {
        layer: "world".to_string(),
        material: MaterialHandle(1),
        mesh: MeshHandle(1),
        vertex_count: 36,
        flags,
        local_bounds: BoundingBox::from_center(Vec3::ZERO, Vec3::splat(0.5)),
    })
}

fn lamp() -> Component {
    Component::from_desc(ComponentDesc::Light {
        params: LightParameters::point(Vec3::ZERO, Vec3::ONE, 1.0, 10.0),
    })
}

fn render_id(object: &GameObject) -> crate::render_queue::RenderId {
    match object.component(ComponentKind::Renderable) {
        Some(Component::Renderable(renderable)) => renderable.render_id().unwrap(),
        _ => panic!("object has no started renderable"),
    }
}

// ============================================================================
// GameObject
// ============================================================================

#[test]
fn test_unstarted_object_registers_nothing() {
    let mut renderer = renderer();
    let mut object = GameObject::new("crate", Transform::default());
    object.add_component(cube(RenderFlags::empty()), &mut renderer).unwrap();
    object.translate(Vec3::X, &mut renderer).unwrap();

    assert!(!object.is_started());
    assert_eq!(object.transform().translation, Vec3::X);
    assert_eq!(renderer.layer("world").unwrap().object_count(RenderMode::Opaque), 0);
}

#[test]
fn test_start_registers_components() {
    let mut renderer = renderer();
    let mut object = GameObject::new("crate", Transform::from_translation(Vec3::new(2.0, 0.0, 0.0)));
    object.add_component(cube(RenderFlags::empty()), &mut renderer).unwrap();
    object.add_component(lamp(), &mut renderer).unwrap();
    object.on_start(&mut renderer).unwrap();

    assert!(object.is_started());
    assert_eq!(object.components().len(), 2);
    assert_eq!(renderer.layer("world").unwrap().object_count(RenderMode::Opaque), 1);
    assert_eq!(renderer.lights().len(), 1);

    // a second start is a no-op
    object.on_start(&mut renderer).unwrap();
    assert_eq!(renderer.layer("world").unwrap().object_count(RenderMode::Opaque), 1);
    assert_eq!(renderer.lights().len(), 1);
}

#[test]
fn test_component_added_after_start_starts_immediately() {
    let mut renderer = renderer();
    let mut object = GameObject::new("crate", Transform::default());
    object.on_start(&mut renderer).unwrap();
    object.add_component(cube(RenderFlags::CAST_SHADOW), &mut renderer).unwrap();

    let id = render_id(&object);
    let layer = renderer.layer("world").unwrap();
    assert!(layer.contains_object(RenderMode::Opaque, id));
    assert!(layer.contains_object(RenderMode::OpaqueShadow, id));
}

#[test]
fn test_moves_reach_the_render_queue() {
    let mut renderer = renderer();
    let mut object = GameObject::new("crate", Transform::default());
    object.add_component(cube(RenderFlags::empty()), &mut renderer).unwrap();
    object.add_component(lamp(), &mut renderer).unwrap();
    object.on_start(&mut renderer).unwrap();
    let id = render_id(&object);

    object.translate(Vec3::new(100.0, 0.0, 0.0), &mut renderer).unwrap();
    let stored = renderer.layer("world").unwrap().object(RenderMode::Opaque, id).unwrap();
    assert_eq!(stored.bounding_box().center(), Vec3::new(100.0, 0.0, 0.0));
    let (_, light) = renderer.lights().iter().next().unwrap();
    assert_eq!(light.position(), Vec3::new(100.0, 0.0, 0.0));

    object.set_transform(Transform::from_translation(Vec3::new(0.0, -50.0, 0.0)), &mut renderer).unwrap();
    let stored = renderer.layer("world").unwrap().object(RenderMode::Opaque, id).unwrap();
    assert_eq!(stored.bounding_box().center(), Vec3::new(0.0, -50.0, 0.0));
}

#[test]
fn test_rotation_turns_the_camera() {
    let mut renderer = renderer();
    let mut object = GameObject::new("eye", Transform::default());
    object
        .add_component(
            Component::from_desc(ComponentDesc::Camera { fov_y: 1.0, aspect: 1.0, near: 0.1, far: 100.0 }),
            &mut renderer,
        )
        .unwrap();
    object.on_start(&mut renderer).unwrap();
    object.rotate(std::f32::consts::PI, 0.0, &mut renderer).unwrap();

    let Some(Component::Camera(camera)) = object.component(ComponentKind::Camera) else {
        panic!("object has no camera");
    };
    let behind = Vec3::new(0.0, 0.0, 10.0);
    assert!(camera.camera().frustum().contains_point(behind));
    assert!(!camera.camera().frustum().contains_point(-behind));
}

#[test]
fn test_dispose_unregisters_and_allows_restart() {
    let mut renderer = renderer();
    let mut object = GameObject::new("crate", Transform::default());
    object.add_component(cube(RenderFlags::empty()), &mut renderer).unwrap();
    object.add_component(lamp(), &mut renderer).unwrap();
    object.on_start(&mut renderer).unwrap();

    object.dispose(&mut renderer).unwrap();
    assert!(!object.is_started());
    assert_eq!(renderer.layer("world").unwrap().object_count(RenderMode::Opaque), 0);
    assert!(renderer.lights().is_empty());
    assert_eq!(renderer.layers().render_id_count(), 0);

    object.on_start(&mut renderer).unwrap();
    assert_eq!(renderer.layer("world").unwrap().object_count(RenderMode::Opaque), 1);
    assert_eq!(renderer.lights().len(), 1);
}

// ============================================================================
// Scene
// ============================================================================

#[test]
fn test_scene_start_and_find() {
    let mut renderer = renderer();
    let mut scene = Scene::new();
    let a = scene.create_object("a", Transform::from_translation(Vec3::X));
    let b = scene.create_object("b", Transform::from_translation(Vec3::Y));
    for key in [a, b] {
        scene.object_mut(key).unwrap().add_component(cube(RenderFlags::empty()), &mut renderer).unwrap();
    }
    assert_eq!(scene.len(), 2);
    assert_eq!(scene.find("b"), Some(b));
    assert_eq!(scene.find("c"), None);

    scene.on_start(&mut renderer).unwrap();
    assert!(scene.iter().all(|(_, object)| object.is_started()));
    assert_eq!(renderer.layer("world").unwrap().object_count(RenderMode::Opaque), 2);
}

#[test]
fn test_scene_remove_object_disposes_it() {
    let mut renderer = renderer();
    let mut scene = Scene::new();
    let a = scene.create_object("a", Transform::default());
    let b = scene.create_object("b", Transform::default());
    scene.object_mut(a).unwrap().add_component(cube(RenderFlags::empty()), &mut renderer).unwrap();
    scene.object_mut(b).unwrap().add_component(lamp(), &mut renderer).unwrap();
    scene.on_start(&mut renderer).unwrap();

    let removed = scene.remove_object(a, &mut renderer).unwrap().unwrap();
    assert_eq!(removed.name(), "a");
    assert!(!removed.is_started());
    assert_eq!(renderer.layer("world").unwrap().object_count(RenderMode::Opaque), 0);
    assert_eq!(renderer.lights().len(), 1);
    assert!(scene.object(a).is_none());

    assert!(scene.remove_object(a, &mut renderer).unwrap().is_none());
}

#[test]
fn test_scene_clear() {
    let mut renderer = renderer();
    let mut scene = Scene::new();
    for name in ["a", "b", "c"] {
        let key = scene.create_object(name, Transform::default());
        let object = scene.object_mut(key).unwrap();
        object.add_component(cube(RenderFlags::TRANSPARENT), &mut renderer).unwrap();
        object.add_component(lamp(), &mut renderer).unwrap();
    }
    scene.on_start(&mut renderer).unwrap();
    assert_eq!(renderer.layer("world").unwrap().object_count(RenderMode::Transparent), 3);

    scene.clear(&mut renderer).unwrap();
    assert!(scene.is_empty());
    assert_eq!(renderer.layer("world").unwrap().object_count(RenderMode::Transparent), 0);
    assert!(renderer.lights().is_empty());
    assert_eq!(renderer.layers().render_id_count(), 0);
}
