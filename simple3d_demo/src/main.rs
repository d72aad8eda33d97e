//! Simple3D headless demo
//!
//! Builds a field of crates lit by a sun and an orbiting lamp, then renders
//! a few frames with the camera circling the field. Draw calls go to a
//! dispatcher that only counts them; per-frame statistics are logged.

use std::f32::consts::TAU;
use glam::{Quat, Vec3};
use simple_3d_engine::simple3d::log::{DefaultLogger, LogSeverity};
use simple_3d_engine::simple3d::render::{BruteForceCuller, DrawDispatcher, FrameStats, OctreeCuller};
use simple_3d_engine::simple3d::render_queue::{
    MaterialHandle, MeshHandle, NodeLight, RenderFlags, RenderQueueItem,
};
use simple_3d_engine::simple3d::lighting::LightParameters;
use simple_3d_engine::simple3d::scene::{
    Component, ComponentDesc, ComponentKind, GameObjectKey, Scene, Transform,
};
use simple_3d_engine::simple3d::spatial::BoundingBox;
use simple_3d_engine::simple3d::{Engine, RenderQueueConfig, Renderer, RendererConfig, Result};

const SOURCE: &str = "simple3d_demo";
const LAYER: &str = "world";
const FIELD: i32 = 12;
const SPACING: f32 = 4.0;
const FRAMES: usize = 8;

/// Counts submissions instead of talking to a GPU
#[derive(Default)]
struct CountingDispatcher {
    draws: usize,
    lit_draws: usize,
    lights_bound: usize,
}

impl DrawDispatcher for CountingDispatcher {
    fn draw(&mut self, _item: &RenderQueueItem, lights: &[NodeLight]) -> Result<()> {
        self.draws += 1;
        self.lights_bound += lights.len();
        if !lights.is_empty() {
            self.lit_draws += 1;
        }
        Ok(())
    }
}

fn info(message: String) {
    Engine::log(LogSeverity::Info, SOURCE, message);
}

fn spawn(scene: &mut Scene, renderer: &mut Renderer, name: &str, at: Vec3, desc: ComponentDesc) -> Result<GameObjectKey> {
    let key = scene.create_object(name, Transform::from_translation(at));
    if let Some(object) = scene.object_mut(key) {
        object.add_component(Component::from_desc(desc), renderer)?;
    }
    Ok(key)
}

fn crate_desc(material: u32, flags: RenderFlags) -> ComponentDesc {
    ComponentDesc::Renderable {
        layer: LAYER.to_string(),
        material: MaterialHandle(material),
        mesh: MeshHandle(0),
        vertex_count: 36,
        flags,
        local_bounds: BoundingBox::from_center(Vec3::ZERO, Vec3::splat(0.75)),
    }
}

fn build_scene(renderer: &mut Renderer) -> Result<(Scene, GameObjectKey, GameObjectKey)> {
    let mut scene = Scene::new();
    let half = FIELD as f32 * SPACING * 0.5;

    for x in 0..FIELD {
        for z in 0..FIELD {
            let at = Vec3::new(x as f32 * SPACING - half, 0.0, z as f32 * SPACING - half);
            let (material, flags) = match (x + z) % 4 {
                0 => (3, RenderFlags::TRANSPARENT),
                1 => (1, RenderFlags::CAST_SHADOW),
                _ => (((x * z) % 3) as u32, RenderFlags::empty()),
            };
            spawn(&mut scene, renderer, &format!("crate_{}_{}", x, z), at, crate_desc(material, flags))?;
        }
    }

    spawn(
        &mut scene,
        renderer,
        "sun",
        Vec3::new(0.0, 100.0, 0.0),
        ComponentDesc::Light { params: LightParameters::directional(Vec3::new(-0.3, -1.0, -0.2), Vec3::splat(0.8), 1.0) },
    )?;
    let lamp = spawn(
        &mut scene,
        renderer,
        "lamp",
        Vec3::new(half * 0.5, 2.0, 0.0),
        ComponentDesc::Light { params: LightParameters::point(Vec3::ZERO, Vec3::new(1.0, 0.8, 0.6), 3.0, 12.0) },
    )?;
    let camera = spawn(
        &mut scene,
        renderer,
        "camera",
        Vec3::new(0.0, 6.0, half + 10.0),
        ComponentDesc::Camera { fov_y: 1.0, aspect: 16.0 / 9.0, near: 0.1, far: 80.0 },
    )?;

    scene.on_start(renderer)?;
    Ok((scene, camera, lamp))
}

fn log_frame(stats: &FrameStats, dispatcher: &CountingDispatcher) {
    info(format!(
        "frame {}: visited {} nodes ({} pruned), tested {} items, drew {} ({} lit, {} lights bound), {} material switches",
        stats.frame,
        stats.cull.nodes_visited,
        stats.cull.nodes_pruned,
        stats.cull.items_tested,
        dispatcher.draws,
        dispatcher.lit_draws,
        dispatcher.lights_bound,
        stats.draw.material_switches
    ));
}

fn run() -> Result<()> {
    let config = RendererConfig {
        render_queue: RenderQueueConfig {
            world_bounds: (Vec3::splat(-128.0), Vec3::splat(128.0)),
            max_depth: 6,
            shallow_depth: Some(3),
            split_threshold: 8,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut renderer = Renderer::new(config)?;
    renderer.create_layer(LAYER)?;

    let (mut scene, camera_key, lamp_key) = build_scene(&mut renderer)?;
    info(format!("scene ready: {} objects, {} lights", scene.len(), renderer.lights().len()));

    let orbit = FIELD as f32 * SPACING * 0.5 + 10.0;
    for frame in 0..FRAMES {
        let angle = TAU * frame as f32 / FRAMES as f32;

        // camera circles the field, always facing its centre
        if let Some(camera) = scene.object_mut(camera_key) {
            let eye = Vec3::new(orbit * angle.sin(), 6.0, orbit * angle.cos());
            let yaw = angle;
            let pitch = -(6.0f32 / orbit).atan();
            let facing = Transform::from_translation(eye)
                .with_rotation(Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch));
            camera.set_transform(facing, &mut renderer)?;
        }
        if let Some(lamp) = scene.object_mut(lamp_key) {
            let radius = orbit * 0.4;
            let at = Vec3::new(radius * angle.cos(), 2.0, -radius * angle.sin());
            let delta = at - lamp.transform().translation;
            lamp.translate(delta, &mut renderer)?;
        }

        let Some(Component::Camera(camera)) = scene
            .object(camera_key)
            .and_then(|object| object.component(ComponentKind::Camera))
        else {
            continue;
        };
        let camera = camera.camera().clone();

        let mut dispatcher = CountingDispatcher::default();
        let stats = renderer.render_frame(&camera, &mut dispatcher)?;
        log_frame(&stats, &dispatcher);

        let mut shadow = CountingDispatcher::default();
        let shadow_stats = renderer.render_shadow_casters(camera.frustum(), &mut shadow)?;
        info(format!("frame {}: {} shadow casters", stats.frame, shadow_stats.draw.draw_calls));
    }

    // same view through the reference culler
    renderer.set_culler(Box::new(BruteForceCuller::new()));
    if let Some(Component::Camera(camera)) = scene
        .object(camera_key)
        .and_then(|object| object.component(ComponentKind::Camera))
    {
        let camera = camera.camera().clone();
        let mut dispatcher = CountingDispatcher::default();
        let stats = renderer.render_frame(&camera, &mut dispatcher)?;
        info(format!(
            "brute force: tested {} items, drew {}",
            stats.cull.items_tested, stats.draw.draw_calls
        ));
    }
    renderer.set_culler(Box::new(OctreeCuller::new()));

    scene.clear(&mut renderer)?;
    info(format!(
        "scene cleared: {} render ids, {} lights left",
        renderer.layers().render_id_count(),
        renderer.lights().len()
    ));
    Ok(())
}

fn main() {
    Engine::set_logger(DefaultLogger::with_min_severity(LogSeverity::Debug));
    if let Err(err) = run() {
        Engine::log(LogSeverity::Error, SOURCE, format!("demo failed: {}", err));
        std::process::exit(1);
    }
}
