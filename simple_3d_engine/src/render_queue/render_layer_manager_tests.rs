use serial_test::serial;
use crate::error::Error;
use super::*;

#[test]
fn test_create_and_lookup_layers_in_order() {
    let mut manager = RenderLayerManager::default();
    manager.create_layer("world").unwrap();
    manager.create_layer("overlay").unwrap();

    assert_eq!(manager.len(), 2);
    let names: Vec<&str> = manager.iter().map(|layer| layer.name()).collect();
    assert_eq!(names, vec!["world", "overlay"]);
    assert!(manager.layer("world").is_some());
    assert!(manager.layer("missing").is_none());
}

#[test]
#[serial]
fn test_duplicate_layer_rejected() {
    let mut manager = RenderLayerManager::default();
    manager.create_layer("world").unwrap();
    assert!(matches!(manager.create_layer("world"), Err(Error::InvalidArgument(_))));
    assert_eq!(manager.len(), 1);
}

#[test]
#[serial]
fn test_require_missing_layer_is_not_found() {
    let mut manager = RenderLayerManager::default();
    assert!(matches!(manager.require_layer_mut("nope"), Err(Error::NotFound(_))));
}

#[test]
fn test_remove_layer() {
    let mut manager = RenderLayerManager::default();
    manager.create_layer("a").unwrap();
    manager.create_layer("b").unwrap();
    let removed = manager.remove_layer("a").unwrap();
    assert_eq!(removed.name(), "a");
    assert_eq!(manager.iter().next().unwrap().name(), "b");
    assert!(manager.remove_layer("a").is_none());
}

#[test]
fn test_layers_share_manager_config() {
    let config = RenderQueueConfig { max_depth: 3, ..Default::default() };
    let mut manager = RenderLayerManager::new(config);
    let layer = manager.create_layer("world").unwrap();
    assert_eq!(layer.config().max_depth, 3);
}

#[test]
fn test_render_ids_are_recycled() {
    let mut manager = RenderLayerManager::default();
    let a = manager.allocate_render_id();
    let b = manager.allocate_render_id();
    assert_ne!(a, b);
    manager.release_render_id(a);
    assert_eq!(manager.render_id_count(), 1);
    assert_eq!(manager.allocate_render_id(), a);
}
