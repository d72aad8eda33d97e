use glam::Vec3;
use serial_test::serial;
use crate::config::LightManagerConfig;
use crate::error::Error;
use super::*;

fn point_at(x: f32) -> LightParameters {
    LightParameters::point(Vec3::new(x, 0.0, 0.0), Vec3::ONE, 1.0, 10.0)
}

// ============================================================================
// Insert
// ============================================================================

#[test]
fn test_ids_start_at_one_and_increase() {
    let mut manager = LightManager::default();
    assert_eq!(manager.insert(point_at(0.0)).unwrap(), LightId(1));
    assert_eq!(manager.insert(point_at(1.0)).unwrap(), LightId(2));
    assert_eq!(manager.len(), 2);
}

#[test]
fn test_insert_appends_to_type_buffer() {
    let mut manager = LightManager::default();
    let a = manager.insert(point_at(1.0)).unwrap();
    let sun = manager.insert(LightParameters::directional(-Vec3::Y, Vec3::ONE, 1.0)).unwrap();
    let b = manager.insert(point_at(2.0)).unwrap();

    assert_eq!(manager.count(LightType::Point), 2);
    assert_eq!(manager.count(LightType::Directional), 1);
    assert_eq!(manager.count(LightType::Spot), 0);
    assert_eq!(manager.index_of(a), Some(0));
    assert_eq!(manager.index_of(b), Some(1));
    assert_eq!(manager.index_of(sun), Some(0));
    assert_eq!(manager.buffer(LightType::Point)[1].position.x, 2.0);
    assert_eq!(manager.buffer_bytes(LightType::Point).len(), 2 * 48);
}

#[test]
#[serial]
fn test_capacity_exceeded() {
    let mut manager = LightManager::new(LightManagerConfig {
        max_directional: 1,
        ..Default::default()
    });
    manager.insert(LightParameters::directional(-Vec3::Y, Vec3::ONE, 1.0)).unwrap();
    let result = manager.insert(LightParameters::directional(Vec3::X, Vec3::ONE, 1.0));
    assert!(matches!(result, Err(Error::CapacityExceeded(_))));
    assert_eq!(manager.count(LightType::Directional), 1);
    // other types are unaffected
    assert!(manager.insert(point_at(0.0)).is_ok());
}

// ============================================================================
// Remove (swap compaction)
// ============================================================================

#[test]
fn test_remove_moves_last_into_hole() {
    let mut manager = LightManager::default();
    let a = manager.insert(point_at(1.0)).unwrap();
    let b = manager.insert(point_at(2.0)).unwrap();
    let c = manager.insert(point_at(3.0)).unwrap();

    let removed = manager.remove(a).unwrap();
    assert_eq!(removed.position().x, 1.0);

    assert_eq!(manager.count(LightType::Point), 2);
    assert_eq!(manager.index_of(c), Some(0));
    assert_eq!(manager.index_of(b), Some(1));
    assert_eq!(manager.buffer(LightType::Point)[0].position.x, 3.0);
    assert_eq!(manager.buffer_ids(LightType::Point), &[c, b]);
}

#[test]
fn test_remove_last_light() {
    let mut manager = LightManager::default();
    let a = manager.insert(point_at(1.0)).unwrap();
    assert!(manager.remove(a).is_some());
    assert!(manager.is_empty());
    assert!(manager.buffer(LightType::Point).is_empty());
}

#[test]
#[serial]
fn test_remove_unknown_is_none() {
    let mut manager = LightManager::default();
    assert!(manager.remove(LightId(99)).is_none());
}

#[test]
fn test_buffer_matches_records_after_churn() {
    let mut manager = LightManager::default();
    let ids: Vec<LightId> = (0..10).map(|i| manager.insert(point_at(i as f32)).unwrap()).collect();
    for id in ids.iter().step_by(3) {
        manager.remove(*id);
    }
    for (slot, id) in manager.buffer_ids(LightType::Point).iter().enumerate() {
        assert_eq!(manager.index_of(*id), Some(slot));
        assert_eq!(manager.buffer(LightType::Point)[slot], manager.get(*id).unwrap().inner);
    }
}

// ============================================================================
// Update and dirty flags
// ============================================================================

#[test]
fn test_update_same_type_in_place() {
    let mut manager = LightManager::default();
    let a = manager.insert(point_at(1.0)).unwrap();
    manager.take_dirty(LightType::Point);

    manager.update(a, point_at(5.0)).unwrap();
    assert_eq!(manager.index_of(a), Some(0));
    assert_eq!(manager.buffer(LightType::Point)[0].position.x, 5.0);
    assert!(manager.take_dirty(LightType::Point));
    assert!(!manager.is_dirty(LightType::Point));
}

#[test]
fn test_update_changing_type_moves_buffers() {
    let mut manager = LightManager::default();
    let a = manager.insert(point_at(1.0)).unwrap();
    let b = manager.insert(point_at(2.0)).unwrap();

    manager.update(a, LightParameters::spot(Vec3::ZERO, -Vec3::Z, 0.9, Vec3::ONE, 1.0)).unwrap();

    assert_eq!(manager.count(LightType::Point), 1);
    assert_eq!(manager.count(LightType::Spot), 1);
    assert_eq!(manager.index_of(b), Some(0));
    assert_eq!(manager.index_of(a), Some(0));
    assert_eq!(manager.get(a).unwrap().light_type, LightType::Spot);
}

#[test]
#[serial]
fn test_update_unknown_is_not_found() {
    let mut manager = LightManager::default();
    assert!(matches!(manager.update(LightId(3), point_at(0.0)), Err(Error::NotFound(_))));
}
