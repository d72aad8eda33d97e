/// Scene: the game objects of a level.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys.
/// The scene does not own the renderer: lifecycle calls borrow it.

use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::renderer::Renderer;
use super::game_object::GameObject;
use super::transform::Transform;

const SOURCE: &str = "simple3d::Scene";

new_key_type! {
    /// Stable key for game objects in a Scene.
    pub struct GameObjectKey;
}

#[derive(Debug, Default)]
pub struct Scene {
    objects: SlotMap<GameObjectKey, GameObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object. It is not started.
    pub fn create_object(&mut self, name: impl Into<String>, transform: Transform) -> GameObjectKey {
        self.objects.insert(GameObject::new(name, transform))
    }

    pub fn object(&self, key: GameObjectKey) -> Option<&GameObject> {
        self.objects.get(key)
    }

    pub fn object_mut(&mut self, key: GameObjectKey) -> Option<&mut GameObject> {
        self.objects.get_mut(key)
    }

    /// First object with the given name.
    pub fn find(&self, name: &str) -> Option<GameObjectKey> {
        self.objects.iter().find(|(_, object)| object.name() == name).map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GameObjectKey, &GameObject)> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Start every object not started yet.
    pub fn on_start(&mut self, renderer: &mut Renderer) -> Result<()> {
        for object in self.objects.values_mut() {
            object.on_start(renderer)?;
        }
        crate::engine_debug!(SOURCE, "Scene started ({} objects)", self.objects.len());
        Ok(())
    }

    /// Dispose an object's components and drop it.
    pub fn remove_object(&mut self, key: GameObjectKey, renderer: &mut Renderer) -> Result<Option<GameObject>> {
        let Some(mut object) = self.objects.remove(key) else {
            return Ok(None);
        };
        object.dispose(renderer)?;
        Ok(Some(object))
    }

    /// Dispose and drop every object.
    pub fn clear(&mut self, renderer: &mut Renderer) -> Result<()> {
        let mut result = Ok(());
        for (_, mut object) in self.objects.drain() {
            if let Err(err) = object.dispose(renderer) {
                result = Err(err);
            }
        }
        result
    }
}
