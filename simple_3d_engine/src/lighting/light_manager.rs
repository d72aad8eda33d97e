/// LightManager: owns every light and its dense per-type GPU buffer.
///
/// Each light type has a fixed capacity and a tightly packed buffer of
/// [`InnerLightParameters`]. Removing a light moves the last light of the
/// same type into the freed slot, so buffers never have holes. A dirty flag
/// per type tells the caller which buffers need re-uploading.

use rustc_hash::FxHashMap;
use crate::config::LightManagerConfig;
use crate::error::Result;
use super::light::{InnerLightParameters, LightId, LightParameters, LightType};

const SOURCE: &str = "simple3d::LightManager";

#[derive(Debug, Clone, Copy)]
struct LightRecord {
    params: LightParameters,
    /// Position in the buffer of `params.light_type`
    index: usize,
}

pub struct LightManager {
    config: LightManagerConfig,
    max_id: u32,
    lights: FxHashMap<LightId, LightRecord>,
    /// Buffer slot -> light, per type
    slots: [Vec<LightId>; LightType::COUNT],
    buffers: [Vec<InnerLightParameters>; LightType::COUNT],
    dirty: [bool; LightType::COUNT],
}

impl LightManager {
    pub fn new(config: LightManagerConfig) -> Self {
        Self {
            config,
            max_id: 0,
            lights: FxHashMap::default(),
            slots: Default::default(),
            buffers: Default::default(),
            dirty: [false; LightType::COUNT],
        }
    }

    pub fn capacity(&self, light_type: LightType) -> usize {
        match light_type {
            LightType::Point => self.config.max_point,
            LightType::Spot => self.config.max_spot,
            LightType::Directional => self.config.max_directional,
        }
    }

    // ===== LIGHTS =====

    /// Register a light and append it to its type's buffer.
    pub fn insert(&mut self, params: LightParameters) -> Result<LightId> {
        self.ensure_room(params.light_type)?;

        self.max_id += 1;
        let id = LightId(self.max_id);
        let index = self.push_slot(id, &params);
        self.lights.insert(id, LightRecord { params, index });

        crate::engine_trace!(SOURCE, "Inserted {:?} {} at slot {}", params.light_type, id, index);
        Ok(id)
    }

    /// Replace a light's parameters. Changing the type moves the light to
    /// the other buffer.
    pub fn update(&mut self, id: LightId, params: LightParameters) -> Result<()> {
        let Some(record) = self.lights.get(&id).copied() else {
            crate::engine_bail!(SOURCE, NotFound, "Cannot update unknown {}", id);
        };

        if record.params.light_type == params.light_type {
            let t = params.light_type.index();
            self.buffers[t][record.index] = params.inner;
            self.dirty[t] = true;
            self.lights.insert(id, LightRecord { params, index: record.index });
            return Ok(());
        }

        self.ensure_room(params.light_type)?;
        self.remove_slot(record.params.light_type, record.index);
        let index = self.push_slot(id, &params);
        self.lights.insert(id, LightRecord { params, index });
        Ok(())
    }

    /// Unregister a light. The last light of the same type takes its slot.
    pub fn remove(&mut self, id: LightId) -> Option<LightParameters> {
        let Some(record) = self.lights.remove(&id) else {
            crate::engine_debug!(SOURCE, "Remove of unknown {} ignored", id);
            return None;
        };
        self.remove_slot(record.params.light_type, record.index);
        Some(record.params)
    }

    pub fn get(&self, id: LightId) -> Option<&LightParameters> {
        self.lights.get(&id).map(|record| &record.params)
    }

    /// Buffer slot of a light within its type's buffer
    pub fn index_of(&self, id: LightId) -> Option<usize> {
        self.lights.get(&id).map(|record| record.index)
    }

    pub fn contains(&self, id: LightId) -> bool {
        self.lights.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LightId, &LightParameters)> {
        self.lights.iter().map(|(id, record)| (*id, &record.params))
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn count(&self, light_type: LightType) -> usize {
        self.buffers[light_type.index()].len()
    }

    // ===== BUFFERS =====

    pub fn buffer(&self, light_type: LightType) -> &[InnerLightParameters] {
        &self.buffers[light_type.index()]
    }

    /// Raw bytes of a type's buffer, ready for upload
    pub fn buffer_bytes(&self, light_type: LightType) -> &[u8] {
        bytemuck::cast_slice(self.buffer(light_type))
    }

    /// Lights in buffer order
    pub fn buffer_ids(&self, light_type: LightType) -> &[LightId] {
        &self.slots[light_type.index()]
    }

    pub fn is_dirty(&self, light_type: LightType) -> bool {
        self.dirty[light_type.index()]
    }

    /// Return the dirty flag and clear it (call after uploading)
    pub fn take_dirty(&mut self, light_type: LightType) -> bool {
        std::mem::take(&mut self.dirty[light_type.index()])
    }

    // ===== INTERNAL =====

    fn ensure_room(&self, light_type: LightType) -> Result<()> {
        let capacity = self.capacity(light_type);
        if self.count(light_type) >= capacity {
            crate::engine_bail!(
                SOURCE,
                CapacityExceeded,
                "{:?} light capacity ({}) reached",
                light_type,
                capacity
            );
        }
        Ok(())
    }

    fn push_slot(&mut self, id: LightId, params: &LightParameters) -> usize {
        let t = params.light_type.index();
        self.slots[t].push(id);
        self.buffers[t].push(params.inner);
        self.dirty[t] = true;
        self.buffers[t].len() - 1
    }

    fn remove_slot(&mut self, light_type: LightType, index: usize) {
        let t = light_type.index();
        self.slots[t].swap_remove(index);
        self.buffers[t].swap_remove(index);
        self.dirty[t] = true;

        if let Some(moved) = self.slots[t].get(index).copied() {
            if let Some(record) = self.lights.get_mut(&moved) {
                record.index = index;
            }
        }
    }
}

impl Default for LightManager {
    fn default() -> Self {
        Self::new(LightManagerConfig::default())
    }
}

#[cfg(test)]
#[path = "light_manager_tests.rs"]
mod tests;
