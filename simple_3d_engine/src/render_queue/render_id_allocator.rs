/// Allocates and recycles [`RenderId`]s.
///
/// Freed ids are handed out again before new ones (last freed first), which
/// keeps ids dense for callers that index arrays with them.
///
/// # Example
///
/// ```ignore
/// let mut ids = RenderIdAllocator::new();
/// let a = ids.alloc();  // RenderId(0)
/// let b = ids.alloc();  // RenderId(1)
/// ids.free(a);
/// let c = ids.alloc();  // RenderId(0) again
/// ```

use super::render_queue_item::RenderId;

#[derive(Debug, Default)]
pub struct RenderIdAllocator {
    free_list: Vec<RenderId>,
    next_id: u32,
    len: u32,
}

impl RenderIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self) -> RenderId {
        self.len += 1;
        self.free_list.pop().unwrap_or_else(|| {
            let id = RenderId(self.next_id);
            self.next_id += 1;
            id
        })
    }

    pub fn free(&mut self, id: RenderId) {
        debug_assert!(id.0 < self.next_id, "freeing an unallocated render id: {}", id);
        debug_assert!(!self.free_list.contains(&id), "render id {} freed twice", id);
        self.len -= 1;
        self.free_list.push(id);
    }

    /// Highest id ever allocated + 1
    pub fn high_water_mark(&self) -> u32 {
        self.next_id
    }

    /// Number of ids currently in use
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
#[path = "render_id_allocator_tests.rs"]
mod tests;
