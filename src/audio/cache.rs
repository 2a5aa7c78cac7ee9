use std::collections::HashMap;

/// Decoded buffers keyed by resource id. Entries are never evicted.
///
/// There is no in-flight tracking: two concurrent misses for the same id both
/// decode and the later `insert` replaces the earlier one.
pub struct DecodedBufferCache<B> {
    buffers: HashMap<String, B>,
}

impl<B: Clone> DecodedBufferCache<B> {
    pub fn new() -> Self {
        DecodedBufferCache {
            buffers: HashMap::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<B> {
        self.buffers.get(id).cloned()
    }

    pub fn insert(&mut self, id: &str, buffer: B) {
        self.buffers.insert(id.to_string(), buffer);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.buffers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

impl<B: Clone> Default for DecodedBufferCache<B> {
    fn default() -> Self {
        Self::new()
    }
}
