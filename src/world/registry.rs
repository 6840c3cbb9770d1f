use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::world::chunk::Chunk;
use crate::world::chunk_coord::ChunkCoord;

pub type SharedChunk = Arc<RwLock<Chunk>>;

/// Process-wide map from chunk coordinate to chunk. Append-only: chunks are
/// never removed, and at most one chunk ever exists per coordinate, even
/// under concurrent insertion.
#[derive(Default)]
pub struct ChunkRegistry {
    chunks: RwLock<HashMap<ChunkCoord, SharedChunk>>,
}

impl ChunkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, coord: ChunkCoord) -> Option<SharedChunk> {
        self.chunks.read().get(&coord).cloned()
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.read().contains_key(&coord)
    }

    /// Atomic check-and-insert: returns the chunk at `coord`, creating an
    /// empty one if absent. The flag reports whether this call created it,
    /// so exactly one of any set of racing callers sees `true`.
    pub fn get_or_insert(&self, coord: ChunkCoord) -> (SharedChunk, bool) {
        let mut chunks = self.chunks.write();
        match chunks.entry(coord) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(entry) => {
                let chunk = Arc::new(RwLock::new(Chunk::new(coord)));
                entry.insert(chunk.clone());
                (chunk, true)
            }
        }
    }

    pub fn coords(&self) -> Vec<ChunkCoord> {
        self.chunks.read().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.chunks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_absent() {
        let registry = ChunkRegistry::new();
        assert!(registry.find(ChunkCoord::new(0, 0, 0)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_or_insert_is_idempotent() {
        let registry = ChunkRegistry::new();
        let coord = ChunkCoord::new(1, 2, 3);

        let (first, created) = registry.get_or_insert(coord);
        assert!(created);
        let (second, created) = registry.get_or_insert(coord);
        assert!(!created);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_insert_yields_one_chunk() {
        let registry = ChunkRegistry::new();
        let coord = ChunkCoord::new(7, 0, -7);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.get_or_insert(coord).1))
                .collect();
            let creations = handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .filter(|created| *created)
                .count();
            assert_eq!(creations, 1);
        });
        assert_eq!(registry.len(), 1);
    }
}
