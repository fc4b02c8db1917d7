//! Chunk lifecycle management - lazy generation and distance-based eviction

use ahash::AHashMap;

use super::generation::WorldGenerator;
use super::Chunk;

/// Outcome of one streaming pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub generated: usize,
    pub evicted: usize,
}

/// Keyed chunk cache with a load radius and an unload guard band
///
/// Chunks within `load_radius` of the centre are kept resident; chunks
/// further than `load_radius + unload_hysteresis` are dropped. The gap
/// between the two stops reload thrashing when the player oscillates at a
/// chunk boundary.
pub struct ChunkManager {
    /// Loaded chunks, keyed by chunk index
    chunks: AHashMap<i32, Chunk>,

    /// Chunks loaded on each side of the centre
    pub load_radius: i32,

    /// Extra distance past the load radius before a chunk is evicted
    pub unload_hysteresis: i32,

    /// Centre of the last streaming pass
    pub last_center: Option<i32>,
}

impl ChunkManager {
    pub const DEFAULT_LOAD_RADIUS: i32 = 3;
    pub const DEFAULT_UNLOAD_HYSTERESIS: i32 = 2;

    pub fn new(load_radius: i32, unload_hysteresis: i32) -> Self {
        Self {
            chunks: AHashMap::new(),
            load_radius: load_radius.max(0),
            unload_hysteresis: unload_hysteresis.max(0),
            last_center: None,
        }
    }

    /// Upper bound on resident chunks after a streaming pass with `radius`
    pub fn max_resident(&self, radius: i32) -> usize {
        (2 * (radius.max(0) + self.unload_hysteresis) + 1) as usize
    }

    /// Get the chunk for `key`, generating it on a miss
    pub fn get_or_create(&mut self, key: i32, generator: &WorldGenerator) -> &mut Chunk {
        self.chunks.entry(key).or_insert_with(|| {
            log::debug!("[GEN] Chunk {} not resident, generating", key);
            generator.generate_chunk(key)
        })
    }

    /// Make `[center - radius, center + radius]` resident, then drop every
    /// chunk further than `radius + unload_hysteresis` from `center`
    pub fn ensure_loaded(
        &mut self,
        center: i32,
        radius: i32,
        generator: &WorldGenerator,
    ) -> LoadReport {
        let radius = radius.max(0);
        let mut report = LoadReport::default();

        for key in center.saturating_sub(radius)..=center.saturating_add(radius) {
            if !self.chunks.contains_key(&key) {
                self.get_or_create(key, generator);
                report.generated += 1;
            }
        }

        report.evicted =
            self.evict_outside(center, radius.saturating_add(self.unload_hysteresis));
        self.last_center = Some(center);

        if report.generated > 0 || report.evicted > 0 {
            log::debug!(
                "[STREAM] Centre {}: generated {}, evicted {}, resident {}",
                center,
                report.generated,
                report.evicted,
                self.chunks.len()
            );
        }
        report
    }

    /// Drop every chunk with `|key - center| > keep_radius`
    pub fn evict_outside(&mut self, center: i32, keep_radius: i32) -> usize {
        let keep_radius = keep_radius.max(0) as u32;
        let before = self.chunks.len();
        self.chunks.retain(|&key, chunk| {
            let keep = key.abs_diff(center) <= keep_radius;
            if !keep && chunk.dirty {
                log::debug!(
                    "[EVICT] Chunk {} had unsaved edits, they will regenerate pristine",
                    key
                );
            }
            keep
        });
        before - self.chunks.len()
    }

    pub fn get(&self, key: i32) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    pub fn get_mut(&mut self, key: i32) -> Option<&mut Chunk> {
        self.chunks.get_mut(&key)
    }

    /// Check if chunk is loaded
    pub fn contains(&self, key: i32) -> bool {
        self.chunks.contains_key(&key)
    }

    /// Insert a pre-built chunk (snapshot restore), replacing any resident one
    pub fn insert_chunk(&mut self, chunk: Chunk) {
        self.chunks.insert(chunk.key, chunk);
    }

    /// Clear all chunks
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.last_center = None;
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Resident keys in ascending order
    pub fn resident_keys(&self) -> Vec<i32> {
        let mut keys: Vec<i32> = self.chunks.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Resident chunks within `radius` of `center`, ordered by key
    pub fn chunks_within(&self, center: i32, radius: i32) -> Vec<&Chunk> {
        let radius = radius.max(0) as u32;
        let mut chunks: Vec<&Chunk> = self
            .chunks
            .values()
            .filter(|chunk| chunk.key.abs_diff(center) <= radius)
            .collect();
        chunks.sort_unstable_by_key(|chunk| chunk.key);
        chunks
    }
}

impl Default for ChunkManager {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LOAD_RADIUS, Self::DEFAULT_UNLOAD_HYSTERESIS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::BlockId;

    fn generator() -> WorldGenerator {
        WorldGenerator::new(12345)
    }

    #[test]
    fn test_new_creates_empty_manager() {
        let manager = ChunkManager::default();
        assert_eq!(manager.chunk_count(), 0);
        assert_eq!(manager.load_radius, 3);
        assert_eq!(manager.unload_hysteresis, 2);
        assert_eq!(manager.last_center, None);
    }

    #[test]
    fn test_negative_parameters_are_clamped() {
        let manager = ChunkManager::new(-2, -1);
        assert_eq!(manager.load_radius, 0);
        assert_eq!(manager.unload_hysteresis, 0);
        assert_eq!(manager.max_resident(0), 1);
    }

    #[test]
    fn test_get_or_create_generates_once() {
        let mut manager = ChunkManager::default();
        let gen = generator();

        manager.get_or_create(-7, &gen).set(0, 0, BlockId::Iron);
        assert_eq!(manager.chunk_count(), 1);

        // Second call returns the edited chunk, not a fresh one
        assert_eq!(manager.get_or_create(-7, &gen).get(0, 0), BlockId::Iron);
        assert_eq!(manager.chunk_count(), 1);
    }

    #[test]
    fn test_ensure_loaded_window() {
        let mut manager = ChunkManager::new(4, 0);
        let gen = generator();

        for key in -5..=5 {
            manager.get_or_create(key, &gen);
        }
        assert_eq!(manager.chunk_count(), 11);

        let report = manager.ensure_loaded(0, 4, &gen);
        assert_eq!(report.generated, 0);
        assert_eq!(report.evicted, 2);
        assert_eq!(manager.resident_keys(), (-4..=4).collect::<Vec<_>>());
        assert_eq!(manager.last_center, Some(0));
    }

    #[test]
    fn test_hysteresis_keeps_guard_band() {
        let mut manager = ChunkManager::new(4, 1);
        let gen = generator();

        for key in -6..=6 {
            manager.get_or_create(key, &gen);
        }
        let report = manager.ensure_loaded(0, 4, &gen);
        assert_eq!(report.evicted, 2);
        assert_eq!(manager.resident_keys(), (-5..=5).collect::<Vec<_>>());
    }

    #[test]
    fn test_oscillating_at_boundary_does_not_thrash() {
        let mut manager = ChunkManager::new(2, 1);
        let gen = generator();

        manager.ensure_loaded(0, 2, &gen);
        let first = manager.ensure_loaded(1, 2, &gen);
        assert_eq!(first.generated, 1);

        for _ in 0..5 {
            let back = manager.ensure_loaded(0, 2, &gen);
            let forth = manager.ensure_loaded(1, 2, &gen);
            assert_eq!(back, LoadReport::default());
            assert_eq!(forth, LoadReport::default());
        }
    }

    #[test]
    fn test_residency_bounded_during_travel() {
        let mut manager = ChunkManager::new(3, 2);
        let gen = generator();
        let bound = manager.max_resident(3);
        assert_eq!(bound, 11);

        let path = (0..60).chain((-40..60).rev()).chain([500, -500, 3, 4, 3]);
        for center in path {
            manager.ensure_loaded(center, 3, &gen);
            assert!(manager.chunk_count() <= bound);
            for key in center - 3..=center + 3 {
                assert!(manager.contains(key));
            }
        }
    }

    #[test]
    fn test_evicted_chunk_regenerates_pristine() {
        let mut manager = ChunkManager::new(1, 0);
        let gen = generator();

        manager.ensure_loaded(0, 1, &gen);
        let pristine = gen.generate_chunk(0);
        manager.get_mut(0).unwrap().set(5, 5, BlockId::Log);

        manager.ensure_loaded(10, 1, &gen);
        assert!(!manager.contains(0));

        manager.ensure_loaded(0, 1, &gen);
        assert!(manager.get(0).unwrap().same_tiles(&pristine));
    }

    #[test]
    fn test_insert_and_clear() {
        let mut manager = ChunkManager::default();
        manager.insert_chunk(Chunk::new(5));
        assert!(manager.contains(5));
        assert_eq!(manager.get(5).unwrap().key, 5);

        manager.clear();
        assert_eq!(manager.chunk_count(), 0);
        assert_eq!(manager.last_center, None);
    }

    #[test]
    fn test_chunks_within_sorted() {
        let mut manager = ChunkManager::default();
        for key in [3, -2, 0, 9, -1] {
            manager.insert_chunk(Chunk::new(key));
        }
        let keys: Vec<i32> = manager.chunks_within(0, 3).iter().map(|c| c.key).collect();
        assert_eq!(keys, vec![-2, -1, 0, 3]);
    }

    #[test]
    fn test_extreme_keys_are_evicted() {
        let mut manager = ChunkManager::new(1, 0);
        manager.insert_chunk(Chunk::new(i32::MIN));
        manager.insert_chunk(Chunk::new(i32::MAX));
        manager.insert_chunk(Chunk::new(0));

        let keys: Vec<i32> = manager
            .chunks_within(i32::MAX, 1)
            .iter()
            .map(|c| c.key)
            .collect();
        assert_eq!(keys, vec![i32::MAX]);

        let report = manager.ensure_loaded(0, 1, &generator());
        assert_eq!(report.evicted, 2);
        assert_eq!(manager.resident_keys(), vec![-1, 0, 1]);
    }

    #[test]
    fn test_window_at_axis_end_saturates() {
        let mut manager = ChunkManager::new(2, 1);
        let report = manager.ensure_loaded(i32::MAX, 2, &generator());
        assert_eq!(report.generated, 3);
        assert_eq!(
            manager.resident_keys(),
            vec![i32::MAX - 2, i32::MAX - 1, i32::MAX]
        );
    }
}
