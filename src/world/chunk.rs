//! Chunk - one CHUNK_W-wide vertical slice of the world

use serde::{Deserialize, Serialize};

use super::block::BlockId;

/// Columns per chunk
pub const CHUNK_W: usize = 32;
/// Rows in the world (row 0 = top)
pub const WORLD_H: usize = 64;
pub const CHUNK_AREA: usize = CHUNK_W * WORLD_H;

/// A full-height slice of the world, `WORLD_H` rows by `CHUNK_W` columns
#[derive(Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk index along the horizontal axis
    pub key: i32,

    /// Block data, row-major order
    /// Index = row * CHUNK_W + col
    #[serde(with = "serde_big_array::BigArray")]
    blocks: [BlockId; CHUNK_AREA],

    /// Whether chunk has been edited since generation or load (not persisted)
    #[serde(skip)]
    pub dirty: bool,
}

impl Chunk {
    pub fn new(key: i32) -> Self {
        Self {
            key,
            blocks: [BlockId::Air; CHUNK_AREA],
            dirty: false,
        }
    }

    /// Get block at local column (0..CHUNK_W) and row (0..WORLD_H)
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> BlockId {
        debug_assert!(col < CHUNK_W && row < WORLD_H);
        self.blocks[row * CHUNK_W + col]
    }

    /// Set block at local coordinates
    #[inline]
    pub fn set(&mut self, col: usize, row: usize, block: BlockId) {
        debug_assert!(col < CHUNK_W && row < WORLD_H);
        self.blocks[row * CHUNK_W + col] = block;
        self.dirty = true;
    }

    /// Count non-air blocks (for debugging save/load)
    pub fn count_non_air(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_air()).count()
    }

    /// Get raw block slice for rendering
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// Same key and same tiles; the dirty flag is ignored
    pub fn same_tiles(&self, other: &Chunk) -> bool {
        self.key == other.key && self.blocks[..] == other.blocks[..]
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("key", &self.key)
            .field("non_air", &self.count_non_air())
            .field("dirty", &self.dirty)
            .finish()
    }
}
