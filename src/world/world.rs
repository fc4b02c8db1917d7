//! World - tile addressing over the chunk store
//!
//! `World` is the only gateway to chunk contents. Everything else addresses
//! tiles by world coordinates through it.

use super::chunk_manager::{ChunkManager, LoadReport};
use super::generation::WorldGenerator;
use super::{BlockId, Chunk, CHUNK_W, TILE_SIZE, WORLD_H};

/// Axis-aligned rectangle in pixel space, `[x, x + w) × [y, y + h)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Pixel rectangle covered by a tile
    pub fn of_tile(tx: i32, ty: i32) -> Self {
        let size = TILE_SIZE as f32;
        Self::new(tx as f32 * size, ty as f32 * size, size, size)
    }

    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict overlap; rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// Inclusive tile range `(min_tx, min_ty, max_tx, max_ty)` touched by this rect
    pub fn tile_span(&self) -> (i32, i32, i32, i32) {
        let size = TILE_SIZE as f32;
        let min_tx = (self.x / size).floor() as i32;
        let min_ty = (self.y / size).floor() as i32;
        let max_tx = ((self.x + self.w) / size).ceil() as i32 - 1;
        let max_ty = ((self.y + self.h) / size).ceil() as i32 - 1;
        (min_tx, min_ty, max_tx, max_ty)
    }
}

/// The tile world: a generator plus the chunks it has produced
pub struct World {
    generator: WorldGenerator,
    chunk_manager: ChunkManager,
}

impl World {
    pub fn new(seed: u64, load_radius: i32, unload_hysteresis: i32) -> Self {
        log::info!(
            "Creating world: seed {}, load radius {}, hysteresis {}",
            seed,
            load_radius,
            unload_hysteresis
        );
        Self {
            generator: WorldGenerator::new(seed),
            chunk_manager: ChunkManager::new(load_radius, unload_hysteresis),
        }
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed
    }

    pub fn generator(&self) -> &WorldGenerator {
        &self.generator
    }

    pub fn chunk_manager(&self) -> &ChunkManager {
        &self.chunk_manager
    }

    /// Convert a world tile column to (chunk key, local column)
    #[inline]
    pub fn tile_to_chunk(tx: i32) -> (i32, usize) {
        let width = CHUNK_W as i32;
        (tx.div_euclid(width), tx.rem_euclid(width) as usize)
    }

    /// Inverse of [`World::tile_to_chunk`]
    ///
    /// Keys outside the range `tile_to_chunk` produces wrap around.
    #[inline]
    pub fn chunk_to_tile(key: i32, local: usize) -> i32 {
        key.wrapping_mul(CHUNK_W as i32).wrapping_add(local as i32)
    }

    /// Pixel position to the tile containing it
    #[inline]
    pub fn pixel_to_tile(px: f32, py: f32) -> (i32, i32) {
        let size = TILE_SIZE as f32;
        ((px / size).floor() as i32, (py / size).floor() as i32)
    }

    /// Chunk key holding a pixel column
    #[inline]
    pub fn pixel_to_chunk_key(px: f32) -> i32 {
        Self::tile_to_chunk(Self::pixel_to_tile(px, 0.0).0).0
    }

    #[inline]
    fn row_in_range(ty: i32) -> bool {
        (0..WORLD_H as i32).contains(&ty)
    }

    /// Block at a tile; rows outside the world read as air
    pub fn get_block(&mut self, tx: i32, ty: i32) -> BlockId {
        if !Self::row_in_range(ty) {
            return BlockId::Air;
        }
        let (key, local) = Self::tile_to_chunk(tx);
        self.chunk_manager
            .get_or_create(key, &self.generator)
            .get(local, ty as usize)
    }

    /// Block at a tile without generating anything; `None` if the chunk is not resident
    pub fn block_if_loaded(&self, tx: i32, ty: i32) -> Option<BlockId> {
        if !Self::row_in_range(ty) {
            return Some(BlockId::Air);
        }
        let (key, local) = Self::tile_to_chunk(tx);
        self.chunk_manager
            .get(key)
            .map(|chunk| chunk.get(local, ty as usize))
    }

    /// Write a block; rows outside the world are ignored
    pub fn set_block(&mut self, tx: i32, ty: i32, block: BlockId) {
        if !Self::row_in_range(ty) {
            return;
        }
        let (key, local) = Self::tile_to_chunk(tx);
        self.chunk_manager
            .get_or_create(key, &self.generator)
            .set(local, ty as usize, block);
    }

    #[inline]
    pub fn is_solid(block: BlockId) -> bool {
        block.is_solid()
    }

    pub fn is_solid_at(&mut self, tx: i32, ty: i32) -> bool {
        Self::is_solid(self.get_block(tx, ty))
    }

    /// Whether any solid tile intersects `rect`
    pub fn overlaps_solid(&mut self, rect: &Rect) -> bool {
        let (min_tx, min_ty, max_tx, max_ty) = rect.tile_span();
        for ty in min_ty..=max_ty {
            for tx in min_tx..=max_tx {
                if self.is_solid_at(tx, ty) {
                    return true;
                }
            }
        }
        false
    }

    /// Stream chunks around `center_key` with the configured load radius
    pub fn update_streaming(&mut self, center_key: i32) -> LoadReport {
        let radius = self.chunk_manager.load_radius;
        self.ensure_loaded(center_key, radius)
    }

    pub fn ensure_loaded(&mut self, center_key: i32, radius: i32) -> LoadReport {
        self.chunk_manager
            .ensure_loaded(center_key, radius, &self.generator)
    }

    /// Resident chunks within the load window around `center_key`
    pub fn chunks_in_window(&self, center_key: i32) -> Vec<Chunk> {
        self.chunk_manager
            .chunks_within(center_key, self.chunk_manager.load_radius)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Replace every resident chunk with `chunks`
    pub fn replace_chunks(&mut self, chunks: Vec<Chunk>) {
        self.chunk_manager.clear();
        for mut chunk in chunks {
            chunk.dirty = false;
            self.chunk_manager.insert_chunk(chunk);
        }
    }

    /// First row from the top holding a solid block in column `tx`
    pub fn surface_row(&mut self, tx: i32) -> Option<usize> {
        (0..WORLD_H).find(|&row| self.is_solid_at(tx, row as i32))
    }
}
