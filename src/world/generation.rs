//! Procedural chunk generation - terrain, caves, ores and trees

use super::block::BlockId;
use super::chunk::{Chunk, CHUNK_W, WORLD_H};
use super::noise::NoiseGenerator;

// Terrain shape
const BASE_GROUND: f64 = 24.0;
pub const GROUND_MIN: usize = 10; // leaves room above for the tallest tree
pub const GROUND_MAX: usize = WORLD_H - 12;
const DIRT_DEPTH: usize = 3;

// Caves
const CAVE_START_OFFSET: usize = 4;
const CAVE_THRESHOLD: f64 = 0.68;

// Ores
const COAL_THRESHOLD: f64 = 0.78;
const IRON_THRESHOLD: f64 = 0.9;
pub const IRON_MIN_ROW: usize = 40;

// Trees
const TREE_THRESHOLD: f64 = 0.8;
const TREE_MIN_HEIGHT: usize = 3;
const TREE_HEIGHT_RANGE: f64 = 3.0;
const LEAF_RADIUS: i32 = 2;
const LEAF_MANHATTAN: i32 = 3;

/// A tree rooted at some world column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tree {
    pub ground_row: usize,
    pub height: usize,
}

/// Chunk generator driven by seeded value noise
///
/// Output is a pure function of `(seed, key)`, so an evicted chunk
/// regenerates identically.
#[derive(Clone, Copy, Debug)]
pub struct WorldGenerator {
    pub seed: u64,
    noise: NoiseGenerator,
}

impl WorldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            noise: NoiseGenerator::new(seed),
        }
    }

    pub fn noise(&self) -> &NoiseGenerator {
        &self.noise
    }

    /// Generate a complete chunk for the given key
    pub fn generate_chunk(&self, key: i32) -> Chunk {
        let mut chunk = Chunk::new(key);
        // World columns in i64 so keys at the ends of the i32 range never overflow
        let origin = i64::from(key) * CHUNK_W as i64;

        for lx in 0..CHUNK_W {
            let wx = origin + lx as i64;
            let ground = self.ground_row(wx);
            self.fill_column(&mut chunk, lx, ground);
            self.carve_caves(&mut chunk, lx, wx, ground);
            self.place_ores(&mut chunk, lx, wx);
        }

        // Trees from neighbouring chunks can reach in with their leaves
        let reach = i64::from(LEAF_RADIUS);
        let trees: Vec<(i64, Tree)> = ((origin - reach)..(origin + CHUNK_W as i64 + reach))
            .filter_map(|wx| self.tree_at(wx).map(|tree| (wx, tree)))
            .filter(|&(wx, tree)| {
                let lx = wx - origin;
                !(0..CHUNK_W as i64).contains(&lx)
                    || chunk.get(lx as usize, tree.ground_row) == BlockId::Grass
            })
            .collect();

        // All trunks first so leaves never claim a trunk cell
        for &(wx, tree) in &trees {
            place_trunk(&mut chunk, (wx - origin) as i32, tree);
        }
        for &(wx, tree) in &trees {
            place_leaves(&mut chunk, (wx - origin) as i32, tree);
        }

        // Fresh chunks start as not dirty
        chunk.dirty = false;

        log::trace!(
            "[GEN] Chunk {} generated - {} trees, {} non-air blocks",
            key,
            trees.len(),
            chunk.count_non_air()
        );
        chunk
    }

    /// Surface row of a world column
    pub fn ground_row(&self, wx: i64) -> usize {
        let x = wx as f64;
        let height = BASE_GROUND
            + self.noise.noise1d(x * 0.05) * 8.0
            + self.noise.noise1d(x * 0.013 + 100.0) * 14.0;
        (height.floor() as i64).clamp(GROUND_MIN as i64, GROUND_MAX as i64) as usize
    }

    /// Tree rooted at this column, if any
    ///
    /// Only local maxima of the tree field above the threshold grow a
    /// trunk, which keeps trunks at least two columns apart.
    pub fn tree_at(&self, wx: i64) -> Option<Tree> {
        let value = self.tree_field(wx);
        if value <= TREE_THRESHOLD {
            return None;
        }
        if value <= self.tree_field(wx - 1) || value < self.tree_field(wx + 1) {
            return None;
        }

        let roll = self.noise.hash(wx, 7);
        let height = TREE_MIN_HEIGHT + (roll * TREE_HEIGHT_RANGE).floor() as usize;
        Some(Tree {
            ground_row: self.ground_row(wx),
            height,
        })
    }

    fn tree_field(&self, wx: i64) -> f64 {
        self.noise.noise1d(wx as f64 * 0.7 + 500.0)
    }

    /// Grass on the surface, a dirt band, stone to the bottom
    fn fill_column(&self, chunk: &mut Chunk, lx: usize, ground: usize) {
        for row in ground..WORLD_H {
            let block = if row == ground {
                BlockId::Grass
            } else if row <= ground + DIRT_DEPTH {
                BlockId::Dirt
            } else {
                BlockId::Stone
            };
            chunk.set(lx, row, block);
        }
    }

    fn carve_caves(&self, chunk: &mut Chunk, lx: usize, wx: i64, ground: usize) {
        let x = wx as f64 * 0.09;
        for row in (ground + CAVE_START_OFFSET + 1)..WORLD_H {
            let value = self.noise.noise2d(x, row as f64 * 0.12 + 300.0);
            if value > CAVE_THRESHOLD {
                chunk.set(lx, row, BlockId::Air);
            }
        }
    }

    /// Coal and iron replace stone; iron is checked last and wins
    fn place_ores(&self, chunk: &mut Chunk, lx: usize, wx: i64) {
        let x = wx as f64 * 0.35 + 1000.0;
        for row in 0..WORLD_H {
            if chunk.get(lx, row) != BlockId::Stone {
                continue;
            }
            let value = self.noise.noise2d(x, row as f64 * 0.35 + 1000.0);
            if value > COAL_THRESHOLD {
                chunk.set(lx, row, BlockId::Coal);
            }
            if value > IRON_THRESHOLD && row >= IRON_MIN_ROW {
                chunk.set(lx, row, BlockId::Iron);
            }
        }
    }
}

/// Log cells straight up from the surface; `lx` may lie outside the chunk
fn place_trunk(chunk: &mut Chunk, lx: i32, tree: Tree) {
    if !(0..CHUNK_W as i32).contains(&lx) {
        return;
    }
    let lx = lx as usize;
    for dy in 1..=tree.height {
        let Some(row) = tree.ground_row.checked_sub(dy) else {
            break;
        };
        if chunk.get(lx, row).is_air() {
            chunk.set(lx, row, BlockId::Log);
        }
    }
}

/// Diamond-ish canopy centred on the trunk top, clipped to this chunk
fn place_leaves(chunk: &mut Chunk, lx: i32, tree: Tree) {
    let top = tree.ground_row as i32 - tree.height as i32;
    for dy in -LEAF_RADIUS..=LEAF_RADIUS {
        for dx in -LEAF_RADIUS..=LEAF_RADIUS {
            if dx.abs() + dy.abs() > LEAF_MANHATTAN {
                continue;
            }
            let (col, row) = (lx + dx, top + dy);
            if !(0..CHUNK_W as i32).contains(&col) || !(0..WORLD_H as i32).contains(&row) {
                continue;
            }
            let (col, row) = (col as usize, row as usize);
            if chunk.get(col, row).is_air() {
                chunk.set(col, row, BlockId::Leaves);
            }
        }
    }
}
