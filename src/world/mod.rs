//! World management - blocks, chunks, generation, streaming, physics, interaction

pub mod block;
mod chunk;
mod chunk_manager;
pub mod generation;
mod mining_system;
pub mod noise;
pub mod persistence;
mod player_physics;
pub mod rng_trait;
#[allow(clippy::module_inception)]
mod world;

/// Pixels per tile edge
pub const TILE_SIZE: i32 = 32;

/// Seed used when the configuration does not name one
pub const DEFAULT_SEED: u64 = 1337;

pub use block::{BlockDef, BlockId};
pub use chunk::{Chunk, CHUNK_AREA, CHUNK_W, WORLD_H};
pub use chunk_manager::{ChunkManager, LoadReport};
pub use generation::WorldGenerator;
pub use mining_system::MiningSystem;
pub use noise::NoiseGenerator;
#[cfg(not(target_arch = "wasm32"))]
pub use persistence::SaveStore;
pub use persistence::{PersistenceError, PlayerSnapshot, WorldSnapshot, SNAPSHOT_VERSION};
pub use player_physics::{PhysicsParams, PlayerPhysicsSystem};
pub use rng_trait::{FixedRng, WorldRng};
pub use world::{Rect, World};
