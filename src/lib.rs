//! # Tileworld - 2D tile sandbox world engine
//!
//! A side-view world of tiles, endless horizontally and fixed in height,
//! generated on demand from a seed. A single player walks, jumps, digs and
//! builds in it while managing health and hunger.

pub mod config;
pub mod entity;
pub mod game;
pub mod world;

pub use config::GameConfig;
pub use game::Game;

/// Common imports for internal use
pub mod prelude {
    pub use crate::entity::{Hotbar, InputState, Player, SurvivalEvent};
    pub use crate::world::{BlockId, Chunk, World, CHUNK_W, TILE_SIZE, WORLD_H};
    pub use crate::{Game, GameConfig};
    pub use glam::Vec2;
}
