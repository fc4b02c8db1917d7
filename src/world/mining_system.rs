//! Mining system - breaking and placing tiles from the player's hotbar

use glam::Vec2;

use super::{BlockId, Rect, World};
use crate::entity::player::Player;

/// Mining system - static utility methods for mining and placement
pub struct MiningSystem;

impl MiningSystem {
    /// Default reach, in pixels (five tiles)
    pub const DEFAULT_REACH: f32 = 160.0;

    /// Whether the centre of tile (tx, ty) is within `reach` pixels of the player's centre
    pub fn in_reach(player: &Player, tx: i32, ty: i32, reach: f32) -> bool {
        let tile_center: Vec2 = Rect::of_tile(tx, ty).center();
        player.center().distance(tile_center) <= reach
    }

    /// Break a tile and credit it to the matching hotbar slot
    /// Returns true if the tile changed
    pub fn break_block(player: &mut Player, world: &mut World, tx: i32, ty: i32, reach: f32) -> bool {
        if !Self::in_reach(player, tx, ty, reach) {
            log::debug!("[MINE] ({}, {}) out of reach", tx, ty);
            return false;
        }

        let block = world.get_block(tx, ty);
        if block.is_air() {
            return false;
        }

        world.set_block(tx, ty, BlockId::Air);
        if player.inventory.credit(block) {
            log::debug!("[MINE] Mined {} at ({}, {})", block, tx, ty);
        } else {
            log::debug!("[MINE] Mined {} at ({}, {}), no slot for it", block, tx, ty);
        }
        true
    }

    /// Place the selected hotbar block at a tile
    /// Returns true if the tile changed
    pub fn place_block(player: &mut Player, world: &mut World, tx: i32, ty: i32, reach: f32) -> bool {
        if !Self::in_reach(player, tx, ty, reach) {
            return false;
        }
        if !world.get_block(tx, ty).is_air() {
            return false;
        }
        if Rect::of_tile(tx, ty).overlaps(&player.rect()) {
            log::debug!("[PLACE] ({}, {}) overlaps the player", tx, ty);
            return false;
        }

        let Some(block) = player.inventory.take(player.selected_slot) else {
            log::debug!("[PLACE] Slot {} is empty", player.selected_slot);
            return false;
        };

        world.set_block(tx, ty, block);
        log::debug!("[PLACE] Placed {} at ({}, {})", block, tx, ty);
        true
    }
}
