use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::health::{Health, Hunger};
use super::inventory::Hotbar;
use crate::world::{BlockId, Rect};

/// The player entity
///
/// Position is the top-left corner of the bounding box in pixels, y grows
/// downward. Velocity is in pixels per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub grounded: bool, // Last vertical resolution landed on a tile
    pub health: Health,
    pub hunger: Hunger,
    /// Seconds accumulated toward the next hunger point
    pub hunger_timer: f32,
    pub inventory: Hotbar,
    pub selected_slot: usize, // Currently selected hotbar slot
}

impl Player {
    pub const WIDTH: f32 = 24.0; // pixels
    pub const HEIGHT: f32 = 56.0; // pixels, under two tiles

    /// Create a new player at the specified position
    pub fn new(position: Vec2) -> Self {
        Player {
            position,
            velocity: Vec2::ZERO,
            grounded: false, // Start in air
            health: Health::default(),
            hunger: Hunger::default(),
            hunger_timer: 0.0,
            inventory: Hotbar::new(),
            selected_slot: 0,
        }
    }

    pub fn with_vitals(position: Vec2, max_health: u32, max_hunger: u32) -> Self {
        Player {
            health: Health::new(max_health),
            hunger: Hunger::new(max_hunger),
            ..Self::new(position)
        }
    }

    /// Current bounding box
    pub fn rect(&self) -> Rect {
        self.rect_at(self.position)
    }

    /// Bounding box if the player stood at `position`
    pub fn rect_at(&self, position: Vec2) -> Rect {
        Rect::new(position.x, position.y, Self::WIDTH, Self::HEIGHT)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Whether the player is trying to or actually moving sideways
    pub fn is_moving(&self) -> bool {
        self.velocity.x != 0.0
    }

    /// Get the block in the selected hotbar slot
    /// Returns None if the slot is empty
    pub fn selected_block(&self) -> Option<BlockId> {
        self.inventory
            .slot(self.selected_slot)
            .filter(|stack| !stack.is_empty())
            .map(|stack| stack.block)
    }

    /// Select a specific hotbar slot; out-of-range indices are ignored
    pub fn select_slot(&mut self, slot: usize) {
        if slot < self.inventory.len() {
            self.selected_slot = slot;
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_dead()
    }

    /// Respawn the player at a new position with full vitals
    pub fn respawn(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.grounded = false;
        self.health.reset();
        self.hunger.reset();
        self.hunger_timer = 0.0;
        // Inventory is kept on respawn
    }
}
