//! Survival state machine - hunger drain, regeneration, starvation, respawn

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::world::WorldRng;

/// Tunables for the survival tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalParams {
    /// Seconds of idle time per hunger point
    pub hunger_interval_secs: f32,
    /// Hunger clock speed while moving
    pub moving_multiplier: f32,
    /// Minimum hunger for regeneration
    pub regen_threshold: u32,
    /// Per-tick chance of +1 health when well fed
    pub regen_chance: f32,
    /// Per-tick chance of -1 health when starving
    pub starve_chance: f32,
}

impl Default for SurvivalParams {
    fn default() -> Self {
        Self {
            hunger_interval_secs: 30.0,
            moving_multiplier: 1.8,
            regen_threshold: 18,
            regen_chance: 0.02,
            starve_chance: 0.01,
        }
    }
}

/// What a survival tick did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurvivalEvent {
    None,
    Regenerated,
    Starved,
    /// Died and was put back at the spawn point
    Respawned,
}

pub struct SurvivalSystem;

impl SurvivalSystem {
    /// Advance survival by `dt` seconds
    ///
    /// Death is never observable across ticks: a player found at zero health
    /// is respawned before anything else runs.
    pub fn update<R: WorldRng + ?Sized>(
        player: &mut Player,
        dt: f32,
        moving: bool,
        spawn: Vec2,
        rng: &mut R,
        params: &SurvivalParams,
    ) -> SurvivalEvent {
        if player.health.is_dead() {
            Self::respawn(player, spawn);
            return SurvivalEvent::Respawned;
        }

        let rate = if moving { params.moving_multiplier } else { 1.0 };
        player.hunger_timer += dt.max(0.0) * rate;
        if player.hunger_timer >= params.hunger_interval_secs {
            player.hunger.drain(1);
            player.hunger_timer = 0.0;
            log::debug!("Hunger drained to {}", player.hunger.current);
        }

        let mut event = SurvivalEvent::None;

        if player.hunger.current >= params.regen_threshold
            && !player.health.is_full()
            && rng.check_probability(params.regen_chance)
        {
            player.health.heal(1);
            event = SurvivalEvent::Regenerated;
        }

        if player.hunger.is_starving() && rng.check_probability(params.starve_chance) {
            player.health.take_damage(1);
            event = SurvivalEvent::Starved;
        }

        if player.health.is_dead() {
            Self::respawn(player, spawn);
            return SurvivalEvent::Respawned;
        }

        event
    }

    fn respawn(player: &mut Player, spawn: Vec2) {
        log::info!("Player died, respawning at ({:.0}, {:.0})", spawn.x, spawn.y);
        player.respawn(spawn);
    }
}
