//! Game configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `tileworld.ron` file (if exists)
//! 3. Environment variables prefixed with `TILEWORLD_`
//!
//! Example environment variable: `TILEWORLD_WORLD__LOAD_RADIUS=4`

use std::path::Path;

use anyhow::{ensure, Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::entity::{Health, Hunger, SurvivalParams};
use crate::world::{ChunkManager, MiningSystem, PhysicsParams, DEFAULT_SEED};

/// Main game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameConfig {
    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub survival: SurvivalConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// World and streaming settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub seed: u64,
    /// Chunks kept loaded on each side of the player's chunk
    pub load_radius: i32,
    /// Extra chunks tolerated before eviction
    pub unload_hysteresis: i32,
    /// Longest frame delta accepted, in seconds
    pub max_frame_delta: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            load_radius: ChunkManager::DEFAULT_LOAD_RADIUS,
            unload_hysteresis: ChunkManager::DEFAULT_UNLOAD_HYSTERESIS,
            max_frame_delta: 0.05,
        }
    }
}

/// Player movement and interaction settings, velocities in pixels/tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub run_accel: f32,
    pub max_run_speed: f32,
    pub friction: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Interaction reach in pixels
    pub reach: f32,
    pub max_health: u32,
    pub max_hunger: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        let physics = PhysicsParams::default();
        Self {
            run_accel: physics.run_accel,
            max_run_speed: physics.max_run_speed,
            friction: physics.friction,
            jump_velocity: physics.jump_velocity,
            gravity: physics.gravity,
            max_fall_speed: physics.max_fall_speed,
            reach: MiningSystem::DEFAULT_REACH,
            max_health: Health::DEFAULT_MAX,
            max_hunger: Hunger::DEFAULT_MAX,
        }
    }
}

impl PlayerConfig {
    pub fn physics(&self) -> PhysicsParams {
        PhysicsParams {
            run_accel: self.run_accel,
            max_run_speed: self.max_run_speed,
            friction: self.friction,
            jump_velocity: self.jump_velocity,
            gravity: self.gravity,
            max_fall_speed: self.max_fall_speed,
        }
    }
}

/// Hunger and health rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivalConfig {
    pub hunger_interval_secs: f32,
    pub moving_multiplier: f32,
    pub regen_threshold: u32,
    pub regen_chance: f32,
    pub starve_chance: f32,
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        let params = SurvivalParams::default();
        Self {
            hunger_interval_secs: params.hunger_interval_secs,
            moving_multiplier: params.moving_multiplier,
            regen_threshold: params.regen_threshold,
            regen_chance: params.regen_chance,
            starve_chance: params.starve_chance,
        }
    }
}

impl SurvivalConfig {
    pub fn params(&self) -> SurvivalParams {
        SurvivalParams {
            hunger_interval_secs: self.hunger_interval_secs,
            moving_multiplier: self.moving_multiplier,
            regen_threshold: self.regen_threshold,
            regen_chance: self.regen_chance,
            starve_chance: self.starve_chance,
        }
    }
}

/// Debug/development settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Enable verbose logging
    pub verbose_logging: bool,
    /// Headless driver logs a status line every this many ticks (0 = never)
    pub status_interval_ticks: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            verbose_logging: false,
            status_interval_ticks: 60,
        }
    }
}

impl GameConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `tileworld.ron` file (if exists)
    /// 3. Environment variables prefixed with `TILEWORLD_` (highest priority)
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?.add_source(
            File::with_name("tileworld")
                .format(FileFormat::Ron)
                .required(false),
        );
        Self::finish(builder)
    }

    /// Same layering, but with an explicit (required) config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let builder = Self::defaults()?.add_source(
            File::from(path)
                .format(FileFormat::Ron)
                .required(true),
        );
        Self::finish(builder)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let d = GameConfig::default();
        let builder = Config::builder()
            .set_default("world.seed", d.world.seed)?
            .set_default("world.load_radius", d.world.load_radius as i64)?
            .set_default("world.unload_hysteresis", d.world.unload_hysteresis as i64)?
            .set_default("world.max_frame_delta", d.world.max_frame_delta as f64)?
            .set_default("player.run_accel", d.player.run_accel as f64)?
            .set_default("player.max_run_speed", d.player.max_run_speed as f64)?
            .set_default("player.friction", d.player.friction as f64)?
            .set_default("player.jump_velocity", d.player.jump_velocity as f64)?
            .set_default("player.gravity", d.player.gravity as f64)?
            .set_default("player.max_fall_speed", d.player.max_fall_speed as f64)?
            .set_default("player.reach", d.player.reach as f64)?
            .set_default("player.max_health", d.player.max_health as i64)?
            .set_default("player.max_hunger", d.player.max_hunger as i64)?
            .set_default(
                "survival.hunger_interval_secs",
                d.survival.hunger_interval_secs as f64,
            )?
            .set_default(
                "survival.moving_multiplier",
                d.survival.moving_multiplier as f64,
            )?
            .set_default("survival.regen_threshold", d.survival.regen_threshold as i64)?
            .set_default("survival.regen_chance", d.survival.regen_chance as f64)?
            .set_default("survival.starve_chance", d.survival.starve_chance as f64)?
            .set_default("debug.verbose_logging", d.debug.verbose_logging)?
            .set_default(
                "debug.status_interval_ticks",
                d.debug.status_interval_ticks,
            )?;
        Ok(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        // Environment variables (TILEWORLD_WORLD__SEED, etc.)
        let config = builder
            .add_source(Environment::with_prefix("TILEWORLD").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let config: GameConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.world.load_radius >= 0, "world.load_radius must be >= 0");
        ensure!(
            self.world.unload_hysteresis >= 0,
            "world.unload_hysteresis must be >= 0"
        );
        ensure!(
            self.world.max_frame_delta > 0.0,
            "world.max_frame_delta must be positive"
        );
        ensure!(
            self.player.max_health > 0 && self.player.max_hunger > 0,
            "player vitals must be positive"
        );
        ensure!(
            (0.0..=1.0).contains(&self.player.friction),
            "player.friction must be within 0..=1"
        );
        ensure!(
            self.survival.hunger_interval_secs > 0.0,
            "survival.hunger_interval_secs must be positive"
        );
        Ok(())
    }
}
