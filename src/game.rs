//! Game state - owns the world and the player and runs one frame at a time

use glam::Vec2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::config::GameConfig;
use crate::entity::{InputState, Player, SurvivalEvent, SurvivalParams, SurvivalSystem};
use crate::world::{
    BlockId, MiningSystem, PersistenceError, PhysicsParams, PlayerPhysicsSystem, Rect, World,
    WorldSnapshot, TILE_SIZE, WORLD_H,
};

#[cfg(not(target_arch = "wasm32"))]
use crate::world::SaveStore;

/// Column searched for the spawn surface
pub const SPAWN_COLUMN: i32 = 0;

pub struct Game {
    world: World,
    player: Player,
    config: GameConfig,
    physics: PhysicsParams,
    survival: SurvivalParams,
    spawn: Vec2,
    rng: Xoshiro256StarStar,
    tick: u64,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let mut world = World::new(
            config.world.seed,
            config.world.load_radius,
            config.world.unload_hysteresis,
        );

        let spawn = find_spawn(&mut world);
        world.update_streaming(World::pixel_to_chunk_key(spawn.x + Player::WIDTH * 0.5));

        let player = Player::with_vitals(spawn, config.player.max_health, config.player.max_hunger);
        log::info!(
            "Player spawned at ({:.0}, {:.0}), {} chunks resident",
            spawn.x,
            spawn.y,
            world.chunk_manager().chunk_count()
        );

        Self {
            physics: config.player.physics(),
            survival: config.survival.params(),
            rng: Xoshiro256StarStar::seed_from_u64(config.world.seed),
            world,
            player,
            config,
            spawn,
            tick: 0,
        }
    }

    /// Advance one frame: streaming, physics, then survival
    pub fn update(&mut self, dt: f32, input: &InputState) -> SurvivalEvent {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.world.max_frame_delta)
        } else {
            0.0
        };

        let center = World::pixel_to_chunk_key(self.player.center().x);
        let report = self.world.update_streaming(center);
        if report.generated > 0 || report.evicted > 0 {
            log::debug!(
                "Streaming around chunk {}: +{} -{}",
                center,
                report.generated,
                report.evicted
            );
        }

        PlayerPhysicsSystem::update(&mut self.player, input, &mut self.world, &self.physics);

        let moving = input.horizontal() != 0 || self.player.is_moving();
        let event = SurvivalSystem::update(
            &mut self.player,
            dt,
            moving,
            self.spawn,
            &mut self.rng,
            &self.survival,
        );

        self.tick += 1;
        event
    }

    /// Break the tile under a world pixel position
    pub fn break_at(&mut self, px: f32, py: f32) -> bool {
        let (tx, ty) = World::pixel_to_tile(px, py);
        MiningSystem::break_block(
            &mut self.player,
            &mut self.world,
            tx,
            ty,
            self.config.player.reach,
        )
    }

    /// Place the selected block at the tile under a world pixel position
    pub fn place_at(&mut self, px: f32, py: f32) -> bool {
        let (tx, ty) = World::pixel_to_tile(px, py);
        MiningSystem::place_block(
            &mut self.player,
            &mut self.world,
            tx,
            ty,
            self.config.player.reach,
        )
    }

    pub fn select_slot(&mut self, slot: usize) {
        self.player.select_slot(slot);
    }

    /// Top-left of a viewport centred on the player, kept inside the world rows
    pub fn camera(&self, viewport: Vec2) -> Vec2 {
        let mut camera = self.player.center() - viewport * 0.5;
        let world_height = (WORLD_H as i32 * TILE_SIZE) as f32;
        camera.y = if viewport.y >= world_height {
            (world_height - viewport.y) * 0.5
        } else {
            camera.y.clamp(0.0, world_height - viewport.y)
        };
        camera
    }

    /// Every in-world tile touched by the viewport at `camera`
    pub fn visible_tiles(&mut self, camera: Vec2, viewport: Vec2) -> Vec<(i32, i32, BlockId)> {
        let (min_tx, min_ty, max_tx, max_ty) =
            Rect::new(camera.x, camera.y, viewport.x, viewport.y).tile_span();
        let min_ty = min_ty.max(0);
        let max_ty = max_ty.min(WORLD_H as i32 - 1);

        let mut tiles = Vec::new();
        for ty in min_ty..=max_ty {
            for tx in min_tx..=max_tx {
                tiles.push((tx, ty, self.world.get_block(tx, ty)));
            }
        }
        tiles
    }

    /// Capture the player and the chunks in the load window around them
    pub fn snapshot(&self) -> WorldSnapshot {
        let center = World::pixel_to_chunk_key(self.player.center().x);
        WorldSnapshot::new(
            self.world.seed(),
            &self.player,
            self.world.chunks_in_window(center),
        )
    }

    /// Replace live state with a snapshot
    ///
    /// Nothing changes unless the whole snapshot validates.
    pub fn restore(&mut self, snapshot: WorldSnapshot) -> Result<(), PersistenceError> {
        if let Err(e) = snapshot.validate(self.world.seed()) {
            log::warn!("Rejected snapshot: {}", e);
            return Err(e);
        }

        let chunk_count = snapshot.chunks.len();
        self.world.replace_chunks(snapshot.chunks);

        let saved = snapshot.player;
        self.player.position = saved.position;
        self.player.velocity = saved.velocity;
        self.player.health = saved.health;
        self.player.hunger = saved.hunger;
        self.player.hunger_timer = 0.0;
        self.player.grounded = false;
        self.player.inventory = snapshot.hotbar;
        self.player.selected_slot = snapshot.selected_slot;

        log::info!(
            "Restored snapshot from {} ({} chunks)",
            snapshot.saved_at,
            chunk_count
        );
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, store: &SaveStore, name: &str) -> Result<(), PersistenceError> {
        store.save(name, &self.snapshot())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(&mut self, store: &SaveStore, name: &str) -> Result<(), PersistenceError> {
        let snapshot = store.load(name)?;
        self.restore(snapshot)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn
    }

    /// Frames run so far
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

/// Player position standing on the first solid tile of the spawn column
fn find_spawn(world: &mut World) -> Vec2 {
    let row = world.surface_row(SPAWN_COLUMN).unwrap_or_else(|| {
        log::warn!("Spawn column {} has no solid tile", SPAWN_COLUMN);
        WORLD_H
    });
    let tile = Rect::of_tile(SPAWN_COLUMN, row as i32);
    Vec2::new(tile.center().x - Player::WIDTH * 0.5, tile.y - Player::HEIGHT)
}
