//! Player physics system - movement, gravity, jumping, collision

use serde::{Deserialize, Serialize};

use super::World;
use crate::entity::input::InputState;
use crate::entity::player::Player;

/// Velocities below this snap to zero under friction
const VELOCITY_EPSILON: f32 = 0.05;

/// Movement tunables, in pixels per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    pub run_accel: f32,
    pub max_run_speed: f32,
    /// Multiplier applied to horizontal velocity with no input
    pub friction: f32,
    /// Negative is up
    pub jump_velocity: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            run_accel: 0.8,
            max_run_speed: 4.5,
            friction: 0.8,
            jump_velocity: -10.5,
            gravity: 0.5,
            max_fall_speed: 12.0,
        }
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Player physics system - handles movement, jumping, gravity, collision
pub struct PlayerPhysicsSystem;

impl PlayerPhysicsSystem {
    /// Advance the player by one fixed tick
    pub fn update(player: &mut Player, input: &InputState, world: &mut World, params: &PhysicsParams) {
        // 1. Horizontal movement with friction
        match input.horizontal() {
            0 => {
                player.velocity.x *= params.friction;
                if player.velocity.x.abs() < VELOCITY_EPSILON {
                    player.velocity.x = 0.0;
                }
            }
            dir => {
                player.velocity.x = (player.velocity.x + dir as f32 * params.run_accel)
                    .clamp(-params.max_run_speed, params.max_run_speed);
            }
        }

        // 2. Jump only from the ground
        if input.jump && player.grounded {
            player.velocity.y = params.jump_velocity;
            player.grounded = false;
            log::debug!("Player jumped!");
        }

        // 3. Gravity with terminal velocity
        player.velocity.y = (player.velocity.y + params.gravity).min(params.max_fall_speed);

        // 4. Integrate with collision
        let before = player.position;
        Self::move_and_collide(player, world);

        if player.position != before {
            log::trace!(
                "Player: {:?} → {:?} (vel: {:?}, grounded: {})",
                before,
                player.position,
                player.velocity,
                player.grounded
            );
        }
    }

    /// Translate by the current velocity, X axis first, resolving overlaps
    /// against solid tiles by pixel-wise retreat
    pub fn move_and_collide(player: &mut Player, world: &mut World) {
        Self::resolve_axis(player, world, Axis::X);

        player.grounded = false;
        let vy = player.velocity.y;
        if Self::resolve_axis(player, world, Axis::Y) && vy >= 0.0 {
            player.grounded = true;
        }
    }

    /// Move along one axis; returns true if the move hit something
    fn resolve_axis(player: &mut Player, world: &mut World, axis: Axis) -> bool {
        let (start, velocity) = match axis {
            Axis::X => (player.position.x, player.velocity.x),
            Axis::Y => (player.position.y, player.velocity.y),
        };

        let moved = start + velocity;
        let mut candidate = player.position;
        set_axis(&mut candidate, axis, moved);
        if !world.overlaps_solid(&player.rect_at(candidate)) {
            set_axis(&mut player.position, axis, moved);
            return false;
        }

        // Snap to the pixel boundary behind the motion, then back off one pixel at a time
        let (mut coord, step) = if velocity < 0.0 {
            (moved.ceil(), 1.0)
        } else {
            (moved.floor(), -1.0)
        };
        let max_steps = velocity.abs().ceil() as i32 + 1;

        let mut clear = false;
        for attempt in 0..=max_steps {
            if attempt > 0 {
                coord += step;
            }
            set_axis(&mut candidate, axis, coord);
            if !world.overlaps_solid(&player.rect_at(candidate)) {
                clear = true;
                break;
            }
        }

        if clear {
            set_axis(&mut player.position, axis, coord);
        } else {
            log::warn!(
                "Player embedded at {:?}, keeping pre-move coordinate",
                player.position
            );
            set_axis(&mut player.position, axis, start);
        }

        match axis {
            Axis::X => player.velocity.x = 0.0,
            Axis::Y => player.velocity.y = 0.0,
        }
        true
    }
}

#[inline]
fn set_axis(v: &mut glam::Vec2, axis: Axis, value: f32) {
    match axis {
        Axis::X => v.x = value,
        Axis::Y => v.y = value,
    }
}
