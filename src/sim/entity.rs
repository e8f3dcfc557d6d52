//! Bodies and their per-tick behavior
//!
//! One entity representation holds a variant tag plus variant-specific
//! fields; dispatch over {update, death, collision role} is by tag. Base
//! behavior is `pos += vel * dt` followed by a center clamp to the world
//! rectangle; variants add their own motion on top.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::consts;

/// Per-tick control state for the player. The input collaborator writes
/// axis accumulators from key edges (opposite keys cancel); the sim only
/// reads current values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Controls {
    pub move_x: f32,
    pub move_y: f32,
    pub fire: bool,
}

/// Variant tag plus variant-specific fields
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyKind {
    Player {
        controls: Controls,
        /// Time since the last shot; fires when it reaches the cooldown
        fire_cooldown: f32,
    },
    Enemy,
    Boss,
    Projectile,
}

/// Field-free variant tag for collision rules and draw snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantTag {
    Player,
    Enemy,
    Boss,
    Projectile,
}

impl BodyKind {
    pub fn tag(&self) -> VariantTag {
        match self {
            BodyKind::Player { .. } => VariantTag::Player,
            BodyKind::Enemy => VariantTag::Enemy,
            BodyKind::Boss => VariantTag::Boss,
            BodyKind::Projectile => VariantTag::Projectile,
        }
    }
}

/// A simulated physical entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub kind: BodyKind,
}

impl Body {
    /// Derived half extent; never stored, always reflects `size`
    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Dead iff health has reached zero. Pure, no side effect.
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn player(id: u32, config: &Config) -> Self {
        Self {
            id,
            pos: Vec2::new(config.world_width / 2.0, config.world_height * 0.8),
            vel: Vec2::ZERO,
            size: Vec2::splat(config.player_size),
            health: consts::BASE_HEALTH,
            kind: BodyKind::Player {
                controls: Controls::default(),
                fire_cooldown: 0.0,
            },
        }
    }

    pub fn enemy(id: u32, x: f32, config: &Config) -> Self {
        Self {
            id,
            pos: Vec2::new(x, 0.0),
            vel: Vec2::new(0.0, config.enemy_speed),
            size: Vec2::splat(config.enemy_size),
            health: consts::BASE_HEALTH,
            kind: BodyKind::Enemy,
        }
    }

    pub fn boss(id: u32, x: f32, config: &Config) -> Self {
        Self {
            id,
            pos: Vec2::new(x, 0.0),
            vel: Vec2::new(0.0, config.boss_speed),
            size: Vec2::splat(config.boss_size),
            health: config.boss_health,
            kind: BodyKind::Boss,
        }
    }

    pub fn projectile(id: u32, pos: Vec2, config: &Config) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(0.0, -config.projectile_speed),
            size: Vec2::splat(config.projectile_size),
            health: consts::BASE_HEALTH,
            kind: BodyKind::Projectile,
        }
    }
}

/// What a body's update asks of the surrounding tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    None,
    /// The body crossed its exit boundary and enqueues its own removal
    Exited,
    /// The player's fire gate opened; spawn one projectile at its position
    Fired,
}

/// Advance one body by one tick.
///
/// The player recomputes its velocity from the control state each tick:
/// when both axes are held the per-axis speed is scaled by cos 45° so the
/// net diagonal speed matches the straight-line speed. This is the exact
/// two-branch rule, not a general unit-vector normalization. Other
/// variants keep the constant velocity set at construction.
///
/// After motion the center is clamped to `[0, w] x [0, h]`; no entity
/// center ever leaves the world, though its extent may overhang.
pub fn update_body(body: &mut Body, config: &Config, dt: f32) -> UpdateOutcome {
    let mut outcome = UpdateOutcome::None;

    if let BodyKind::Player { controls, fire_cooldown } = &mut body.kind {
        let speed = if controls.move_x != 0.0 && controls.move_y != 0.0 {
            config.player_speed * consts::DIAGONAL_FACTOR
        } else {
            config.player_speed
        };
        body.vel = Vec2::new(controls.move_x * speed, controls.move_y * speed);

        *fire_cooldown += dt;
        if controls.fire && *fire_cooldown >= config.fire_cooldown {
            *fire_cooldown = 0.0;
            outcome = UpdateOutcome::Fired;
        }
    }

    body.pos += body.vel * dt;
    body.pos = body.pos.clamp(
        Vec2::ZERO,
        Vec2::new(config.world_width, config.world_height),
    );

    match body.kind {
        BodyKind::Projectile if body.pos.y <= 0.0 => UpdateOutcome::Exited,
        BodyKind::Enemy | BodyKind::Boss if body.pos.y >= config.world_height => {
            UpdateOutcome::Exited
        }
        _ => outcome,
    }
}
