//! Sky Barrage - a fixed-timestep 2D arcade shooter simulation kernel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves, tick loop)
//! - `config`: Recognized options with JSON load/save
//! - `highscores`: Leaderboard kept for the life of the process
//!
//! Rendering, raw key handling, HUD drawing and frame scheduling are external
//! collaborators. The kernel consumes elapsed wall time plus an abstract
//! per-tick control state, and exposes drawable/HUD snapshots per tick.

pub mod config;
pub mod highscores;
pub mod sim;

pub use config::{Config, RestartPolicy};
pub use highscores::HighScores;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: f32 = 60.0;
    /// Maximum ticks consumed per driving callback (catch-up cap)
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock delta accepted from the driver per callback
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// World bounds (entity centers are clamped to this rectangle)
    pub const WORLD_WIDTH: f32 = 300.0;
    pub const WORLD_HEIGHT: f32 = 500.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 200.0;
    /// Per-axis speed factor when both axes are held (cos 45°)
    pub const DIAGONAL_FACTOR: f32 = std::f32::consts::FRAC_1_SQRT_2;
    /// Minimum time between shots while the fire flag is held
    pub const FIRE_COOLDOWN: f32 = 0.1;

    /// Projectile defaults (constant upward speed)
    pub const PROJECTILE_SIZE: f32 = 10.0;
    pub const PROJECTILE_SPEED: f32 = 400.0;

    /// Enemy defaults (constant downward speed)
    pub const ENEMY_SIZE: f32 = 40.0;
    pub const ENEMY_SPEED: f32 = 80.0;
    pub const BOSS_SIZE: f32 = 120.0;
    pub const BOSS_SPEED: f32 = 30.0;

    /// Health
    pub const BASE_HEALTH: f32 = 100.0;
    pub const BOSS_HEALTH: f32 = 1000.0;

    /// Damage table
    pub const ENEMY_CONTACT_DAMAGE: f32 = 25.0;
    pub const BOSS_CONTACT_DAMAGE: f32 = 100.0;
    pub const PROJECTILE_DAMAGE: f32 = 100.0;
    pub const BOSS_HIT_DAMAGE: f32 = 7.0;

    /// Spawner defaults
    pub const ENEMIES_PER_WAVE: u32 = 3;
    pub const WAVE_INTERVAL: f32 = 2.0;
    /// Regular waves between boss encounters
    pub const BOSS_WAVE_PERIOD: u32 = 10;

    /// Scoring
    pub const ENEMY_KILL_SCORE: u64 = 10;
    pub const BOSS_KILL_SCORE: u64 = 100;
}
