//! Recognized options and their validation
//!
//! All tunables are fixed once at session start; the sim never re-reads
//! them mid-run. Persisted as JSON on native targets.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts;

/// What happens when the player dies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RestartPolicy {
    /// A fresh session starts on the next tick
    #[default]
    AutoOnDeath,
    /// The session parks in game-over until the fire flag is asserted
    InputGatedOnDeath,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// World bounds; also the enemy spawn x-range and the exit thresholds
    pub world_width: f32,
    pub world_height: f32,
    /// Fixed simulation rate (ticks per second)
    pub tick_rate: f32,

    pub player_speed: f32,
    pub player_size: f32,
    pub fire_cooldown: f32,

    pub projectile_speed: f32,
    pub projectile_size: f32,
    pub projectile_damage: f32,

    pub enemy_speed: f32,
    pub enemy_size: f32,
    pub enemy_contact_damage: f32,

    pub boss_speed: f32,
    pub boss_size: f32,
    pub boss_health: f32,
    pub boss_contact_damage: f32,
    /// Per-projectile damage to a boss (raise for one-shot modes)
    pub boss_hit_damage: f32,
    /// Bosses emitted per boss wave (escalated modes spawn a pair)
    pub bosses_per_wave: u32,

    pub enemies_per_wave: u32,
    pub wave_interval: f32,
    pub boss_wave_period: u32,

    pub restart_policy: RestartPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_width: consts::WORLD_WIDTH,
            world_height: consts::WORLD_HEIGHT,
            tick_rate: consts::TICK_RATE,
            player_speed: consts::PLAYER_SPEED,
            player_size: consts::PLAYER_SIZE,
            fire_cooldown: consts::FIRE_COOLDOWN,
            projectile_speed: consts::PROJECTILE_SPEED,
            projectile_size: consts::PROJECTILE_SIZE,
            projectile_damage: consts::PROJECTILE_DAMAGE,
            enemy_speed: consts::ENEMY_SPEED,
            enemy_size: consts::ENEMY_SIZE,
            enemy_contact_damage: consts::ENEMY_CONTACT_DAMAGE,
            boss_speed: consts::BOSS_SPEED,
            boss_size: consts::BOSS_SIZE,
            boss_health: consts::BOSS_HEALTH,
            boss_contact_damage: consts::BOSS_CONTACT_DAMAGE,
            boss_hit_damage: consts::BOSS_HIT_DAMAGE,
            bosses_per_wave: 1,
            enemies_per_wave: consts::ENEMIES_PER_WAVE,
            wave_interval: consts::WAVE_INTERVAL,
            boss_wave_period: consts::BOSS_WAVE_PERIOD,
            restart_policy: RestartPolicy::default(),
        }
    }
}

impl Config {
    /// Fixed tick size in seconds
    pub fn sim_dt(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Reject values the sim arithmetic cannot be trusted with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be finite and positive, got {v}")))
            }
        }
        fn non_negative(name: &str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be finite and >= 0, got {v}")))
            }
        }

        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("tick_rate", self.tick_rate)?;
        positive("fire_cooldown", self.fire_cooldown)?;
        positive("wave_interval", self.wave_interval)?;
        positive("boss_health", self.boss_health)?;
        non_negative("player_speed", self.player_speed)?;
        non_negative("projectile_speed", self.projectile_speed)?;
        non_negative("enemy_speed", self.enemy_speed)?;
        non_negative("boss_speed", self.boss_speed)?;
        // Zero-size bodies are legal: a zero half-extent is a point and
        // simply never produces an overlap region.
        non_negative("player_size", self.player_size)?;
        non_negative("projectile_size", self.projectile_size)?;
        non_negative("enemy_size", self.enemy_size)?;
        non_negative("boss_size", self.boss_size)?;
        non_negative("projectile_damage", self.projectile_damage)?;
        non_negative("enemy_contact_damage", self.enemy_contact_damage)?;
        non_negative("boss_contact_damage", self.boss_contact_damage)?;
        non_negative("boss_hit_damage", self.boss_hit_damage)?;
        if self.enemies_per_wave == 0 {
            return Err(ConfigError::Invalid("enemies_per_wave must be >= 1".into()));
        }
        if self.bosses_per_wave == 0 {
            return Err(ConfigError::Invalid("bosses_per_wave must be >= 1".into()));
        }
        if self.boss_wave_period == 0 {
            return Err(ConfigError::Invalid("boss_wave_period must be >= 1".into()));
        }
        Ok(())
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Using default config ({err})");
                Self::default()
            }
        }
    }

    /// Save the config as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }
}
