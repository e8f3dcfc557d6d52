//! Session state and the boundary views
//!
//! One explicit session struct owns everything a run needs: the entity
//! registry, the spawner, the seeded RNG and the counters. Restart builds
//! the session pieces fresh, which is also what makes tests cheap: every
//! test constructs its own isolated state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Body, VariantTag};
use super::registry::Registry;
use super::spawner::{Spawner, WaveKind};
use crate::config::Config;
use crate::consts;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    Paused,
    /// Player died under the input-gated restart policy; waiting for fire
    GameOver,
}

/// Boundary notifications emitted during a tick, drained by the driver.
/// Never gameplay-affecting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    PlayerHit { remaining: f32 },
    EnemyKilled { id: u32 },
    BossKilled { id: u32 },
    WaveSpawned { enemies: u32 },
    BossSpawned { id: u32 },
    GameOver { score: u64 },
    Restarted,
}

/// Drawable snapshot of one entity for the render collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawInstance {
    pub pos: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub kind: VariantTag,
}

/// Read-only scalars for the HUD collaborator, refreshed once per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudCounters {
    pub ticks: u64,
    pub score: u64,
    pub high_score: u64,
    pub time_alive: f32,
    pub enemies_spawned: u32,
    pub enemies_killed: u32,
    pub bosses_spawned: u32,
    pub bosses_killed: u32,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: Config,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; spawn x-positions are its only consumer
    pub rng: Pcg32,
    pub phase: Phase,
    pub registry: Registry,
    pub spawner: Spawner,
    pub player_id: u32,
    /// Consumed fixed ticks this session
    pub ticks: u64,
    pub time_alive: f32,
    pub score: u64,
    /// Best score seen by any session in this process
    pub high_score: u64,
    pub enemies_spawned: u32,
    pub enemies_killed: u32,
    pub bosses_spawned: u32,
    pub bosses_killed: u32,
    /// Per-tick event buffer (boundary-only, not part of the save)
    #[serde(skip)]
    pub events: Vec<SimEvent>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64, config: Config) -> Self {
        let mut state = Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: Phase::Playing,
            registry: Registry::new(),
            spawner: Spawner::new(),
            player_id: 0,
            ticks: 0,
            time_alive: 0.0,
            score: 0,
            high_score: 0,
            enemies_spawned: 0,
            enemies_killed: 0,
            bosses_spawned: 0,
            bosses_killed: 0,
            events: Vec::new(),
        };
        state.spawn_player();
        state
    }

    fn spawn_player(&mut self) {
        let id = self.registry.allocate_id();
        self.registry.insert(Body::player(id, &self.config));
        self.player_id = id;
    }

    pub fn player(&self) -> Option<&Body> {
        self.registry.get(self.player_id)
    }

    /// Rebuild the session after a death: fresh entity set, player,
    /// spawner and counters. The high score, the RNG stream and the id
    /// allocator carry over, so the new player never reuses a dead id.
    pub fn restart(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.registry.clear();
        self.spawner = Spawner::new();
        self.phase = Phase::Playing;
        self.ticks = 0;
        self.time_alive = 0.0;
        self.score = 0;
        self.enemies_spawned = 0;
        self.enemies_killed = 0;
        self.bosses_spawned = 0;
        self.bosses_killed = 0;
        self.spawn_player();
        self.events.push(SimEvent::Restarted);
    }

    /// Emit one wave into the registry
    pub fn spawn_wave(&mut self, kind: WaveKind) {
        match kind {
            WaveKind::Regular => {
                let count = self.config.enemies_per_wave;
                for _ in 0..count {
                    let x = self.rng.random_range(0.0..self.config.world_width);
                    let id = self.registry.allocate_id();
                    self.registry.insert(Body::enemy(id, x, &self.config));
                }
                self.enemies_spawned += count;
                self.events.push(SimEvent::WaveSpawned { enemies: count });
                log::debug!("wave spawned: {count} enemies");
            }
            WaveKind::Boss => {
                for _ in 0..self.config.bosses_per_wave {
                    let x = self.rng.random_range(0.0..self.config.world_width);
                    let id = self.registry.allocate_id();
                    self.registry.insert(Body::boss(id, x, &self.config));
                    self.bosses_spawned += 1;
                    self.events.push(SimEvent::BossSpawned { id });
                }
                log::info!("boss wave spawned");
            }
        }
    }

    /// Fold kill tallies into score and counters
    pub fn record_kills(&mut self, enemies: u32, bosses: u32) {
        self.enemies_killed += enemies;
        self.bosses_killed += bosses;
        self.score += u64::from(enemies) * consts::ENEMY_KILL_SCORE
            + u64::from(bosses) * consts::BOSS_KILL_SCORE;
    }

    /// Drawable snapshot of the live entity set, in id order
    pub fn draw_snapshot(&self) -> Vec<DrawInstance> {
        self.registry
            .iter()
            .map(|body| DrawInstance {
                pos: body.pos,
                size: body.size,
                health: body.health,
                kind: body.kind.tag(),
            })
            .collect()
    }

    pub fn hud(&self) -> HudCounters {
        HudCounters {
            ticks: self.ticks,
            score: self.score,
            high_score: self.high_score,
            time_alive: self.time_alive,
            enemies_spawned: self.enemies_spawned,
            enemies_killed: self.enemies_killed,
            bosses_spawned: self.bosses_spawned,
            bosses_killed: self.bosses_killed,
        }
    }

    /// Take the events accumulated since the last drain
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}
