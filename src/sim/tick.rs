//! Fixed timestep simulation tick
//!
//! One tick runs the pipeline in a strict order: controls in, update every
//! body, collision pass, removal flush, spawner, terminal check. The
//! `FixedClock` converts irregular wall-clock callbacks into this
//! deterministic sequence of constant-size ticks.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::entity::{Body, BodyKind, UpdateOutcome, update_body};
use super::state::{GameState, Phase, SimEvent};
use crate::config::RestartPolicy;
use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Horizontal axis accumulator (opposite keys cancel to zero)
    pub move_x: f32,
    /// Vertical axis accumulator
    pub move_y: f32,
    /// Fire flag; held, not edge-triggered
    pub fire: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Restart request in game-over (one-shot)
    pub restart: bool,
}

/// Advance the session by one fixed timestep.
///
/// A non-finite or negative `dt` is a caller contract violation and is
/// clamped to zero rather than propagated into positions.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

    if input.pause {
        state.phase = match state.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            other => other,
        };
    }
    match state.phase {
        Phase::Paused => return,
        Phase::GameOver => {
            if input.fire || input.restart {
                log::info!("restarting session (input-gated)");
                state.restart();
            }
            return;
        }
        Phase::Playing => {}
    }

    state.ticks += 1;
    state.time_alive += dt;
    let config = state.config;

    // Controls into the player body; the sim only reads current values
    if let Some(player) = state.registry.get_mut(state.player_id) {
        if let BodyKind::Player { controls, .. } = &mut player.kind {
            controls.move_x = input.move_x;
            controls.move_y = input.move_y;
            controls.fire = input.fire;
        }
    }

    // Update pass over the id-sorted snapshot; fired shots spawn after the
    // scan so the registry is never mutated mid-iteration
    let mut shots: Vec<Vec2> = Vec::new();
    for id in state.registry.ids() {
        let Some(body) = state.registry.get_mut(id) else { continue };
        let outcome = update_body(body, &config, dt);
        let pos = body.pos;
        match outcome {
            UpdateOutcome::Exited => state.registry.mark_removed(id),
            UpdateOutcome::Fired => shots.push(pos),
            UpdateOutcome::None => {}
        }
    }
    for pos in shots {
        let id = state.registry.allocate_id();
        state.registry.insert(Body::projectile(id, pos, &config));
    }

    let report = resolve_collisions(&mut state.registry, &config, &mut state.events);
    state.record_kills(report.enemies_killed, report.bosses_killed);

    // A dead player enqueues its own removal
    if state.player().is_some_and(Body::is_dead) {
        state.registry.mark_removed(state.player_id);
    }

    state.registry.flush_removals();

    if let Some(kind) = state.spawner.advance(&config, dt) {
        state.spawn_wave(kind);
    }

    // Terminal check: the session ends when the player is gone
    if state.player().is_none() {
        let score = state.score;
        state.events.push(SimEvent::GameOver { score });
        log::info!("player died at tick {} with score {score}", state.ticks);
        match config.restart_policy {
            RestartPolicy::AutoOnDeath => state.restart(),
            RestartPolicy::InputGatedOnDeath => {
                state.high_score = state.high_score.max(score);
                state.phase = Phase::GameOver;
            }
        }
    }
}

/// Fixed-timestep accumulator over irregular wall-clock callbacks.
///
/// Each call consumes whole ticks from the accumulated elapsed time, at
/// most `MAX_SUBSTEPS` per call. Catch-up after a clock jump is bounded
/// twice over: the elapsed delta is clamped to `MAX_FRAME_TIME` and the
/// substep cap holds per callback, so a long pause can never stall the
/// host in a tick storm.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock {
    accumulator: f32,
}

impl FixedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed elapsed wall time and run the ticks it covers. One-shot input
    /// flags are cleared after the first consumed tick. Returns the
    /// number of ticks consumed.
    pub fn advance(&mut self, state: &mut GameState, input: &mut TickInput, elapsed: f32) -> u32 {
        let elapsed = if elapsed.is_finite() && elapsed > 0.0 {
            elapsed.min(MAX_FRAME_TIME)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let dt = state.config.sim_dt();
        let mut steps = 0;
        while self.accumulator >= dt && steps < MAX_SUBSTEPS {
            tick(state, input, dt);
            self.accumulator -= dt;
            steps += 1;
            input.pause = false;
            input.restart = false;
        }
        steps
    }
}
