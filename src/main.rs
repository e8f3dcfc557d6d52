//! Sky Barrage headless driver
//!
//! Runs the simulation kernel against the real wall clock with an
//! autopilot standing in for the input collaborator, and logs HUD
//! counters and events. Rendering is out of scope; this binary exists to
//! exercise the kernel end to end.

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use sky_barrage::config::Config;
use sky_barrage::highscores::HighScores;
use sky_barrage::sim::{FixedClock, GameState, SimEvent, TickInput, VariantTag};

fn main() {
    env_logger::init();

    let config = Config::load_or_default(Path::new("config.json"));
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Sky Barrage starting with seed {seed}");

    let mut state = GameState::new(seed, config);
    let mut scores = HighScores::load(Path::new("highscores.json"));
    let mut clock = FixedClock::new();

    // One minute of simulated time, then report and exit
    let demo_ticks = (config.tick_rate * 60.0) as u64;
    let mut total_ticks: u64 = 0;
    let mut last = Instant::now();
    let mut next_hud_report = 0;

    while total_ticks < demo_ticks {
        let now = Instant::now();
        let elapsed = now.duration_since(last).as_secs_f32();
        last = now;

        let mut input = autopilot(&state);
        total_ticks += u64::from(clock.advance(&mut state, &mut input, elapsed));

        for event in state.take_events() {
            match event {
                SimEvent::BossSpawned { id } => log::info!("boss {id} inbound"),
                SimEvent::BossKilled { id } => log::info!("boss {id} destroyed"),
                SimEvent::GameOver { score } => log::info!("game over, score {score}"),
                _ => log::trace!("{event:?}"),
            }
        }

        if total_ticks >= next_hud_report {
            let hud = state.hud();
            log::info!(
                "t={:.1}s score={} high={} kills={}/{} live={}",
                hud.time_alive,
                hud.score,
                hud.high_score,
                hud.enemies_killed,
                hud.bosses_killed,
                state.registry.len(),
            );
            next_hud_report = total_ticks + u64::from(config.tick_rate as u32) * 5;
        }

        std::thread::sleep(Duration::from_millis(4));
    }

    let best = state.high_score.max(state.score);
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    if let Some(rank) = scores.add_score(best, total_ticks, timestamp) {
        log::info!("session score {best} ranked #{rank}");
        if let Err(err) = scores.save(Path::new("highscores.json")) {
            log::warn!("failed to save high scores: {err}");
        }
    }
    log::info!("demo finished: {total_ticks} ticks, best score {best}");
}

/// Stand-in for the input collaborator: chase the deepest threat's x
/// position and hold fire.
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput { fire: true, ..Default::default() };
    let Some(player) = state.player() else {
        return input;
    };

    let threat = state
        .registry
        .iter()
        .filter(|b| matches!(b.kind.tag(), VariantTag::Enemy | VariantTag::Boss))
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(std::cmp::Ordering::Equal));

    if let Some(threat) = threat {
        let dx = threat.pos.x - player.pos.x;
        if dx < -4.0 {
            input.move_x = -1.0;
        } else if dx > 4.0 {
            input.move_x = 1.0;
        }
        // Back away from anything closing in on the player's row
        if (threat.pos.y - player.pos.y).abs() < threat.half_size().y + player.half_size().y {
            input.move_y = 1.0;
        }
    }
    input
}
