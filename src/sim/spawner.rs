//! Wave spawner state machine
//!
//! A timer accumulates tick time; on expiry it emits one wave. Regular
//! waves bump an internal counter, and once the counter reaches the boss
//! period the next wave is a one-shot boss encounter instead (not scaled
//! by enemies-per-wave).

use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveKind {
    Regular,
    Boss,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    elapsed: f32,
    waves_since_boss: u32,
    boss_due: bool,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the next wave emission is a boss encounter
    pub fn boss_due(&self) -> bool {
        self.boss_due
    }

    /// Advance the wave timer; returns the wave to emit when it expires.
    pub fn advance(&mut self, config: &Config, dt: f32) -> Option<WaveKind> {
        self.elapsed += dt;
        if self.elapsed < config.wave_interval {
            return None;
        }
        self.elapsed = 0.0;

        if self.boss_due {
            // One-shot: the flag clears the moment the boss wave fires
            self.boss_due = false;
            Some(WaveKind::Boss)
        } else {
            self.waves_since_boss += 1;
            if self.waves_since_boss >= config.boss_wave_period {
                self.boss_due = true;
                self.waves_since_boss = 0;
            }
            Some(WaveKind::Regular)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_wave_before_interval_expires() {
        let config = Config::default();
        let mut spawner = Spawner::new();
        assert_eq!(spawner.advance(&config, config.wave_interval * 0.5), None);
    }

    #[test]
    fn timer_resets_after_each_wave() {
        let config = Config::default();
        let mut spawner = Spawner::new();
        assert_eq!(spawner.advance(&config, config.wave_interval), Some(WaveKind::Regular));
        // Fresh accumulation after the reset
        assert_eq!(spawner.advance(&config, config.wave_interval * 0.9), None);
        assert_eq!(
            spawner.advance(&config, config.wave_interval * 0.1),
            Some(WaveKind::Regular)
        );
    }

    #[test]
    fn every_period_plus_one_wave_is_a_boss() {
        let config = Config::default();
        let mut spawner = Spawner::new();
        let mut waves = Vec::new();
        for _ in 0..22 {
            if let Some(kind) = spawner.advance(&config, config.wave_interval) {
                waves.push(kind);
            }
        }
        // Ten regular waves, then the escalation fires
        assert_eq!(waves.len(), 22);
        assert!(waves[..10].iter().all(|&k| k == WaveKind::Regular));
        assert_eq!(waves[10], WaveKind::Boss);
        // The cycle repeats
        assert!(waves[11..21].iter().all(|&k| k == WaveKind::Regular));
        assert_eq!(waves[21], WaveKind::Boss);
    }

    #[test]
    fn boss_flag_is_one_shot() {
        let mut config = Config::default();
        config.boss_wave_period = 1;
        let mut spawner = Spawner::new();
        assert_eq!(spawner.advance(&config, config.wave_interval), Some(WaveKind::Regular));
        assert!(spawner.boss_due());
        assert_eq!(spawner.advance(&config, config.wave_interval), Some(WaveKind::Boss));
        assert!(!spawner.boss_due());
    }
}
