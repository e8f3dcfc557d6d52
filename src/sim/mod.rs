//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (spawn x-positions are the sole random input)
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod registry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, overlaps, resolve_collisions};
pub use entity::{Body, BodyKind, Controls, UpdateOutcome, VariantTag, update_body};
pub use registry::Registry;
pub use spawner::{Spawner, WaveKind};
pub use state::{DrawInstance, GameState, HudCounters, Phase, SimEvent};
pub use tick::{FixedClock, TickInput, tick};
