//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed tick per animation frame
//! - Seeded RNG only
//! - Stable iteration order (arrows in spawn order)
//! - No rendering, audio, storage or DOM dependencies

pub mod arc;
pub mod arrow;
pub mod collision;
pub mod dog;
pub mod effects;
pub mod hurdle;
pub mod signal;
pub mod state;
pub mod tick;

pub use arc::ArcSegment;
pub use arrow::Arrow;
pub use collision::{Bounds, ShieldContact, body_hit, shield_contact};
pub use dog::{Dog, JumpKind, jump_offset};
pub use effects::{Effects, Particle, ParticleKind};
pub use hurdle::Hurdle;
pub use signal::{SignalColor, TrafficLight, generate_sequence};
pub use state::{
    FailReason, GameEvent, GamePhase, GameState, JumpOutcome, RoundPhase, Shield, SimConfig,
    judge,
};
pub use tick::{TickInput, complete_round, tick};
