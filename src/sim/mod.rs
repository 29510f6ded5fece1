//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied dt, clamped to a fixed maximum
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod curve;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use curve::{StageParams, clamp_stage, stage_config};
pub use session::{Command, Session};
pub use snapshot::Snapshot;
pub use spawn::{heavy_from_warning, make_enemy, pick_variant, queue_heavy};
pub use state::{
    Enemy, EnemyKind, EnemyVariant, GameEvent, HorizontalIntent, Player, Playfield, RunState,
    Warning,
};
pub use tick::{StepOutcome, step};
