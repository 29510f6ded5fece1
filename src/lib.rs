//! Dodge the Box - A falling-block survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (difficulty curve, spawning, physics, session state)
//! - `settings`: Data-driven tunables loaded from JSON
//! - `autopilot`: Demo controller that plays from a snapshot

pub mod autopilot;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{GameEvent, HorizontalIntent, RunState, Session, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep the host is expected to use (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Upper bound on a single tick's dt, bounds step error after stalls
    pub const MAX_DT: f32 = 0.033;

    /// Number of stages in a full run
    pub const MAX_STAGE: u32 = 100;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 480.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 44.0;
    pub const PLAYER_SPEED: f32 = 560.0; // px/s
    /// Player row as a fraction of playfield height
    pub const PLAYER_Y_FRACTION: f32 = 0.84;

    /// Enemies scored once they fall this far past the bottom edge
    pub const BOTTOM_PASS_MARGIN: f32 = 60.0;
    /// Enemies this far past the bottom edge are dropped
    pub const PRUNE_MARGIN: f32 = 500.0;

    /// Enemy edge length on stage 1; later stages shrink from here
    pub const ENEMY_BASE_SIZE: f32 = 34.0;
    /// Heavy enemies are this much larger than the stage's base size
    pub const HEAVY_EXTRA_SIZE: f32 = 14.0;
    /// Largest enemy the difficulty curve can produce
    pub const MAX_ENEMY_SIZE: f32 = ENEMY_BASE_SIZE + HEAVY_EXTRA_SIZE;

    /// Lives at the start of every stage (not carried over)
    pub const STARTING_LIVES: u32 = 1;
    /// Upward knock applied to every enemy after a survived hit
    pub const HIT_GRACE_LIFT: f32 = 90.0;
}

/// Map `v` into `[lo, hi]`
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}
