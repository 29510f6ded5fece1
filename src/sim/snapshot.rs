//! Read-only view of a session for rendering and HUD

use serde::Serialize;

use super::state::{Enemy, Player, Playfield, RunState, Warning};

/// Borrowed view of everything the presentation layer draws
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub stage: u32,
    pub score: u32,
    pub goal: u32,
    pub lives: u32,
    pub run_state: RunState,
    pub playfield: Playfield,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub warnings: &'a [Warning],
}

impl Snapshot<'_> {
    /// Stage progress for the progress bar, in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.score as f32 / self.goal.max(1) as f32).clamp(0.0, 1.0)
    }

    /// Serialize as a single JSON line
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
