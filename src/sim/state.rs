//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Main menu, stage 1 laid out but not moving
    Idle,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Stage goal reached, waiting for advance/replay
    StageComplete,
    /// Out of lives, waiting for retry/menu
    GameOver,
}

/// Playfield bounds (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    /// Enemies below this line have passed the player and score a point
    #[inline]
    pub fn bottom_pass_line(&self) -> f32 {
        self.height + BOTTOM_PASS_MARGIN
    }

    /// Enemies below this line are dropped from the simulation
    #[inline]
    pub fn prune_line(&self) -> f32 {
        self.height + PRUNE_MARGIN
    }
}

/// Desired horizontal movement written by the input layer before each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalIntent {
    Left,
    #[default]
    Idle,
    Right,
}

impl HorizontalIntent {
    /// Combine two held directions; holding both cancels out
    pub fn from_keys(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => HorizontalIntent::Left,
            (false, true) => HorizontalIntent::Right,
            _ => HorizontalIntent::Idle,
        }
    }

    /// Quantize an analog axis (e.g. -1.0..=1.0) to a direction
    pub fn from_axis(value: f32) -> Self {
        if value < -0.5 {
            HorizontalIntent::Left
        } else if value > 0.5 {
            HorizontalIntent::Right
        } else {
            HorizontalIntent::Idle
        }
    }

    /// Signed direction: -1, 0 or 1
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            HorizontalIntent::Left => -1.0,
            HorizontalIntent::Idle => 0.0,
            HorizontalIntent::Right => 1.0,
        }
    }
}

/// The player's avatar. Only moves horizontally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Current horizontal velocity (px/s)
    pub vx: f32,
    /// Maximum horizontal speed (px/s)
    pub speed: f32,
}

impl Player {
    /// Create a player centered horizontally on its row
    pub fn new(field: &Playfield, size: f32, speed: f32, row_fraction: f32) -> Self {
        Self {
            pos: Vec2::new((field.width - size) / 2.0, field.height * row_fraction),
            size: Vec2::splat(size),
            vx: 0.0,
            speed,
        }
    }

    /// Move back to the center of the row and stop
    pub fn recenter(&mut self, field: &Playfield) {
        self.pos.x = (field.width - self.size.x) / 2.0;
        self.vx = 0.0;
    }

    /// Apply intent for one tick, keeping the avatar inside the playfield
    pub fn advance(&mut self, intent: HorizontalIntent, dt: f32, field: &Playfield) {
        self.vx = intent.sign() * self.speed;
        self.pos.x = (self.pos.x + self.vx * dt).clamp(0.0, field.width - self.size.x);
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Enemy variant tag, without behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyVariant {
    Normal,
    Burst,
    Zigzag,
    Heavy,
}

/// Enemy variant with its per-variant behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Falls straight down
    Normal,
    /// Periodically jumps downward
    Burst { timer: f32, cooldown: f32 },
    /// Drifts sideways, bouncing off the playfield walls
    Zigzag { vx: f32 },
    /// Large and fast, always preceded by a warning
    Heavy,
}

impl EnemyKind {
    pub fn variant(&self) -> EnemyVariant {
        match self {
            EnemyKind::Normal => EnemyVariant::Normal,
            EnemyKind::Burst { .. } => EnemyVariant::Burst,
            EnemyKind::Zigzag { .. } => EnemyVariant::Zigzag,
            EnemyKind::Heavy => EnemyVariant::Heavy,
        }
    }
}

/// A falling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable identity, kept when the enemy is recycled in place
    pub id: u32,
    pub kind: EnemyKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed (px/s)
    pub vy: f32,
    /// Replaced by a heavy warning; dropped at the end of the tick
    #[serde(default)]
    pub retired: bool,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn variant(&self) -> EnemyVariant {
        self.kind.variant()
    }
}

/// Telegraph for a pending heavy drop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    /// Left edge of the column the heavy will fall in
    pub x: f32,
    pub width: f32,
    /// Seconds shown so far
    pub elapsed: f32,
    /// Seconds before the heavy spawns
    pub life: f32,
}

impl Warning {
    #[inline]
    pub fn expired(&self) -> bool {
        self.elapsed >= self.life
    }

    /// Fraction of the telegraph shown so far, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.life <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.life).clamp(0.0, 1.0)
        }
    }
}

/// Events produced by a tick, consumed by presentation/audio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An enemy passed the bottom and scored a point
    ScoreIncrement,
    /// The player was hit
    Hit { lives_remaining: u32 },
    /// A heavy warning was queued
    WarningSpawned { x: f32, width: f32, life: f32 },
    /// A warning expired and its heavy entered the playfield (x is the column center)
    HeavySpawned { x: f32 },
    /// A burst enemy jumped; position is its new center
    BurstJump { x: f32, y: f32 },
    /// Stage goal reached
    StageComplete { stage: u32 },
    /// Out of lives
    GameOver { score: u32, goal: u32, stage: u32 },
    /// The final stage was cleared
    StageCleared100,
}

impl GameEvent {
    /// True for events that end the current stage attempt
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameEvent::StageComplete { .. } | GameEvent::GameOver { .. } | GameEvent::StageCleared100
        )
    }
}
