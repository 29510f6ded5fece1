//! Session state machine
//!
//! Owns stage, score, lives and every entity. Host commands go through an
//! explicit transition table; `tick` drives the simulation step only while
//! the session is Running.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::curve::{StageParams, clamp_stage, stage_config};
use super::snapshot::Snapshot;
use super::spawn::{make_enemy, pick_variant, queue_heavy};
use super::state::{Enemy, EnemyVariant, GameEvent, HorizontalIntent, Player, RunState, Warning};
use super::tick::{StepOutcome, step};
use crate::consts::{MAX_STAGE, STARTING_LIVES};
use crate::settings::Settings;

/// Actions the host can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a run from the menu at the given stage
    Start { stage: u32 },
    Pause,
    Resume,
    TogglePause,
    /// Move on after a clear (back to stage 1 after the final stage)
    AdvanceStage,
    /// Replay the current stage after a clear or a game over
    RetryStage,
    ReturnToMenu,
}

/// Effect of an accepted command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    /// Lay out `stage` from scratch, then enter `then`
    Reset { stage: u32, then: RunState },
    /// Change state without touching entities
    Enter(RunState),
}

/// The transition table. `None` means the command does not apply in `from`.
fn transition(from: RunState, command: Command, stage: u32) -> Option<Transition> {
    use RunState::*;

    match (from, command) {
        (Idle, Command::Start { stage }) => Some(Transition::Reset {
            stage,
            then: Running,
        }),
        (Running, Command::Pause | Command::TogglePause) => Some(Transition::Enter(Paused)),
        (Paused, Command::Resume | Command::TogglePause) => Some(Transition::Enter(Running)),
        (StageComplete, Command::AdvanceStage) => {
            let next = if stage >= MAX_STAGE { 1 } else { stage + 1 };
            Some(Transition::Reset {
                stage: next,
                then: Running,
            })
        }
        // After the final clear the only way on is to play again
        (StageComplete, Command::RetryStage) if stage >= MAX_STAGE => None,
        (StageComplete | GameOver, Command::RetryStage) => Some(Transition::Reset {
            stage,
            then: Running,
        }),
        (StageComplete | GameOver, Command::ReturnToMenu) => Some(Transition::Reset {
            stage: 1,
            then: Idle,
        }),
        _ => None,
    }
}

/// A single play session
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) settings: Settings,
    pub(crate) stage: u32,
    pub(crate) score: u32,
    pub(crate) goal: u32,
    pub(crate) lives: u32,
    pub(crate) run_state: RunState,
    pub(crate) player: Player,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) warnings: Vec<Warning>,
    pub(crate) intent: HorizontalIntent,
    pub(crate) rng: Pcg32,
    seed: u64,
    /// Events raised by commands, handed out by the next tick
    pending: Vec<GameEvent>,
    time_ticks: u64,
    next_id: u32,
}

impl Session {
    /// Create a session with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    /// Create a session sitting in the menu with stage 1 laid out
    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let settings = settings.sanitized();
        let player = Player::new(
            &settings.playfield,
            settings.player_size,
            settings.player_speed,
            settings.player_row,
        );

        let mut session = Self {
            settings,
            stage: 1,
            score: 0,
            goal: 0,
            lives: STARTING_LIVES,
            run_state: RunState::Idle,
            player,
            enemies: Vec::new(),
            warnings: Vec::new(),
            intent: HorizontalIntent::Idle,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            pending: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        };
        session.reset_stage(1);
        session
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Ticks simulated while Running
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Difficulty parameters for the current stage
    pub fn params(&self) -> StageParams {
        stage_config(self.stage)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Movement direction applied on the following ticks
    pub fn set_horizontal_intent(&mut self, intent: HorizontalIntent) {
        self.intent = intent;
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            stage: self.stage,
            score: self.score,
            goal: self.goal,
            lives: self.lives,
            run_state: self.run_state,
            playfield: self.settings.playfield,
            player: &self.player,
            enemies: &self.enemies,
            warnings: &self.warnings,
        }
    }

    pub fn start(&mut self) -> bool {
        self.apply(Command::Start { stage: 1 })
    }

    /// Start from the menu at an arbitrary stage (clamped to the playable range)
    pub fn start_at(&mut self, stage: u32) -> bool {
        self.apply(Command::Start { stage })
    }

    pub fn pause(&mut self) -> bool {
        self.apply(Command::Pause)
    }

    pub fn resume(&mut self) -> bool {
        self.apply(Command::Resume)
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.apply(Command::TogglePause)
    }

    pub fn advance_stage(&mut self) -> bool {
        self.apply(Command::AdvanceStage)
    }

    pub fn retry_stage(&mut self) -> bool {
        self.apply(Command::RetryStage)
    }

    pub fn return_to_menu(&mut self) -> bool {
        self.apply(Command::ReturnToMenu)
    }

    /// Apply a host command. Returns false if it does not apply in the current state.
    pub fn apply(&mut self, command: Command) -> bool {
        match transition(self.run_state, command, self.stage) {
            Some(Transition::Reset { stage, then }) => {
                self.reset_stage(stage);
                self.run_state = then;
                true
            }
            Some(Transition::Enter(state)) => {
                self.run_state = state;
                true
            }
            None => {
                log::debug!("Ignoring {:?} while {:?}", command, self.run_state);
                false
            }
        }
    }

    /// Advance by one frame and return this tick's events in order.
    ///
    /// `dt` is clamped to the configured maximum; outside Running nothing moves,
    /// but events raised by commands are still delivered.
    pub fn tick(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut events = std::mem::take(&mut self.pending);
        if self.run_state != RunState::Running {
            return events;
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.settings.max_dt)
        } else {
            0.0
        };
        self.time_ticks += 1;

        let params = stage_config(self.stage);
        let intent = self.intent;
        match step(self, &params, dt, intent, &mut events) {
            StepOutcome::Continue => {}
            StepOutcome::StageComplete => self.complete_stage(&mut events),
            StepOutcome::Hit => self.resolve_hit(&mut events),
        }

        debug_assert!(
            self.run_state != RunState::Running || self.score < self.goal,
            "score reached goal without a stage clear"
        );
        events
    }

    /// Lay out `stage` from scratch: score and lives reset, fresh spawns
    fn reset_stage(&mut self, stage: u32) {
        let stage = clamp_stage(stage);
        let params = stage_config(stage);
        self.stage = stage;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.goal = params.goal_points;

        self.player.recenter(&self.settings.playfield);
        self.enemies.clear();
        self.warnings.clear();

        for _ in 0..params.count {
            self.spawn(&params);
        }

        log::info!(
            "Stage {}: goal={}, count={}, fall={:.0}, warnings={}",
            self.stage,
            self.goal,
            params.count,
            params.base_fall,
            self.warnings.len()
        );
    }

    /// Spawn one enemy, or a warning if the draw is Heavy
    fn spawn(&mut self, params: &StageParams) {
        let field = self.settings.playfield;
        match pick_variant(params, &mut self.rng) {
            EnemyVariant::Heavy => {
                let warning = queue_heavy(params, &field, &mut self.rng);
                self.pending.push(GameEvent::WarningSpawned {
                    x: warning.x,
                    width: warning.width,
                    life: warning.life,
                });
                self.warnings.push(warning);
            }
            variant => {
                let id = self.next_entity_id();
                let enemy = make_enemy(id, params, variant, &field, &mut self.rng);
                self.enemies.push(enemy);
            }
        }
    }

    fn complete_stage(&mut self, events: &mut Vec<GameEvent>) {
        self.run_state = RunState::StageComplete;
        log::info!(
            "Stage {} cleared ({}/{}) after {} ticks",
            self.stage,
            self.score,
            self.goal,
            self.time_ticks
        );
        if self.stage >= MAX_STAGE {
            log::info!("Final stage cleared");
            events.push(GameEvent::StageCleared100);
        }
    }

    fn resolve_hit(&mut self, events: &mut Vec<GameEvent>) {
        debug_assert!(self.lives > 0, "hit resolved with no lives left");
        self.lives = self.lives.saturating_sub(1);
        events.push(GameEvent::Hit {
            lives_remaining: self.lives,
        });

        if self.lives == 0 {
            self.run_state = RunState::GameOver;
            log::info!(
                "Game over on stage {} at {}/{}",
                self.stage,
                self.score,
                self.goal
            );
            events.push(GameEvent::GameOver {
                score: self.score,
                goal: self.goal,
                stage: self.stage,
            });
            return;
        }

        // Survived: knock everything back up for a moment of breathing room
        let lift = self.settings.hit_grace_lift;
        for enemy in &mut self.enemies {
            enemy.pos.y -= lift;
        }
    }
}
