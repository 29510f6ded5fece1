//! Simulation step
//!
//! Advances one tick of player movement, warnings, enemy behaviour, scoring
//! and collision. The order of operations decides which events can share a
//! tick, so it is fixed:
//!
//! 1. player
//! 2. warnings (expired ones become heavies)
//! 3. enemies in order: fall, variant behaviour, bottom-pass, collision
//! 4. prune
//!
//! A stage clear or a hit ends the enemy loop for the tick, so the two never
//! fire together and at most one hit is resolved per tick.

use super::collision::overlaps;
use super::curve::StageParams;
use super::session::Session;
use super::spawn::{heavy_from_warning, make_enemy, pick_variant, queue_heavy, uniform};
use super::state::{EnemyKind, EnemyVariant, GameEvent, HorizontalIntent, Warning};

/// How the enemy loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing terminal happened
    Continue,
    /// Score reached the goal; `StageComplete` was emitted
    StageComplete,
    /// An enemy overlapped the player; lives are resolved by the session
    Hit,
}

/// Burst jump distance: base plus up to this much extra
const BURST_JUMP_BASE: f32 = 75.0;
const BURST_JUMP_EXTRA: f32 = 35.0;

/// Advance the session's entities by `dt` seconds, appending events in order
pub fn step(
    session: &mut Session,
    params: &StageParams,
    dt: f32,
    intent: HorizontalIntent,
    events: &mut Vec<GameEvent>,
) -> StepOutcome {
    let field = session.settings.playfield;

    session.player.advance(intent, dt, &field);

    // Warnings count down; expired ones drop their heavy at the warned column
    for warning in &mut session.warnings {
        warning.elapsed += dt;
    }
    let (expired, pending): (Vec<Warning>, Vec<Warning>) =
        std::mem::take(&mut session.warnings)
            .into_iter()
            .partition(Warning::expired);
    session.warnings = pending;
    for warning in expired {
        let id = session.next_entity_id();
        let heavy = heavy_from_warning(id, params, &warning, &field, &mut session.rng);
        log::debug!("Heavy {} dropped at x={:.0}", id, warning.x);
        events.push(GameEvent::HeavySpawned {
            x: warning.x + warning.width / 2.0,
        });
        session.enemies.push(heavy);
    }

    let player_rect = session.player.rect();
    let mut outcome = StepOutcome::Continue;

    for enemy in session.enemies.iter_mut() {
        enemy.pos.y += enemy.vy * dt;

        match &mut enemy.kind {
            EnemyKind::Zigzag { vx } => {
                enemy.pos.x += *vx * dt;
                if enemy.pos.x < 0.0 {
                    enemy.pos.x = 0.0;
                    *vx = -*vx;
                }
                if enemy.pos.x + enemy.size.x > field.width {
                    enemy.pos.x = field.width - enemy.size.x;
                    *vx = -*vx;
                }
            }
            EnemyKind::Burst { timer, cooldown } => {
                *timer += dt;
                if *timer >= *cooldown {
                    *timer = 0.0;
                    *cooldown = uniform(&mut session.rng, 0.75, 1.35);
                    enemy.pos.y += BURST_JUMP_BASE + uniform(&mut session.rng, 0.0, BURST_JUMP_EXTRA);
                    let center = enemy.rect().center();
                    events.push(GameEvent::BurstJump {
                        x: center.x,
                        y: center.y,
                    });
                }
            }
            EnemyKind::Normal | EnemyKind::Heavy => {}
        }

        if enemy.pos.y > field.bottom_pass_line() {
            session.score += 1;
            events.push(GameEvent::ScoreIncrement);

            // Heavies never come from recycling, they always get a warning first
            match pick_variant(params, &mut session.rng) {
                EnemyVariant::Heavy => {
                    enemy.retired = true;
                    let warning = queue_heavy(params, &field, &mut session.rng);
                    events.push(GameEvent::WarningSpawned {
                        x: warning.x,
                        width: warning.width,
                        life: warning.life,
                    });
                    session.warnings.push(warning);
                }
                variant => {
                    *enemy = make_enemy(enemy.id, params, variant, &field, &mut session.rng);
                }
            }

            if session.score >= session.goal {
                events.push(GameEvent::StageComplete {
                    stage: session.stage,
                });
                outcome = StepOutcome::StageComplete;
                break;
            }
        }

        if !enemy.retired && overlaps(&player_rect, &enemy.rect()) {
            outcome = StepOutcome::Hit;
            break;
        }
    }

    let prune_line = field.prune_line();
    session
        .enemies
        .retain(|e| !e.retired && e.pos.y <= prune_line);

    outcome
}
