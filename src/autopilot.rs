//! Idle/demo mode controller
//!
//! Plays the game from a snapshot: finds the columns that will be dangerous
//! soon and steers toward the nearest safe spot. Good enough for attract
//! mode and soak runs, not meant to be unbeatable.

use crate::sim::{EnemyKind, HorizontalIntent, Snapshot};

/// How far ahead (seconds) falling enemies count as threats
const LOOKAHEAD_SECS: f32 = 0.9;
/// Extra clearance kept on each side of a threat column
const MARGIN: f32 = 6.0;
/// Resolution of the safe-spot search
const SCAN_STEP: f32 = 4.0;

/// Horizontal span `[left, right)` that will be unsafe soon
#[derive(Debug, Clone, Copy)]
struct Threat {
    left: f32,
    right: f32,
}

fn threats(snapshot: &Snapshot) -> Vec<Threat> {
    let player = snapshot.player.rect();
    let mut out = Vec::with_capacity(snapshot.enemies.len() + snapshot.warnings.len());

    for enemy in snapshot.enemies.iter().filter(|e| !e.retired) {
        let rect = enemy.rect();
        // Already below the player row
        if rect.y > player.y + player.h {
            continue;
        }
        let gap = (player.y - (rect.y + rect.h)).max(0.0);
        let eta = gap / enemy.vy.max(1.0);
        if eta > LOOKAHEAD_SECS {
            continue;
        }

        // Zigzags can drift sideways before they arrive
        let drift = match enemy.kind {
            EnemyKind::Zigzag { vx } => vx.abs() * eta,
            _ => 0.0,
        };
        out.push(Threat {
            left: rect.x - drift,
            right: rect.x + rect.w + drift,
        });
    }

    // Heavy columns are dangerous for the whole telegraph and the drop after it
    out.extend(snapshot.warnings.iter().map(|w| Threat {
        left: w.x,
        right: w.x + w.width,
    }));

    out
}

/// Pick a direction for the next tick
pub fn steer(snapshot: &Snapshot) -> HorizontalIntent {
    let player = snapshot.player.rect();
    let threats = threats(snapshot);
    let blocked = |x: f32| {
        threats
            .iter()
            .any(|t| x < t.right + MARGIN && x + player.w > t.left - MARGIN)
    };

    if !blocked(player.x) {
        return HorizontalIntent::Idle;
    }

    let max_x = snapshot.playfield.width - player.w;
    let mut offset = SCAN_STEP;
    while player.x - offset >= 0.0 || player.x + offset <= max_x {
        let right = player.x + offset;
        if right <= max_x && !blocked(right) {
            return HorizontalIntent::Right;
        }
        let left = player.x - offset;
        if left >= 0.0 && !blocked(left) {
            return HorizontalIntent::Left;
        }
        offset += SCAN_STEP;
    }

    // Nowhere is safe; keep still and hope
    HorizontalIntent::Idle
}
