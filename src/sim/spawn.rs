//! Enemy factory
//!
//! Builds enemies and heavy warnings from stage parameters. All randomness
//! comes from the caller's RNG so a seeded session reproduces its spawns.

use glam::Vec2;
use rand::Rng;

use super::curve::StageParams;
use super::state::{Enemy, EnemyKind, EnemyVariant, Playfield, Warning};
use crate::consts::HEAVY_EXTRA_SIZE;

/// Uniform draw in `[lo, hi)`. Callers keep `lo <= hi`; `lo == hi` returns `lo`
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Weighted variant choice.
///
/// Thresholds are cumulative in the order Heavy, Zigzag, Burst; whatever mass
/// is left over is Normal.
pub fn pick_variant<R: Rng + ?Sized>(params: &StageParams, rng: &mut R) -> EnemyVariant {
    let r = rng.random::<f32>();
    if r < params.p_heavy {
        EnemyVariant::Heavy
    } else if r < params.p_heavy + params.p_zig {
        EnemyVariant::Zigzag
    } else if r < params.p_heavy + params.p_zig + params.p_burst {
        EnemyVariant::Burst
    } else {
        EnemyVariant::Normal
    }
}

/// Edge length of a heavy enemy (and the width of its warning column)
#[inline]
pub fn heavy_size(params: &StageParams) -> f32 {
    params.size + HEAVY_EXTRA_SIZE
}

/// Construct an enemy of `variant` somewhere above the visible playfield
pub fn make_enemy<R: Rng + ?Sized>(
    id: u32,
    params: &StageParams,
    variant: EnemyVariant,
    field: &Playfield,
    rng: &mut R,
) -> Enemy {
    let base_vy = params.base_fall * uniform(rng, 0.85, 1.25);

    let (kind, size, vy) = match variant {
        EnemyVariant::Normal => (EnemyKind::Normal, params.size, base_vy),
        EnemyVariant::Zigzag => {
            let speed = uniform(rng, 160.0, 420.0);
            let vx = if rng.random_bool(0.5) { -speed } else { speed };
            (EnemyKind::Zigzag { vx }, params.size, base_vy * 0.95)
        }
        EnemyVariant::Burst => {
            let cooldown = uniform(rng, 0.85, 1.35);
            (
                EnemyKind::Burst {
                    timer: 0.0,
                    cooldown,
                },
                params.size,
                base_vy,
            )
        }
        EnemyVariant::Heavy => (
            EnemyKind::Heavy,
            heavy_size(params),
            params.base_fall * uniform(rng, 1.25, 1.55),
        ),
    };

    let x = uniform(rng, 0.0, (field.width - size).max(0.0));
    let y = -uniform(rng, 40.0, field.height * 0.75) - size;

    Enemy {
        id,
        kind,
        pos: Vec2::new(x, y),
        size: Vec2::splat(size),
        vy,
        retired: false,
    }
}

/// Telegraph a heavy drop instead of spawning it directly
pub fn queue_heavy<R: Rng + ?Sized>(params: &StageParams, field: &Playfield, rng: &mut R) -> Warning {
    let width = heavy_size(params);
    Warning {
        x: uniform(rng, 0.0, (field.width - width).max(0.0)),
        width,
        elapsed: 0.0,
        life: params.warn_life,
    }
}

/// The heavy a warning was telegraphing, placed in the warned column just above view
pub fn heavy_from_warning<R: Rng + ?Sized>(
    id: u32,
    params: &StageParams,
    warning: &Warning,
    field: &Playfield,
    rng: &mut R,
) -> Enemy {
    let mut enemy = make_enemy(id, params, EnemyVariant::Heavy, field, rng);
    enemy.pos = Vec2::new(warning.x, -enemy.size.y);
    enemy
}
