//! Difficulty curve
//!
//! Maps a stage number to its tunable parameters. Pure and deterministic: the
//! same stage always yields the same `StageParams`, so callers recompute it
//! whenever needed instead of caching it across stages.

use serde::Serialize;

use crate::clamp;
use crate::consts::{ENEMY_BASE_SIZE, MAX_STAGE};

/// Stage at which zigzag enemies start appearing
pub const ZIGZAG_UNLOCK_STAGE: u32 = 6;
/// Stage at which burst enemies start appearing
pub const BURST_UNLOCK_STAGE: u32 = 10;
/// Stage at which heavy enemies (and their warnings) start appearing
pub const HEAVY_UNLOCK_STAGE: u32 = 15;

/// Parameters derived from a stage number
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageParams {
    /// Normalized progress through the run (0 at stage 1, 1 at the last stage)
    pub t: f32,
    /// Enemies (or warnings) spawned when the stage starts
    pub count: u32,
    /// Base fall speed in px/s, scaled per variant
    pub base_fall: f32,
    /// Points needed to clear the stage
    pub goal_points: u32,
    /// Base enemy edge length
    pub size: f32,
    pub p_zig: f32,
    pub p_burst: f32,
    pub p_heavy: f32,
    /// Seconds a heavy warning is shown before the drop
    pub warn_life: f32,
}

impl StageParams {
    /// Total probability mass assigned to special variants (the rest is Normal)
    pub fn spawn_mass(&self) -> f32 {
        self.p_heavy + self.p_zig + self.p_burst
    }
}

/// Clamp a requested stage into the playable range
#[inline]
pub fn clamp_stage(stage: u32) -> u32 {
    stage.clamp(1, MAX_STAGE)
}

/// Difficulty parameters for `stage` (clamped to `1..=MAX_STAGE`)
pub fn stage_config(stage: u32) -> StageParams {
    let stage = clamp_stage(stage);
    let t = (stage - 1) as f32 / (MAX_STAGE - 1) as f32;

    // 1..7 enemies on screen
    let count = 1 + (6.0 * t.powf(1.02)).floor() as u32;

    let base_fall = 220.0 + 620.0 * t.powf(0.95);
    let goal_points = 7 + (7.0 * t).floor() as u32 + stage / 3;

    // Enemies shrink slightly as the run goes on
    let size = ENEMY_BASE_SIZE - (6.0 * t).floor();

    let p_zig = if stage < ZIGZAG_UNLOCK_STAGE {
        0.0
    } else {
        clamp(0.10 + 0.28 * t, 0.10, 0.40)
    };
    let p_burst = if stage < BURST_UNLOCK_STAGE {
        0.0
    } else {
        clamp(0.10 + 0.24 * t, 0.10, 0.35)
    };
    let p_heavy = if stage < HEAVY_UNLOCK_STAGE {
        0.0
    } else {
        clamp(0.06 + 0.18 * t, 0.06, 0.26)
    };

    // Longer telegraph early on
    let warn_life = 0.55 + 0.25 * (1.0 - t);

    StageParams {
        t,
        count,
        base_fall,
        goal_points,
        size,
        p_zig,
        p_burst,
        p_heavy,
        warn_life,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_first_stage() {
        let p = stage_config(1);
        assert_eq!(p.t, 0.0);
        assert_eq!(p.count, 1);
        assert!((p.base_fall - 220.0).abs() < EPS);
        assert_eq!(p.goal_points, 7);
        assert_eq!(p.size, 34.0);
        assert_eq!(p.p_zig, 0.0);
        assert_eq!(p.p_burst, 0.0);
        assert_eq!(p.p_heavy, 0.0);
        assert!((p.warn_life - 0.80).abs() < EPS);
    }

    #[test]
    fn test_last_stage() {
        let p = stage_config(100);
        assert_eq!(p.t, 1.0);
        assert_eq!(p.count, 7);
        assert!((p.base_fall - 840.0).abs() < EPS);
        assert_eq!(p.goal_points, 7 + 7 + 33);
        assert_eq!(p.size, 28.0);
        assert!((p.p_zig - 0.38).abs() < EPS);
        assert!((p.p_burst - 0.34).abs() < EPS);
        assert!((p.p_heavy - 0.24).abs() < EPS);
        assert!((p.warn_life - 0.55).abs() < EPS);
    }

    #[test]
    fn test_probabilities_respect_caps() {
        for stage in 1..=MAX_STAGE {
            let p = stage_config(stage);
            assert!(p.p_zig <= 0.40);
            assert!(p.p_burst <= 0.35);
            assert!(p.p_heavy <= 0.26);
            assert!(p.spawn_mass() <= 1.0);
        }
    }

    #[test]
    fn test_unlock_thresholds() {
        assert_eq!(stage_config(ZIGZAG_UNLOCK_STAGE - 1).p_zig, 0.0);
        assert!(stage_config(ZIGZAG_UNLOCK_STAGE).p_zig >= 0.10);
        assert_eq!(stage_config(BURST_UNLOCK_STAGE - 1).p_burst, 0.0);
        assert!(stage_config(BURST_UNLOCK_STAGE).p_burst >= 0.10);
        assert_eq!(stage_config(HEAVY_UNLOCK_STAGE - 1).p_heavy, 0.0);
        assert!(stage_config(HEAVY_UNLOCK_STAGE).p_heavy >= 0.06);
    }

    #[test]
    fn test_out_of_range_stage_is_clamped() {
        assert_eq!(stage_config(0), stage_config(1));
        assert_eq!(stage_config(250), stage_config(100));
    }

    #[test]
    fn test_curve_is_monotonic_over_the_run() {
        for stage in 1..MAX_STAGE {
            let a = stage_config(stage);
            let b = stage_config(stage + 1);
            assert!(b.count >= a.count, "count dropped at stage {stage}");
            assert!(b.goal_points >= a.goal_points, "goal dropped at stage {stage}");
            assert!(b.base_fall > a.base_fall, "fall speed flat at stage {stage}");
            assert!(b.size <= a.size, "size grew at stage {stage}");
            assert!(b.p_zig >= a.p_zig);
            assert!(b.p_burst >= a.p_burst);
            assert!(b.p_heavy >= a.p_heavy);
        }
    }

    proptest! {
        #[test]
        fn prop_later_stage_never_easier(a in 1u32..=100, b in 1u32..=100) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = stage_config(lo);
            let p_hi = stage_config(hi);
            prop_assert!(p_hi.count >= p_lo.count);
            prop_assert!(p_hi.goal_points >= p_lo.goal_points);
            prop_assert!(p_hi.base_fall >= p_lo.base_fall);
            prop_assert!(p_hi.size <= p_lo.size);
            prop_assert!(p_hi.warn_life <= p_lo.warn_life);
        }
    }
}
