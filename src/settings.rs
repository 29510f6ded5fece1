//! Game settings and tunables
//!
//! Loaded from an optional JSON file. Missing fields fall back to defaults,
//! and a missing or broken file falls back to defaults entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Playfield;

/// Simulation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Geometry ===
    /// Playfield size in pixels
    pub playfield: Playfield,
    /// Player edge length
    pub player_size: f32,
    /// Player row as a fraction of playfield height
    pub player_row: f32,

    // === Feel ===
    /// Player horizontal speed (px/s)
    pub player_speed: f32,
    /// Distance enemies are knocked back up after a survived hit
    pub hit_grace_lift: f32,

    // === Timing ===
    /// Largest dt a single tick will simulate (seconds)
    pub max_dt: f32,

    /// Fixed RNG seed; `None` picks one per run
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            player_size: PLAYER_SIZE,
            player_row: PLAYER_Y_FRACTION,

            player_speed: PLAYER_SPEED,
            hit_grace_lift: HIT_GRACE_LIFT,

            max_dt: MAX_DT,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Serialize settings as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not read settings {}: {}", path.display(), err);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), err);
                Self::default()
            }
        }
    }

    /// Repair values the simulation cannot run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.player_size.is_finite() && self.player_size > 0.0) {
            self.player_size = defaults.player_size;
        }
        // Every spawn column and the player must fit across the field
        let min_width = self.player_size.max(MAX_ENEMY_SIZE);
        if !(self.playfield.width.is_finite() && self.playfield.width >= min_width) {
            self.playfield.width = defaults.playfield.width.max(min_width);
        }
        if !(self.playfield.height.is_finite() && self.playfield.height > self.player_size) {
            self.playfield.height = defaults.playfield.height.max(self.player_size * 2.0);
        }
        if !(self.player_row.is_finite() && (0.0..1.0).contains(&self.player_row)) {
            self.player_row = defaults.player_row;
        }
        if !(self.player_speed.is_finite() && self.player_speed >= 0.0) {
            self.player_speed = defaults.player_speed;
        }
        if !self.hit_grace_lift.is_finite() {
            self.hit_grace_lift = defaults.hit_grace_lift;
        }
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            self.max_dt = defaults.max_dt;
        }
        self.max_dt = self.max_dt.min(0.1);

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "player_speed": 700.0, "seed": 99 }"#).unwrap();
        assert_eq!(settings.player_speed, 700.0);
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.playfield, Playfield::default());
        assert_eq!(settings.max_dt, MAX_DT);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            hit_grace_lift: 45.0,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_invalid_values_are_repaired() {
        let settings = Settings::from_json(
            r#"{ "max_dt": 5.0, "player_row": 1.5, "player_speed": -1.0,
                 "playfield": { "width": 10.0, "height": 800.0 } }"#,
        )
        .unwrap();
        assert_eq!(settings.max_dt, 0.1);
        assert_eq!(settings.player_row, PLAYER_Y_FRACTION);
        assert_eq!(settings.player_speed, PLAYER_SPEED);
        assert_eq!(settings.playfield.width, PLAYFIELD_WIDTH);
    }

    #[test]
    fn test_narrow_field_fits_heaviest_enemy() {
        use crate::sim::{queue_heavy, stage_config};
        use rand::SeedableRng;
        use rand_pcg::Pcg32;

        let settings = Settings::from_json(
            r#"{ "player_size": 10.0, "playfield": { "width": 30.0, "height": 800.0 } }"#,
        )
        .unwrap();
        assert!(settings.playfield.width >= MAX_ENEMY_SIZE);

        let params = stage_config(MAX_STAGE / 2);
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..1_000 {
            let warning = queue_heavy(&params, &settings.playfield, &mut rng);
            assert!(warning.x >= 0.0, "x={}", warning.x);
            assert!(warning.x + warning.width <= settings.playfield.width);
        }
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load("/definitely/not/here/settings.json");
        assert_eq!(settings, Settings::default());
    }
}
