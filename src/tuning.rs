//! Data-driven session tuning
//!
//! Loaded from JSON by the host. Every field has a default, so a document
//! only needs to name the values it overrides.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::wave::{WaveConfig, default_waves};

/// Session-level knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ceiling on a single tick's dt (seconds)
    pub max_dt: f32,
    /// Survive this long to win (seconds)
    pub victory_time: f32,
    /// When the boss arrives (seconds)
    pub boss_spawn_time: f32,
    /// Population cap for live enemies
    pub max_enemies: usize,
    /// Radius of the spawn ring around the player
    pub spawn_distance: f32,
    pub player_spawn: [f32; 2],
    pub waves: Vec<WaveConfig>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_dt: MAX_TICK_DT,
            victory_time: VICTORY_TIME,
            boss_spawn_time: BOSS_SPAWN_TIME,
            max_enemies: MAX_ENEMIES,
            spawn_distance: SPAWN_DISTANCE,
            player_spawn: [PLAYER_SPAWN.0, PLAYER_SPAWN.1],
            waves: default_waves(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: {} waves, cap {}, victory at {}s",
            tuning.waves.len(),
            tuning.max_enemies,
            tuning.victory_time
        );
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn player_spawn(&self) -> Vec2 {
        Vec2::from(self.player_spawn)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            return Err(invalid("max_dt", "must be a positive number"));
        }
        if !(self.victory_time.is_finite() && self.victory_time > 0.0) {
            return Err(invalid("victory_time", "must be a positive number"));
        }
        if !self.boss_spawn_time.is_finite() || self.boss_spawn_time < 0.0 {
            return Err(invalid("boss_spawn_time", "must be zero or more"));
        }
        if self.max_enemies == 0 {
            return Err(invalid("max_enemies", "must be at least 1"));
        }
        if !(self.spawn_distance.is_finite() && self.spawn_distance > 0.0) {
            return Err(invalid("spawn_distance", "must be a positive number"));
        }
        if !self.player_spawn.iter().all(|v| v.is_finite()) {
            return Err(invalid("player_spawn", "must be finite"));
        }
        if self.waves.is_empty() {
            return Err(invalid("waves", "at least one wave is required"));
        }
        for (i, wave) in self.waves.iter().enumerate() {
            if !wave.spawn_rate.is_finite() || wave.spawn_rate < 0.0 {
                return Err(invalid("waves", format!("wave {i} has a negative spawn rate")));
            }
            if wave.end_time < wave.start_time {
                return Err(invalid("waves", format!("wave {i} ends before it starts")));
            }
            if wave.enemy_types.iter().any(|e| !e.weight.is_finite() || e.weight < 0.0) {
                return Err(invalid("waves", format!("wave {i} has a negative weight")));
            }
        }
        Ok(())
    }
}
