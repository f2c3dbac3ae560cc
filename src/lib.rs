//! Horde Survivor - a top-down survival arena simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, weapons, waves, progression)
//! - `tuning`: Data-driven session configuration
//! - `host`: Frontend abstraction and the wall-clock session loop
//! - `camera`: Smoothed follow camera for screen-relative positions
//! - `error`: Configuration and session errors

pub mod camera;
pub mod error;
pub mod host;
pub mod sim;
pub mod tuning;

pub use camera::Camera;
pub use error::{ConfigError, SessionError};
pub use host::{Frontend, Session};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest simulation step a single tick may take (seconds)
    pub const MAX_TICK_DT: f32 = 0.1;
    /// Surviving this long wins the run (7 minutes)
    pub const VICTORY_TIME: f32 = 420.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 16.0;
    pub const PLAYER_SPAWN: (f32, f32) = (640.0, 360.0);
    pub const PLAYER_MAX_HP: f32 = 100.0;
    pub const PLAYER_MOVE_SPEED: f32 = 120.0;
    pub const PLAYER_DASH_CHARGES: u32 = 2;
    pub const PLAYER_DASH_COOLDOWN: f32 = 1.6;
    pub const PLAYER_PICKUP_RANGE: f32 = 50.0;
    /// Dash travel speed (independent of move speed)
    pub const DASH_SPEED: f32 = 400.0;
    /// Invulnerability window granted by a dash; also the dash duration
    pub const DASH_DURATION: f32 = 0.3;
    pub const STARTING_XP_TO_NEXT_LEVEL: u32 = 5;
    /// Multiplicative growth of the XP threshold per level (floored)
    pub const XP_GROWTH: f32 = 1.2;

    /// White flash after taking damage (player and enemies)
    pub const DAMAGE_FLASH: f32 = 0.1;

    /// Weapons cap out at this level
    pub const MAX_WEAPON_LEVEL: u32 = 5;
    pub const PROJECTILE_RADIUS: f32 = 4.0;

    /// Pickup defaults
    pub const PICKUP_RADIUS: f32 = 8.0;
    pub const PICKUP_LIFETIME: f32 = 30.0;
    pub const PICKUP_BOB_SPEED: f32 = 3.0;
    pub const PICKUP_BOB_AMPLITUDE: f32 = 3.0;

    /// Boss charge: speed multiplier, how long it lasts, how often it triggers
    pub const BOSS_CHARGE_MULTIPLIER: f32 = 5.0;
    pub const BOSS_CHARGE_DURATION: f32 = 1.0;
    pub const BOSS_CHARGE_COOLDOWN: f32 = 5.0;

    /// Spawning director defaults
    pub const BOSS_SPAWN_TIME: f32 = 180.0;
    pub const MAX_ENEMIES: usize = 60;
    pub const SPAWN_DISTANCE: f32 = 400.0;

    /// Number of choices shown on level-up
    pub const UPGRADE_CHOICES: usize = 3;
}

/// Unit vector pointing along `angle`, scaled by `length`
#[inline]
pub fn from_angle(angle: f32, length: f32) -> Vec2 {
    Vec2::new(angle.cos() * length, angle.sin() * length)
}

/// Heading of a vector in radians (atan2)
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Format elapsed seconds as `M:SS`
pub fn format_elapsed(seconds: f32) -> String {
    let total = seconds.max(0.0).floor() as u32;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0.0), "0:00");
        assert_eq!(format_elapsed(9.99), "0:09");
        assert_eq!(format_elapsed(65.0), "1:05");
        assert_eq!(format_elapsed(420.0), "7:00");
        assert_eq!(format_elapsed(-3.0), "0:00");
    }

    #[test]
    fn test_from_angle_and_back() {
        let v = from_angle(std::f32::consts::FRAC_PI_2, 2.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 2.0).abs() < 1e-5);
        assert!((angle_of(v) - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }
}
