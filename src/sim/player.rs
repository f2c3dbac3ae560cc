//! The player character
//!
//! Movement, dash (burst + invulnerability), damage and healing, and the
//! XP/level progression counters.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use super::pickup::Pickup;
use super::weapon::{Weapon, WeaponKind};
use crate::consts::*;

/// Mutable player stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub max_hp: f32,
    pub hp: f32,
    pub move_speed: f32,
    /// Flat damage reduction (a hit always deals at least 1)
    pub armor: f32,
    /// Flavor only; dashing is gated by the cooldown
    pub dash_charges: u32,
    pub dash_cooldown: f32,
    pub pickup_range: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            max_hp: PLAYER_MAX_HP,
            hp: PLAYER_MAX_HP,
            move_speed: PLAYER_MOVE_SPEED,
            armor: 0.0,
            dash_charges: PLAYER_DASH_CHARGES,
            dash_cooldown: PLAYER_DASH_COOLDOWN,
            pickup_range: PLAYER_PICKUP_RANGE,
        }
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub stats: PlayerStats,
    pub weapons: Vec<Weapon>,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub kills: u32,
    pub coins: u32,
    dash_timer: f32,
    invulnerable_timer: f32,
    damage_flash_timer: f32,
    dash_direction: Vec2,
    dashing: bool,
}

impl Player {
    /// New player at `pos` carrying the starting SMG
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, PLAYER_RADIUS),
            stats: PlayerStats::default(),
            weapons: vec![Weapon::new(WeaponKind::Smg)],
            level: 1,
            xp: 0,
            xp_to_next_level: STARTING_XP_TO_NEXT_LEVEL,
            kills: 0,
            coins: 0,
            dash_timer: 0.0,
            invulnerable_timer: 0.0,
            damage_flash_timer: 0.0,
            dash_direction: Vec2::ZERO,
            dashing: false,
        }
    }

    #[inline]
    pub fn is_dashing(&self) -> bool {
        self.dashing
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0.0
    }

    #[inline]
    pub fn is_flashing(&self) -> bool {
        self.damage_flash_timer > 0.0
    }

    pub fn hp_percent(&self) -> f32 {
        if self.stats.max_hp > 0.0 {
            self.stats.hp / self.stats.max_hp
        } else {
            0.0
        }
    }

    pub fn xp_percent(&self) -> f32 {
        if self.xp_to_next_level > 0 {
            self.xp as f32 / self.xp_to_next_level as f32
        } else {
            0.0
        }
    }

    /// Timers, dash and movement for one tick
    ///
    /// `movement` is the live input direction (magnitude <= 1); `dash_pressed`
    /// is the edge-triggered dash request for this tick.
    pub fn update(&mut self, dt: f32, movement: Vec2, dash_pressed: bool) {
        if self.dash_timer > 0.0 {
            self.dash_timer -= dt;
        }
        if self.invulnerable_timer > 0.0 {
            self.invulnerable_timer -= dt;
        }
        if self.damage_flash_timer > 0.0 {
            self.damage_flash_timer -= dt;
        }

        if dash_pressed && self.dash_timer <= 0.0 {
            self.start_dash(movement);
        }

        if self.dashing {
            self.body.vel = self.dash_direction * DASH_SPEED;
            self.body.integrate(dt);
            // Dash is time-bounded: it ends with the invulnerability window
            if self.invulnerable_timer <= 0.0 {
                self.dashing = false;
            }
        } else {
            self.body.vel = movement * self.stats.move_speed;
            self.body.integrate(dt);
        }
    }

    fn start_dash(&mut self, direction: Vec2) {
        // Standing still: nothing to dash along, cooldown is not spent
        if direction == Vec2::ZERO {
            return;
        }
        self.dashing = true;
        self.dash_timer = self.stats.dash_cooldown;
        self.invulnerable_timer = DASH_DURATION;
        self.dash_direction = direction;
    }

    /// Apply incoming damage after armor. No-op while invulnerable.
    pub fn take_damage(&mut self, amount: f32) {
        if self.is_invulnerable() || self.body.is_dead() {
            return;
        }

        let actual = (amount - self.stats.armor).max(1.0);
        self.stats.hp -= actual;
        self.damage_flash_timer = DAMAGE_FLASH;

        if self.stats.hp <= 0.0 {
            self.stats.hp = 0.0;
            self.body.kill();
        }
    }

    /// Restore hp, clamped to max
    pub fn heal(&mut self, amount: f32) {
        if self.body.is_dead() {
            return;
        }
        self.stats.hp = (self.stats.hp + amount.max(0.0)).min(self.stats.max_hp);
    }

    /// Add experience. Returns the number of levels gained.
    pub fn add_xp(&mut self, amount: u32) -> u32 {
        self.xp += amount;

        let mut levels = 0;
        while self.xp_to_next_level > 0 && self.xp >= self.xp_to_next_level {
            self.xp -= self.xp_to_next_level;
            self.level_up();
            levels += 1;
        }
        levels
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.xp_to_next_level = (self.xp_to_next_level as f32 * XP_GROWTH).floor() as u32;
        log::info!("Level up! Now level {} (next at {} xp)", self.level, self.xp_to_next_level);
    }

    pub fn has_weapon(&self, kind: WeaponKind) -> bool {
        self.weapons.iter().any(|w| w.kind == kind)
    }

    pub fn add_weapon(&mut self, weapon: Weapon) {
        self.weapons.push(weapon);
    }

    /// Collect every live pickup within pickup range
    ///
    /// Effects apply immediately; collected pickups are marked dead and
    /// removed with the rest of the dead entities. Returns levels gained.
    pub fn collect_pickups(&mut self, pickups: &mut [Pickup]) -> u32 {
        let mut levels = 0;
        for pickup in pickups.iter_mut() {
            if pickup.body.is_dead() {
                continue;
            }
            if super::collision::within_range(self.body.pos, self.stats.pickup_range, pickup.body.pos) {
                levels += pickup.collect(self);
            }
        }
        levels
    }
}
