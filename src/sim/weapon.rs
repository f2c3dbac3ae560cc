//! Weapons and their firing state machine
//!
//! A weapon charges a fire timer every tick. Once the timer reaches the fire
//! interval (`1 / fire_rate`) it fires once and the timer resets to zero, so a
//! weapon fires at most once per tick no matter how large the step was.
//!
//! Firing aims at the nearest live enemy; with no target the shot is dropped.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::nearest;
use super::enemy::Enemy;
use super::entity::IdAllocator;
use super::projectile::Projectile;
use crate::angle_of;
use crate::consts::MAX_WEAPON_LEVEL;

/// Weapon types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    /// High fire rate, low damage, random per-shot spread
    Smg,
    /// Cone burst, high damage, lower fire rate
    Shotgun,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 2] = [WeaponKind::Smg, WeaponKind::Shotgun];

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Smg => "SMG",
            WeaponKind::Shotgun => "Shotgun",
        }
    }

    /// Pitch shown when offered as a new weapon
    pub fn blurb(&self) -> &'static str {
        match self {
            WeaponKind::Smg => "High fire rate, moderate damage",
            WeaponKind::Shotgun => "Cone burst, high damage",
        }
    }

    pub fn base_stats(self) -> WeaponStats {
        match self {
            WeaponKind::Smg => WeaponStats {
                damage: 8.0,
                fire_rate: 5.0,
                projectile_count: 1,
                pierce: 0,
                range: 400.0,
                projectile_speed: 500.0,
                spread: 0.1,
            },
            WeaponKind::Shotgun => WeaponStats {
                damage: 15.0,
                fire_rate: 2.0,
                projectile_count: 5,
                pierce: 0,
                range: 250.0,
                projectile_speed: 600.0,
                spread: 0.6,
            },
        }
    }

    /// Projectile color (0xRRGGBB)
    pub fn projectile_color(self) -> u32 {
        match self {
            WeaponKind::Smg => 0xffff00,
            WeaponKind::Shotgun => 0xff8800,
        }
    }
}

/// Mutable weapon stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage: f32,
    /// Shots per second
    pub fire_rate: f32,
    pub projectile_count: u32,
    /// Extra enemies each projectile may hit after the first
    pub pierce: u32,
    pub range: f32,
    pub projectile_speed: f32,
    /// Total spread angle (radians)
    pub spread: f32,
}

/// A weapon owned by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub level: u32,
    pub stats: WeaponStats,
    fire_timer: f32,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            level: 1,
            stats: kind.base_stats(),
            fire_timer: 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[inline]
    pub fn fire_timer(&self) -> f32 {
        self.fire_timer
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= MAX_WEAPON_LEVEL
    }

    /// Seconds between shots, `None` when the weapon cannot fire
    pub fn fire_interval(&self) -> Option<f32> {
        (self.stats.fire_rate > 0.0).then(|| 1.0 / self.stats.fire_rate)
    }

    /// Charge the fire timer and fire once if ready
    ///
    /// Returns true when the weapon triggered this tick (even if no enemy was
    /// in sight and nothing was emitted).
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        origin: Vec2,
        enemies: &[Enemy],
        ids: &mut IdAllocator,
        rng: &mut R,
        out: &mut Vec<Projectile>,
    ) -> bool {
        self.fire_timer += dt;

        let Some(interval) = self.fire_interval() else {
            return false;
        };
        if self.fire_timer < interval {
            return false;
        }

        self.fire(origin, enemies, ids, rng, out);
        self.fire_timer = 0.0;
        true
    }

    /// Emit a volley aimed at the nearest enemy
    pub fn fire<R: Rng + ?Sized>(
        &self,
        origin: Vec2,
        enemies: &[Enemy],
        ids: &mut IdAllocator,
        rng: &mut R,
        out: &mut Vec<Projectile>,
    ) {
        let Some((_, target)) = nearest(origin, enemies.iter().map(|e| (e.id, &e.body))) else {
            return;
        };
        let aim = angle_of(target - origin);
        let count = self.stats.projectile_count;

        for i in 0..count {
            let angle = match self.kind {
                WeaponKind::Smg => {
                    let jitter = rng.random::<f32>() - 0.5;
                    aim + jitter * self.stats.spread
                }
                WeaponKind::Shotgun => {
                    // Pellets fan evenly across the cone; a single pellet flies straight
                    let spread_percent = if count > 1 {
                        i as f32 / (count - 1) as f32 - 0.5
                    } else {
                        0.0
                    };
                    aim + spread_percent * self.stats.spread
                }
            };

            out.push(Projectile::new(
                ids.next_id(),
                origin,
                angle,
                self.stats.projectile_speed,
                self.stats.damage,
                self.stats.range,
                self.stats.pierce,
                self.kind.projectile_color(),
            ));
        }
    }

    /// Advance one level. No-op at max level.
    pub fn upgrade(&mut self) -> bool {
        if self.is_max_level() {
            return false;
        }
        self.level += 1;

        let s = &mut self.stats;
        match (self.kind, self.level) {
            (WeaponKind::Smg, 2) => {
                s.damage += 2.0;
                s.fire_rate += 1.0;
            }
            (WeaponKind::Smg, 3) => {
                s.projectile_count += 1;
                s.spread *= 1.5;
            }
            (WeaponKind::Smg, 4) => {
                s.pierce += 1;
                s.damage += 3.0;
            }
            (WeaponKind::Smg, 5) => {
                s.fire_rate += 2.0;
                s.projectile_count += 1;
            }
            (WeaponKind::Shotgun, 2) => {
                s.damage += 5.0;
                s.projectile_count += 2;
            }
            (WeaponKind::Shotgun, 3) => {
                s.fire_rate += 0.5;
                s.damage += 5.0;
            }
            (WeaponKind::Shotgun, 4) => {
                s.pierce += 1;
                s.projectile_count += 2;
            }
            (WeaponKind::Shotgun, 5) => {
                s.damage += 10.0;
                s.range += 100.0;
            }
            _ => {}
        }
        log::debug!("{} upgraded to level {}", self.name(), self.level);
        true
    }

    /// What the next upgrade does
    pub fn upgrade_description(&self) -> &'static str {
        match (self.kind, self.level) {
            (WeaponKind::Smg, 1) => "+2 damage, +1 fire rate",
            (WeaponKind::Smg, 2) => "+1 projectile",
            (WeaponKind::Smg, 3) => "+1 pierce, +3 damage",
            (WeaponKind::Smg, 4) => "+2 fire rate, +1 projectile",
            (WeaponKind::Shotgun, 1) => "+5 damage, +2 pellets",
            (WeaponKind::Shotgun, 2) => "+0.5 fire rate, +5 damage",
            (WeaponKind::Shotgun, 3) => "+1 pierce, +2 pellets",
            (WeaponKind::Shotgun, 4) => "+10 damage, +100 range",
            _ => "MAX LEVEL",
        }
    }
}
