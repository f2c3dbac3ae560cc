//! Enemy kinds and behavior
//!
//! Enemies home in on the player, deal contact damage on a cooldown and drop
//! experience when killed. The set of kinds is closed: Walker, Runner, Boss.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityId};
use super::player::Player;
use crate::consts::*;

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Basic slow zombie
    Walker,
    /// Fast, fragile zombie
    Runner,
    /// The Butcher - slow, tanky, charges periodically
    Boss,
}

impl EnemyKind {
    /// Starting stats for this kind
    pub fn base_stats(self) -> EnemyStats {
        match self {
            EnemyKind::Walker => EnemyStats::new(30.0, 10.0, 40.0, 1, 1.0),
            EnemyKind::Runner => EnemyStats::new(15.0, 8.0, 100.0, 2, 0.8),
            EnemyKind::Boss => EnemyStats::new(500.0, 20.0, 30.0, 50, 1.5),
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            EnemyKind::Walker => 12.0,
            EnemyKind::Runner => 10.0,
            EnemyKind::Boss => 32.0,
        }
    }

    /// Display color (0xRRGGBB)
    pub fn color(self) -> u32 {
        match self {
            EnemyKind::Walker => 0x884444,
            EnemyKind::Runner => 0xff4444,
            EnemyKind::Boss => 0x880000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Walker => "walker",
            EnemyKind::Runner => "runner",
            EnemyKind::Boss => "boss",
        }
    }
}

/// Mutable combat stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub max_hp: f32,
    pub hp: f32,
    /// Contact damage per attack
    pub damage: f32,
    pub move_speed: f32,
    /// XP dropped on death
    pub xp_value: u32,
    /// Seconds between contact attacks
    pub attack_cooldown: f32,
}

impl EnemyStats {
    pub fn new(max_hp: f32, damage: f32, move_speed: f32, xp_value: u32, attack_cooldown: f32) -> Self {
        Self {
            max_hp,
            hp: max_hp,
            damage,
            move_speed,
            xp_value,
            attack_cooldown,
        }
    }
}

/// Boss-only charge timers. Runs alongside the base homing behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChargeState {
    /// Counts down to the next charge
    pub cooldown_timer: f32,
    /// Remaining time of the active charge (0 = not charging)
    pub remaining: f32,
}

/// Emitted exactly once when an enemy dies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyDeath {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub xp_value: u32,
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub body: Body,
    pub stats: EnemyStats,
    attack_timer: f32,
    damage_flash_timer: f32,
    charge: Option<ChargeState>,
}

impl Enemy {
    pub fn new(id: EntityId, kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            body: Body::new(pos, kind.radius()),
            stats: kind.base_stats(),
            attack_timer: 0.0,
            damage_flash_timer: 0.0,
            charge: (kind == EnemyKind::Boss).then(ChargeState::default),
        }
    }

    pub fn color(&self) -> u32 {
        self.kind.color()
    }

    pub fn is_flashing(&self) -> bool {
        self.damage_flash_timer > 0.0
    }

    pub fn is_charging(&self) -> bool {
        self.charge.as_ref().is_some_and(|c| c.remaining > 0.0)
    }

    pub fn hp_fraction(&self) -> f32 {
        if self.stats.max_hp > 0.0 {
            (self.stats.hp / self.stats.max_hp).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Current movement speed including any active charge
    pub fn effective_speed(&self) -> f32 {
        if self.is_charging() {
            self.stats.move_speed * BOSS_CHARGE_MULTIPLIER
        } else {
            self.stats.move_speed
        }
    }

    /// Home in on the player and attack on contact
    pub fn update(&mut self, dt: f32, player: &mut Player) {
        if self.body.is_dead() {
            return;
        }

        if self.attack_timer > 0.0 {
            self.attack_timer -= dt;
        }
        if self.damage_flash_timer > 0.0 {
            self.damage_flash_timer -= dt;
        }

        let direction = (player.body.pos - self.body.pos).normalize_or_zero();
        self.body.vel = direction * self.effective_speed();
        self.body.integrate(dt);

        if self.body.collides_with(&player.body) && self.attack_timer <= 0.0 {
            player.take_damage(self.stats.damage);
            self.attack_timer = self.stats.attack_cooldown;
        }

        self.update_charge(dt);
    }

    /// Boss charge: an independent timer layered on top of homing
    fn update_charge(&mut self, dt: f32) {
        let Some(charge) = self.charge.as_mut() else {
            return;
        };

        if charge.remaining > 0.0 {
            charge.remaining = (charge.remaining - dt).max(0.0);
        }

        charge.cooldown_timer -= dt;
        if charge.cooldown_timer <= 0.0 {
            charge.remaining = BOSS_CHARGE_DURATION;
            charge.cooldown_timer = BOSS_CHARGE_COOLDOWN;
            log::debug!("Boss {} charging", self.id);
        }
    }

    /// Apply damage. Returns the death record the first time hp drops to zero.
    pub fn take_damage(&mut self, amount: f32) -> Option<EnemyDeath> {
        if self.body.is_dead() {
            return None;
        }

        self.stats.hp -= amount;
        self.damage_flash_timer = DAMAGE_FLASH;

        if self.stats.hp <= 0.0 {
            self.stats.hp = 0.0;
            self.body.kill();
            return Some(EnemyDeath {
                id: self.id,
                kind: self.kind,
                pos: self.body.pos,
                xp_value: self.stats.xp_value,
            });
        }
        None
    }

    /// Remove without a kill (no credit, no drop)
    pub fn despawn(&mut self) {
        self.body.kill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player_at(x: f32, y: f32) -> Player {
        let mut player = Player::new(Vec2::new(x, y));
        player.weapons.clear();
        player
    }

    #[test]
    fn test_walker_dies_once() {
        let mut walker = Enemy::new(7, EnemyKind::Walker, Vec2::new(10.0, 20.0));
        let death = walker.take_damage(35.0).expect("walker should die");
        assert_eq!(death.id, 7);
        assert_eq!(death.xp_value, 1);
        assert_eq!(death.pos, Vec2::new(10.0, 20.0));
        assert!(walker.body.is_dead());
        assert_eq!(walker.stats.hp, 0.0);

        assert!(walker.take_damage(35.0).is_none());
        assert!(walker.body.is_dead());
    }

    #[test]
    fn test_damage_flash() {
        let mut runner = Enemy::new(1, EnemyKind::Runner, Vec2::ZERO);
        assert!(runner.take_damage(5.0).is_none());
        assert!(runner.is_flashing());
        assert_eq!(runner.stats.hp, 10.0);
    }

    #[test]
    fn test_moves_toward_player() {
        let mut player = player_at(100.0, 0.0);
        let mut walker = Enemy::new(1, EnemyKind::Walker, Vec2::ZERO);
        walker.update(0.5, &mut player);
        assert!((walker.body.pos.x - 20.0).abs() < 1e-4);
        assert!(walker.body.pos.y.abs() < 1e-4);
    }

    #[test]
    fn test_standing_on_player_does_not_nan() {
        let mut player = player_at(0.0, 0.0);
        let mut walker = Enemy::new(1, EnemyKind::Walker, Vec2::ZERO);
        walker.update(0.1, &mut player);
        assert_eq!(walker.body.pos, Vec2::ZERO);
    }

    #[test]
    fn test_contact_damage_respects_cooldown() {
        let mut player = player_at(0.0, 0.0);
        let mut walker = Enemy::new(1, EnemyKind::Walker, Vec2::new(5.0, 0.0));

        walker.update(0.1, &mut player);
        assert_eq!(player.stats.hp, 90.0);

        // Still cooling down
        for _ in 0..5 {
            walker.update(0.1, &mut player);
        }
        assert_eq!(player.stats.hp, 90.0);

        for _ in 0..6 {
            walker.update(0.1, &mut player);
        }
        assert_eq!(player.stats.hp, 80.0);
    }

    #[test]
    fn test_boss_charge_cycle() {
        let mut player = player_at(10_000.0, 0.0);
        let mut boss = Enemy::new(1, EnemyKind::Boss, Vec2::ZERO);

        // First update starts a charge immediately
        boss.update(0.1, &mut player);
        assert!(boss.is_charging());
        assert_eq!(boss.effective_speed(), 150.0);
        assert_eq!(boss.stats.move_speed, 30.0);

        // Charge ends after its duration
        for _ in 0..11 {
            boss.update(0.1, &mut player);
        }
        assert!(!boss.is_charging());
        assert_eq!(boss.effective_speed(), 30.0);

        // Next charge comes around after the cooldown
        for _ in 0..40 {
            boss.update(0.1, &mut player);
        }
        assert!(boss.is_charging());
    }

    #[test]
    fn test_non_boss_never_charges() {
        let mut player = player_at(10_000.0, 0.0);
        let mut runner = Enemy::new(1, EnemyKind::Runner, Vec2::ZERO);
        for _ in 0..100 {
            runner.update(0.1, &mut player);
        }
        assert!(!runner.is_charging());
    }

    proptest! {
        #[test]
        fn prop_hp_bounded_and_single_death(
            kind_index in 0usize..3,
            hits in proptest::collection::vec(0.0f32..600.0, 0..40),
        ) {
            let kind = [EnemyKind::Walker, EnemyKind::Runner, EnemyKind::Boss][kind_index];
            let mut enemy = Enemy::new(1, kind, Vec2::ZERO);
            let mut deaths = 0;
            let mut was_dead = false;
            for amount in hits {
                if enemy.take_damage(amount).is_some() {
                    deaths += 1;
                }
                prop_assert!(enemy.stats.hp >= 0.0);
                prop_assert!(enemy.stats.hp <= enemy.stats.max_hp);
                prop_assert!(!was_dead || enemy.body.is_dead());
                was_dead = enemy.body.is_dead();
            }
            prop_assert!(deaths <= 1);
            prop_assert_eq!(deaths == 1, enemy.body.is_dead());
        }
    }
}
