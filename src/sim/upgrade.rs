//! Level-up choices
//!
//! On each level-up the player is offered three options drawn without
//! replacement from a pool of weapon upgrades, new weapons and stat boosts.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::weapon::{Weapon, WeaponKind};
use crate::consts::UPGRADE_CHOICES;

/// Move speed multiplier for the speed boost
const MOVE_SPEED_BOOST: f32 = 1.1;
const MAX_HP_BOOST: f32 = 20.0;
const ARMOR_BOOST: f32 = 1.0;

/// A single level-up choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpgradeOption {
    /// Raise an owned weapon to `next_level`
    UpgradeWeapon { kind: WeaponKind, next_level: u32 },
    /// Add a weapon the player does not own yet
    NewWeapon { kind: WeaponKind },
    MoveSpeed,
    MaxHp,
    Armor,
}

impl UpgradeOption {
    pub fn name(&self) -> String {
        match self {
            UpgradeOption::UpgradeWeapon { kind, next_level } => {
                format!("{} Level {}", kind.name(), next_level)
            }
            UpgradeOption::NewWeapon { kind } => kind.name().to_string(),
            UpgradeOption::MoveSpeed => "+10% Move Speed".to_string(),
            UpgradeOption::MaxHp => "+20 Max HP".to_string(),
            UpgradeOption::Armor => "+1 Armor".to_string(),
        }
    }

    pub fn description(&self, player: &Player) -> String {
        match self {
            UpgradeOption::UpgradeWeapon { kind, .. } => player
                .weapons
                .iter()
                .find(|w| w.kind == *kind)
                .map(|w| w.upgrade_description())
                .unwrap_or("MAX LEVEL")
                .to_string(),
            UpgradeOption::NewWeapon { kind } => kind.blurb().to_string(),
            UpgradeOption::MoveSpeed => "Move faster".to_string(),
            UpgradeOption::MaxHp => "Increase maximum health".to_string(),
            UpgradeOption::Armor => "Reduce damage taken".to_string(),
        }
    }

    /// Apply to the player. Returns false if the option no longer applies.
    pub fn apply(&self, player: &mut Player) -> bool {
        log::debug!("Applying upgrade: {}", self.name());
        match *self {
            UpgradeOption::UpgradeWeapon { kind, .. } => player
                .weapons
                .iter_mut()
                .find(|w| w.kind == kind)
                .is_some_and(|w| w.upgrade()),
            UpgradeOption::NewWeapon { kind } => {
                if player.has_weapon(kind) {
                    return false;
                }
                player.add_weapon(Weapon::new(kind));
                true
            }
            UpgradeOption::MoveSpeed => {
                player.stats.move_speed *= MOVE_SPEED_BOOST;
                true
            }
            UpgradeOption::MaxHp => {
                player.stats.max_hp += MAX_HP_BOOST;
                player.heal(MAX_HP_BOOST);
                true
            }
            UpgradeOption::Armor => {
                player.stats.armor += ARMOR_BOOST;
                true
            }
        }
    }
}

/// Every option currently eligible for this player
pub fn candidate_pool(player: &Player) -> Vec<UpgradeOption> {
    let mut pool = Vec::new();

    for weapon in &player.weapons {
        if !weapon.is_max_level() {
            pool.push(UpgradeOption::UpgradeWeapon {
                kind: weapon.kind,
                next_level: weapon.level + 1,
            });
        }
    }

    for kind in WeaponKind::ALL {
        if !player.has_weapon(kind) {
            pool.push(UpgradeOption::NewWeapon { kind });
        }
    }

    pool.extend([UpgradeOption::MoveSpeed, UpgradeOption::MaxHp, UpgradeOption::Armor]);
    pool
}

/// Shuffle the pool and offer the first three
pub fn generate_options<R: Rng + ?Sized>(player: &Player, rng: &mut R) -> Vec<UpgradeOption> {
    let mut pool = candidate_pool(player);
    pool.shuffle(rng);
    pool.truncate(UPGRADE_CHOICES);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_starting_pool() {
        let player = Player::new(Vec2::ZERO);
        let pool = candidate_pool(&player);
        assert_eq!(
            pool,
            vec![
                UpgradeOption::UpgradeWeapon { kind: WeaponKind::Smg, next_level: 2 },
                UpgradeOption::NewWeapon { kind: WeaponKind::Shotgun },
                UpgradeOption::MoveSpeed,
                UpgradeOption::MaxHp,
                UpgradeOption::Armor,
            ]
        );
    }

    #[test]
    fn test_max_level_weapons_excluded() {
        let mut player = Player::new(Vec2::ZERO);
        player.add_weapon(Weapon::new(WeaponKind::Shotgun));
        for weapon in &mut player.weapons {
            while weapon.upgrade() {}
        }
        let pool = candidate_pool(&player);
        assert_eq!(pool, vec![UpgradeOption::MoveSpeed, UpgradeOption::MaxHp, UpgradeOption::Armor]);
    }

    #[test]
    fn test_always_three_distinct_options() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut player = Player::new(Vec2::ZERO);
        for _ in 0..50 {
            let options = generate_options(&player, &mut rng);
            assert_eq!(options.len(), 3);
            for (i, a) in options.iter().enumerate() {
                for b in &options[i + 1..] {
                    assert_ne!(a, b);
                }
            }
            options[0].apply(&mut player);
        }
    }

    #[test]
    fn test_apply_stat_boosts() {
        let mut player = Player::new(Vec2::ZERO);
        player.stats.hp = 50.0;
        assert!(UpgradeOption::MaxHp.apply(&mut player));
        assert_eq!(player.stats.max_hp, 120.0);
        assert_eq!(player.stats.hp, 70.0);

        assert!(UpgradeOption::Armor.apply(&mut player));
        assert_eq!(player.stats.armor, 1.0);

        assert!(UpgradeOption::MoveSpeed.apply(&mut player));
        assert!((player.stats.move_speed - 132.0).abs() < 1e-3);
    }

    #[test]
    fn test_apply_weapons() {
        let mut player = Player::new(Vec2::ZERO);
        let upgrade = UpgradeOption::UpgradeWeapon { kind: WeaponKind::Smg, next_level: 2 };
        assert_eq!(upgrade.description(&player), "+2 damage, +1 fire rate");
        assert!(upgrade.apply(&mut player));
        assert_eq!(player.weapons[0].level, 2);

        let shotgun = UpgradeOption::NewWeapon { kind: WeaponKind::Shotgun };
        assert!(shotgun.apply(&mut player));
        assert!(player.has_weapon(WeaponKind::Shotgun));
        // Cannot own two
        assert!(!shotgun.apply(&mut player));
        assert_eq!(player.weapons.len(), 2);
    }

    #[test]
    fn test_names() {
        let opt = UpgradeOption::UpgradeWeapon { kind: WeaponKind::Shotgun, next_level: 3 };
        assert_eq!(opt.name(), "Shotgun Level 3");
        assert_eq!(UpgradeOption::NewWeapon { kind: WeaponKind::Smg }.name(), "SMG");
    }
}
