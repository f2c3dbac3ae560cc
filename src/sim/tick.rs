//! Per-tick simulation step
//!
//! Advances every subsystem once, in a fixed order: player (movement, dash,
//! weapons, pickup collection), enemies, projectiles, pickups, the spawn
//! director, then the end-of-run check. Dead entities are compacted out of
//! each collection right after the pass that can kill them.

use glam::Vec2;
use rand::Rng;

use super::enemy::{EnemyDeath, EnemyKind};
use super::pickup::{Pickup, PickupKind};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement direction; clamped to unit length
    pub movement: Vec2,
    /// Dash requested this tick (edge, not held)
    pub dash: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by `dt` seconds (clamped to `state.max_dt`)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::debug!("Resumed");
            }
            GamePhase::LevelUp | GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }
    if dt.is_nan() || dt <= 0.0 {
        return;
    }
    let dt = dt.min(state.max_dt);
    state.time_ticks += 1;

    // Player: movement, dash, weapons, pickup collection
    let movement = if input.movement.is_finite() {
        input.movement.clamp_length_max(1.0)
    } else {
        Vec2::ZERO
    };
    state.player.update(dt, movement, input.dash);

    let origin = state.player.body.pos;
    for weapon in &mut state.player.weapons {
        weapon.update(
            dt,
            origin,
            &state.enemies,
            &mut state.ids,
            &mut state.rng,
            &mut state.projectiles,
        );
    }

    let levels = state.player.collect_pickups(&mut state.pickups);
    state.queue_level_ups(levels);

    // Enemies: homing and contact damage
    for enemy in &mut state.enemies {
        enemy.update(dt, &mut state.player);
    }
    state.enemies.retain(|e| !e.body.is_dead());

    // Projectiles: movement and hits
    let mut deaths = Vec::new();
    for projectile in &mut state.projectiles {
        projectile.update(dt, &mut state.enemies, &mut deaths);
    }
    state.projectiles.retain(|p| !p.body.is_dead());
    state.enemies.retain(|e| !e.body.is_dead());
    drop_rewards(state, &deaths);

    // Pickups: lifetime and bob
    for pickup in &mut state.pickups {
        pickup.update(dt);
    }
    state.pickups.retain(|p| !p.body.is_dead());

    // Spawn director
    let player_pos = state.player.body.pos;
    let report = state
        .waves
        .update(dt, player_pos, &mut state.enemies, &mut state.ids, &mut state.rng);
    if report.boss_spawned {
        state.events.push(GameEvent::BossSpawned);
    }
    // Culled to make room for the boss
    state.enemies.retain(|e| !e.body.is_dead());

    // End conditions: defeat wins a tie with victory
    if state.player.body.is_dead() {
        state.finish(false);
    } else if state.elapsed() >= state.victory_time {
        state.finish(true);
    } else if state.pending_level_ups > 0 {
        state.open_offer();
    }
}

/// Kill credit and one xp pickup per dead enemy, at its death position
fn drop_rewards(state: &mut GameState, deaths: &[EnemyDeath]) {
    for death in deaths {
        state.player.kills += 1;
        let bob_phase = state.rng.random::<f32>() * std::f32::consts::TAU;
        let id = state.ids.next_id();
        state
            .pickups
            .push(Pickup::new(id, PickupKind::Xp, death.xp_value, death.pos, bob_phase));
        if death.kind == EnemyKind::Boss {
            log::info!("Boss {} defeated", death.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Enemy;
    use crate::sim::projectile::Projectile;
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 60.0;

    fn quiet_tuning() -> Tuning {
        // One wave that never spawns, so tests control every enemy
        let json = r#"{
            "waves": [ { "start_time": 0, "end_time": 1000, "spawn_rate": 0,
                         "enemy_types": [ { "kind": "walker", "weight": 1 } ] } ],
            "boss_spawn_time": 10000
        }"#;
        Tuning::from_json(json).unwrap()
    }

    #[test]
    fn test_walker_drops_one_xp_pickup() {
        let mut state = GameState::with_tuning(1, &quiet_tuning());
        state.player.weapons.clear();
        let start = state.player_pos() + Vec2::new(200.0, 0.0);
        state.enemies.push(Enemy::new(100, EnemyKind::Walker, start));
        state.projectiles.push(Projectile::new(
            101,
            start - Vec2::new(2.0, 0.0),
            0.0,
            60.0,
            35.0,
            500.0,
            0,
            0xffffff,
        ));

        tick(&mut state, &TickInput::default(), DT);

        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.kills, 1);
        assert_eq!(state.pickups.len(), 1);

        let pickup = &state.pickups[0];
        assert_eq!(pickup.kind, PickupKind::Xp);
        assert_eq!(pickup.value, 1);
        // Death happened after the walker's own move toward the player
        let expected = start - Vec2::new(40.0 * DT, 0.0);
        assert!(pickup.body.pos.distance(expected) < 1e-3);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut state = GameState::new(seed);
            for i in 0..1200 {
                let input = TickInput {
                    movement: crate::from_angle(i as f32 * 0.01, 1.0),
                    dash: i % 97 == 0,
                    pause: false,
                };
                tick(&mut state, &input, DT);
                if state.phase == GamePhase::LevelUp {
                    state.choose_upgrade(0).unwrap();
                }
            }
            serde_json::to_string(&state.snapshot()).unwrap()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_pause_gate() {
        let mut state = GameState::new(5);
        tick(&mut state, &TickInput::default(), 0.05);
        let elapsed = state.elapsed();

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, 0.05);
        assert_eq!(state.phase, GamePhase::Paused);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 0.05);
        }
        assert_eq!(state.elapsed(), elapsed);

        // Unpausing advances in the same tick
        tick(&mut state, &pause, 0.05);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.elapsed() > elapsed);
    }

    #[test]
    fn test_level_up_pauses_until_chosen() {
        let mut state = GameState::with_tuning(3, &quiet_tuning());
        let id = state.ids.next_id();
        let pos = state.player_pos();
        state.pickups.push(Pickup::new(id, PickupKind::Xp, 5, pos, 0.0));

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::LevelUp);
        assert_eq!(state.player.level, 2);
        assert_eq!(state.pending_offer().map(|o| o.len()), Some(3));
        let events = state.drain_events();
        assert!(matches!(events.as_slice(), [GameEvent::LevelUp { level: 2, .. }]));

        let elapsed = state.elapsed();
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.elapsed(), elapsed);

        // Pause toggle is ignored while choosing
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, DT);
        assert_eq!(state.phase, GamePhase::LevelUp);

        state.choose_upgrade(1).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.elapsed() > elapsed);
    }

    #[test]
    fn test_victory() {
        let mut tuning = quiet_tuning();
        tuning.victory_time = 1.0;
        let mut state = GameState::with_tuning(8, &tuning);

        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), 0.1);
        }
        let outcome = state.outcome().unwrap();
        assert!(outcome.victory);
        assert!(outcome.elapsed >= 1.0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Latched: no further advance
        let elapsed = state.elapsed();
        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.elapsed(), elapsed);
        let overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver(_)))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_defeat_on_contact() {
        let mut state = GameState::with_tuning(8, &quiet_tuning());
        state.player.weapons.clear();
        state.player.stats.hp = 5.0;
        let pos = state.player_pos();
        state.enemies.push(Enemy::new(50, EnemyKind::Walker, pos));

        tick(&mut state, &TickInput::default(), DT);
        assert!(state.player.body.is_dead());
        assert_eq!(state.player.stats.hp, 0.0);
        let outcome = state.outcome().unwrap();
        assert!(!outcome.victory);
        assert_eq!(outcome.level, 1);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut state = GameState::with_tuning(2, &quiet_tuning());
        tick(&mut state, &TickInput::default(), 5.0);
        assert!((state.elapsed() - 0.1).abs() < 1e-6);

        tick(&mut state, &TickInput::default(), 0.0);
        tick(&mut state, &TickInput::default(), f32::NAN);
        assert!((state.elapsed() - 0.1).abs() < 1e-6);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_boss_event() {
        let mut tuning = quiet_tuning();
        tuning.boss_spawn_time = 0.5;
        let mut state = GameState::with_tuning(4, &tuning);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 0.1);
        }
        let bosses = state.enemies.iter().filter(|e| e.kind == EnemyKind::Boss).count();
        assert_eq!(bosses, 1);
        let events = state.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::BossSpawned).count(), 1);
    }

    #[test]
    fn test_enemy_cap_holds() {
        let mut tuning = Tuning::default();
        tuning.max_enemies = 5;
        tuning.waves[0].spawn_rate = 50.0;
        let mut state = GameState::with_tuning(11, &tuning);
        state.player.weapons.clear();
        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), 0.1);
            assert!(state.enemies.len() <= 5);
        }
    }
}
