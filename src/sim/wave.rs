//! Spawning director
//!
//! Maps elapsed session time to a wave (spawn rate + weighted enemy mix),
//! spawns enemies in a ring around the player, keeps the population under a
//! cap, and drops the boss in exactly once.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyKind};
use super::entity::IdAllocator;
use crate::consts::*;
use crate::from_angle;

/// One entry of a wave's enemy mix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnWeight {
    pub kind: EnemyKind,
    pub weight: f32,
}

/// A time window with its own spawn rate and enemy mix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Inclusive start (seconds)
    pub start_time: f32,
    /// Exclusive end (seconds)
    pub end_time: f32,
    /// Enemies per second
    pub spawn_rate: f32,
    pub enemy_types: Vec<SpawnWeight>,
}

impl WaveConfig {
    pub fn new(start_time: f32, end_time: f32, spawn_rate: f32, mix: &[(EnemyKind, f32)]) -> Self {
        Self {
            start_time,
            end_time,
            spawn_rate,
            enemy_types: mix
                .iter()
                .map(|&(kind, weight)| SpawnWeight { kind, weight })
                .collect(),
        }
    }

    pub fn contains(&self, time: f32) -> bool {
        time >= self.start_time && time < self.end_time
    }

    /// Seconds between spawns, `None` when this wave spawns nothing
    pub fn spawn_interval(&self) -> Option<f32> {
        (self.spawn_rate > 0.0).then(|| 1.0 / self.spawn_rate)
    }

    /// Weighted draw over the enemy mix (cumulative weights)
    pub fn pick_kind<R: Rng + ?Sized>(&self, rng: &mut R) -> EnemyKind {
        let total: f32 = self.enemy_types.iter().map(|e| e.weight.max(0.0)).sum();
        let fallback = self
            .enemy_types
            .last()
            .map(|e| e.kind)
            .unwrap_or(EnemyKind::Walker);
        if total <= 0.0 {
            return fallback;
        }

        let mut roll = rng.random::<f32>() * total;
        for entry in &self.enemy_types {
            roll -= entry.weight.max(0.0);
            if roll <= 0.0 {
                return entry.kind;
            }
        }
        fallback
    }
}

/// The default five-wave schedule (0:00 - 12:00)
pub fn default_waves() -> Vec<WaveConfig> {
    use EnemyKind::{Runner, Walker};
    vec![
        WaveConfig::new(0.0, 120.0, 8.0, &[(Walker, 1.0)]),
        WaveConfig::new(120.0, 180.0, 12.0, &[(Walker, 0.7), (Runner, 0.3)]),
        WaveConfig::new(180.0, 300.0, 10.0, &[(Walker, 0.6), (Runner, 0.4)]),
        WaveConfig::new(300.0, 420.0, 15.0, &[(Walker, 0.5), (Runner, 0.5)]),
        WaveConfig::new(420.0, 720.0, 20.0, &[(Walker, 0.4), (Runner, 0.6)]),
    ]
}

/// What the director did this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnReport {
    pub spawned: usize,
    pub boss_spawned: bool,
    /// Wave index newly entered this tick
    pub entered_wave: Option<usize>,
}

/// Time-driven enemy spawner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveManager {
    game_time: f32,
    spawn_timer: f32,
    boss_spawned: bool,
    pub max_enemies: usize,
    pub boss_spawn_time: f32,
    pub spawn_distance: f32,
    waves: Vec<WaveConfig>,
    current_wave: Option<usize>,
}

impl Default for WaveManager {
    fn default() -> Self {
        Self::new(default_waves(), MAX_ENEMIES, BOSS_SPAWN_TIME, SPAWN_DISTANCE)
    }
}

impl WaveManager {
    pub fn new(waves: Vec<WaveConfig>, max_enemies: usize, boss_spawn_time: f32, spawn_distance: f32) -> Self {
        Self {
            game_time: 0.0,
            spawn_timer: 0.0,
            boss_spawned: false,
            max_enemies,
            boss_spawn_time,
            spawn_distance,
            waves,
            current_wave: None,
        }
    }

    #[inline]
    pub fn game_time(&self) -> f32 {
        self.game_time
    }

    #[inline]
    pub fn boss_spawned(&self) -> bool {
        self.boss_spawned
    }

    /// Elapsed time as `M:SS`
    pub fn formatted_time(&self) -> String {
        crate::format_elapsed(self.game_time)
    }

    /// Index of the wave active at `time`, falling back to the last wave
    pub fn wave_index_at(&self, time: f32) -> Option<usize> {
        self.waves
            .iter()
            .position(|w| w.contains(time))
            .or_else(|| self.waves.len().checked_sub(1))
    }

    /// Wave active at `time`; past every window the last wave keeps running
    pub fn wave_at(&self, time: f32) -> Option<&WaveConfig> {
        self.wave_index_at(time).map(|i| &self.waves[i])
    }

    pub fn current_wave(&self) -> Option<&WaveConfig> {
        self.wave_at(self.game_time)
    }

    /// Advance time and spawn into `enemies`
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        player_pos: Vec2,
        enemies: &mut Vec<Enemy>,
        ids: &mut IdAllocator,
        rng: &mut R,
    ) -> SpawnReport {
        let mut report = SpawnReport::default();
        self.game_time += dt;

        let wave_index = self.wave_index_at(self.game_time);
        if wave_index != self.current_wave {
            self.current_wave = wave_index;
            report.entered_wave = wave_index;
            if let Some(i) = wave_index {
                log::info!(
                    "Wave {} begins at {} ({} spawns/s)",
                    i + 1,
                    self.formatted_time(),
                    self.waves[i].spawn_rate
                );
            }
        }

        if !self.boss_spawned
            && self.game_time >= self.boss_spawn_time
            && self.spawn_boss(player_pos, enemies, ids, rng)
        {
            self.boss_spawned = true;
            report.boss_spawned = true;
        }

        let Some(wave) = wave_index.map(|i| &self.waves[i]) else {
            return report;
        };
        let Some(interval) = wave.spawn_interval() else {
            return report;
        };

        if live_count(enemies) >= self.max_enemies {
            return report;
        }

        self.spawn_timer += dt;
        while self.spawn_timer >= interval && live_count(enemies) < self.max_enemies {
            self.spawn_timer -= interval;
            let kind = wave.pick_kind(rng);
            let pos = spawn_position(player_pos, self.spawn_distance, rng);
            enemies.push(Enemy::new(ids.next_id(), kind, pos));
            report.spawned += 1;
        }

        report
    }

    fn spawn_boss<R: Rng + ?Sized>(
        &self,
        player_pos: Vec2,
        enemies: &mut Vec<Enemy>,
        ids: &mut IdAllocator,
        rng: &mut R,
    ) -> bool {
        // Boss takes a slot like anyone else; at the cap the farthest
        // regular enemy is culled to make room
        if live_count(enemies) >= self.max_enemies {
            let farthest = enemies
                .iter_mut()
                .filter(|e| !e.body.is_dead() && e.kind != EnemyKind::Boss)
                .max_by(|a, b| {
                    let da = a.body.pos.distance_squared(player_pos);
                    let db = b.body.pos.distance_squared(player_pos);
                    da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
                });
            match farthest {
                Some(enemy) => enemy.despawn(),
                // No slot can be freed; retried next tick
                None => return false,
            }
        }

        let pos = spawn_position(player_pos, self.spawn_distance, rng);
        let id = ids.next_id();
        enemies.push(Enemy::new(id, EnemyKind::Boss, pos));
        log::info!("Boss {} spawned at {}", id, self.formatted_time());
        true
    }
}

fn live_count(enemies: &[Enemy]) -> usize {
    enemies.iter().filter(|e| !e.body.is_dead()).count()
}

/// Uniform angle on a ring of `distance` around the player
fn spawn_position<R: Rng + ?Sized>(player_pos: Vec2, distance: f32, rng: &mut R) -> Vec2 {
    let angle = rng.random::<f32>() * std::f32::consts::TAU;
    player_pos + from_angle(angle, distance)
}
