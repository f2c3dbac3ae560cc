//! Projectiles fired by weapons
//!
//! A projectile flies in a straight line, damages each enemy it touches at
//! most once, and expires after covering its range or running out of pierce.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyDeath};
use super::entity::{Body, EntityId};
use crate::consts::PROJECTILE_RADIUS;
use crate::from_angle;

/// A single shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub body: Body,
    direction: Vec2,
    speed: f32,
    damage: f32,
    max_range: f32,
    /// Extra enemies this projectile may hit after the first
    pierce: u32,
    /// RGB color for the renderer
    pub color: u32,
    distance_traveled: f32,
    /// Enemies already damaged (by stable ID)
    hit_enemies: Vec<EntityId>,
}

impl Projectile {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: EntityId,
        origin: Vec2,
        angle: f32,
        speed: f32,
        damage: f32,
        max_range: f32,
        pierce: u32,
        color: u32,
    ) -> Self {
        let direction = from_angle(angle, 1.0);
        let mut body = Body::new(origin, PROJECTILE_RADIUS);
        body.vel = direction * speed;
        Self {
            id,
            body,
            direction,
            speed,
            damage,
            max_range,
            pierce,
            color,
            distance_traveled: 0.0,
            hit_enemies: Vec::with_capacity(pierce as usize + 1),
        }
    }

    #[inline]
    pub fn distance_traveled(&self) -> f32 {
        self.distance_traveled
    }

    #[inline]
    pub fn damage(&self) -> f32 {
        self.damage
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Enemies this projectile has damaged so far
    pub fn hits(&self) -> &[EntityId] {
        &self.hit_enemies
    }

    /// Advance, then resolve hits against every live enemy
    ///
    /// Enemies killed by this projectile are reported through `deaths` so the
    /// caller can credit the kill and drop loot.
    pub fn update(&mut self, dt: f32, enemies: &mut [Enemy], deaths: &mut Vec<EnemyDeath>) {
        if self.body.is_dead() {
            return;
        }

        let step = self.speed * dt;
        self.body.pos += self.direction * step;
        self.distance_traveled += step.abs();

        if self.distance_traveled > self.max_range {
            self.body.kill();
            return;
        }

        for enemy in enemies.iter_mut() {
            if enemy.body.is_dead() || self.hit_enemies.contains(&enemy.id) {
                continue;
            }
            if !self.body.collides_with(&enemy.body) {
                continue;
            }

            if let Some(death) = enemy.take_damage(self.damage) {
                deaths.push(death);
            }
            self.hit_enemies.push(enemy.id);

            // Pierce N: dies on the (N+1)-th distinct hit
            if self.hit_enemies.len() > self.pierce as usize {
                self.body.kill();
                return;
            }
        }
    }
}
