//! Shared entity body and identity
//!
//! Every actor in the arena (player, enemies, projectiles, pickups) embeds a
//! [`Body`]: position, velocity, collision radius and the death flag.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identifier, never reused within a session
pub type EntityId = u32;

/// Hands out monotonically increasing entity IDs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: EntityId,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    /// Allocate a new entity ID
    pub fn next_id(&mut self) -> EntityId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Position, velocity, radius and liveness of an entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    dead: bool,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            dead: false,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Mark for removal. Idempotent; there is no way back.
    #[inline]
    pub fn kill(&mut self) {
        self.dead = true;
    }

    /// Circle overlap test (strict, squared distances only)
    #[inline]
    pub fn collides_with(&self, other: &Body) -> bool {
        super::collision::circles_overlap(self.pos, self.radius, other.pos, other.radius)
    }

    /// Position relative to a camera origin
    #[inline]
    pub fn screen_position(&self, camera: Vec2) -> Vec2 {
        self.pos - camera
    }

    /// Integrate position by the current velocity
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut ids = IdAllocator::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_eq!(a, 1);
        assert!(b > a);
    }

    #[test]
    fn test_kill_is_idempotent() {
        let mut body = Body::new(Vec2::ZERO, 4.0);
        assert!(!body.is_dead());
        body.kill();
        body.kill();
        assert!(body.is_dead());
    }

    #[test]
    fn test_collision_is_strict() {
        let a = Body::new(Vec2::ZERO, 5.0);
        let touching = Body::new(Vec2::new(10.0, 0.0), 5.0);
        let overlapping = Body::new(Vec2::new(9.9, 0.0), 5.0);
        assert!(!a.collides_with(&touching));
        assert!(a.collides_with(&overlapping));
    }

    #[test]
    fn test_screen_position() {
        let body = Body::new(Vec2::new(700.0, 400.0), 16.0);
        assert_eq!(body.screen_position(Vec2::new(60.0, 40.0)), Vec2::new(640.0, 360.0));
    }
}
