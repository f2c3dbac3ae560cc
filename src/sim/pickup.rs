//! Collectible drops (experience gems, health, coins)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityId};
use super::player::Player;
use crate::consts::*;

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickupKind {
    Xp,
    Health,
    Coin,
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: EntityId,
    pub kind: PickupKind,
    pub value: u32,
    pub body: Body,
    /// Seconds until despawn
    lifetime: f32,
    /// Cosmetic bob phase (radians)
    bob_phase: f32,
}

impl Pickup {
    pub fn new(id: EntityId, kind: PickupKind, value: u32, pos: Vec2, bob_phase: f32) -> Self {
        Self {
            id,
            kind,
            value,
            body: Body::new(pos, PICKUP_RADIUS),
            lifetime: PICKUP_LIFETIME,
            bob_phase,
        }
    }

    #[inline]
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Vertical render offset from the bob animation
    pub fn bob_offset(&self) -> f32 {
        self.bob_phase.sin() * PICKUP_BOB_AMPLITUDE
    }

    /// Decay lifetime and advance the bob animation
    pub fn update(&mut self, dt: f32) {
        if self.body.is_dead() {
            return;
        }
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.body.kill();
        }
        self.bob_phase = (self.bob_phase + PICKUP_BOB_SPEED * dt) % std::f32::consts::TAU;
    }

    /// Apply this pickup's effect and consume it. Returns levels gained.
    pub fn collect(&mut self, player: &mut Player) -> u32 {
        if self.body.is_dead() {
            return 0;
        }
        self.body.kill();

        match self.kind {
            PickupKind::Xp => player.add_xp(self.value),
            PickupKind::Health => {
                player.heal(self.value as f32);
                0
            }
            PickupKind::Coin => {
                player.coins += self.value;
                0
            }
        }
    }
}
