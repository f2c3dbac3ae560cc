//! Read-only views of the simulation for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::enemy::EnemyKind;
use super::entity::EntityId;
use super::pickup::PickupKind;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub dashing: bool,
    pub flashing: bool,
    pub hp_fraction: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
    pub flashing: bool,
    pub charging: bool,
    pub hp_fraction: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PickupView {
    pub id: EntityId,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Vertical bob offset to draw at
    pub bob: f32,
}

/// Everything a renderer needs for one frame (world coordinates)
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
}

impl Snapshot {
    /// Shift every position into camera space
    pub fn relative_to(mut self, camera: Vec2) -> Self {
        self.player.pos -= camera;
        for e in &mut self.enemies {
            e.pos -= camera;
        }
        for p in &mut self.projectiles {
            p.pos -= camera;
        }
        for p in &mut self.pickups {
            p.pos -= camera;
        }
        self
    }
}

/// HUD summary fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSummary {
    pub hp: f32,
    pub max_hp: f32,
    pub hp_percent: f32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub xp_percent: f32,
    pub level: u32,
    pub kills: u32,
    pub coins: u32,
    /// `M:SS`
    pub elapsed: String,
}

/// Final result of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverSummary {
    pub victory: bool,
    /// Seconds survived
    pub elapsed: f32,
    pub kills: u32,
    pub level: u32,
}

impl GameOverSummary {
    pub fn formatted_time(&self) -> String {
        crate::format_elapsed(self.elapsed)
    }
}
