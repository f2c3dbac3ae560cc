//! Smoothed follow camera
//!
//! Eases toward keeping its target at the middle of the viewport. The
//! camera position is the world coordinate of the viewport's top-left.

use glam::Vec2;

/// Fraction of the remaining distance covered per update
pub const CAMERA_SMOOTHING: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    target: Vec2,
    pub viewport: Vec2,
    pub smoothing: f32,
}

impl Camera {
    /// Camera already centered on `focus`
    pub fn new(viewport: Vec2, focus: Vec2) -> Self {
        let position = focus - viewport / 2.0;
        Self {
            position,
            target: position,
            viewport,
            smoothing: CAMERA_SMOOTHING,
        }
    }

    /// Aim at `focus` (usually the player)
    pub fn set_target(&mut self, focus: Vec2) {
        self.target = focus - self.viewport / 2.0;
    }

    pub fn update(&mut self) {
        self.position += (self.target - self.position) * self.smoothing;
    }

    /// Retarget and ease in one step
    pub fn follow(&mut self, focus: Vec2) {
        self.set_target(focus);
        self.update();
    }

    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.position
    }
}
