//! Host loop adapter
//!
//! A [`Frontend`] supplies the drawing surface, input and presentation; a
//! [`Session`] owns the simulation and drives one tick per wall-clock frame.

use glam::Vec2;

use crate::camera::Camera;
use crate::error::SessionError;
use crate::sim::snapshot::{GameOverSummary, HudSummary, Snapshot};
use crate::sim::state::{GameEvent, GameState};
use crate::sim::tick::{TickInput, tick};
use crate::sim::upgrade::UpgradeOption;
use crate::tuning::Tuning;

/// Everything outside the simulation a session talks to
pub trait Frontend {
    /// Prepare the drawing surface and return its size in pixels
    fn acquire_surface(&mut self) -> Result<Vec2, String>;

    /// Input for the coming tick
    fn poll_input(&mut self) -> TickInput;

    /// Draw one frame (positions are camera-relative)
    fn present(&mut self, snapshot: &Snapshot);

    /// Refresh HUD text. Frontends without a HUD keep the default.
    fn update_hud(&mut self, _hud: &HudSummary) {}

    /// Pick one of the offered upgrades, or `None` to keep waiting
    fn choose_upgrade(&mut self, options: &[UpgradeOption]) -> Option<usize>;

    fn boss_spawned(&mut self) {}

    fn game_over(&mut self, summary: &GameOverSummary);
}

/// A running game bound to a frontend
pub struct Session<F: Frontend> {
    frontend: F,
    state: GameState,
    camera: Camera,
}

impl<F: Frontend> Session<F> {
    /// Validate tuning and acquire the surface. Failing either aborts.
    pub fn new(mut frontend: F, tuning: &Tuning, seed: u64) -> Result<Self, SessionError> {
        tuning.validate()?;
        let viewport = frontend
            .acquire_surface()
            .map_err(SessionError::SurfaceUnavailable)?;

        let state = GameState::with_tuning(seed, tuning);
        let camera = Camera::new(viewport, state.player_pos());
        log::info!("Session started ({}x{} surface)", viewport.x, viewport.y);

        Ok(Self {
            frontend,
            state,
            camera,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn into_frontend(self) -> F {
        self.frontend
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Run one frame of `wall_dt` seconds. Returns false once the run is over.
    pub fn frame(&mut self, wall_dt: f32) -> bool {
        if self.state.is_over() {
            return false;
        }

        let input = self.frontend.poll_input();
        tick(&mut self.state, &input, wall_dt);

        for event in self.state.drain_events() {
            match event {
                GameEvent::LevelUp { .. } => {}
                GameEvent::BossSpawned => self.frontend.boss_spawned(),
                GameEvent::GameOver(summary) => self.frontend.game_over(&summary),
            }
        }
        self.resolve_upgrades();

        self.camera.follow(self.state.player_pos());
        let snapshot = self.state.snapshot().relative_to(self.camera.position);
        self.frontend.present(&snapshot);
        self.frontend.update_hud(&self.state.hud());

        !self.state.is_over()
    }

    /// Ask the frontend about every open offer until it defers
    fn resolve_upgrades(&mut self) {
        while let Some(offer) = self.state.pending_offer() {
            let offer = offer.to_vec();
            let Some(index) = self.frontend.choose_upgrade(&offer) else {
                return;
            };
            match self.state.choose_upgrade(index) {
                Ok(choice) => log::info!("Chose upgrade: {}", choice.name()),
                Err(err) => {
                    log::warn!("Upgrade choice rejected: {err}");
                    return;
                }
            }
        }
    }
}
