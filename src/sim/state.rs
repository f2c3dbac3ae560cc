//! Game state owned by a single session
//!
//! Every collection the tick mutates lives here, together with the seeded RNG
//! and the latches (level-up queue, game over) the host reads back.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::entity::IdAllocator;
use super::pickup::Pickup;
use super::player::Player;
use super::projectile::Projectile;
use super::snapshot::{
    EnemyView, GameOverSummary, HudSummary, PickupView, PlayerView, ProjectileView, Snapshot,
};
use super::upgrade::{UpgradeOption, generate_options};
use super::wave::WaveManager;
use crate::error::SessionError;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Manually paused by the player
    Paused,
    /// Waiting for an upgrade choice
    LevelUp,
    /// Run ended (victory or defeat)
    GameOver,
}

/// Notifications for the host, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// A level-up offer is open
    LevelUp { level: u32, options: Vec<UpgradeOption> },
    BossSpawned,
    GameOver(GameOverSummary),
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub player: Player,
    /// Live enemies, in spawn order
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    pub waves: WaveManager,
    pub(crate) ids: IdAllocator,
    /// Ceiling applied to every tick's dt
    pub max_dt: f32,
    pub victory_time: f32,
    /// Level-ups earned but not yet resolved
    pub(crate) pending_level_ups: u32,
    pub(crate) offer: Option<Vec<UpgradeOption>>,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) outcome: Option<GameOverSummary>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, &Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: &Tuning) -> Self {
        log::info!("New run (seed {seed})");
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            player: Player::new(tuning.player_spawn()),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            waves: WaveManager::new(
                tuning.waves.clone(),
                tuning.max_enemies,
                tuning.boss_spawn_time,
                tuning.spawn_distance,
            ),
            ids: IdAllocator::default(),
            max_dt: tuning.max_dt,
            victory_time: tuning.victory_time,
            pending_level_ups: 0,
            offer: None,
            events: Vec::new(),
            outcome: None,
            time_ticks: 0,
        }
    }

    /// Seconds of simulated play
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.waves.game_time()
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&GameOverSummary> {
        self.outcome.as_ref()
    }

    /// Options of the open level-up offer, if any
    pub fn pending_offer(&self) -> Option<&[UpgradeOption]> {
        self.offer.as_deref()
    }

    pub fn pending_level_ups(&self) -> u32 {
        self.pending_level_ups
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Resolve the open offer with the option at `index`
    ///
    /// Further queued level-ups open a fresh offer immediately; otherwise
    /// play resumes. A bad index leaves the state untouched.
    pub fn choose_upgrade(&mut self, index: usize) -> Result<UpgradeOption, SessionError> {
        let offer = self.offer.as_ref().ok_or(SessionError::NoPendingChoice)?;
        let choice = *offer.get(index).ok_or(SessionError::InvalidChoice {
            index,
            available: offer.len(),
        })?;

        if !choice.apply(&mut self.player) {
            log::warn!("Upgrade {} no longer applies", choice.name());
        }
        self.offer = None;
        self.pending_level_ups = self.pending_level_ups.saturating_sub(1);

        if self.pending_level_ups > 0 {
            self.open_offer();
        } else if self.phase == GamePhase::LevelUp {
            self.phase = GamePhase::Playing;
        }
        Ok(choice)
    }

    /// Generate an offer for the next queued level-up and pause for it
    pub(crate) fn open_offer(&mut self) {
        let options = generate_options(&self.player, &mut self.rng);
        // Level the offer was earned at, counting back from the queue
        let level = self.player.level + 1 - self.pending_level_ups;
        self.events.push(GameEvent::LevelUp {
            level,
            options: options.clone(),
        });
        self.offer = Some(options);
        self.phase = GamePhase::LevelUp;
    }

    /// Latch the end of the run
    pub(crate) fn finish(&mut self, victory: bool) {
        if self.outcome.is_some() {
            return;
        }
        let summary = GameOverSummary {
            victory,
            elapsed: self.elapsed(),
            kills: self.player.kills,
            level: self.player.level,
        };
        log::info!(
            "Game over ({}): survived {}, {} kills, level {}",
            if victory { "victory" } else { "defeat" },
            summary.formatted_time(),
            summary.kills,
            summary.level
        );
        self.offer = None;
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver(summary.clone()));
        self.outcome = Some(summary);
    }

    pub fn hud(&self) -> HudSummary {
        let player = &self.player;
        HudSummary {
            hp: player.stats.hp,
            max_hp: player.stats.max_hp,
            hp_percent: player.hp_percent(),
            xp: player.xp,
            xp_to_next_level: player.xp_to_next_level,
            xp_percent: player.xp_percent(),
            level: player.level,
            kills: player.kills,
            coins: player.coins,
            elapsed: self.waves.formatted_time(),
        }
    }

    /// World-space views of every live entity
    pub fn snapshot(&self) -> Snapshot {
        let player = &self.player;
        Snapshot {
            player: PlayerView {
                pos: player.body.pos,
                radius: player.body.radius,
                dashing: player.is_dashing(),
                flashing: player.is_flashing(),
                hp_fraction: player.hp_percent(),
            },
            enemies: self
                .enemies
                .iter()
                .filter(|e| !e.body.is_dead())
                .map(|e| EnemyView {
                    id: e.id,
                    kind: e.kind,
                    pos: e.body.pos,
                    radius: e.body.radius,
                    color: e.color(),
                    flashing: e.is_flashing(),
                    charging: e.is_charging(),
                    hp_fraction: e.hp_fraction(),
                })
                .collect(),
            projectiles: self
                .projectiles
                .iter()
                .filter(|p| !p.body.is_dead())
                .map(|p| ProjectileView {
                    id: p.id,
                    pos: p.body.pos,
                    radius: p.body.radius,
                    color: p.color,
                })
                .collect(),
            pickups: self
                .pickups
                .iter()
                .filter(|p| !p.body.is_dead())
                .map(|p| PickupView {
                    id: p.id,
                    kind: p.kind,
                    pos: p.body.pos,
                    radius: p.body.radius,
                    bob: p.bob_offset(),
                })
                .collect(),
        }
    }

    /// Player position, handy for cameras
    #[inline]
    pub fn player_pos(&self) -> Vec2 {
        self.player.body.pos
    }

    /// Queue `levels` level-ups earned this tick
    pub(crate) fn queue_level_ups(&mut self, levels: u32) {
        self.pending_level_ups += levels;
    }
}
