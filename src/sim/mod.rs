//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given a seed, the same inputs and the same
//! dt sequence, a run plays out identically:
//! - Seeded RNG only
//! - Stable iteration order (spawn order, entities keyed by ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod entity;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod upgrade;
pub mod wave;
pub mod weapon;

pub use enemy::{Enemy, EnemyDeath, EnemyKind, EnemyStats};
pub use entity::{Body, EntityId, IdAllocator};
pub use pickup::{Pickup, PickupKind};
pub use player::{Player, PlayerStats};
pub use projectile::Projectile;
pub use snapshot::{GameOverSummary, HudSummary, Snapshot};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use upgrade::{UpgradeOption, generate_options};
pub use wave::{SpawnWeight, WaveConfig, WaveManager, default_waves};
pub use weapon::{Weapon, WeaponKind, WeaponStats};
