//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (wall order, player slot order, entity ID)
//! - No rendering or platform dependencies

pub mod arena;
pub mod bullet;
pub mod geom;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use arena::{Arena, PowerUp, PowerUpKind};
pub use bullet::{Bullet, CONTACT_EPSILON, TRAIL_LENGTH};
pub use geom::{Aabb, WallHit, circles_overlap, nearest_wall_along, reflect, sweep_circle_aabb};
pub use player::{ActiveEffects, Player, PlayerId};
pub use snapshot::{BulletView, EffectView, PlayerView, PowerUpView, Snapshot};
pub use state::{ControlEvent, FrozenPhase, GamePhase, GameState};
pub use tick::{PlayerInput, TickInput, tick};
