//! Simulation module
//!
//! All gameplay logic lives here. Rendering and input wiring are outside:
//! - One `tick` per display refresh (frame-coupled, no fixed timestep)
//! - Seeded RNG only
//! - Stable insertion order for bullets and enemies

pub mod combat;
pub mod hitbox;
pub mod movement;
pub mod spawn;
pub mod state;
pub mod store;
pub mod tick;
pub mod upgrade;

pub use hitbox::{Aabb, Body, Collider, Hitbox, axis_aligned_bounds, contains_point, intersects};
pub use state::{Bounds, Bullet, Enemy, GameEvent, GamePhase, GameState, Player, Snapshot};
pub use store::EntityStore;
pub use tick::{DirectionKeys, TickInput, tick};
pub use upgrade::{Upgrade, UpgradeCatalog, UpgradeId, option_regions};
