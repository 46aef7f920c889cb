//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame, fixed per-frame speeds
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod heatmap;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, find_hit};
pub use heatmap::key_heat;
pub use spawn::SpawnTimer;
pub use state::{FallingLetter, GameEvent, GameState, PlayerState, Projectile, SessionPhase};
pub use tick::tick;
