//! Letterfall - a falling-letter typing shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawn scheduling)
//! - `session`: Controller wiring key events, the frame clock and the view
//! - `view`: The narrow boundary the rendering layer implements
//! - `language`: Selectable alphabets and matching rules
//! - `difficulty`: Tier profiles and score-driven pacing

pub mod difficulty;
pub mod language;
pub mod session;
pub mod sim;
pub mod view;

pub use difficulty::{DifficultyProfile, DifficultyTier};
pub use language::Language;
pub use session::{Key, Session};
pub use view::{GameView, NullView};

/// Game configuration constants
pub mod consts {
    /// Logical field size in pixels; y grows downward, the floor is at
    /// `FIELD_HEIGHT`.
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player cannon box, resting on the floor line
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    /// Horizontal player speed per frame while a movement intent is held
    pub const PLAYER_SPEED: f32 = 8.0;

    /// Falling letter glyph box (square)
    pub const LETTER_SIZE: f32 = 36.0;

    /// Projectile box
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 18.0;
    /// Upward projectile speed per frame
    pub const PROJECTILE_SPEED: f32 = 12.0;

    /// Spawn cadence floor - the interval never tightens below this
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Interval reduction per score point
    pub const SPAWN_REDUCTION_MS_PER_POINT: f64 = 10.0;
}

/// Top of the player box (projectiles leave from here)
#[inline]
pub fn player_top() -> f32 {
    consts::FIELD_HEIGHT - consts::PLAYER_HEIGHT
}

/// Rightmost left-edge position the player can reach
#[inline]
pub fn player_max_x() -> f32 {
    consts::FIELD_WIDTH - consts::PLAYER_WIDTH
}
