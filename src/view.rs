//! The boundary between the core and whatever draws it
//!
//! The session pushes exact positions and lifecycle signals through this
//! trait; the view layer must not run movement or scoring logic of its own.
//! View failures stay on the view side: nothing here feeds errors back into
//! session state.

use crate::difficulty::DifficultyTier;
use crate::language::Language;
use crate::sim::{FallingLetter, Projectile};

/// Receiver for everything the core wants shown
pub trait GameView {
    /// A session became Active with the given parameterization
    fn on_session_start(&mut self, tier: DifficultyTier, language: Language);

    /// The session ended; `final_score` is frozen
    fn on_session_end(&mut self, final_score: u32);

    /// Score changed, exactly once per resolved hit
    fn on_score_changed(&mut self, score: u32);

    /// Post-tick entity positions, once per frame while Active
    fn render_entities(
        &mut self,
        letters: &[FallingLetter],
        projectiles: &[Projectile],
        player_x: f32,
    );

    /// Per-key heat, once per alphabet key per frame. `None` means neutral.
    fn render_key_intensity(&mut self, ch: char, intensity: Option<f32>);
}

/// A view that discards everything (headless runs, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl GameView for NullView {
    fn on_session_start(&mut self, _tier: DifficultyTier, _language: Language) {}
    fn on_session_end(&mut self, _final_score: u32) {}
    fn on_score_changed(&mut self, _score: u32) {}
    fn render_entities(
        &mut self,
        _letters: &[FallingLetter],
        _projectiles: &[Projectile],
        _player_x: f32,
    ) {
    }
    fn render_key_intensity(&mut self, _ch: char, _intensity: Option<f32>) {}
}
