//! Session controller
//!
//! Owns the game state and wires the three outside edges together: key
//! events from the platform, the per-frame clock, and the view. All state
//! mutation flows through here.
//!
//! Frame ordering matters: the spawn timer is serviced before the tick, so a
//! letter whose deadline falls inside frame N is already on the field when
//! step N runs and is rendered that same frame.

use crate::difficulty::DifficultyTier;
use crate::language::Language;
use crate::sim::{self, GameEvent, GameState, SessionPhase, heatmap, spawn};
use crate::view::GameView;

/// Abstract key codes delivered by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Char(char),
}

/// One controller per game instance; owns all mutable state
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
        }
    }

    /// Resume from a snapshot (Continue support)
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    /// Read-only state access for embedders
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn language(&self) -> Language {
        self.state.language
    }

    /// Idle -> LanguageChosen. No-op in any other phase.
    pub fn choose_language(&mut self, language: Language) -> bool {
        if self.state.phase != SessionPhase::Idle {
            return false;
        }
        self.state.language = language;
        self.state.phase = SessionPhase::LanguageChosen;
        log::info!("language selected: {}", language.as_str());
        true
    }

    /// LanguageChosen -> Active: install the tier, reset the field, arm the
    /// first spawn and notify the view. No-op in any other phase.
    pub fn choose_difficulty<V: GameView>(
        &mut self,
        tier: DifficultyTier,
        now_ms: f64,
        view: &mut V,
    ) -> bool {
        if self.state.phase != SessionPhase::LanguageChosen {
            return false;
        }
        self.state.begin(tier, now_ms);
        view.on_session_start(tier, self.state.language);
        log::info!(
            "session start: {} / {}",
            tier.as_str(),
            self.state.language.as_str()
        );
        true
    }

    /// GameOver -> Idle, back to the language menu. No-op in any other phase.
    pub fn restart(&mut self) -> bool {
        if self.state.phase != SessionPhase::GameOver {
            return false;
        }
        self.state.reset_to_idle();
        log::info!("restart: back to language selection");
        true
    }

    /// Key-down while Active. Movement intents are held flags, so repeats
    /// from the platform are naturally idempotent. A character key in the
    /// active alphabet fires immediately on the event itself rather than
    /// waiting for the next frame; anything else is ignored.
    pub fn key_down(&mut self, key: Key) {
        if self.state.phase != SessionPhase::Active {
            return;
        }
        match key {
            Key::Left => self.state.player.moving_left = true,
            Key::Right => self.state.player.moving_right = true,
            Key::Char(c) => {
                if self.state.language.accepts(c) {
                    let ch = self.state.language.normalize(c);
                    self.state.spawn_projectile(ch);
                }
            }
        }
    }

    /// Key-up clears movement intents; character keys have no release action
    pub fn key_up(&mut self, key: Key) {
        if self.state.phase != SessionPhase::Active {
            return;
        }
        match key {
            Key::Left => self.state.player.moving_left = false,
            Key::Right => self.state.player.moving_right = false,
            Key::Char(_) => {}
        }
    }

    /// One animation frame: service the spawn timer, run the step, then push
    /// positions and per-key heat to the view. No-op outside Active.
    pub fn frame<V: GameView>(&mut self, now_ms: f64, view: &mut V) {
        if self.state.phase != SessionPhase::Active {
            return;
        }

        spawn::service(&mut self.state, now_ms);
        sim::tick(&mut self.state, now_ms);

        let events: Vec<GameEvent> = self.state.events.drain(..).collect();
        let mut final_score = None;
        for event in &events {
            match event {
                GameEvent::Hit { score, .. } => view.on_score_changed(*score),
                GameEvent::GameOver { final_score: s } => final_score = Some(*s),
                GameEvent::LetterSpawned { .. } | GameEvent::BoardCleared => {}
            }
        }

        view.render_entities(
            &self.state.letters,
            &self.state.projectiles,
            self.state.player.x,
        );

        match final_score {
            None => {
                let heat = heatmap::key_heat(&self.state.letters, self.state.language);
                for &ch in self.state.language.alphabet() {
                    view.render_key_intensity(ch, heat.get(&ch).copied());
                }
            }
            Some(score) => {
                // The run is over: every key returns to neutral before the
                // final notification goes out
                for &ch in self.state.language.alphabet() {
                    view.render_key_intensity(ch, None);
                }
                view.on_session_end(score);
            }
        }
    }
}
