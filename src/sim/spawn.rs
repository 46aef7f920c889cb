//! Spawn scheduling
//!
//! One letter enters the field per timer fire. The interval between fires is
//! recomputed from the live score at every re-arm, so the cadence tightens as
//! the player scores. The timer is a single deadline on the session clock:
//! cancelling clears the deadline outright, which makes a stale fire from an
//! earlier arming impossible.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{FallingLetter, GameEvent, GameState};
use crate::consts::*;

/// One-shot spawn timer (deadline in session-clock milliseconds)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnTimer {
    deadline_ms: Option<f64>,
}

impl SpawnTimer {
    /// Arm for a single fire at `now + interval`
    pub fn arm(&mut self, now_ms: f64, interval_ms: f64) {
        self.deadline_ms = Some(now_ms + interval_ms);
    }

    /// Disarm without firing
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    pub fn deadline_ms(&self) -> Option<f64> {
        self.deadline_ms
    }

    /// Consume the deadline if it has passed. At most one fire per call even
    /// when the clock jumped far beyond the deadline.
    fn take_due(&mut self, now_ms: f64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}

/// Service the timer: if the deadline has passed, spawn one letter and re-arm
/// from `now_ms`. A long clock gap (background tab) still produces a single
/// spawn, with the next deadline measured from now rather than from the
/// missed deadline.
pub fn service(state: &mut GameState, now_ms: f64) {
    if state.spawn.take_due(now_ms) {
        spawn_letter(state);
        rearm(state, now_ms);
    }
}

/// Drop one random letter at a random column along the top edge
pub fn spawn_letter(state: &mut GameState) {
    let alphabet = state.language.alphabet();
    let pick = state.rng.random_range(0..alphabet.len());
    let ch = state.language.display(alphabet[pick]);
    let x = state.rng.random_range(0.0..=FIELD_WIDTH - LETTER_SIZE);

    let id = state.next_entity_id();
    state.letters.push(FallingLetter {
        id,
        ch,
        pos: Vec2::new(x, 0.0),
    });
    state.events.push(GameEvent::LetterSpawned { id });
    log::debug!("spawned letter '{}' (id {}) at x={:.1}", ch, id, x);
}

/// Re-arm from `now_ms` with the interval for the current score
pub fn rearm(state: &mut GameState, now_ms: f64) {
    let interval = state.profile.spawn_interval_ms(state.score);
    state.spawn.arm(now_ms, interval);
}
