//! Keyboard heat projection
//!
//! Derives, per alphabet character, how close its nearest letter is to the
//! floor. The projection is recomputed from the live letter set on every
//! frame rather than maintained incrementally, so it can never drift from
//! the entities it mirrors.

use std::collections::HashMap;

use super::state::FallingLetter;
use crate::language::Language;

/// Per-character floor proximity in [0, 1]. Characters with no live letter
/// have no entry and render neutral; duplicates keep the most urgent value.
pub fn key_heat(letters: &[FallingLetter], language: Language) -> HashMap<char, f32> {
    let mut heat = HashMap::new();
    for letter in letters {
        let key = language.normalize(letter.ch);
        let value = letter.proximity();
        let entry = heat.entry(key).or_insert(0.0f32);
        if value > *entry {
            *entry = value;
        }
    }
    heat
}
