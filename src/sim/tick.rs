//! Per-frame simulation step
//!
//! Advances the field by exactly one animation frame while the session is
//! Active: player movement, projectile flight, hit resolution, letter fall,
//! loss detection. Board-clear respawns go through the spawn module so the
//! re-armed timer sees the updated score.

use super::collision;
use super::spawn;
use super::state::{GameEvent, GameState, SessionPhase};
use crate::consts::*;

/// Advance the session by one frame. No-op outside Active.
pub fn tick(state: &mut GameState, now_ms: f64) {
    if state.phase != SessionPhase::Active {
        return;
    }

    state.frame += 1;

    // Player movement from held intents, clamped to the field
    if state.player.moving_left {
        state.player.x -= PLAYER_SPEED;
    }
    if state.player.moving_right {
        state.player.x += PLAYER_SPEED;
    }
    state.clamp_player();

    // Projectiles climb; cull the ones fully past the top edge
    for shot in &mut state.projectiles {
        shot.pos.y -= PROJECTILE_SPEED;
    }
    state
        .projectiles
        .retain(|s| s.pos.y + PROJECTILE_HEIGHT > 0.0);

    resolve_hits(state, now_ms);

    // Letters fall at the score-tuned speed. The first letter past the floor
    // ends the session; remaining letters are not advanced this frame.
    let speed = state.profile.fall_speed(state.score);
    for i in 0..state.letters.len() {
        state.letters[i].pos.y += speed;
        if state.letters[i].pos.y > FIELD_HEIGHT {
            game_over(state);
            return;
        }
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Resolve projectile-letter hits: each projectile takes down at most the
/// first letter (in id order) it matches and overlaps. A hit that empties
/// the board triggers an immediate respawn and a timer restart, so the field
/// never sits empty mid-run.
fn resolve_hits(state: &mut GameState, now_ms: f64) {
    let mut i = 0;
    while i < state.projectiles.len() {
        let found = collision::find_hit(&state.projectiles[i], &state.letters, state.language);
        match found {
            Some(letter_idx) => {
                let letter = state.letters.remove(letter_idx);
                state.projectiles.remove(i);
                state.score += 1;
                state.events.push(GameEvent::Hit {
                    letter_id: letter.id,
                    score: state.score,
                });
                log::debug!("hit '{}' (id {}), score {}", letter.ch, letter.id, state.score);

                if state.letters.is_empty() {
                    state.events.push(GameEvent::BoardCleared);
                    state.spawn.cancel();
                    spawn::spawn_letter(state);
                    spawn::rearm(state, now_ms);
                }
            }
            None => i += 1,
        }
    }
}

fn game_over(state: &mut GameState) {
    state.phase = SessionPhase::GameOver;
    state.spawn.cancel();
    state.events.push(GameEvent::GameOver {
        final_score: state.score,
    });
    log::info!("session over, final score {}", state.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::DifficultyTier;
    use crate::player_max_x;
    use crate::sim::state::{FallingLetter, Projectile};
    use glam::Vec2;

    fn active_state(tier: DifficultyTier) -> GameState {
        let mut state = GameState::new(12345);
        state.begin(tier, 0.0);
        state
    }

    fn push_letter(state: &mut GameState, ch: char, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.letters.push(FallingLetter {
            id,
            ch,
            pos: Vec2::new(x, y),
        });
        id
    }

    fn push_shot(state: &mut GameState, ch: char, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            ch,
            pos: Vec2::new(x, y),
        });
        id
    }

    #[test]
    fn test_tick_noop_outside_active() {
        let mut state = GameState::new(1);
        tick(&mut state, 100.0);
        assert_eq!(state.frame, 0);
        assert_eq!(state.phase, SessionPhase::Idle);
    }

    #[test]
    fn test_player_movement_clamped() {
        let mut state = active_state(DifficultyTier::Easy);
        state.player.moving_left = true;
        for _ in 0..200 {
            tick(&mut state, 0.0);
        }
        assert_eq!(state.player.x, 0.0);

        state.player.moving_left = false;
        state.player.moving_right = true;
        for _ in 0..400 {
            tick(&mut state, 0.0);
        }
        assert_eq!(state.player.x, player_max_x());
    }

    #[test]
    fn test_letters_fall_at_profile_speed() {
        let mut state = active_state(DifficultyTier::Easy);
        push_letter(&mut state, 'A', 100.0, 100.0);
        tick(&mut state, 0.0);
        // Easy base speed is 1.0 px/frame at score 0
        assert_eq!(state.letters[0].pos.y, 101.0);

        state.score = 10;
        tick(&mut state, 0.0);
        // 1.0 + 10 * 0.05 = 1.5
        assert!((state.letters[0].pos.y - 102.5).abs() < 1e-4);
    }

    #[test]
    fn test_projectiles_climb_and_cull() {
        let mut state = active_state(DifficultyTier::Easy);
        state.spawn_projectile('a');
        let y0 = state.projectiles[0].pos.y;
        tick(&mut state, 0.0);
        assert_eq!(state.projectiles[0].pos.y, y0 - PROJECTILE_SPEED);

        // A shot fully above the top edge disappears
        state.projectiles[0].pos.y = -PROJECTILE_HEIGHT + 1.0;
        tick(&mut state, 0.0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_hit_removes_both_and_scores() {
        let mut state = active_state(DifficultyTier::Easy);
        push_letter(&mut state, 'A', 100.0, 300.0);
        push_letter(&mut state, 'B', 400.0, 50.0);
        // After climbing one step the shot overlaps the 'A' box
        push_shot(&mut state, 'a', 110.0, 330.0);

        tick(&mut state, 0.0);
        assert_eq!(state.score, 1);
        assert_eq!(state.letters.len(), 1);
        assert_eq!(state.letters[0].ch, 'B');
        assert!(state.projectiles.is_empty());
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Hit { score: 1, .. })));
    }

    #[test]
    fn test_wrong_char_passes_through() {
        let mut state = active_state(DifficultyTier::Easy);
        push_letter(&mut state, 'B', 100.0, 300.0);
        push_shot(&mut state, 'a', 110.0, 330.0);

        tick(&mut state, 0.0);
        assert_eq!(state.score, 0);
        assert_eq!(state.letters.len(), 1);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_one_projectile_one_letter() {
        // Two overlapping identical letters; a single shot takes only the older
        let mut state = active_state(DifficultyTier::Easy);
        let first = push_letter(&mut state, 'A', 100.0, 300.0);
        push_letter(&mut state, 'A', 102.0, 302.0);
        push_shot(&mut state, 'a', 110.0, 330.0);

        tick(&mut state, 0.0);
        assert_eq!(state.score, 1);
        assert_eq!(state.letters.len(), 1);
        assert_ne!(state.letters[0].id, first);
    }

    #[test]
    fn test_board_clear_respawns_immediately() {
        let mut state = active_state(DifficultyTier::Easy);
        let old = push_letter(&mut state, 'A', 100.0, 300.0);
        push_shot(&mut state, 'a', 110.0, 330.0);

        tick(&mut state, 5_000.0);
        assert_eq!(state.score, 1);
        // The hit emptied the board, so a fresh letter is already there
        assert_eq!(state.letters.len(), 1);
        assert_ne!(state.letters[0].id, old);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::BoardCleared)));
        // Timer restarted from the clear instant with the score-1 interval
        assert_eq!(state.spawn.deadline_ms(), Some(5_000.0 + 9_990.0));
    }

    #[test]
    fn test_clear_of_full_board_respawns_once() {
        // Both letters die in the same tick; the respawn happens exactly once
        let mut state = active_state(DifficultyTier::Easy);
        push_letter(&mut state, 'A', 100.0, 300.0);
        push_letter(&mut state, 'B', 400.0, 300.0);
        push_shot(&mut state, 'a', 110.0, 330.0);
        push_shot(&mut state, 'b', 410.0, 330.0);

        tick(&mut state, 8_000.0);
        assert_eq!(state.score, 2);
        let clears = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BoardCleared))
            .count();
        assert_eq!(clears, 1);
        assert_eq!(state.letters.len(), 1);
        assert!(state.spawn.is_armed());
    }

    #[test]
    fn test_floor_touch_is_not_loss() {
        let mut state = active_state(DifficultyTier::Easy);
        push_letter(&mut state, 'A', 100.0, FIELD_HEIGHT - 1.0);

        // Lands exactly on the floor line: still alive
        tick(&mut state, 0.0);
        assert_eq!(state.phase, SessionPhase::Active);
        assert_eq!(state.letters[0].pos.y, FIELD_HEIGHT);

        // One more step crosses it
        tick(&mut state, 0.0);
        assert_eq!(state.phase, SessionPhase::GameOver);
    }

    #[test]
    fn test_game_over_freezes_session() {
        let mut state = active_state(DifficultyTier::Easy);
        state.score = 3;
        push_letter(&mut state, 'A', 100.0, FIELD_HEIGHT - 0.5);

        tick(&mut state, 0.0);
        assert_eq!(state.phase, SessionPhase::GameOver);
        assert!(!state.spawn.is_armed());
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { final_score: 3 })));

        // Further ticks change nothing
        let frame = state.frame;
        tick(&mut state, 1_000.0);
        assert_eq!(state.frame, frame);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_first_offender_stops_the_tick() {
        let mut state = active_state(DifficultyTier::Easy);
        push_letter(&mut state, 'A', 100.0, FIELD_HEIGHT - 0.5);
        push_letter(&mut state, 'B', 400.0, 100.0);

        tick(&mut state, 0.0);
        assert_eq!(state.phase, SessionPhase::GameOver);
        // The second letter was not advanced after the loss
        assert_eq!(state.letters[1].pos.y, 100.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        a.begin(DifficultyTier::Normal, 0.0);
        b.begin(DifficultyTier::Normal, 0.0);

        for frame in 0..500u32 {
            let now = frame as f64 * 16.0;
            spawn::service(&mut a, now);
            spawn::service(&mut b, now);
            if frame % 7 == 0 {
                a.spawn_projectile('e');
                b.spawn_projectile('e');
            }
            tick(&mut a, now);
            tick(&mut b, now);
        }

        assert_eq!(a.frame, b.frame);
        assert_eq!(a.score, b.score);
        assert_eq!(a.letters.len(), b.letters.len());
        for (la, lb) in a.letters.iter().zip(b.letters.iter()) {
            assert_eq!(la.id, lb.id);
            assert_eq!(la.ch, lb.ch);
            assert_eq!(la.pos, lb.pos);
        }
    }
}
