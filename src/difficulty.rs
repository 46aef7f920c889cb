//! Difficulty tiers and score-driven pacing
//!
//! A tier fixes an immutable profile at session start. Everything that
//! changes during play is a pure function of the live score: fall speed
//! grows linearly, the spawn interval shrinks linearly down to a floor.

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_SPAWN_INTERVAL_MS, SPAWN_REDUCTION_MS_PER_POINT};

/// Selectable difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyTier {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Normal => "normal",
            DifficultyTier::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyTier::Easy),
            "normal" | "medium" => Some(DifficultyTier::Normal),
            "hard" => Some(DifficultyTier::Hard),
            _ => None,
        }
    }

    /// Tuning record for this tier
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            DifficultyTier::Easy => DifficultyProfile {
                base_fall_speed: 1.0,
                fall_growth_per_point: 0.05,
                base_spawn_interval_ms: 10_000.0,
            },
            DifficultyTier::Normal => DifficultyProfile {
                base_fall_speed: 1.6,
                fall_growth_per_point: 0.08,
                base_spawn_interval_ms: 7_000.0,
            },
            DifficultyTier::Hard => DifficultyProfile {
                base_fall_speed: 2.2,
                fall_growth_per_point: 0.12,
                base_spawn_interval_ms: 5_000.0,
            },
        }
    }
}

/// Immutable per-tier tuning, chosen once per session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Letter fall speed at score 0, pixels per frame
    pub base_fall_speed: f32,
    /// Extra fall speed per score point
    pub fall_growth_per_point: f32,
    /// Spawn interval at score 0, milliseconds
    pub base_spawn_interval_ms: f64,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        DifficultyTier::Normal.profile()
    }
}

impl DifficultyProfile {
    /// Fall speed for the current score (monotone non-decreasing)
    pub fn fall_speed(&self, score: u32) -> f32 {
        self.base_fall_speed + score as f32 * self.fall_growth_per_point
    }

    /// Spawn interval for the current score, clamped at the cadence floor
    pub fn spawn_interval_ms(&self, score: u32) -> f64 {
        (self.base_spawn_interval_ms - score as f64 * SPAWN_REDUCTION_MS_PER_POINT)
            .max(MIN_SPAWN_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easy_interval_scaling() {
        let p = DifficultyTier::Easy.profile();
        assert_eq!(p.spawn_interval_ms(0), 10_000.0);
        // 50 points shave 500ms off the base interval
        assert_eq!(p.spawn_interval_ms(50), 9_500.0);
    }

    #[test]
    fn test_interval_floor() {
        let p = DifficultyTier::Hard.profile();
        // 5000 - 350 * 10 = 1500, exactly at the floor
        assert_eq!(p.spawn_interval_ms(350), MIN_SPAWN_INTERVAL_MS);
        assert_eq!(p.spawn_interval_ms(351), MIN_SPAWN_INTERVAL_MS);
        assert_eq!(p.spawn_interval_ms(u32::MAX), MIN_SPAWN_INTERVAL_MS);
    }

    #[test]
    fn test_fall_speed_growth() {
        let p = DifficultyTier::Easy.profile();
        assert_eq!(p.fall_speed(0), 1.0);
        assert!((p.fall_speed(10) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_tier_ordering() {
        let easy = DifficultyTier::Easy.profile();
        let normal = DifficultyTier::Normal.profile();
        let hard = DifficultyTier::Hard.profile();
        assert!(easy.base_fall_speed < normal.base_fall_speed);
        assert!(normal.base_fall_speed < hard.base_fall_speed);
        assert!(easy.base_spawn_interval_ms > normal.base_spawn_interval_ms);
        assert!(normal.base_spawn_interval_ms > hard.base_spawn_interval_ms);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(DifficultyTier::from_str("easy"), Some(DifficultyTier::Easy));
        assert_eq!(DifficultyTier::from_str("Hard"), Some(DifficultyTier::Hard));
        assert_eq!(DifficultyTier::from_str("nightmare"), None);
        for tier in [DifficultyTier::Easy, DifficultyTier::Normal, DifficultyTier::Hard] {
            assert_eq!(DifficultyTier::from_str(tier.as_str()), Some(tier));
        }
    }
}
