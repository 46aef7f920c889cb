//! Game state and core simulation types
//!
//! Everything a session needs to replay deterministically lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::spawn::SpawnTimer;
use crate::consts::*;
use crate::difficulty::{DifficultyProfile, DifficultyTier};
use crate::language::Language;
use crate::{player_max_x, player_top};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionPhase {
    /// Waiting at the language menu
    #[default]
    Idle,
    /// Language picked, waiting for a difficulty tier
    LanguageChosen,
    /// Active gameplay
    Active,
    /// A letter reached the floor; final score is frozen
    GameOver,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::LanguageChosen => "language-chosen",
            SessionPhase::Active => "active",
            SessionPhase::GameOver => "game-over",
        }
    }
}

/// A letter dropping toward the floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingLetter {
    pub id: u32,
    /// Display form (uppercase for Latin)
    pub ch: char,
    /// Top-left corner of the glyph box; y grows downward
    pub pos: Vec2,
}

impl FallingLetter {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(LETTER_SIZE, LETTER_SIZE))
    }

    /// Normalized floor proximity in [0, 1] (1 = at the floor)
    pub fn proximity(&self) -> f32 {
        (self.pos.y / FIELD_HEIGHT).clamp(0.0, 1.0)
    }
}

/// A shot climbing from the cannon toward the top edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Canonical form (lowercase for Latin) of the key that fired it
    pub ch: char,
    /// Top-left corner; y grows downward
    pub pos: Vec2,
}

impl Projectile {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
    }
}

/// The player cannon on the floor line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Left edge of the cannon box
    pub x: f32,
    /// Held movement intents (set on key-down, cleared on key-up)
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            x: (FIELD_WIDTH - PLAYER_WIDTH) / 2.0,
            moving_left: false,
            moving_right: false,
        }
    }
}

impl PlayerState {
    /// Horizontal center of the cannon (where shots leave)
    pub fn center_x(&self) -> f32 {
        self.x + PLAYER_WIDTH / 2.0
    }
}

/// Things the simulation reports back to the controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new letter entered the field
    LetterSpawned { id: u32 },
    /// A projectile took a letter down; score after the hit
    Hit { letter_id: u32, score: u32 },
    /// The last letter was cleared; an immediate respawn follows
    BoardCleared,
    /// A letter crossed the floor
    GameOver { final_score: u32 },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; all spawn randomness flows through here
    pub rng: Pcg32,
    /// Current phase
    pub phase: SessionPhase,
    /// Selected language (meaningful from LanguageChosen onward)
    pub language: Language,
    /// Selected tier (meaningful while Active / GameOver)
    pub tier: DifficultyTier,
    /// Tuning record for the selected tier
    pub profile: DifficultyProfile,
    /// Resolved hits this session
    pub score: u32,
    /// Frame counter
    pub frame: u64,
    /// Player cannon
    pub player: PlayerState,
    /// Live letters (sorted by id for determinism)
    pub letters: Vec<FallingLetter>,
    /// Live shots (sorted by id for determinism)
    pub projectiles: Vec<Projectile>,
    /// One-shot spawn timer on the session clock
    pub spawn: SpawnTimer,
    /// Events since the last drain (transient, not part of a snapshot)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh state at the language menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Idle,
            language: Language::default(),
            tier: DifficultyTier::default(),
            profile: DifficultyProfile::default(),
            score: 0,
            frame: 0,
            player: PlayerState::default(),
            letters: Vec::new(),
            projectiles: Vec::new(),
            spawn: SpawnTimer::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a run: install the tier, reset the field and arm the first spawn.
    /// The RNG restarts from the run seed so sessions are reproducible.
    pub fn begin(&mut self, tier: DifficultyTier, now_ms: f64) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.phase = SessionPhase::Active;
        self.tier = tier;
        self.profile = tier.profile();
        self.score = 0;
        self.frame = 0;
        self.player = PlayerState::default();
        self.letters.clear();
        self.projectiles.clear();
        self.events.clear();
        self.next_id = 1;
        self.spawn.arm(now_ms, self.profile.spawn_interval_ms(0));
    }

    /// Return to the language menu after a run
    pub fn reset_to_idle(&mut self) {
        self.phase = SessionPhase::Idle;
        self.score = 0;
        self.player = PlayerState::default();
        self.letters.clear();
        self.projectiles.clear();
        self.events.clear();
        self.spawn.cancel();
    }

    /// Fire a shot for the given canonical character from the cannon muzzle
    pub fn spawn_projectile(&mut self, ch: char) {
        let id = self.next_entity_id();
        let x = (self.player.center_x() - PROJECTILE_WIDTH / 2.0)
            .clamp(0.0, FIELD_WIDTH - PROJECTILE_WIDTH);
        let y = player_top() - PROJECTILE_HEIGHT;
        self.projectiles.push(Projectile {
            id,
            ch,
            pos: Vec2::new(x, y),
        });
    }

    /// Clamp the player to the field
    pub fn clamp_player(&mut self) {
        self.player.x = self.player.x.clamp(0.0, player_max_x());
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.letters.sort_by_key(|l| l.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}
