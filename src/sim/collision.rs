//! Axis-aligned collision for the letter field
//!
//! Everything on the field is a box: letter glyph cells, projectiles, the
//! player cannon. Overlap is the standard AABB test with strict inequalities,
//! so boxes that merely share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{FallingLetter, Projectile};
use crate::language::Language;

/// An axis-aligned box, top-left anchored, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap on both axes; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Find the first letter the projectile can take down: character match under
/// the language's rules plus box overlap. Letters are scanned in id (spawn)
/// order, so ties go to the oldest letter.
pub fn find_hit(
    projectile: &Projectile,
    letters: &[FallingLetter],
    language: Language,
) -> Option<usize> {
    let shot = projectile.aabb();
    letters
        .iter()
        .position(|l| language.normalize(l.ch) == projectile.ch && l.aabb().overlaps(&shot))
}
