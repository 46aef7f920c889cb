//! Selectable alphabets and per-language matching rules
//!
//! Latin matching is case-insensitive: letters spawn in display (uppercase)
//! form and both sides are folded to lowercase before comparison. Hebrew has
//! no case, so matching is exact on the base letter forms.

use serde::{Deserialize, Serialize};

/// Latin alphabet in canonical (lowercase) form.
pub const LATIN: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Hebrew alphabet, base forms only. Final forms share physical keys with
/// their base letters and are never spawned.
pub const HEBREW: &[char] = &[
    'א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט', 'י', 'כ', 'ל', 'מ', 'נ', 'ס', 'ע', 'פ', 'צ',
    'ק', 'ר', 'ש', 'ת',
];

/// Game language, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    English,
    Hebrew,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hebrew => "he",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "he" | "hebrew" => Some(Language::Hebrew),
            _ => None,
        }
    }

    /// Every key the on-screen keyboard knows, in reporting order.
    pub fn alphabet(&self) -> &'static [char] {
        match self {
            Language::English => LATIN,
            Language::Hebrew => HEBREW,
        }
    }

    /// Canonical form used for matching and heat keys.
    pub fn normalize(&self, c: char) -> char {
        match self {
            Language::English => c.to_ascii_lowercase(),
            Language::Hebrew => c,
        }
    }

    /// Display form given to a freshly spawned letter.
    pub fn display(&self, c: char) -> char {
        match self {
            Language::English => c.to_ascii_uppercase(),
            Language::Hebrew => c,
        }
    }

    /// Whether a typed character belongs to the active alphabet.
    pub fn accepts(&self, c: char) -> bool {
        let canonical = self.normalize(c);
        self.alphabet().contains(&canonical)
    }
}
