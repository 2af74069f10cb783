//! Core type definitions used throughout the codebase

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Session time unit: milliseconds since app start.
///
/// Every mutating session call takes one of these; the shell derives it
/// from `Instant::elapsed`, tests pass synthetic values.
pub type TimeMs = u64;

/// Avatar shown in the shell header
///
/// An exhaustive enum rather than a string-keyed icon registry, so an
/// unknown-avatar fallback path cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, Default)]
pub enum Avatar {
    #[default]
    Fox,
    Owl,
    Robot,
    Cat,
    Penguin,
}

impl Avatar {
    /// All avatars, in header cycle order
    pub fn all() -> &'static [Avatar] {
        &[
            Avatar::Fox,
            Avatar::Owl,
            Avatar::Robot,
            Avatar::Cat,
            Avatar::Penguin,
        ]
    }

    /// Header glyph
    pub fn glyph(&self) -> &'static str {
        match self {
            Avatar::Fox => "🦊",
            Avatar::Owl => "🦉",
            Avatar::Robot => "🤖",
            Avatar::Cat => "🐱",
            Avatar::Penguin => "🐧",
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            Avatar::Fox => "Fox",
            Avatar::Owl => "Owl",
            Avatar::Robot => "Robot",
            Avatar::Cat => "Cat",
            Avatar::Penguin => "Penguin",
        }
    }

    /// Next avatar in cycle order (wraps around)
    pub fn next(&self) -> Avatar {
        let all = Avatar::all();
        let idx = all.iter().position(|a| a == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_avatar_has_glyph_and_label() {
        for avatar in Avatar::all() {
            assert!(!avatar.glyph().is_empty());
            assert!(!avatar.label().is_empty());
        }
    }

    #[test]
    fn test_avatar_cycle_wraps() {
        let mut avatar = Avatar::Fox;
        for _ in 0..Avatar::all().len() {
            avatar = avatar.next();
        }
        assert_eq!(avatar, Avatar::Fox);
    }

    #[test]
    fn test_avatar_cycle_visits_all() {
        use std::collections::HashSet;
        let mut seen = HashSet::new();
        let mut avatar = Avatar::Fox;
        for _ in 0..Avatar::all().len() {
            seen.insert(avatar);
            avatar = avatar.next();
        }
        assert_eq!(seen.len(), Avatar::all().len());
    }
}
