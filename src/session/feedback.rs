//! Feedback banner classification
//!
//! Pure timing and styling rules per banner kind. Correct/incorrect
//! banners are ephemeral; game-over and congrats banners persist until
//! the shell navigates away.

use crate::core::config::SessionTuning;
use crate::core::types::TimeMs;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Classification of a banner message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackKind {
    Correct,
    Incorrect,
    GameOver,
    Congrats,
}

impl FeedbackKind {
    /// All banner kinds
    pub fn all() -> &'static [FeedbackKind] {
        &[
            FeedbackKind::Correct,
            FeedbackKind::Incorrect,
            FeedbackKind::GameOver,
            FeedbackKind::Congrats,
        ]
    }

    /// Does this banner survive until the session ends?
    pub fn persists(&self) -> bool {
        matches!(self, FeedbackKind::GameOver | FeedbackKind::Congrats)
    }

    /// Display time before the banner auto-clears; `None` persists
    pub fn display_ms(&self, tuning: &SessionTuning) -> Option<TimeMs> {
        match self {
            FeedbackKind::Correct | FeedbackKind::Incorrect => Some(tuning.feedback_clear_ms),
            FeedbackKind::GameOver | FeedbackKind::Congrats => None,
        }
    }

    /// Banner color in the shell
    pub fn color(&self) -> Color {
        match self {
            FeedbackKind::Correct => Color::Green,
            FeedbackKind::Incorrect => Color::Yellow,
            FeedbackKind::GameOver => Color::Red,
            FeedbackKind::Congrats => Color::Magenta,
        }
    }

    /// Shell wording used when a module does not post its own
    pub fn default_text(&self) -> &'static str {
        match self {
            FeedbackKind::Correct => "Correct! You earned a star.",
            FeedbackKind::Incorrect => "Not quite - try again!",
            FeedbackKind::GameOver => "Out of hearts. See you next time!",
            FeedbackKind::Congrats => "All stars collected. Amazing!",
        }
    }
}

/// One banner message shown by the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackMessage {
    pub kind: FeedbackKind,
    pub text: String,
}

impl FeedbackMessage {
    pub fn new(kind: FeedbackKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Message with the shell's default wording for `kind`
    pub fn shell_default(kind: FeedbackKind) -> Self {
        Self::new(kind, kind.default_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_kinds_persist() {
        assert!(FeedbackKind::GameOver.persists());
        assert!(FeedbackKind::Congrats.persists());
        assert!(!FeedbackKind::Correct.persists());
        assert!(!FeedbackKind::Incorrect.persists());
    }

    #[test]
    fn test_display_time_matches_persistence() {
        let tuning = SessionTuning::default();
        for kind in FeedbackKind::all() {
            assert_eq!(kind.display_ms(&tuning).is_none(), kind.persists());
        }
    }

    #[test]
    fn test_ephemeral_kinds_use_tuned_duration() {
        let mut tuning = SessionTuning::default();
        tuning.feedback_clear_ms = 900;

        assert_eq!(FeedbackKind::Correct.display_ms(&tuning), Some(900));
        assert_eq!(FeedbackKind::Incorrect.display_ms(&tuning), Some(900));
    }

    #[test]
    fn test_every_kind_has_wording() {
        for kind in FeedbackKind::all() {
            assert!(!kind.default_text().is_empty());
        }
    }
}
