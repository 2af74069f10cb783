//! Challenge data model and the provider trait
//!
//! Architecture: Trait + Data
//! - ChallengeProvider trait defines the interface for swappable exercises
//! - Challenge is the plain data one round consists of
//! - Verification stays next to generation so the session never needs to
//!   understand any particular kind of math

use rand_chacha::ChaCha8Rng;

use crate::session::feedback::FeedbackKind;

/// How the shell should collect the answer for a challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputWidget {
    /// Free digit entry up to `max_len` characters
    Digits { max_len: usize },
    /// Pick one of a fixed set of options
    Choices(Vec<String>),
}

/// One round of an exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    /// Shown to the child, e.g. `7 + 5 = ?`
    pub prompt: String,
    /// Canonical answer string the submission is compared against
    pub expected: String,
    pub widget: InputWidget,
}

impl Challenge {
    /// Challenge answered by typing digits
    pub fn digits(prompt: impl Into<String>, expected: impl Into<String>, max_len: usize) -> Self {
        Self {
            prompt: prompt.into(),
            expected: expected.into(),
            widget: InputWidget::Digits { max_len },
        }
    }

    /// Challenge answered by picking one option
    pub fn choices(
        prompt: impl Into<String>,
        expected: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            expected: expected.into(),
            widget: InputWidget::Choices(options),
        }
    }
}

/// Trait for pluggable exercise implementations
pub trait ChallengeProvider {
    /// Produce the next challenge
    fn generate(&mut self, rng: &mut ChaCha8Rng) -> Challenge;

    /// Check a submitted answer against a challenge
    fn verify(&self, challenge: &Challenge, answer: &str) -> bool {
        challenge.expected == answer.trim()
    }

    /// Banner wording for a correct answer
    fn correct_text(&self) -> String {
        FeedbackKind::Correct.default_text().to_string()
    }

    /// Banner wording for a wrong answer. The same challenge is retried,
    /// so the wording must not give the answer away.
    fn incorrect_text(&self, _challenge: &Challenge) -> String {
        FeedbackKind::Incorrect.default_text().to_string()
    }
}
