//! Addition, subtraction and multiplication exercises
//!
//! Number ranges are sized for early primary school: sums and
//! differences stay within 20, products within the small times tables.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::exercises::challenge::{Challenge, ChallengeProvider};

/// Sums with results up to `max_sum`
pub struct AdditionProvider {
    pub max_sum: u32,
}

impl Default for AdditionProvider {
    fn default() -> Self {
        Self { max_sum: 20 }
    }
}

impl ChallengeProvider for AdditionProvider {
    fn generate(&mut self, rng: &mut ChaCha8Rng) -> Challenge {
        let a = rng.gen_range(0..=self.max_sum);
        let b = rng.gen_range(0..=self.max_sum - a);
        Challenge::digits(format!("{} + {} = ?", a, b), (a + b).to_string(), 2)
    }

    fn correct_text(&self) -> String {
        "Great counting!".to_string()
    }
}

/// Differences that never go below zero
pub struct SubtractionProvider {
    pub max_minuend: u32,
}

impl Default for SubtractionProvider {
    fn default() -> Self {
        Self { max_minuend: 20 }
    }
}

impl ChallengeProvider for SubtractionProvider {
    fn generate(&mut self, rng: &mut ChaCha8Rng) -> Challenge {
        let a = rng.gen_range(0..=self.max_minuend);
        let b = rng.gen_range(0..=a);
        Challenge::digits(format!("{} - {} = ?", a, b), (a - b).to_string(), 2)
    }
}

/// Small times tables
pub struct MultiplicationProvider {
    pub max_factor: u32,
}

impl Default for MultiplicationProvider {
    fn default() -> Self {
        Self { max_factor: 10 }
    }
}

impl ChallengeProvider for MultiplicationProvider {
    fn generate(&mut self, rng: &mut ChaCha8Rng) -> Challenge {
        let a = rng.gen_range(1..=self.max_factor);
        let b = rng.gen_range(1..=self.max_factor);
        Challenge::digits(format!("{} × {} = ?", a, b), (a * b).to_string(), 3)
    }

    fn incorrect_text(&self, _challenge: &Challenge) -> String {
        "Not yet. Think of it as repeated addition!".to_string()
    }
}
