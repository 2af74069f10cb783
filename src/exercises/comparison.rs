//! Number comparison exercise: pick `<`, `=` or `>`

use std::cmp::Ordering;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::exercises::challenge::{Challenge, ChallengeProvider};

const OPTIONS: [&str; 3] = ["<", "=", ">"];

/// Compare two numbers up to `max_value`
pub struct ComparisonProvider {
    pub max_value: u32,
}

impl Default for ComparisonProvider {
    fn default() -> Self {
        Self { max_value: 99 }
    }
}

impl ChallengeProvider for ComparisonProvider {
    fn generate(&mut self, rng: &mut ChaCha8Rng) -> Challenge {
        let a = rng.gen_range(0..=self.max_value);
        // Random pairs are almost never equal, so force `=` sometimes
        // to keep all three answers in play.
        let b = if rng.gen_ratio(1, 5) {
            a
        } else {
            rng.gen_range(0..=self.max_value)
        };

        let expected = match a.cmp(&b) {
            Ordering::Less => "<",
            Ordering::Equal => "=",
            Ordering::Greater => ">",
        };
        Challenge::choices(
            format!("{} ? {}", a, b),
            expected,
            OPTIONS.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn incorrect_text(&self, _challenge: &Challenge) -> String {
        "Look again: which number is bigger?".to_string()
    }
}
