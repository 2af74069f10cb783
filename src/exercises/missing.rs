//! Missing-term exercise: `a + _ = c`

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::exercises::challenge::{Challenge, ChallengeProvider};

/// Find the hidden addend in a sum up to `max_sum`
pub struct MissingTermProvider {
    pub max_sum: u32,
}

impl Default for MissingTermProvider {
    fn default() -> Self {
        Self { max_sum: 20 }
    }
}

impl ChallengeProvider for MissingTermProvider {
    fn generate(&mut self, rng: &mut ChaCha8Rng) -> Challenge {
        let c = rng.gen_range(1..=self.max_sum);
        let a = rng.gen_range(0..=c);
        let missing = c - a;
        Challenge::digits(format!("{} + _ = {}", a, c), missing.to_string(), 2)
    }

    fn incorrect_text(&self, _challenge: &Challenge) -> String {
        "Hmm, how far is it to the total?".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_missing_term_completes_the_sum() {
        let mut provider = MissingTermProvider::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let challenge = provider.generate(&mut rng);
            let parts: Vec<&str> = challenge.prompt.split(&[' ', '+', '_', '='][..]).filter(|s| !s.is_empty()).collect();
            let a: u32 = parts[0].parse().unwrap();
            let c: u32 = parts[1].parse().unwrap();
            let missing: u32 = challenge.expected.parse().unwrap();
            assert_eq!(a + missing, c);
        }
    }

    #[test]
    fn test_totals_stay_in_range() {
        let mut provider = MissingTermProvider::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let challenge = provider.generate(&mut rng);
            let missing: u32 = challenge.expected.parse().unwrap();
            assert!(missing <= 20);
        }
    }
}
