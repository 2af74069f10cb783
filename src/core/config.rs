//! Session timing configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use crate::core::error::Result;
use crate::core::types::TimeMs;
use serde::Deserialize;
use std::path::Path;

/// Timing and budget constants for an exercise session
///
/// These values have been tuned for a child's reading and reaction pace.
/// Changing them affects how rushed or sluggish the shell feels.
#[derive(Debug, Clone)]
pub struct SessionTuning {
    // === LIVES ===
    /// Retry budget per session
    ///
    /// Three hearts is enough to forgive slips without letting a stuck
    /// child grind on a challenge they cannot solve.
    pub initial_lives: u32,

    /// Full shatter animation of a lost heart (ms)
    ///
    /// While this runs the session is in its life-loss phase and every
    /// attempt is dropped, so the animation length directly bounds how
    /// fast wrong answers can be submitted back to back.
    pub heart_animation_ms: TimeMs,

    /// Pulse portion of the shatter animation (ms)
    ///
    /// The heart pulses before it breaks; the breaking portion is the
    /// remainder of `heart_animation_ms`. Must fit inside the animation
    /// window, which `validate` enforces.
    pub heart_pulse_ms: TimeMs,

    // === PACING ===
    /// Delay from a correct answer to the next challenge request (ms)
    ///
    /// Long enough for the star tally to visibly bump before the content
    /// area swaps, short enough to keep momentum.
    pub advance_delay_ms: TimeMs,

    /// Display time of an ephemeral feedback banner (ms)
    ///
    /// Applies to correct/incorrect banners; game-over and congrats
    /// banners persist until the shell navigates away.
    pub feedback_clear_ms: TimeMs,

    // === SESSION END ===
    /// Delay from the fatal attempt to the failure declaration (ms)
    ///
    /// The game-over banner appears while the last heart is still
    /// shattering. Must stay below `heart_animation_ms` so the failure
    /// always lands before the heart settles.
    pub failure_detect_ms: TimeMs,

    /// Game-over banner dwell before navigating back (ms)
    ///
    /// Combined with `failure_detect_ms` this puts the back-navigation
    /// roughly 2100 ms after the fatal attempt.
    pub failure_nav_ms: TimeMs,

    /// Congrats banner dwell before navigating back (ms)
    ///
    /// Slightly longer than the failure dwell; finishing deserves a
    /// moment.
    pub success_nav_ms: TimeMs,

    // === DIAGNOSTICS ===
    /// Idle window before the silent-session warning (ms)
    ///
    /// A module that never submits an attempt produces a stuck session
    /// with no failure signal. After this long without a submission a
    /// single `warn` is logged per challenge. Development aid only; no
    /// behavioral effect.
    pub idle_warn_ms: TimeMs,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            heart_animation_ms: 1100,
            heart_pulse_ms: 450,

            advance_delay_ms: 500,
            feedback_clear_ms: 1500,

            failure_detect_ms: 100,
            failure_nav_ms: 2000,
            success_nav_ms: 2600,

            idle_warn_ms: 90_000,
        }
    }
}

impl SessionTuning {
    /// Create a new tuning with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.initial_lives == 0 {
            return Err("initial_lives must be at least 1".into());
        }

        // The pulse phase plus the breaking phase make up the whole
        // animation; a pulse that does not fit leaves no breaking phase.
        if self.heart_pulse_ms >= self.heart_animation_ms {
            return Err(format!(
                "heart_pulse_ms ({}) must be < heart_animation_ms ({})",
                self.heart_pulse_ms, self.heart_animation_ms
            ));
        }

        // The arbitration machine relies on the failure declaration
        // firing before the heart settles back.
        if self.failure_detect_ms >= self.heart_animation_ms {
            return Err(format!(
                "failure_detect_ms ({}) must be < heart_animation_ms ({})",
                self.failure_detect_ms, self.heart_animation_ms
            ));
        }

        if self.feedback_clear_ms == 0 {
            return Err("feedback_clear_ms must be positive".into());
        }

        Ok(())
    }

    /// Apply values from an override file on top of the defaults
    pub fn apply(&mut self, overrides: &TuningOverrides) {
        if let Some(v) = overrides.initial_lives {
            self.initial_lives = v;
        }
        if let Some(v) = overrides.heart_animation_ms {
            self.heart_animation_ms = v;
        }
        if let Some(v) = overrides.heart_pulse_ms {
            self.heart_pulse_ms = v;
        }
        if let Some(v) = overrides.advance_delay_ms {
            self.advance_delay_ms = v;
        }
        if let Some(v) = overrides.feedback_clear_ms {
            self.feedback_clear_ms = v;
        }
        if let Some(v) = overrides.failure_detect_ms {
            self.failure_detect_ms = v;
        }
        if let Some(v) = overrides.failure_nav_ms {
            self.failure_nav_ms = v;
        }
        if let Some(v) = overrides.success_nav_ms {
            self.success_nav_ms = v;
        }
        if let Some(v) = overrides.idle_warn_ms {
            self.idle_warn_ms = v;
        }
    }
}

/// Partial tuning loaded from a TOML file; unset fields keep defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuningOverrides {
    pub initial_lives: Option<u32>,
    pub heart_animation_ms: Option<TimeMs>,
    pub heart_pulse_ms: Option<TimeMs>,
    pub advance_delay_ms: Option<TimeMs>,
    pub feedback_clear_ms: Option<TimeMs>,
    pub failure_detect_ms: Option<TimeMs>,
    pub failure_nav_ms: Option<TimeMs>,
    pub success_nav_ms: Option<TimeMs>,
    pub idle_warn_ms: Option<TimeMs>,
}

/// Load a tuning override file
pub fn load_overrides(path: &Path) -> Result<TuningOverrides> {
    let text = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

// === GLOBAL TUNING ACCESS ===

use std::sync::OnceLock;

static TUNING: OnceLock<SessionTuning> = OnceLock::new();

/// Get the global session tuning (initializes with defaults if not set)
pub fn tuning() -> &'static SessionTuning {
    TUNING.get_or_init(SessionTuning::default)
}

/// Set the global session tuning (can only be called once)
///
/// Returns Err if the tuning was already set.
pub fn set_tuning(tuning: SessionTuning) -> std::result::Result<(), SessionTuning> {
    TUNING.set(tuning)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(SessionTuning::default().validate().is_ok());
    }

    #[test]
    fn test_pulse_must_fit_inside_animation() {
        let mut tuning = SessionTuning::default();
        tuning.heart_pulse_ms = tuning.heart_animation_ms;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_failure_must_land_before_settle() {
        let mut tuning = SessionTuning::default();
        tuning.failure_detect_ms = tuning.heart_animation_ms + 1;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_zero_lives_rejected() {
        let mut tuning = SessionTuning::default();
        tuning.initial_lives = 0;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let overrides: TuningOverrides =
            toml::from_str("initial_lives = 5\nsuccess_nav_ms = 3000").unwrap();
        let mut tuning = SessionTuning::default();
        tuning.apply(&overrides);

        assert_eq!(tuning.initial_lives, 5);
        assert_eq!(tuning.success_nav_ms, 3000);
        // Untouched fields keep their defaults
        assert_eq!(tuning.heart_animation_ms, 1100);
    }

    #[test]
    fn test_unknown_override_key_rejected() {
        let result: std::result::Result<TuningOverrides, _> = toml::from_str("hearts = 9");
        assert!(result.is_err());
    }
}
