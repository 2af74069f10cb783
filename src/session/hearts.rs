//! Heart (life) presentation lifecycle
//!
//! A lost heart pulses, then breaks, then stays empty. The phases are a
//! pure function of time elapsed since the loss; the pulse and breaking
//! portions together span exactly the heart animation window.

use crate::core::config::SessionTuning;
use crate::core::types::TimeMs;

/// Visual phase of a single heart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartPhase {
    /// Life still held
    Filled,
    /// Just lost, pulsing before the break
    Pulsing,
    /// Shattering
    Breaking,
    /// Life spent
    Empty,
}

impl HeartPhase {
    /// Phase of a heart whose loss started at `loss_start`
    pub fn losing(loss_start: TimeMs, now: TimeMs, tuning: &SessionTuning) -> HeartPhase {
        let elapsed = now.saturating_sub(loss_start);
        if elapsed < tuning.heart_pulse_ms {
            HeartPhase::Pulsing
        } else if elapsed < tuning.heart_animation_ms {
            HeartPhase::Breaking
        } else {
            HeartPhase::Empty
        }
    }

    /// Is this heart mid-animation?
    pub fn in_flight(&self) -> bool {
        matches!(self, HeartPhase::Pulsing | HeartPhase::Breaking)
    }

    /// Glyph for the hearts row
    pub fn glyph(&self) -> &'static str {
        match self {
            HeartPhase::Filled => "♥",
            HeartPhase::Pulsing => "♥",
            HeartPhase::Breaking => "✸",
            HeartPhase::Empty => "♡",
        }
    }
}

/// Derive the display phase of every heart in the row.
///
/// Hearts are indexed left to right; index `i` is filled while
/// `i < lives_remaining`, the heart named by the loss guard animates,
/// and everything else is empty.
pub fn heart_row(
    initial_lives: u32,
    lives_remaining: u32,
    losing: Option<(usize, TimeMs)>,
    now: TimeMs,
    tuning: &SessionTuning,
) -> Vec<HeartPhase> {
    (0..initial_lives as usize)
        .map(|i| {
            if let Some((index, started_at)) = losing {
                if i == index {
                    return HeartPhase::losing(started_at, now, tuning);
                }
            }
            if i < lives_remaining as usize {
                HeartPhase::Filled
            } else {
                HeartPhase::Empty
            }
        })
        .collect()
}
