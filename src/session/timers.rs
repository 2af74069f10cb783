//! Scheduled one-shot session actions
//!
//! Every delay in the session core lives here as a deadline entry owned
//! by the controller. Entries fire when the shell's clock passes their
//! deadline and all of them die together on reset or teardown, so a
//! stale action can never reach a session it was not scheduled for.

use crate::core::types::TimeMs;

/// Action to perform when a deadline passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Bump the advance signal and request the next challenge
    Advance,
    /// End the shatter animation of the lost heart (clears the guard)
    HeartSettle,
    /// Declare the session failed and show the game-over banner
    FailSession,
    /// Clear the feedback banner if it still shows message `serial`
    ClearFeedback { serial: u64 },
    /// Leave the exercise and return to the menu
    NavigateBack,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    fires_at: TimeMs,
    action: TimerAction,
}

/// Deadline queue for a single session
#[derive(Debug, Default)]
pub struct Timers {
    pending: Vec<PendingTimer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire once the clock reaches `fires_at`
    pub fn schedule(&mut self, fires_at: TimeMs, action: TimerAction) {
        self.pending.push(PendingTimer { fires_at, action });
    }

    /// Drop every pending entry
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return every action due at `now`, in deadline order.
    ///
    /// Entries sharing a deadline keep their scheduling order.
    pub fn drain_due(&mut self, now: TimeMs) -> Vec<TimerAction> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].fires_at <= now {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|t| t.fires_at);
        due.into_iter().map(|t| t.action).collect()
    }
}
