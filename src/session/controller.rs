//! Session state machine: attempt arbitration, lives, stars, timed phases
//!
//! The controller owns every piece of session state. Exercise modules
//! reach it only through the narrow `SessionApi` view; the shell drives
//! it by passing the current time to `tick` and handling the returned
//! events. Stars and lives are plain counters; the machinery here is
//! the sequencing of the timed phases and the guard that keeps racing
//! input from corrupting the counts.

use crate::core::config::{self, SessionTuning};
use crate::core::types::TimeMs;
use crate::exercises::ExerciseKind;
use crate::session::api::SessionApi;
use crate::session::feedback::{FeedbackKind, FeedbackMessage};
use crate::session::hearts::{self, HeartPhase};
use crate::session::timers::{TimerAction, Timers};

/// Immutable per-session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Session identity; a different exercise means a fresh session
    pub exercise: ExerciseKind,
    /// Correct attempts needed to finish the exercise
    pub total_stars: u32,
}

impl SessionConfig {
    pub fn new(exercise: ExerciseKind, total_stars: u32) -> Self {
        Self {
            exercise,
            total_stars: total_stars.max(1),
        }
    }
}

/// Arbitration phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Accepting attempts
    Active,
    /// A lost heart's shatter animation is in flight; attempts are dropped
    LosingLife,
    /// Every star collected (terminal)
    CompletedSuccess,
    /// Every life spent (terminal)
    CompletedFailure,
}

impl SessionPhase {
    /// Has the session reached an end state?
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionPhase::CompletedSuccess | SessionPhase::CompletedFailure
        )
    }

    /// Attempts are arbitrated only while active
    pub fn accepts_attempts(&self) -> bool {
        matches!(self, SessionPhase::Active)
    }
}

/// Events surfaced to the host page and the active exercise module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The module should produce its next challenge
    NewChallengeRequested,
    /// The star target was reached; fired exactly once per session
    SetCompleted { exercise: ExerciseKind },
    /// The shell should leave the exercise screen
    NavigateBack,
}

/// A lost heart whose shatter animation is in flight
#[derive(Debug, Clone, Copy)]
struct LifeLoss {
    index: usize,
    started_at: TimeMs,
}

/// Owner of all session state and the attempt-arbitration algorithm
pub struct SessionController {
    config: SessionConfig,
    tuning: SessionTuning,
    phase: SessionPhase,
    stars_achieved: u32,
    lives_remaining: u32,
    losing_life: Option<LifeLoss>,
    advance_signal: u64,
    feedback: Option<FeedbackMessage>,
    feedback_serial: u64,
    timers: Timers,
    events: Vec<SessionEvent>,
    idle_since: TimeMs,
    idle_warned: bool,
}

impl SessionController {
    /// New session under the global tuning
    pub fn new(config: SessionConfig, now: TimeMs) -> Self {
        Self::with_tuning(config, config::tuning().clone(), now)
    }

    /// New session with explicit tuning
    pub fn with_tuning(config: SessionConfig, tuning: SessionTuning, now: TimeMs) -> Self {
        let lives = tuning.initial_lives;
        Self {
            config,
            tuning,
            phase: SessionPhase::Active,
            stars_achieved: 0,
            lives_remaining: lives,
            losing_life: None,
            advance_signal: 0,
            feedback: None,
            feedback_serial: 0,
            timers: Timers::new(),
            events: Vec::new(),
            idle_since: now,
            idle_warned: false,
        }
    }

    /// Restart under a new configuration.
    ///
    /// Cancels every pending timer and restores the initial state, so
    /// nothing scheduled by the old session can reach the new one.
    pub fn reset(&mut self, config: SessionConfig, now: TimeMs) {
        tracing::info!(exercise = %config.exercise, "session reset");
        self.timers.cancel_all();
        self.events.clear();
        self.config = config;
        self.phase = SessionPhase::Active;
        self.stars_achieved = 0;
        self.lives_remaining = self.tuning.initial_lives;
        self.losing_life = None;
        self.advance_signal = 0;
        self.feedback = None;
        self.feedback_serial = 0;
        self.idle_since = now;
        self.idle_warned = false;
    }

    /// The module-facing view for one frame
    pub fn api(&mut self, now: TimeMs) -> SessionApi<'_> {
        SessionApi::new(self, now)
    }

    /// Arbitrate one submitted answer.
    ///
    /// Dropped while a life loss is in flight or the session has ended;
    /// this is the only idempotence the session provides, so modules
    /// must not submit the same answer twice themselves.
    pub fn on_attempt(&mut self, correct: bool, now: TimeMs) {
        if !self.phase.accepts_attempts() {
            tracing::debug!(phase = ?self.phase, "attempt dropped by arbitration guard");
            return;
        }
        self.idle_since = now;
        self.idle_warned = false;

        if correct {
            self.register_hit(now);
        } else {
            self.register_miss(now);
        }
    }

    fn register_hit(&mut self, now: TimeMs) {
        self.stars_achieved += 1;
        tracing::debug!(
            stars = self.stars_achieved,
            target = self.config.total_stars,
            "correct attempt"
        );

        if self.stars_achieved >= self.config.total_stars {
            self.phase = SessionPhase::CompletedSuccess;
            self.events.push(SessionEvent::SetCompleted {
                exercise: self.config.exercise,
            });
            self.set_feedback(FeedbackMessage::shell_default(FeedbackKind::Congrats), now);
            self.timers
                .schedule(now + self.tuning.success_nav_ms, TimerAction::NavigateBack);
            tracing::info!(exercise = %self.config.exercise, "exercise completed");
        } else {
            self.set_feedback(FeedbackMessage::shell_default(FeedbackKind::Correct), now);
            self.timers
                .schedule(now + self.tuning.advance_delay_ms, TimerAction::Advance);
        }
    }

    fn register_miss(&mut self, now: TimeMs) {
        let index = self.lives_remaining.saturating_sub(1) as usize;
        self.lives_remaining = self.lives_remaining.saturating_sub(1);
        self.losing_life = Some(LifeLoss {
            index,
            started_at: now,
        });
        self.phase = SessionPhase::LosingLife;
        self.timers
            .schedule(now + self.tuning.heart_animation_ms, TimerAction::HeartSettle);
        tracing::debug!(lives = self.lives_remaining, "incorrect attempt, heart lost");

        if self.lives_remaining == 0 {
            // Failure is declared while the heart still shatters; the
            // settle later only clears the guard.
            self.timers
                .schedule(now + self.tuning.failure_detect_ms, TimerAction::FailSession);
        } else {
            self.set_feedback(FeedbackMessage::shell_default(FeedbackKind::Incorrect), now);
        }
    }

    /// Overwrite the banner; `None` clears immediately regardless of kind.
    ///
    /// Modules post their own wording through this; the shell's defaults
    /// from the arbitration above go through the same path.
    pub fn show_feedback(&mut self, message: Option<FeedbackMessage>, now: TimeMs) {
        let display = message.as_ref().and_then(|m| m.kind.display_ms(&self.tuning));
        self.replace_feedback(message, display, now);
    }

    /// Overwrite the banner with a caller-chosen display time
    pub fn show_feedback_for(&mut self, message: FeedbackMessage, display_ms: TimeMs, now: TimeMs) {
        self.replace_feedback(Some(message), Some(display_ms), now);
    }

    fn set_feedback(&mut self, message: FeedbackMessage, now: TimeMs) {
        let display = message.kind.display_ms(&self.tuning);
        self.replace_feedback(Some(message), display, now);
    }

    fn replace_feedback(
        &mut self,
        message: Option<FeedbackMessage>,
        display_ms: Option<TimeMs>,
        now: TimeMs,
    ) {
        // Serial-stamped so a clear scheduled for an older banner can
        // never erase a newer one.
        self.feedback_serial += 1;
        self.feedback = message;
        if self.feedback.is_some() {
            if let Some(ms) = display_ms {
                self.timers.schedule(
                    now + ms,
                    TimerAction::ClearFeedback {
                        serial: self.feedback_serial,
                    },
                );
            }
        }
    }

    /// Fire due timers and drain events.
    ///
    /// The shell calls this every loop iteration; everything scheduled
    /// by `on_attempt` and `show_feedback` takes effect here.
    pub fn tick(&mut self, now: TimeMs) -> Vec<SessionEvent> {
        for action in self.timers.drain_due(now) {
            self.fire(action, now);
        }
        self.check_idle(now);
        std::mem::take(&mut self.events)
    }

    fn fire(&mut self, action: TimerAction, now: TimeMs) {
        match action {
            TimerAction::Advance => {
                self.advance_signal += 1;
                self.idle_since = now;
                self.idle_warned = false;
                self.events.push(SessionEvent::NewChallengeRequested);
                tracing::debug!(signal = self.advance_signal, "next challenge requested");
            }
            TimerAction::HeartSettle => {
                self.losing_life = None;
                if !self.phase.is_terminal() {
                    self.phase = SessionPhase::Active;
                }
            }
            TimerAction::FailSession => {
                self.phase = SessionPhase::CompletedFailure;
                self.set_feedback(FeedbackMessage::shell_default(FeedbackKind::GameOver), now);
                self.timers
                    .schedule(now + self.tuning.failure_nav_ms, TimerAction::NavigateBack);
                tracing::info!(exercise = %self.config.exercise, "out of lives");
            }
            TimerAction::ClearFeedback { serial } => {
                if serial == self.feedback_serial {
                    self.feedback = None;
                }
            }
            TimerAction::NavigateBack => {
                self.events.push(SessionEvent::NavigateBack);
            }
        }
    }

    fn check_idle(&mut self, now: TimeMs) {
        if self.phase.accepts_attempts()
            && !self.idle_warned
            && now.saturating_sub(self.idle_since) >= self.tuning.idle_warn_ms
        {
            self.idle_warned = true;
            tracing::warn!(
                exercise = %self.config.exercise,
                idle_ms = now.saturating_sub(self.idle_since),
                "no attempt registered; is the exercise module submitting?"
            );
        }
    }

    // === READ ACCESSORS ===

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn stars_achieved(&self) -> u32 {
        self.stars_achieved
    }

    pub fn lives_remaining(&self) -> u32 {
        self.lives_remaining
    }

    /// Index of the heart currently mid-shatter, if any
    pub fn losing_life_at(&self) -> Option<usize> {
        self.losing_life.map(|l| l.index)
    }

    /// Monotonic new-challenge counter; consumers diff it or, better,
    /// act on `SessionEvent::NewChallengeRequested`
    pub fn advance_signal(&self) -> u64 {
        self.advance_signal
    }

    pub fn feedback(&self) -> Option<&FeedbackMessage> {
        self.feedback.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn pending_timer_count(&self) -> usize {
        self.timers.pending_count()
    }

    /// Display phases of the hearts row at `now`
    pub fn heart_phases(&self, now: TimeMs) -> Vec<HeartPhase> {
        hearts::heart_row(
            self.tuning.initial_lives,
            self.lives_remaining,
            self.losing_life.map(|l| (l.index, l.started_at)),
            now,
            &self.tuning,
        )
    }
}
