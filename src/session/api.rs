//! Narrow session view handed to exercise modules

use crate::core::types::TimeMs;
use crate::session::controller::SessionController;
use crate::session::feedback::FeedbackMessage;

/// What an exercise module may do with the session.
///
/// Borrowed from the controller for one frame with the frame's time
/// already bound, so modules never handle clocks themselves. Everything
/// else about the session (lives, stars, phases) is read-only from the
/// module's point of view and rendered by the shell.
pub struct SessionApi<'a> {
    session: &'a mut SessionController,
    now: TimeMs,
}

impl<'a> SessionApi<'a> {
    pub(crate) fn new(session: &'a mut SessionController, now: TimeMs) -> Self {
        Self { session, now }
    }

    /// Report one verified answer; the session arbitrates the rest
    pub fn on_attempt(&mut self, correct: bool) {
        self.session.on_attempt(correct, self.now);
    }

    /// Post module wording to the banner, or clear it with `None`
    pub fn show_feedback(&mut self, message: Option<FeedbackMessage>) {
        self.session.show_feedback(message, self.now);
    }

    /// Post a banner with a module-chosen display time
    pub fn show_feedback_for(&mut self, message: FeedbackMessage, display_ms: TimeMs) {
        self.session.show_feedback_for(message, display_ms, self.now);
    }

    /// Monotonic new-challenge counter, for modules that poll
    pub fn advance_signal(&self) -> u64 {
        self.session.advance_signal()
    }

    pub fn stars_achieved(&self) -> u32 {
        self.session.stars_achieved()
    }

    pub fn lives_remaining(&self) -> u32 {
        self.session.lives_remaining()
    }

    /// Terminal sessions ignore attempts; modules can stop submitting
    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SessionTuning;
    use crate::exercises::ExerciseKind;
    use crate::session::controller::SessionConfig;
    use crate::session::feedback::FeedbackKind;

    #[test]
    fn test_api_binds_the_frame_time() {
        let mut session = SessionController::with_tuning(
            SessionConfig::new(ExerciseKind::Addition, 5),
            SessionTuning::default(),
            0,
        );

        session.api(1000).on_attempt(true);
        // The advance was scheduled relative to the bound time
        assert!(session.tick(1499).is_empty());
        assert_eq!(session.tick(1500).len(), 1);
    }

    #[test]
    fn test_api_feedback_passthrough() {
        let mut session = SessionController::with_tuning(
            SessionConfig::new(ExerciseKind::Addition, 5),
            SessionTuning::default(),
            0,
        );

        session
            .api(0)
            .show_feedback(Some(FeedbackMessage::new(FeedbackKind::Correct, "Nice!")));
        assert_eq!(session.feedback().unwrap().text, "Nice!");

        session.api(100).show_feedback(None);
        assert!(session.feedback().is_none());
    }
}
