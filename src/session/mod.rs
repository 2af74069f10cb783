pub mod api;
pub mod controller;
pub mod feedback;
pub mod hearts;
pub mod timers;

pub use api::SessionApi;
pub use controller::{SessionConfig, SessionController, SessionEvent, SessionPhase};
pub use feedback::{FeedbackKind, FeedbackMessage};
