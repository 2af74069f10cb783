//! Mathsprout - terminal math practice for kids

pub mod core;
pub mod exercises;
pub mod session;
pub mod ui;
