//! UI state for the exercise menu

use std::collections::HashSet;

use crate::core::types::Avatar;
use crate::exercises::ExerciseKind;

/// Menu screen state
#[derive(Debug)]
pub struct MenuState {
    /// Highlighted catalog row
    pub selected: usize,
    /// Exercises finished this run; shown with a medal in the menu
    pub completed: HashSet<ExerciseKind>,
    /// Companion shown in the header
    pub avatar: Avatar,
}

impl MenuState {
    pub fn new(avatar: Avatar) -> Self {
        Self {
            selected: 0,
            completed: HashSet::new(),
            avatar,
        }
    }

    /// Move the highlight up, stopping at the top
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move the highlight down, stopping at the last entry
    pub fn select_next(&mut self) {
        if self.selected + 1 < ExerciseKind::all().len() {
            self.selected += 1;
        }
    }

    /// The highlighted exercise
    pub fn selected_exercise(&self) -> ExerciseKind {
        ExerciseKind::all()[self.selected]
    }

    /// Record a finished exercise
    pub fn mark_completed(&mut self, exercise: ExerciseKind) {
        self.completed.insert(exercise);
    }

    pub fn is_completed(&self, exercise: ExerciseKind) -> bool {
        self.completed.contains(&exercise)
    }

    /// Swap to the next companion
    pub fn cycle_avatar(&mut self) {
        self.avatar = self.avatar.next();
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new(Avatar::default())
    }
}
