//! Key mapping for the menu and exercise screens
//!
//! Pure functions from key events to screen actions, so the bindings
//! can be tested without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions available on the menu screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Up,
    Down,
    Launch,
    CycleAvatar,
    Quit,
}

/// Actions available on an exercise screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseAction {
    Digit(char),
    Backspace,
    Submit,
    ChoicePrev,
    ChoiceNext,
    CycleAvatar,
    Home,
    Quit,
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Map a key press on the menu screen
pub fn map_menu_key(key: &KeyEvent) -> Option<MenuAction> {
    if is_ctrl_c(key) {
        return Some(MenuAction::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(MenuAction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(MenuAction::Down),
        KeyCode::Enter => Some(MenuAction::Launch),
        KeyCode::Char('a') => Some(MenuAction::CycleAvatar),
        KeyCode::Char('q') | KeyCode::Esc => Some(MenuAction::Quit),
        _ => None,
    }
}

/// Map a key press on an exercise screen
pub fn map_exercise_key(key: &KeyEvent) -> Option<ExerciseAction> {
    if is_ctrl_c(key) {
        return Some(ExerciseAction::Quit);
    }
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => Some(ExerciseAction::Digit(c)),
        KeyCode::Backspace => Some(ExerciseAction::Backspace),
        KeyCode::Enter => Some(ExerciseAction::Submit),
        KeyCode::Left => Some(ExerciseAction::ChoicePrev),
        KeyCode::Right => Some(ExerciseAction::ChoiceNext),
        KeyCode::Char('a') => Some(ExerciseAction::CycleAvatar),
        KeyCode::Esc | KeyCode::Char('h') => Some(ExerciseAction::Home),
        KeyCode::Char('q') => Some(ExerciseAction::Quit),
        _ => None,
    }
}
