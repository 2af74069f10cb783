//! Application loop: terminal lifecycle, screens and session events
//!
//! One `App` owns the menu and, while an exercise runs, an
//! `ExerciseScreen` wrapping the session controller. The loop is
//! clock-driven: every iteration ticks the active session with the
//! elapsed milliseconds, applies the returned events, redraws, then
//! polls for one key.

use std::io::Stdout;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Alignment;
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use crate::core::error::Result;
use crate::core::types::{Avatar, TimeMs};
use crate::exercises::{Challenge, ChallengeProvider, ExerciseKind, InputWidget};
use crate::session::controller::{SessionConfig, SessionController, SessionEvent};
use crate::session::feedback::{FeedbackKind, FeedbackMessage};
use crate::ui::input::{self, ExerciseAction, MenuAction};
use crate::ui::shell::{self, ExerciseView};
use crate::ui::state::MenuState;

/// A running exercise: the session plus the module driving it
struct ExerciseScreen {
    session: SessionController,
    provider: Box<dyn ChallengeProvider>,
    challenge: Challenge,
    answer: String,
    choice_idx: usize,
    rng: ChaCha8Rng,
}

impl ExerciseScreen {
    fn next_challenge(&mut self) {
        self.challenge = self.provider.generate(&mut self.rng);
        self.answer.clear();
        self.choice_idx = 0;
    }
}

/// Top-level application state
pub struct App {
    menu: MenuState,
    screen: Option<ExerciseScreen>,
    default_stars: u32,
    seed: Option<u64>,
    started: Instant,
    should_quit: bool,
}

impl App {
    pub fn new(default_stars: u32, avatar: Avatar, seed: Option<u64>) -> Self {
        Self {
            menu: MenuState::new(avatar),
            screen: None,
            default_stars,
            seed,
            started: Instant::now(),
            should_quit: false,
        }
    }

    fn now_ms(&self) -> TimeMs {
        self.started.elapsed().as_millis() as TimeMs
    }

    /// Open an exercise screen; also used by `--exercise` to skip the menu
    pub fn launch(&mut self, kind: ExerciseKind, now: TimeMs) {
        tracing::info!(exercise = %kind, stars = self.default_stars, "exercise launched");
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut provider = kind.provider();
        let challenge = provider.generate(&mut rng);
        self.screen = Some(ExerciseScreen {
            session: SessionController::new(SessionConfig::new(kind, self.default_stars), now),
            provider,
            challenge,
            answer: String::new(),
            choice_idx: 0,
            rng,
        });
    }

    fn close_screen(&mut self) {
        self.screen = None;
    }

    /// Tick the active session and apply whatever it reports
    fn pump(&mut self, now: TimeMs) {
        let events = match self.screen.as_mut() {
            Some(screen) => screen.session.tick(now),
            None => Vec::new(),
        };
        for event in events {
            match event {
                SessionEvent::NewChallengeRequested => {
                    if let Some(screen) = self.screen.as_mut() {
                        screen.next_challenge();
                    }
                }
                SessionEvent::SetCompleted { exercise } => {
                    self.menu.mark_completed(exercise);
                }
                SessionEvent::NavigateBack => {
                    self.close_screen();
                }
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, now: TimeMs) {
        if self.screen.is_some() {
            if let Some(action) = input::map_exercise_key(key) {
                self.handle_exercise_action(action, now);
            }
        } else if let Some(action) = input::map_menu_key(key) {
            self.handle_menu_action(action, now);
        }
    }

    fn handle_menu_action(&mut self, action: MenuAction, now: TimeMs) {
        match action {
            MenuAction::Up => self.menu.select_prev(),
            MenuAction::Down => self.menu.select_next(),
            MenuAction::Launch => self.launch(self.menu.selected_exercise(), now),
            MenuAction::CycleAvatar => self.menu.cycle_avatar(),
            MenuAction::Quit => self.should_quit = true,
        }
    }

    fn handle_exercise_action(&mut self, action: ExerciseAction, now: TimeMs) {
        let Some(screen) = self.screen.as_mut() else {
            return;
        };
        match action {
            ExerciseAction::Digit(c) => {
                if let InputWidget::Digits { max_len } = screen.challenge.widget {
                    if screen.answer.len() < max_len {
                        screen.answer.push(c);
                    }
                }
            }
            ExerciseAction::Backspace => {
                screen.answer.pop();
            }
            ExerciseAction::ChoicePrev => {
                screen.choice_idx = screen.choice_idx.saturating_sub(1);
            }
            ExerciseAction::ChoiceNext => {
                if let InputWidget::Choices(options) = &screen.challenge.widget {
                    if screen.choice_idx + 1 < options.len() {
                        screen.choice_idx += 1;
                    }
                }
            }
            ExerciseAction::Submit => self.submit(now),
            ExerciseAction::CycleAvatar => self.menu.cycle_avatar(),
            ExerciseAction::Home => self.close_screen(),
            ExerciseAction::Quit => self.should_quit = true,
        }
    }

    fn submit(&mut self, now: TimeMs) {
        let Some(screen) = self.screen.as_mut() else {
            return;
        };
        // The session would drop the attempt anyway; declining here
        // keeps the module from posting wording for a dead submission.
        if !screen.session.phase().accepts_attempts() {
            return;
        }

        let submitted = match &screen.challenge.widget {
            InputWidget::Digits { .. } => {
                if screen.answer.is_empty() {
                    return;
                }
                screen.answer.clone()
            }
            InputWidget::Choices(options) => {
                options.get(screen.choice_idx).cloned().unwrap_or_default()
            }
        };

        let correct = screen.provider.verify(&screen.challenge, &submitted);
        let text = if correct {
            screen.provider.correct_text()
        } else {
            screen.provider.incorrect_text(&screen.challenge)
        };

        let mut api = screen.session.api(now);
        api.on_attempt(correct);

        // Terminal banners (congrats, game over) belong to the shell;
        // the module only words the ordinary outcomes.
        let post_wording = if correct {
            !api.is_over()
        } else {
            api.lives_remaining() > 0
        };
        if post_wording {
            let kind = if correct {
                FeedbackKind::Correct
            } else {
                FeedbackKind::Incorrect
            };
            api.show_feedback(Some(FeedbackMessage::new(kind, text)));
        }

        screen.answer.clear();
    }

    fn draw(&self, f: &mut Frame, now: TimeMs) {
        if !shell::min_size_ok(f.size()) {
            f.render_widget(
                Paragraph::new("Please enlarge the terminal").alignment(Alignment::Center),
                f.size(),
            );
            return;
        }
        match &self.screen {
            Some(screen) => {
                let config = screen.session.config();
                let hearts = screen.session.heart_phases(now);
                let view = ExerciseView {
                    avatar: self.menu.avatar,
                    title: config.exercise.title(),
                    stars_achieved: screen.session.stars_achieved(),
                    total_stars: config.total_stars,
                    hearts: &hearts,
                    prompt: &screen.challenge.prompt,
                    widget: &screen.challenge.widget,
                    answer: &screen.answer,
                    choice_idx: screen.choice_idx,
                    feedback: screen.session.feedback(),
                };
                shell::draw_exercise(f, &view);
            }
            None => shell::draw_menu(f, &self.menu),
        }
    }

    /// Run until quit, restoring the terminal on the way out
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while !self.should_quit {
            let now = self.now_ms();
            self.pump(now);
            terminal.draw(|f| self.draw(f, now))?;

            if event::poll(Duration::from_millis(30))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(&key, self.now_ms());
                    }
                }
            }
        }
        tracing::info!("goodbye");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(2, Avatar::Fox, Some(99))
    }

    fn type_answer(app: &mut App, text: &str, now: TimeMs) {
        for c in text.chars() {
            app.handle_key(&press(KeyCode::Char(c)), now);
        }
        app.handle_key(&press(KeyCode::Enter), now);
    }

    fn expected_answer(app: &App) -> String {
        app.screen.as_ref().unwrap().challenge.expected.clone()
    }

    #[test]
    fn test_launch_and_solve_one_challenge() {
        let mut app = app();
        app.launch(ExerciseKind::Addition, 0);

        let expected = expected_answer(&app);
        type_answer(&mut app, &expected, 10);

        let screen = app.screen.as_ref().unwrap();
        assert_eq!(screen.session.stars_achieved(), 1);
        assert!(screen.answer.is_empty());
    }

    #[test]
    fn test_advance_swaps_the_challenge() {
        let mut app = app();
        app.launch(ExerciseKind::Addition, 0);

        // The app's stream is seeded, so a twin provider predicts it
        let mut reference = ExerciseKind::Addition.provider();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let first_ref = reference.generate(&mut rng);
        let second_ref = reference.generate(&mut rng);
        assert_eq!(app.screen.as_ref().unwrap().challenge, first_ref);

        let expected = expected_answer(&app);
        type_answer(&mut app, &expected, 10);
        app.pump(510);

        assert_eq!(app.screen.as_ref().unwrap().challenge, second_ref);
    }

    #[test]
    fn test_wrong_answer_spends_a_life_keeps_challenge() {
        let mut app = app();
        app.launch(ExerciseKind::Addition, 0);
        let before = app.screen.as_ref().unwrap().challenge.clone();
        let expected = expected_answer(&app);
        let wrong = if expected == "0" { "1" } else { "0" };

        type_answer(&mut app, wrong, 10);
        app.pump(20);

        let screen = app.screen.as_ref().unwrap();
        assert_eq!(screen.session.lives_remaining(), 2);
        assert_eq!(screen.challenge, before);
    }

    #[test]
    fn test_completion_marks_menu_and_navigates_home() {
        let mut app = app();
        app.launch(ExerciseKind::Addition, 0);

        let first = expected_answer(&app);
        type_answer(&mut app, &first, 10);
        app.pump(510);
        let second = expected_answer(&app);
        type_answer(&mut app, &second, 600);
        app.pump(600);

        assert!(app.menu.is_completed(ExerciseKind::Addition));
        assert!(app.screen.is_some());

        // Navigation back fires 2600 ms after the completing hit
        app.pump(3300);
        assert!(app.screen.is_none());
    }

    #[test]
    fn test_three_misses_navigate_home() {
        let mut app = app();
        app.launch(ExerciseKind::Addition, 0);

        let mut now = 10;
        for _ in 0..3 {
            let expected = expected_answer(&app);
            let wrong = if expected == "0" { "1" } else { "0" };
            type_answer(&mut app, wrong, now);
            now += 1200;
            app.pump(now);
        }

        assert!(app.screen.is_some());
        app.pump(now + 2100);
        assert!(app.screen.is_none());
        assert!(!app.menu.is_completed(ExerciseKind::Addition));
    }

    #[test]
    fn test_choice_exercise_submits_selection() {
        let mut app = app();
        app.launch(ExerciseKind::Comparison, 0);

        let expected = expected_answer(&app);
        let options = match &app.screen.as_ref().unwrap().challenge.widget {
            InputWidget::Choices(options) => options.clone(),
            other => panic!("unexpected widget {:?}", other),
        };
        let target = options.iter().position(|o| *o == expected).unwrap();

        for _ in 0..target {
            app.handle_key(&press(KeyCode::Right), 10);
        }
        app.handle_key(&press(KeyCode::Enter), 10);

        assert_eq!(app.screen.as_ref().unwrap().session.stars_achieved(), 1);
    }

    #[test]
    fn test_empty_digit_answer_is_not_submitted() {
        let mut app = app();
        app.launch(ExerciseKind::Addition, 0);
        app.handle_key(&press(KeyCode::Enter), 10);

        let screen = app.screen.as_ref().unwrap();
        assert_eq!(screen.session.stars_achieved(), 0);
        assert_eq!(screen.session.lives_remaining(), 3);
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let mut app = app();
        app.launch(ExerciseKind::Addition, 0);
        app.handle_key(&press(KeyCode::Esc), 10);
        assert!(app.screen.is_none());
    }

    #[test]
    fn test_exercise_avatar_and_home_keys() {
        let mut app = app();
        app.launch(ExerciseKind::Addition, 0);

        // 'a' swaps the header avatar without leaving the exercise
        app.handle_key(&press(KeyCode::Char('a')), 10);
        assert_eq!(app.menu.avatar, Avatar::Owl);
        assert!(app.screen.is_some());
        assert_eq!(app.screen.as_ref().unwrap().session.stars_achieved(), 0);

        // 'h' goes home just like Esc
        app.handle_key(&press(KeyCode::Char('h')), 20);
        assert!(app.screen.is_none());
    }

    #[test]
    fn test_menu_launches_selected_exercise() {
        let mut app = app();
        app.handle_key(&press(KeyCode::Down), 0);
        app.handle_key(&press(KeyCode::Enter), 0);

        let config = app.screen.as_ref().unwrap().session.config();
        assert_eq!(config.exercise, ExerciseKind::Subtraction);
    }

    #[test]
    fn test_submission_during_shatter_is_declined() {
        let mut app = app();
        app.launch(ExerciseKind::Addition, 0);
        let expected = expected_answer(&app);
        let wrong = if expected == "0" { "1" } else { "0" };
        type_answer(&mut app, wrong, 10);

        // Mid-animation the right answer must not score
        let expected = expected_answer(&app);
        type_answer(&mut app, &expected, 200);
        let screen = app.screen.as_ref().unwrap();
        assert_eq!(screen.session.stars_achieved(), 0);
    }
}
