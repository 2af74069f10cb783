//! Ratatui rendering for the menu and exercise screens
//!
//! Line builders are pure functions over session state so the visual
//! rules (heart colors, banner styling, star counts) stay testable
//! without a terminal; the draw functions only arrange them.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::core::types::Avatar;
use crate::exercises::{ExerciseKind, InputWidget};
use crate::session::feedback::FeedbackMessage;
use crate::session::hearts::HeartPhase;
use crate::ui::state::MenuState;

/// Everything the exercise screen needs for one frame
pub struct ExerciseView<'a> {
    pub avatar: Avatar,
    pub title: &'a str,
    pub stars_achieved: u32,
    pub total_stars: u32,
    pub hearts: &'a [HeartPhase],
    pub prompt: &'a str,
    pub widget: &'a InputWidget,
    pub answer: &'a str,
    pub choice_idx: usize,
    pub feedback: Option<&'a FeedbackMessage>,
}

/// Header with the companion and the star progress
pub fn header_line(avatar: Avatar, achieved: u32, total: u32) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{} {}  ", avatar.glyph(), avatar.label())),
        stars_span(achieved, total),
    ])
}

fn stars_span(achieved: u32, total: u32) -> Span<'static> {
    // Symbol rows get unwieldy past ten stars
    let text = if total <= 10 {
        format!(
            "{}{}",
            "★".repeat(achieved as usize),
            "☆".repeat(total.saturating_sub(achieved) as usize)
        )
    } else {
        format!("★ {} / {}", achieved, total)
    };
    Span::styled(text, Style::default().fg(Color::Yellow))
}

fn heart_style(phase: HeartPhase) -> Style {
    match phase {
        HeartPhase::Filled => Style::default().fg(Color::Red),
        HeartPhase::Pulsing => Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
        HeartPhase::Breaking => Style::default().fg(Color::Yellow),
        HeartPhase::Empty => Style::default().fg(Color::DarkGray),
    }
}

/// Hearts row, one styled glyph per life slot
pub fn hearts_line(phases: &[HeartPhase]) -> Line<'static> {
    let mut spans = Vec::with_capacity(phases.len() * 2);
    for phase in phases {
        spans.push(Span::styled(phase.glyph().to_string(), heart_style(*phase)));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Feedback banner, colored by kind; empty when nothing shows
pub fn banner_line(feedback: Option<&FeedbackMessage>) -> Line<'static> {
    match feedback {
        Some(message) => Line::from(Span::styled(
            message.text.clone(),
            Style::default()
                .fg(message.kind.color())
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(""),
    }
}

/// The answer in progress: typed digits or the highlighted choice row
pub fn answer_line(widget: &InputWidget, answer: &str, choice_idx: usize) -> Line<'static> {
    match widget {
        InputWidget::Digits { max_len } => {
            let mut spans = vec![Span::styled(
                answer.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if answer.len() < *max_len {
                spans.push(Span::styled("_", Style::default().fg(Color::DarkGray)));
            }
            Line::from(spans)
        }
        InputWidget::Choices(options) => {
            let mut spans = Vec::new();
            for (i, option) in options.iter().enumerate() {
                let style = if i == choice_idx {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(format!(" {} ", option), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        }
    }
}

fn menu_item(kind: ExerciseKind, completed: bool) -> ListItem<'static> {
    let marker = if completed { "🏅 " } else { "   " };
    ListItem::new(Line::from(vec![
        Span::raw(marker),
        Span::raw(kind.title().to_string()),
    ]))
}

/// Draw the exercise-picker screen
pub fn draw_menu(f: &mut Frame, menu: &MenuState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.size());

    let header = Paragraph::new(Line::from(format!(
        "{}  Mathsprout - pick an exercise",
        menu.avatar.glyph()
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = ExerciseKind::all()
        .iter()
        .map(|kind| menu_item(*kind, menu.is_completed(*kind)))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("➜ ");
    let mut state = ListState::default();
    state.select(Some(menu.selected));
    f.render_stateful_widget(list, chunks[1], &mut state);

    let footer = Paragraph::new(Line::from(
        "Up/Down pick | Enter start | a companion | q quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[2]);
}

/// Draw the running exercise screen
pub fn draw_exercise(f: &mut Frame, view: &ExerciseView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(f.size());

    let header = Paragraph::new(header_line(
        view.avatar,
        view.stars_achieved,
        view.total_stars,
    ))
    .block(Block::default().borders(Borders::ALL).title(view.title))
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    f.render_widget(
        Paragraph::new(hearts_line(view.hearts)).alignment(Alignment::Center),
        chunks[1],
    );

    let prompt = Paragraph::new(Line::from(Span::styled(
        view.prompt.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(prompt, chunks[2]);

    let answer = Paragraph::new(answer_line(view.widget, view.answer, view.choice_idx))
        .block(Block::default().borders(Borders::ALL).title("Your answer"))
        .alignment(Alignment::Center);
    f.render_widget(answer, chunks[3]);

    f.render_widget(
        Paragraph::new(banner_line(view.feedback)).alignment(Alignment::Center),
        chunks[4],
    );

    let hint = match view.widget {
        InputWidget::Digits { .. } => "Type the answer, Enter to check | Esc menu",
        InputWidget::Choices(_) => "Left/Right pick, Enter to check | Esc menu",
    };
    f.render_widget(
        Paragraph::new(Line::from(hint)).style(Style::default().fg(Color::DarkGray)),
        chunks[5],
    );
}

/// Keep drawing inside the terminal even when tiny
pub fn min_size_ok(area: Rect) -> bool {
    area.width >= 30 && area.height >= 12
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::feedback::FeedbackKind;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_hearts_line_styles_each_phase() {
        let line = hearts_line(&[
            HeartPhase::Filled,
            HeartPhase::Breaking,
            HeartPhase::Empty,
        ]);
        // Glyph spans interleaved with separators
        assert_eq!(line.spans[0].content, "♥");
        assert_eq!(line.spans[0].style.fg, Some(Color::Red));
        assert_eq!(line.spans[2].content, "✸");
        assert_eq!(line.spans[2].style.fg, Some(Color::Yellow));
        assert_eq!(line.spans[4].content, "♡");
        assert_eq!(line.spans[4].style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_banner_uses_kind_color() {
        let message = FeedbackMessage::shell_default(FeedbackKind::GameOver);
        let line = banner_line(Some(&message));
        assert_eq!(line.spans[0].style.fg, Some(FeedbackKind::GameOver.color()));

        let empty = banner_line(None);
        assert_eq!(empty.spans.len(), 1);
        assert_eq!(empty.spans[0].content, "");
    }

    #[test]
    fn test_star_row_switches_to_numbers_when_long() {
        let short = header_line(Avatar::Fox, 2, 5);
        let row = short.spans[1].content.to_string();
        assert_eq!(row, "★★☆☆☆");

        let long = header_line(Avatar::Fox, 3, 12);
        assert!(long.spans[1].content.contains("3 / 12"));
    }

    #[test]
    fn test_digit_answer_shows_cursor_until_full() {
        let widget = InputWidget::Digits { max_len: 2 };
        let partial = answer_line(&widget, "4", 0);
        assert_eq!(partial.spans.len(), 2);
        assert_eq!(partial.spans[1].content, "_");

        let full = answer_line(&widget, "42", 0);
        assert_eq!(full.spans.len(), 1);
    }

    #[test]
    fn test_choice_answer_highlights_selection() {
        let widget = InputWidget::Choices(vec!["<".into(), "=".into(), ">".into()]);
        let line = answer_line(&widget, "", 1);
        // Spans alternate option/separator; option i sits at 2 * i
        assert_eq!(line.spans[2].style.bg, Some(Color::Yellow));
        assert_eq!(line.spans[0].style.bg, None);
    }

    #[test]
    fn test_exercise_screen_renders_prompt_and_hearts() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();

        let widget = InputWidget::Digits { max_len: 2 };
        let view = ExerciseView {
            avatar: Avatar::Fox,
            title: "Addition",
            stars_achieved: 1,
            total_stars: 5,
            hearts: &[HeartPhase::Filled, HeartPhase::Filled, HeartPhase::Empty],
            prompt: "7 + 5 = ?",
            widget: &widget,
            answer: "1",
            choice_idx: 0,
            feedback: None,
        };
        terminal.draw(|f| draw_exercise(f, &view)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("7 + 5 = ?"));
        assert!(screen.contains("♡"));
        assert!(screen.contains("Addition"));
    }

    #[test]
    fn test_menu_renders_catalog_titles() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let menu = MenuState::default();

        terminal.draw(|f| draw_menu(f, &menu)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Addition"));
        assert!(screen.contains("Subtraction"));
    }
}
