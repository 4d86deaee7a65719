//! # PantryForm Component
//!
//! The pantry input form: photo path, ingredients text, difficulty, time
//! limit, mood, and assistant mode.
//!
//! The form is a controlled component: every field except the uncommitted
//! photo path lives in core `App` state (detection merges back into the
//! ingredients text, so core has to own it). The component owns only focus
//! and the photo path buffer, and edits `App` fields directly as keys
//! arrive, emitting `FormEvent`s for anything with a lifecycle.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::core::state::App;
use crate::tui::event::TuiEvent;

/// Fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ImagePath,
    Ingredients,
    Difficulty,
    TimeLimit,
    Mood,
    AssistantMode,
}

impl FormField {
    fn next(self) -> FormField {
        match self {
            FormField::ImagePath => FormField::Ingredients,
            FormField::Ingredients => FormField::Difficulty,
            FormField::Difficulty => FormField::TimeLimit,
            FormField::TimeLimit => FormField::Mood,
            FormField::Mood => FormField::AssistantMode,
            FormField::AssistantMode => FormField::ImagePath,
        }
    }

    fn prev(self) -> FormField {
        match self {
            FormField::ImagePath => FormField::AssistantMode,
            FormField::Ingredients => FormField::ImagePath,
            FormField::Difficulty => FormField::Ingredients,
            FormField::TimeLimit => FormField::Difficulty,
            FormField::Mood => FormField::TimeLimit,
            FormField::AssistantMode => FormField::Mood,
        }
    }
}

/// Events emitted by the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Submit the pantry request (Enter outside the photo field, or Ctrl+S).
    Submit,
    /// Detect ingredients from the selected photo (Ctrl+D).
    Detect,
    /// Photo path committed with Enter. None = field was empty (clear the
    /// selection).
    ImageCommitted(Option<String>),
}

/// Persistent form state; lives in `TuiState`.
pub struct PantryFormState {
    pub focus: FormField,
    /// Photo path being typed; committed with Enter.
    pub image_path: String,
}

impl Default for PantryFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl PantryFormState {
    pub fn new() -> Self {
        Self {
            focus: FormField::ImagePath,
            image_path: String::new(),
        }
    }

    /// Handle a key event, editing `app`'s form fields in place.
    pub fn handle_event(&mut self, event: &TuiEvent, app: &mut App) -> Option<FormEvent> {
        match event {
            TuiEvent::FocusNext | TuiEvent::CursorDown => {
                self.focus = self.focus.next();
                None
            }
            TuiEvent::FocusPrev | TuiEvent::CursorUp => {
                self.focus = self.focus.prev();
                None
            }
            TuiEvent::Detect => Some(FormEvent::Detect),
            TuiEvent::SubmitForm => Some(FormEvent::Submit),
            TuiEvent::Submit => {
                if self.focus == FormField::ImagePath {
                    let path = self.image_path.trim();
                    if path.is_empty() {
                        Some(FormEvent::ImageCommitted(None))
                    } else {
                        Some(FormEvent::ImageCommitted(Some(path.to_string())))
                    }
                } else {
                    Some(FormEvent::Submit)
                }
            }
            TuiEvent::InputChar(c) => {
                match self.focus {
                    FormField::ImagePath => self.image_path.push(*c),
                    FormField::Ingredients => app.ingredients_text.push(*c),
                    FormField::Mood => app.mood.push(*c),
                    FormField::TimeLimit => {
                        if let Some(digit) = c.to_digit(10) {
                            app.time_limit_minutes =
                                (app.time_limit_minutes * 10 + digit).min(999);
                        }
                    }
                    FormField::Difficulty | FormField::AssistantMode => {}
                }
                None
            }
            TuiEvent::Paste(text) => {
                match self.focus {
                    FormField::ImagePath => self.image_path.push_str(text.trim()),
                    FormField::Ingredients => app.ingredients_text.push_str(text),
                    FormField::Mood => app.mood.push_str(text),
                    FormField::TimeLimit => {
                        for digit in text.chars().filter_map(|c| c.to_digit(10)) {
                            app.time_limit_minutes =
                                (app.time_limit_minutes * 10 + digit).min(999);
                        }
                    }
                    FormField::Difficulty | FormField::AssistantMode => {}
                }
                None
            }
            TuiEvent::Backspace => {
                match self.focus {
                    FormField::ImagePath => {
                        self.image_path.pop();
                    }
                    FormField::Ingredients => {
                        app.ingredients_text.pop();
                    }
                    FormField::Mood => {
                        app.mood.pop();
                    }
                    FormField::TimeLimit => {
                        app.time_limit_minutes /= 10;
                    }
                    FormField::Difficulty | FormField::AssistantMode => {}
                }
                None
            }
            TuiEvent::CursorLeft => {
                match self.focus {
                    FormField::Difficulty => app.difficulty = app.difficulty.prev(),
                    FormField::AssistantMode => app.assistant_mode = app.assistant_mode.prev(),
                    _ => {}
                }
                None
            }
            TuiEvent::CursorRight => {
                match self.focus {
                    FormField::Difficulty => app.difficulty = app.difficulty.next(),
                    FormField::AssistantMode => app.assistant_mode = app.assistant_mode.next(),
                    _ => {}
                }
                None
            }
            _ => None,
        }
    }
}

/// Fixed height of the form region, including borders.
pub const FORM_HEIGHT: u16 = 10;

/// Transient render wrapper: persistent state plus core props.
pub struct PantryForm<'a> {
    pub state: &'a PantryFormState,
    pub app: &'a App,
}

impl<'a> PantryForm<'a> {
    pub fn new(state: &'a PantryFormState, app: &'a App) -> Self {
        Self { state, app }
    }

    fn field_style(&self, field: FormField) -> Style {
        if self.state.focus == field {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    fn line(&self, label: &'static str, value: String, field: FormField) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("{label:<13}"), Style::default().fg(Color::DarkGray)),
            Span::styled(value, self.field_style(field)),
        ])
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let photo_value = if self.state.image_path.is_empty() {
            "(type a path, Enter to select)".to_string()
        } else {
            self.state.image_path.clone()
        };
        let selected_value = match &self.app.image {
            Some(image) => format!("Selected: {}  (Ctrl+D to detect)", image.describe()),
            None => String::new(),
        };
        let ingredients_value = if self.app.ingredients_text.is_empty() {
            "chicken, butter, garlic, pasta...".to_string()
        } else {
            self.app.ingredients_text.replace('\n', " / ")
        };

        let mut lines = vec![
            self.line("Photo:", photo_value, FormField::ImagePath),
            Line::from(Span::styled(
                format!("{:<13}{selected_value}", ""),
                Style::default().fg(Color::DarkGray),
            )),
            error_line(self.app.detect_error.as_deref()),
            self.line("Ingredients:", ingredients_value, FormField::Ingredients),
            Line::from(vec![
                Span::styled("Difficulty:  ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("< {} >", self.app.difficulty.label()),
                    self.field_style(FormField::Difficulty),
                ),
                Span::styled("   Time (min): ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    self.app.time_limit_minutes.to_string(),
                    self.field_style(FormField::TimeLimit),
                ),
            ]),
            self.line("Mood:", self.app.mood.clone(), FormField::Mood),
            Line::from(vec![
                Span::styled("Mode:        ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("< {} >", self.app.assistant_mode.label()),
                    self.field_style(FormField::AssistantMode),
                ),
            ]),
            error_line(self.app.recipe_error.as_deref()),
        ];
        lines.truncate((FORM_HEIGHT as usize).saturating_sub(2));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Pantry ")
            .title_bottom(
                Line::from(" Tab Next field  Enter/Ctrl+S Ask the chef  Ctrl+D Detect ")
                    .centered(),
            )
            .title_alignment(Alignment::Left)
            .padding(Padding::horizontal(1));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn error_line(error: Option<&str>) -> Line<'static> {
    match error {
        Some(message) => Line::from(Span::styled(
            format!("! {message}"),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_focus_cycles_through_all_fields() {
        let mut state = PantryFormState::new();
        let mut app = test_app();
        assert_eq!(state.focus, FormField::ImagePath);
        for _ in 0..6 {
            state.handle_event(&TuiEvent::FocusNext, &mut app);
        }
        assert_eq!(state.focus, FormField::ImagePath);
        state.handle_event(&TuiEvent::FocusPrev, &mut app);
        assert_eq!(state.focus, FormField::AssistantMode);
    }

    #[test]
    fn test_typing_edits_ingredients_in_core_state() {
        let mut state = PantryFormState::new();
        let mut app = test_app();
        state.focus = FormField::Ingredients;
        for c in "egg".chars() {
            state.handle_event(&TuiEvent::InputChar(c), &mut app);
        }
        assert_eq!(app.ingredients_text, "egg");
        state.handle_event(&TuiEvent::Backspace, &mut app);
        assert_eq!(app.ingredients_text, "eg");
    }

    #[test]
    fn test_time_limit_edits_by_digit() {
        let mut state = PantryFormState::new();
        let mut app = test_app();
        app.time_limit_minutes = 0;
        state.focus = FormField::TimeLimit;
        state.handle_event(&TuiEvent::InputChar('4'), &mut app);
        state.handle_event(&TuiEvent::InputChar('5'), &mut app);
        assert_eq!(app.time_limit_minutes, 45);
        state.handle_event(&TuiEvent::InputChar('x'), &mut app);
        assert_eq!(app.time_limit_minutes, 45);
        state.handle_event(&TuiEvent::Backspace, &mut app);
        assert_eq!(app.time_limit_minutes, 4);
    }

    #[test]
    fn test_time_limit_clamps_at_three_digits() {
        let mut state = PantryFormState::new();
        let mut app = test_app();
        app.time_limit_minutes = 999;
        state.focus = FormField::TimeLimit;
        state.handle_event(&TuiEvent::InputChar('9'), &mut app);
        assert_eq!(app.time_limit_minutes, 999);
    }

    #[test]
    fn test_arrows_cycle_selectors() {
        use crate::api::{AssistantMode, Difficulty};
        let mut state = PantryFormState::new();
        let mut app = test_app();
        state.focus = FormField::Difficulty;
        state.handle_event(&TuiEvent::CursorRight, &mut app);
        assert_eq!(app.difficulty, Difficulty::Medium);
        state.handle_event(&TuiEvent::CursorLeft, &mut app);
        assert_eq!(app.difficulty, Difficulty::Easy);

        state.focus = FormField::AssistantMode;
        state.handle_event(&TuiEvent::CursorRight, &mut app);
        assert_eq!(app.assistant_mode, AssistantMode::Flirty);
    }

    #[test]
    fn test_enter_on_photo_field_commits_path() {
        let mut state = PantryFormState::new();
        let mut app = test_app();
        state.image_path = " /tmp/pantry.jpg ".to_string();
        let event = state.handle_event(&TuiEvent::Submit, &mut app);
        assert_eq!(
            event,
            Some(FormEvent::ImageCommitted(Some("/tmp/pantry.jpg".to_string())))
        );
    }

    #[test]
    fn test_enter_on_empty_photo_field_clears_selection() {
        let mut state = PantryFormState::new();
        let mut app = test_app();
        let event = state.handle_event(&TuiEvent::Submit, &mut app);
        assert_eq!(event, Some(FormEvent::ImageCommitted(None)));
    }

    #[test]
    fn test_enter_elsewhere_submits() {
        let mut state = PantryFormState::new();
        let mut app = test_app();
        state.focus = FormField::Mood;
        let event = state.handle_event(&TuiEvent::Submit, &mut app);
        assert_eq!(event, Some(FormEvent::Submit));
    }

    #[test]
    fn test_shortcut_events() {
        let mut state = PantryFormState::new();
        let mut app = test_app();
        assert_eq!(
            state.handle_event(&TuiEvent::Detect, &mut app),
            Some(FormEvent::Detect)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::SubmitForm, &mut app),
            Some(FormEvent::Submit)
        );
    }

    #[test]
    fn test_render_smoke() {
        let backend = TestBackend::new(80, FORM_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = PantryFormState::new();
        let mut app = test_app();
        app.recipe_error = Some("Give the chef at least one ingredient!".to_string());
        terminal
            .draw(|f| {
                let mut form = PantryForm::new(&state, &app);
                form.render(f, f.area());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Pantry"));
        assert!(text.contains("Difficulty"));
        assert!(text.contains("Give the chef at least one ingredient!"));
    }
}
