//! # ChatWindow Component
//!
//! Centered overlay for chatting about one recipe. Opened from the recipe
//! list with Enter, closed with Esc; the transcript is discarded on close.
//!
//! The input line is local to the overlay; the transcript itself lives in
//! the core `ChatSession` so replies landing while the user types still
//! append in order.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::api::{Delivery, Role};
use crate::core::state::ChatSession;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the chat overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// Enter with non-blank input: send this message.
    Send(String),
    /// Esc: close the overlay.
    Dismiss,
}

/// Input and scroll state for the overlay. Created when a chat opens,
/// dropped when it closes.
pub struct ChatWindowState {
    pub input: String,
    scroll: u16,
    stick_to_bottom: bool,
}

impl Default for ChatWindowState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatWindowState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            scroll: 0,
            stick_to_bottom: true,
        }
    }
}

impl EventHandler for ChatWindowState {
    type Event = ChatEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ChatEvent> {
        match event {
            TuiEvent::Escape => Some(ChatEvent::Dismiss),
            TuiEvent::Submit => {
                let text = self.input.trim().to_string();
                if text.is_empty() {
                    None
                } else {
                    self.input.clear();
                    self.stick_to_bottom = true;
                    Some(ChatEvent::Send(text))
                }
            }
            TuiEvent::InputChar(c) => {
                self.input.push(*c);
                None
            }
            TuiEvent::Paste(text) => {
                self.input.push_str(text);
                None
            }
            TuiEvent::Backspace => {
                self.input.pop();
                None
            }
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll = self.scroll.saturating_sub(1);
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll = self.scroll.saturating_sub(10);
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll = self.scroll.saturating_add(10);
                None
            }
            _ => None,
        }
    }
}

/// Centered rect helper for overlays.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub struct ChatWindow<'a> {
    pub state: &'a mut ChatWindowState,
    pub session: &'a ChatSession,
}

impl<'a> ChatWindow<'a> {
    pub fn new(state: &'a mut ChatWindowState, session: &'a ChatSession) -> Self {
        Self { state, session }
    }

    fn transcript_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if self.session.messages.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Chef: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!(
                        "So you picked {}, huh? Nice choice. What do you want to know about it?",
                        self.session.recipe.name
                    ),
                    Style::default().add_modifier(Modifier::ITALIC),
                ),
            ]));
        }
        for message in &self.session.messages {
            let (label, label_style) = match message.role {
                Role::User => ("You:  ", Style::default().fg(Color::Cyan)),
                Role::Assistant => ("Chef: ", Style::default().fg(Color::Yellow)),
            };
            let mut spans = vec![
                Span::styled(label, label_style),
                Span::raw(message.content.clone()),
            ];
            match message.delivery {
                Delivery::Pending => {
                    spans.push(Span::styled(
                        "  (sending...)",
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                Delivery::Failed => {
                    spans.push(Span::styled(
                        "  (not delivered)",
                        Style::default().fg(Color::Red),
                    ));
                }
                Delivery::Sent => {}
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
        if let Some(error) = &self.session.error {
            lines.push(Line::from(Span::styled(
                format!("! {error}"),
                Style::default().fg(Color::Red),
            )));
        }
        lines
    }
}

impl<'a> Component for ChatWindow<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 80, area);
        frame.render_widget(Clear, overlay);

        let title = format!(" Chat — {} ", self.session.recipe.name);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_bottom(Line::from(" Enter Send  Esc Close ").centered());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let lines = self.transcript_lines();
        let transcript = Paragraph::new(lines).wrap(Wrap { trim: false });
        let content_height = transcript.line_count(chunks[0].width) as u16;
        let max_scroll = content_height.saturating_sub(chunks[0].height);
        if self.state.stick_to_bottom || self.state.scroll > max_scroll {
            self.state.scroll = max_scroll;
        }
        frame.render_widget(transcript.scroll((self.state.scroll, 0)), chunks[0]);

        let prompt = if self.session.sending {
            Span::styled(
                "The chef is typing...",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::raw(format!("> {}", self.state.input))
        };
        frame.render_widget(Paragraph::new(Line::from(prompt)), chunks[1]);
    }
}
