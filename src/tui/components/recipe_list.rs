//! # RecipeList Component
//!
//! Scrollable column of recipe cards with keyboard selection.
//!
//! `RecipeList` is a transient component (created each frame) that wraps
//! `&'a mut RecipeListState` (persistent state) and the current recipe slice
//! (props). Card heights are measured with `Paragraph::line_count` and cached
//! per (recipe count, width); recipes are immutable once received, so the
//! cache only invalidates when the batch is replaced or the terminal resizes.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::Recipe;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the recipe list.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeEvent {
    /// Enter on the selected card: open a chat about that recipe.
    StartChat(usize),
}

/// Scroll, selection, and layout state. Persisted in the parent TuiState.
pub struct RecipeListState {
    pub scroll_state: ScrollViewState,
    pub selected: usize,
    /// Cached card heights for the current (count, width).
    heights: Vec<u16>,
    cached_count: usize,
    cached_width: u16,
    viewport_height: u16,
    recipe_count: usize,
}

impl Default for RecipeListState {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            selected: 0,
            heights: Vec::new(),
            cached_count: 0,
            cached_width: 0,
            viewport_height: 0,
            recipe_count: 0,
        }
    }

    /// Call when a new batch of recipes replaces the old one.
    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
        self.selected = 0;
        self.heights.clear();
        self.cached_count = 0;
        self.cached_width = 0;
    }

    /// Scroll so the selected card is fully visible. Cards taller than the
    /// viewport align their top edge.
    fn scroll_to_selected(&mut self) {
        if self.selected >= self.heights.len() {
            return;
        }
        let card_top: u16 = self.heights[..self.selected].iter().sum();
        let card_bottom = card_top + self.heights[self.selected];
        let offset_y = self.scroll_state.offset().y;

        if card_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: card_top });
        } else if card_bottom > offset_y + self.viewport_height {
            let new_y = card_bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }
}

impl EventHandler for RecipeListState {
    type Event = RecipeEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<RecipeEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.scroll_to_selected();
                None
            }
            TuiEvent::CursorDown => {
                if self.selected + 1 < self.recipe_count {
                    self.selected += 1;
                }
                self.scroll_to_selected();
                None
            }
            TuiEvent::Submit => {
                if self.recipe_count > 0 {
                    Some(RecipeEvent::StartChat(self.selected))
                } else {
                    None
                }
            }
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                None
            }
            _ => None,
        }
    }
}

pub struct RecipeList<'a> {
    pub state: &'a mut RecipeListState,
    pub recipes: &'a [Recipe],
    pub focused: bool,
}

impl<'a> RecipeList<'a> {
    pub fn new(state: &'a mut RecipeListState, recipes: &'a [Recipe], focused: bool) -> Self {
        Self {
            state,
            recipes,
            focused,
        }
    }
}

/// Human-readable timing line: prefers split prep/cook times, falls back to
/// the single estimate, omits the line entirely when neither is present.
fn timing_line(recipe: &Recipe) -> Option<String> {
    match (recipe.prep_time_minutes, recipe.cook_time_minutes) {
        (Some(prep), Some(cook)) => Some(format!(
            "Prep {prep} min + cook {cook} min ({} total)",
            prep + cook
        )),
        (Some(prep), None) => Some(format!("Prep {prep} min")),
        (None, Some(cook)) => Some(format!("Cook {cook} min")),
        (None, None) => recipe
            .estimated_time_minutes
            .map(|est| format!("About {est} min")),
    }
}

fn card_lines(recipe: &Recipe) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(intro) = &recipe.intro {
        lines.push(Line::from(Span::styled(
            intro.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    let mut meta = Vec::new();
    if let Some(timing) = timing_line(recipe) {
        meta.push(timing);
    }
    if !recipe.difficulty.is_empty() {
        meta.push(format!("Difficulty: {}", recipe.difficulty));
    }
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(
            meta.join("  |  "),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if !recipe.ingredients.is_empty() {
        let names: Vec<String> = recipe
            .ingredients
            .iter()
            .map(|i| match &i.amount {
                Some(amount) => format!("{} ({amount})", i.name),
                None => i.name.clone(),
            })
            .collect();
        lines.push(Line::from(format!("Ingredients: {}", names.join(", "))));
    }
    for (n, step) in recipe.instructions.iter().enumerate() {
        lines.push(Line::from(format!("  {}. {step}", n + 1)));
    }
    if let Some(comment) = &recipe.sanji_comment {
        lines.push(Line::from(Span::styled(
            format!("Chef: \"{comment}\""),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines
}

fn card_paragraph(recipe: &Recipe, selected: bool, focused: bool) -> Paragraph<'static> {
    let border_style = if selected && focused {
        Style::default().fg(Color::Cyan)
    } else if selected {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            format!(" {} ", recipe.name),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::horizontal(1));
    Paragraph::new(card_lines(recipe))
        .wrap(Wrap { trim: false })
        .block(block)
}

fn card_height(recipe: &Recipe, width: u16) -> u16 {
    // line_count includes the block's borders and padding.
    card_paragraph(recipe, false, false).line_count(width) as u16
}

impl<'a> Component for RecipeList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.recipe_count = self.recipes.len();
        self.state.viewport_height = area.height;
        if self.recipes.is_empty() {
            let hint = Paragraph::new(
                "No recipes yet. Fill the pantry and ask the chef (Ctrl+S).",
            )
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Recipes "));
            frame.render_widget(hint, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // scrollbar gutter

        if self.state.cached_count != self.recipes.len()
            || self.state.cached_width != content_width
        {
            self.state.heights = self
                .recipes
                .iter()
                .map(|r| card_height(r, content_width))
                .collect();
            self.state.cached_count = self.recipes.len();
            self.state.cached_width = content_width;
        }

        let total_height: u16 = self.state.heights.iter().sum();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (i, recipe) in self.recipes.iter().enumerate() {
            let height = self.state.heights[i];
            let card_rect = Rect::new(0, y_offset, content_width, height);
            let selected = i == self.state.selected;
            scroll_view.render_widget(card_paragraph(recipe, selected, self.focused), card_rect);
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_recipe;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_selection_moves_and_clamps() {
        let mut state = RecipeListState::new();
        state.recipe_count = 2;
        state.heights = vec![5, 5];
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, 1);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, 1);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_enter_starts_chat_for_selected() {
        let mut state = RecipeListState::new();
        state.recipe_count = 3;
        state.heights = vec![5, 5, 5];
        state.selected = 2;
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(RecipeEvent::StartChat(2))
        );
    }

    #[test]
    fn test_enter_with_no_recipes_is_ignored() {
        let mut state = RecipeListState::new();
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_reset_clears_selection_and_cache() {
        let mut state = RecipeListState::new();
        state.selected = 2;
        state.heights = vec![5, 5, 5];
        state.cached_count = 3;
        state.reset();
        assert_eq!(state.selected, 0);
        assert!(state.heights.is_empty());
    }

    #[test]
    fn test_timing_line_variants() {
        let mut recipe = test_recipe("Omelette");
        assert_eq!(
            timing_line(&recipe).as_deref(),
            Some("Prep 5 min + cook 10 min (15 total)")
        );
        recipe.prep_time_minutes = None;
        recipe.cook_time_minutes = None;
        recipe.estimated_time_minutes = Some(25);
        assert_eq!(timing_line(&recipe).as_deref(), Some("About 25 min"));
        recipe.estimated_time_minutes = None;
        assert_eq!(timing_line(&recipe), None);
    }

    #[test]
    fn test_render_shows_cards() {
        let recipes = vec![test_recipe("Omelette"), test_recipe("Garlic Pasta")];
        let mut state = RecipeListState::new();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let mut list = RecipeList::new(&mut state, &recipes, true);
                list.render(f, f.area());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Omelette"));
        assert!(text.contains("1. Crack eggs."));
        assert!(text.contains("Don't rush it."));
    }

    #[test]
    fn test_render_empty_hint() {
        let mut state = RecipeListState::new();
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let mut list = RecipeList::new(&mut state, &[], true);
                list.render(f, f.area());
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No recipes yet."));
    }
}
