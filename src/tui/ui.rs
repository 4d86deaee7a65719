//! Top-level layout: header line, pantry form, recipe list, and the chat
//! overlay on top when a dish chat is open.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{ChatWindow, FORM_HEIGHT, Header, PantryForm, RecipeList};
use crate::tui::{InputMode, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(FORM_HEIGHT),
            Constraint::Min(0),
        ])
        .split(frame.area());

    let mut header = Header::new(app.mood_caption().to_string(), app.detecting, app.loading);
    header.render(frame, chunks[0]);

    let mut form = PantryForm::new(&tui.form, app);
    form.render(frame, chunks[1]);

    let recipes_focused = tui.input_mode == InputMode::Recipes && app.chat.is_none();
    let mut list = RecipeList::new(&mut tui.recipe_list, &app.recipes, recipes_focused);
    list.render(frame, chunks[2]);

    if let (Some(chat_state), Some(session)) = (tui.chat_window.as_mut(), app.chat.as_ref()) {
        let mut window = ChatWindow::new(chat_state, session);
        window.render(frame, frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{test_app, test_recipe};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_full_screen() {
        let mut app = test_app();
        app.recipes = vec![test_recipe("Omelette")];
        let mut tui = TuiState::new();
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Sous"));
        assert!(text.contains("Pantry"));
        assert!(text.contains("Omelette"));
    }

    #[test]
    fn test_chat_overlay_draws_on_top() {
        let mut app = test_app();
        app.recipes = vec![test_recipe("Omelette")];
        update(&mut app, Action::OpenChat(0));
        let mut tui = TuiState::new();
        tui.chat_window = Some(crate::tui::components::ChatWindowState::new());
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Chat — Omelette"));
        assert!(text.contains("So you picked Omelette, huh?"));
    }
}
