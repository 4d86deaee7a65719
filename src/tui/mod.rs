//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm. Core
//! state never touches the terminal, and the backend client never touches
//! the event loop directly: requests are spawned onto tokio from here and
//! their results come back over an action channel.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw: while a request is in flight it
//! polls every ~80ms so the busy hints stay fresh; idle it sleeps up to
//! 500ms and only redraws on events.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::api::{HttpKitchenClient, KitchenClient, SelectedImage};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ChatEvent, ChatWindowState, FormEvent, PantryFormState, RecipeEvent, RecipeListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode below the chat overlay: determines which region
/// keyboard events go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Editing the pantry form. Esc switches to Recipes.
    Form,
    /// Navigating recipe cards. Typing auto-switches back to Form.
    Recipes,
}

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub form: PantryFormState,
    pub recipe_list: RecipeListState,
    /// Chat overlay input state (None = overlay hidden).
    pub chat_window: Option<ChatWindowState>,
    pub input_mode: InputMode,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            form: PantryFormState::new(),
            recipe_list: RecipeListState::new(),
            chat_window: None,
            input_mode: InputMode::Form,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Abort handles for in-flight requests, one slot per operation so a new
/// request replaces (and aborts) only its own predecessor.
#[derive(Default)]
struct PendingRequests {
    detect: Option<AbortHandle>,
    recipes: Option<AbortHandle>,
    chat: Option<AbortHandle>,
}

impl PendingRequests {
    fn abort_pantry_side(&mut self) {
        if let Some(handle) = self.detect.take() {
            handle.abort();
        }
        if let Some(handle) = self.recipes.take() {
            handle.abort();
        }
    }

    fn abort_chat(&mut self) {
        if let Some(handle) = self.chat.take() {
            handle.abort();
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let kitchen: Arc<dyn KitchenClient> = Arc::new(HttpKitchenClient::new(config.base_url.clone()));
    let mut app = App::from_config(kitchen, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background request tasks
    let (tx, rx) = mpsc::channel();
    let mut pending = PendingRequests::default();

    let mut needs_redraw = true; // Force first frame

    loop {
        let busy = app.detecting || app.loading || app.chat.as_ref().is_some_and(|c| c.sending);
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Short poll while busy so the busy hints animate; long when idle.
        let timeout = if busy {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of mode
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // When the chat overlay is open, it owns all events
            if tui.chat_window.is_some() && app.chat.is_some() {
                let chat_event = tui
                    .chat_window
                    .as_mut()
                    .and_then(|state| state.handle_event(&event));
                match chat_event {
                    Some(ChatEvent::Send(text)) => {
                        let sending = app.chat.as_ref().is_some_and(|c| c.sending);
                        if !sending {
                            let effect = update(&mut app, Action::SendChatMessage(text));
                            should_quit |= dispatch_effect(effect, &app, &tx, &mut pending);
                        }
                    }
                    Some(ChatEvent::Dismiss) => {
                        // The in-flight turn, if any, has nowhere to land.
                        pending.abort_chat();
                        update(&mut app, Action::CloseChat);
                        tui.chat_window = None;
                    }
                    None => {}
                }
                continue;
            }

            // Esc while a pantry-side request is in flight cancels it
            if matches!(event, TuiEvent::Escape) && (app.detecting || app.loading) {
                pending.abort_pantry_side();
                update(&mut app, Action::CancelPending);
                continue;
            }

            // Detect and submit shortcuts work from either mode
            if matches!(event, TuiEvent::Detect) {
                let effect = update(&mut app, Action::DetectIngredients);
                should_quit |= dispatch_effect(effect, &app, &tx, &mut pending);
                continue;
            }
            if matches!(event, TuiEvent::SubmitForm) {
                if !app.loading {
                    let effect = update(&mut app, Action::SubmitPantry);
                    should_quit |= dispatch_effect(effect, &app, &tx, &mut pending);
                }
                continue;
            }

            match tui.input_mode {
                InputMode::Form => {
                    if matches!(event, TuiEvent::Escape) {
                        if !app.recipes.is_empty() {
                            tui.input_mode = InputMode::Recipes;
                        }
                        continue;
                    }
                    if let Some(form_event) = tui.form.handle_event(&event, &mut app) {
                        match form_event {
                            FormEvent::Submit => {
                                if !app.loading {
                                    let effect = update(&mut app, Action::SubmitPantry);
                                    should_quit |=
                                        dispatch_effect(effect, &app, &tx, &mut pending);
                                }
                            }
                            FormEvent::Detect => {
                                let effect = update(&mut app, Action::DetectIngredients);
                                should_quit |= dispatch_effect(effect, &app, &tx, &mut pending);
                            }
                            FormEvent::ImageCommitted(None) => {
                                app.set_image(None);
                                app.detect_error = None;
                            }
                            FormEvent::ImageCommitted(Some(path)) => {
                                match SelectedImage::acquire(&path) {
                                    Ok(image) => {
                                        info!("Selected photo {}", image.describe());
                                        app.set_image(Some(image));
                                        app.detect_error = None;
                                    }
                                    Err(e) => {
                                        warn!("Cannot use photo {path}: {e}");
                                        app.detect_error =
                                            Some(format!("Can't use that photo: {e}"));
                                    }
                                }
                            }
                        }
                    }
                }
                InputMode::Recipes => match event {
                    TuiEvent::Escape => {
                        tui.input_mode = InputMode::Form;
                    }
                    // Typing jumps back to the form and forwards the key
                    TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace => {
                        tui.input_mode = InputMode::Form;
                        tui.form.handle_event(&event, &mut app);
                    }
                    TuiEvent::FocusNext | TuiEvent::FocusPrev => {
                        tui.input_mode = InputMode::Form;
                    }
                    _ => {
                        if let Some(RecipeEvent::StartChat(index)) =
                            tui.recipe_list.handle_event(&event)
                        {
                            update(&mut app, Action::OpenChat(index));
                            if app.chat.is_some() {
                                tui.chat_window = Some(ChatWindowState::new());
                            }
                        }
                    }
                },
            }
        }

        if should_quit {
            break;
        }

        // Handle completions from background request tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {action:?}");
            if matches!(&action, Action::RecipesReceived(Ok(_))) {
                tui.recipe_list.reset();
                tui.input_mode = InputMode::Recipes;
            }
            let effect = update(&mut app, action);
            if dispatch_effect(effect, &app, &tx, &mut pending) {
                should_quit = true;
            }
        }
        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Perform the I/O an `Effect` asks for. Returns true when the app should
/// quit.
fn dispatch_effect(
    effect: Effect,
    app: &App,
    tx: &mpsc::Sender<Action>,
    pending: &mut PendingRequests,
) -> bool {
    match effect {
        Effect::Quit => true,
        Effect::None => false,
        Effect::SpawnDetect(image) => {
            // Latest request wins: a resubmission aborts its predecessor.
            if let Some(stale) = pending.detect.take() {
                stale.abort();
            }
            pending.detect = Some(spawn_detect(app.kitchen.clone(), image, tx.clone()));
            false
        }
        Effect::SpawnRecipeRequest(request) => {
            if let Some(stale) = pending.recipes.take() {
                stale.abort();
            }
            pending.recipes = Some(spawn_recipes(app.kitchen.clone(), request, tx.clone()));
            false
        }
        Effect::SpawnChat {
            recipe,
            history,
            user_message,
        } => {
            if let Some(stale) = pending.chat.take() {
                stale.abort();
            }
            pending.chat = Some(spawn_chat(
                app.kitchen.clone(),
                recipe,
                history,
                user_message,
                tx.clone(),
            ));
            false
        }
    }
}

fn spawn_detect(
    kitchen: Arc<dyn KitchenClient>,
    image: SelectedImage,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning ingredient detection for {}", image.file_name());
    let handle = tokio::spawn(async move {
        let result = kitchen.detect_ingredients(&image).await;
        if tx.send(Action::DetectFinished(result)).is_err() {
            warn!("Failed to deliver detection result: receiver dropped");
        }
    });
    handle.abort_handle()
}

fn spawn_recipes(
    kitchen: Arc<dyn KitchenClient>,
    request: crate::api::PantryRequest,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!(
        "Spawning recipe request ({} ingredient(s))",
        request.ingredients.len()
    );
    let handle = tokio::spawn(async move {
        let result = kitchen.recipes_from_pantry(&request).await;
        if tx.send(Action::RecipesReceived(result)).is_err() {
            warn!("Failed to deliver recipes: receiver dropped");
        }
    });
    handle.abort_handle()
}

fn spawn_chat(
    kitchen: Arc<dyn KitchenClient>,
    recipe: crate::api::Recipe,
    history: Vec<crate::api::ChatMessage>,
    user_message: String,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning chat turn for \"{}\"", recipe.name);
    let handle = tokio::spawn(async move {
        let result = kitchen.dish_chat(&recipe, &history, &user_message).await;
        if tx.send(Action::ChatReplyReceived(result)).is_err() {
            warn!("Failed to deliver chat reply: receiver dropped");
        }
    });
    handle.abort_handle()
}
