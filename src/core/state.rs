//! # Application State
//!
//! Core business state for Sous. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── kitchen: Arc<dyn KitchenClient>   // remote backend seam
//! ├── ingredients_text, difficulty,     // pantry form fields
//! │   time_limit_minutes, mood,
//! │   assistant_mode, image
//! ├── detecting / loading: bool         // busy flags per operation
//! ├── detect_error / recipe_error       // per-operation error slots
//! ├── recipes: Vec<Recipe>              // last response, replaced in full
//! ├── chef_mood: Option<ChefMood>       // header caption state
//! └── chat: Option<ChatSession>         // dish chat, one recipe at a time
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs
//! (plus plain form-field edits from the TUI). This keeps the submission
//! lifecycles predictable and testable.

use std::sync::Arc;

use crate::api::{
    AssistantMode, ChatMessage, ChefMood, Delivery, Difficulty, KitchenClient, Recipe, Role,
    SelectedImage,
};
use crate::api::types::NEUTRAL_MOOD_CAPTION;
use crate::core::config::ResolvedConfig;

/// A dish chat bound to exactly one recipe. Dropped whole on close, so
/// nothing survives the Closed transition.
pub struct ChatSession {
    pub recipe: Recipe,
    pub messages: Vec<ChatMessage>,
    pub sending: bool,
    pub error: Option<String>,
}

impl ChatSession {
    pub fn new(recipe: Recipe) -> Self {
        Self {
            recipe,
            messages: Vec::new(),
            sending: false,
            error: None,
        }
    }

    /// Resolves the delivery status of the most recent pending user message.
    pub fn mark_last_pending(&mut self, delivery: Delivery) {
        if let Some(message) = self
            .messages
            .iter_mut()
            .rev()
            .find(|m| m.role == Role::User && m.delivery == Delivery::Pending)
        {
            message.delivery = delivery;
        }
    }
}

pub struct App {
    pub kitchen: Arc<dyn KitchenClient>,
    // Pantry form fields. Edited directly by the form component; the
    // submission lifecycle reads them through the reducer.
    pub ingredients_text: String,
    pub difficulty: Difficulty,
    pub time_limit_minutes: u32,
    pub mood: String,
    pub assistant_mode: AssistantMode,
    /// Currently selected ingredient photo. Replacing or clearing the
    /// selection releases the previous handle.
    pub image: Option<SelectedImage>,
    // Busy flags for the two pantry-side operations.
    pub detecting: bool,
    pub loading: bool,
    // One error slot per operation, so an unrelated completion never
    // clobbers another operation's message.
    pub detect_error: Option<String>,
    pub recipe_error: Option<String>,
    /// Last recipe response, replaced in full on each submission.
    pub recipes: Vec<Recipe>,
    /// Mood hint from the most recent first recipe. None renders neutral.
    pub chef_mood: Option<ChefMood>,
    pub chat: Option<ChatSession>,
}

impl App {
    pub fn new(kitchen: Arc<dyn KitchenClient>) -> Self {
        Self {
            kitchen,
            ingredients_text: String::new(),
            difficulty: Difficulty::Easy,
            time_limit_minutes: 20,
            mood: String::from("casual dinner alone"),
            assistant_mode: AssistantMode::Chill,
            image: None,
            detecting: false,
            loading: false,
            detect_error: None,
            recipe_error: None,
            recipes: Vec::new(),
            chef_mood: None,
            chat: None,
        }
    }

    /// Builds an App prefilled from the resolved config's form defaults.
    pub fn from_config(kitchen: Arc<dyn KitchenClient>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(kitchen);
        app.difficulty = config.difficulty;
        app.time_limit_minutes = config.time_limit_minutes;
        app.mood = config.mood.clone();
        app.assistant_mode = config.assistant_mode;
        app
    }

    /// Replaces the selected photo. The previous handle, if any, is released.
    pub fn set_image(&mut self, image: Option<SelectedImage>) {
        self.image = image;
    }

    /// Header caption for the current mood hint.
    pub fn mood_caption(&self) -> &'static str {
        self.chef_mood
            .map(ChefMood::caption)
            .unwrap_or(NEUTRAL_MOOD_CAPTION)
    }
}
