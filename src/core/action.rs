//! # Actions
//!
//! Everything that can happen in Sous becomes an `Action`. The user submits
//! the pantry form? That's `Action::SubmitPantry`. The recipe endpoint
//! responds? That's `Action::RecipesReceived(result)`.
//!
//! The `update()` function takes the current state and an action and mutates
//! the state, returning an `Effect` describing the I/O (if any) the caller
//! must perform. No I/O happens here, which is what makes the submission
//! lifecycles unit-testable.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, warn};

use crate::api::{ApiError, ChatMessage, ChefMood, Delivery, DetectedIngredient, PantryRequest,
    PantryResponse, Recipe, SelectedImage};
use crate::core::pantry;
use crate::core::state::{App, ChatSession};

// User-facing messages, one per failure the spec distinguishes.
pub const MSG_CHOOSE_PHOTO: &str = "Choose a photo first.";
pub const MSG_UNREADABLE_IMAGE: &str = "The chef couldn't read that image.";
pub const MSG_NOTHING_DETECTED: &str =
    "The chef couldn't confidently detect any ingredients. Try a clearer photo.";
pub const MSG_NO_INGREDIENTS: &str = "Give the chef at least one ingredient!";
pub const MSG_KITCHEN_SLIP: &str = "The chef slipped in the kitchen. Try again.";
pub const MSG_NO_ANSWER: &str = "The chef couldn't answer that one. Try again.";

#[derive(Debug)]
pub enum Action {
    /// User asked to detect ingredients from the selected photo.
    DetectIngredients,
    DetectFinished(Result<Vec<DetectedIngredient>, ApiError>),
    /// User submitted the pantry form.
    SubmitPantry,
    RecipesReceived(Result<PantryResponse, ApiError>),
    /// User opened the dish chat for the recipe at this index.
    OpenChat(usize),
    CloseChat,
    SendChatMessage(String),
    ChatReplyReceived(Result<String, ApiError>),
    /// Escape while a pantry-side request is in flight. The caller aborts
    /// the tasks; this clears the busy flags.
    CancelPending,
    Quit,
}

/// I/O the caller must perform after `update()` returns. Payloads are owned
/// so spawning never has to re-read `App`.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    SpawnDetect(SelectedImage),
    SpawnRecipeRequest(PantryRequest),
    SpawnChat {
        recipe: Recipe,
        history: Vec<ChatMessage>,
        user_message: String,
    },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::DetectIngredients => {
            let Some(image) = app.image.clone() else {
                app.detect_error = Some(MSG_CHOOSE_PHOTO.to_string());
                return Effect::None;
            };
            app.detect_error = None;
            app.detecting = true;
            Effect::SpawnDetect(image)
        }

        Action::DetectFinished(result) => {
            app.detecting = false;
            match result {
                Err(e) => {
                    warn!("Ingredient detection failed: {e}");
                    app.detect_error = Some(MSG_UNREADABLE_IMAGE.to_string());
                }
                Ok(detected) => {
                    let names: Vec<String> = detected
                        .into_iter()
                        .map(|ingredient| ingredient.name.trim().to_string())
                        .filter(|name| !name.is_empty())
                        .collect();
                    if names.is_empty() {
                        app.detect_error = Some(MSG_NOTHING_DETECTED.to_string());
                    } else {
                        debug!("Merging {} detected name(s)", names.len());
                        app.ingredients_text =
                            pantry::merge_detected(&app.ingredients_text, &names);
                    }
                }
            }
            Effect::None
        }

        Action::SubmitPantry => {
            let ingredients = pantry::split_ingredients(&app.ingredients_text);
            if ingredients.is_empty() {
                app.recipe_error = Some(MSG_NO_INGREDIENTS.to_string());
                return Effect::None;
            }
            app.recipe_error = None;
            app.recipes.clear();
            app.loading = true;
            Effect::SpawnRecipeRequest(PantryRequest {
                ingredients,
                difficulty: app.difficulty,
                time_limit_minutes: app.time_limit_minutes,
                mood: app.mood.clone(),
                assistant_mode: app.assistant_mode,
            })
        }

        Action::RecipesReceived(result) => {
            app.loading = false;
            match result {
                Err(e) => {
                    warn!("Recipe request failed: {e}");
                    app.recipe_error = Some(MSG_KITCHEN_SLIP.to_string());
                }
                Ok(response) => {
                    app.recipes = response.recipes;
                    if let Some(mood) = app.recipes.first().and_then(|r| r.sanji_mood.as_deref()) {
                        app.chef_mood = ChefMood::from_wire(mood);
                    }
                }
            }
            Effect::None
        }

        Action::OpenChat(index) => {
            // Reopening always yields a fresh, empty transcript.
            if let Some(recipe) = app.recipes.get(index) {
                app.chat = Some(ChatSession::new(recipe.clone()));
            }
            Effect::None
        }

        Action::CloseChat => {
            app.chat = None;
            Effect::None
        }

        Action::SendChatMessage(text) => {
            let text = text.trim().to_string();
            if text.is_empty() {
                return Effect::None;
            }
            let Some(chat) = app.chat.as_mut() else {
                return Effect::None;
            };
            chat.error = None;
            // Optimistic append: shown immediately, tagged Pending until the
            // backend answers.
            chat.messages.push(ChatMessage::user_pending(text.clone()));
            chat.sending = true;
            Effect::SpawnChat {
                recipe: chat.recipe.clone(),
                history: chat.messages.clone(),
                user_message: text,
            }
        }

        Action::ChatReplyReceived(result) => {
            // The chat may have been closed while the request was in flight;
            // the reply then has nowhere to go and is dropped.
            let Some(chat) = app.chat.as_mut() else {
                return Effect::None;
            };
            chat.sending = false;
            match result {
                Err(e) => {
                    warn!("Chat turn failed: {e}");
                    chat.mark_last_pending(Delivery::Failed);
                    chat.error = Some(MSG_NO_ANSWER.to_string());
                }
                Ok(reply) => {
                    chat.mark_last_pending(Delivery::Sent);
                    chat.messages.push(ChatMessage::assistant(reply));
                }
            }
            Effect::None
        }

        Action::CancelPending => {
            app.detecting = false;
            app.loading = false;
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::{test_app, test_recipe};

    fn recipes_ok(recipes: Vec<Recipe>) -> Action {
        Action::RecipesReceived(Ok(PantryResponse { recipes }))
    }

    fn api_error() -> ApiError {
        ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_submit_with_no_ingredients_spawns_nothing() {
        let mut app = test_app();
        app.ingredients_text = "  , \n ".to_string();
        let effect = update(&mut app, Action::SubmitPantry);
        assert_eq!(effect, Effect::None);
        assert!(!app.loading);
        assert_eq!(app.recipe_error.as_deref(), Some(MSG_NO_INGREDIENTS));
    }

    #[test]
    fn test_submit_normalizes_and_clears_prior_results() {
        let mut app = test_app();
        app.ingredients_text = "chicken, butter,, garlic\n".to_string();
        app.recipes = vec![test_recipe("Stale")];
        app.recipe_error = Some("old".to_string());

        let effect = update(&mut app, Action::SubmitPantry);
        let Effect::SpawnRecipeRequest(request) = effect else {
            panic!("expected SpawnRecipeRequest, got {effect:?}");
        };
        assert_eq!(request.ingredients, vec!["chicken", "butter", "garlic"]);
        assert!(app.loading);
        assert!(app.recipes.is_empty());
        assert!(app.recipe_error.is_none());
    }

    #[test]
    fn test_recipes_replace_list_in_response_order() {
        let mut app = test_app();
        app.loading = true;
        app.recipes = vec![test_recipe("Old")];
        update(
            &mut app,
            recipes_ok(vec![test_recipe("A"), test_recipe("B")]),
        );
        assert!(!app.loading);
        let names: Vec<_> = app.recipes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(app.recipe_error.is_none());
    }

    #[test]
    fn test_empty_recipe_response_is_not_an_error() {
        let mut app = test_app();
        app.loading = true;
        update(&mut app, recipes_ok(vec![]));
        assert!(app.recipes.is_empty());
        assert!(app.recipe_error.is_none());
        assert!(!app.loading);
    }

    #[test]
    fn test_recipe_failure_sets_error_and_clears_loading() {
        let mut app = test_app();
        app.loading = true;
        update(&mut app, Action::RecipesReceived(Err(api_error())));
        assert!(!app.loading);
        assert_eq!(app.recipe_error.as_deref(), Some(MSG_KITCHEN_SLIP));
    }

    #[test]
    fn test_mood_hint_from_first_recipe_updates_caption() {
        let mut app = test_app();
        let mut recipe = test_recipe("Tart");
        recipe.sanji_mood = Some("flirty".to_string());
        update(&mut app, recipes_ok(vec![recipe, test_recipe("Other")]));
        assert_eq!(app.mood_caption(), "The chef turns on the charm.");
    }

    #[test]
    fn test_unrecognized_mood_hint_falls_back_to_neutral() {
        let mut app = test_app();
        app.chef_mood = Some(ChefMood::Happy);
        let mut recipe = test_recipe("Tart");
        recipe.sanji_mood = Some("ecstatic".to_string());
        update(&mut app, recipes_ok(vec![recipe]));
        assert_eq!(app.mood_caption(), "The chef is listening.");
    }

    #[test]
    fn test_detect_without_image_spawns_nothing() {
        let mut app = test_app();
        let effect = update(&mut app, Action::DetectIngredients);
        assert_eq!(effect, Effect::None);
        assert!(!app.detecting);
        assert_eq!(app.detect_error.as_deref(), Some(MSG_CHOOSE_PHOTO));
    }

    #[test]
    fn test_detect_merges_names_case_sensitively() {
        let mut app = test_app();
        app.detecting = true;
        app.ingredients_text = "egg, milk".to_string();
        let detected = vec![
            DetectedIngredient {
                name: "Egg".to_string(),
            },
            DetectedIngredient {
                name: "milk".to_string(),
            },
            DetectedIngredient {
                name: "flour".to_string(),
            },
        ];
        update(&mut app, Action::DetectFinished(Ok(detected)));
        assert_eq!(app.ingredients_text, "egg, milk, Egg, flour");
        assert!(!app.detecting);
        assert!(app.detect_error.is_none());
    }

    #[test]
    fn test_detect_all_blank_names_leaves_text_untouched() {
        let mut app = test_app();
        app.detecting = true;
        app.ingredients_text = "egg".to_string();
        let detected = vec![DetectedIngredient {
            name: "   ".to_string(),
        }];
        update(&mut app, Action::DetectFinished(Ok(detected)));
        assert_eq!(app.ingredients_text, "egg");
        assert_eq!(app.detect_error.as_deref(), Some(MSG_NOTHING_DETECTED));
        assert!(!app.detecting);
    }

    #[test]
    fn test_detect_failure_sets_its_own_error_slot() {
        let mut app = test_app();
        app.detecting = true;
        app.recipe_error = Some(MSG_KITCHEN_SLIP.to_string());
        update(&mut app, Action::DetectFinished(Err(api_error())));
        assert_eq!(app.detect_error.as_deref(), Some(MSG_UNREADABLE_IMAGE));
        // The recipe slot is untouched: errors are per-operation.
        assert_eq!(app.recipe_error.as_deref(), Some(MSG_KITCHEN_SLIP));
    }

    #[test]
    fn test_open_chat_binds_recipe_with_empty_transcript() {
        let mut app = test_app();
        app.recipes = vec![test_recipe("A"), test_recipe("B")];
        update(&mut app, Action::OpenChat(1));
        let chat = app.chat.as_ref().unwrap();
        assert_eq!(chat.recipe.name, "B");
        assert!(chat.messages.is_empty());
    }

    #[test]
    fn test_open_chat_out_of_range_is_a_no_op() {
        let mut app = test_app();
        app.recipes = vec![test_recipe("A")];
        update(&mut app, Action::OpenChat(5));
        assert!(app.chat.is_none());
    }

    #[test]
    fn test_reopen_chat_discards_previous_transcript() {
        let mut app = test_app();
        app.recipes = vec![test_recipe("A")];
        update(&mut app, Action::OpenChat(0));
        app.chat.as_mut().unwrap().messages.push(ChatMessage::assistant("hi".to_string()));
        update(&mut app, Action::CloseChat);
        assert!(app.chat.is_none());
        update(&mut app, Action::OpenChat(0));
        assert!(app.chat.as_ref().unwrap().messages.is_empty());
    }

    #[test]
    fn test_send_message_appends_optimistically() {
        let mut app = test_app();
        app.recipes = vec![test_recipe("A")];
        update(&mut app, Action::OpenChat(0));
        let effect = update(
            &mut app,
            Action::SendChatMessage("  Can I use oil?  ".to_string()),
        );
        let Effect::SpawnChat {
            history,
            user_message,
            ..
        } = effect
        else {
            panic!("expected SpawnChat");
        };
        assert_eq!(user_message, "Can I use oil?");
        // History already includes the new message.
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].delivery, Delivery::Pending);

        let chat = app.chat.as_ref().unwrap();
        assert!(chat.sending);
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].role, Role::User);
    }

    #[test]
    fn test_send_blank_message_is_a_no_op() {
        let mut app = test_app();
        app.recipes = vec![test_recipe("A")];
        update(&mut app, Action::OpenChat(0));
        let effect = update(&mut app, Action::SendChatMessage("   ".to_string()));
        assert_eq!(effect, Effect::None);
        assert!(app.chat.as_ref().unwrap().messages.is_empty());
    }

    #[test]
    fn test_send_message_without_open_chat_is_a_no_op() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SendChatMessage("hello".to_string()));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_chat_failure_keeps_optimistic_message_marked_failed() {
        let mut app = test_app();
        app.recipes = vec![test_recipe("A")];
        update(&mut app, Action::OpenChat(0));
        update(&mut app, Action::SendChatMessage("hello".to_string()));
        update(&mut app, Action::ChatReplyReceived(Err(api_error())));

        let chat = app.chat.as_ref().unwrap();
        assert!(!chat.sending);
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].delivery, Delivery::Failed);
        assert_eq!(chat.error.as_deref(), Some(MSG_NO_ANSWER));
    }

    #[test]
    fn test_chat_reply_appends_assistant_and_marks_sent() {
        let mut app = test_app();
        app.recipes = vec![test_recipe("A")];
        update(&mut app, Action::OpenChat(0));
        update(&mut app, Action::SendChatMessage("hello".to_string()));
        update(
            &mut app,
            Action::ChatReplyReceived(Ok("Use butter, always.".to_string())),
        );

        let chat = app.chat.as_ref().unwrap();
        assert!(!chat.sending);
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].delivery, Delivery::Sent);
        assert_eq!(chat.messages[1].role, Role::Assistant);
        assert_eq!(chat.messages[1].content, "Use butter, always.");
        assert!(chat.error.is_none());
    }

    #[test]
    fn test_chat_reply_after_close_is_dropped() {
        let mut app = test_app();
        app.recipes = vec![test_recipe("A")];
        update(&mut app, Action::OpenChat(0));
        update(&mut app, Action::SendChatMessage("hello".to_string()));
        update(&mut app, Action::CloseChat);
        let effect = update(
            &mut app,
            Action::ChatReplyReceived(Ok("too late".to_string())),
        );
        assert_eq!(effect, Effect::None);
        assert!(app.chat.is_none());
    }

    #[test]
    fn test_cancel_pending_clears_busy_flags() {
        let mut app = test_app();
        app.detecting = true;
        app.loading = true;
        update(&mut app, Action::CancelPending);
        assert!(!app.detecting);
        assert!(!app.loading);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
