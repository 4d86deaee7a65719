//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{
    ApiError, ChatMessage, DetectedIngredient, KitchenClient, PantryRequest, PantryResponse,
    Recipe, SelectedImage,
};

/// A no-op kitchen for tests that don't need real API calls.
pub struct NoopKitchen;

#[async_trait]
impl KitchenClient for NoopKitchen {
    async fn detect_ingredients(
        &self,
        _image: &SelectedImage,
    ) -> Result<Vec<DetectedIngredient>, ApiError> {
        Ok(Vec::new())
    }

    async fn recipes_from_pantry(
        &self,
        _request: &PantryRequest,
    ) -> Result<PantryResponse, ApiError> {
        Ok(PantryResponse {
            recipes: Vec::new(),
        })
    }

    async fn dish_chat(
        &self,
        _recipe: &Recipe,
        _history: &[ChatMessage],
        _user_message: &str,
    ) -> Result<String, ApiError> {
        Ok(String::new())
    }
}

/// Creates a test App with a NoopKitchen.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopKitchen))
}

/// A minimal recipe with the given name.
pub fn test_recipe(name: &str) -> Recipe {
    Recipe {
        name: name.to_string(),
        intro: Some("A quick one.".to_string()),
        prep_time_minutes: Some(5),
        cook_time_minutes: Some(10),
        estimated_time_minutes: None,
        difficulty: "easy".to_string(),
        ingredients: vec![crate::api::RecipeIngredient {
            name: "egg".to_string(),
            amount: Some("2".to_string()),
        }],
        instructions: vec!["Crack eggs.".to_string(), "Cook them.".to_string()],
        sanji_comment: Some("Don't rush it.".to_string()),
        sanji_mood: None,
    }
}
