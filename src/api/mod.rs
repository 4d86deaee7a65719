pub mod client;
pub mod types;

pub use client::{ApiError, HttpKitchenClient, KitchenClient};
pub use types::{
    AssistantMode, ChatMessage, ChefMood, Delivery, DetectedIngredient, Difficulty, PantryRequest,
    PantryResponse, Recipe, RecipeIngredient, Role, SelectedImage,
};
