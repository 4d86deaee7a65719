//! The kitchen backend client.
//!
//! All intelligence (ingredient detection, recipe generation, dish chat)
//! lives behind three HTTP endpoints on one origin. This module is the only
//! place that knows their paths and wire shapes.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{
    ChatMessage, ChatReply, ChatRequest, DetectResponse, DetectedIngredient, PantryRequest,
    PantryResponse, Recipe, SelectedImage,
};

/// Errors from kitchen backend operations.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The backend returned a non-2xx status. The body is kept for the log,
    /// never parsed for structure.
    Api { status: u16, message: String },
    /// Failed to parse the backend's response.
    Parse(String),
    /// The selected image could not be read from disk.
    Image(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
            ApiError::Image(msg) => write!(f, "image error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Everything the orchestrators need from the remote kitchen.
#[async_trait]
pub trait KitchenClient: Send + Sync {
    /// Uploads the selected photo and returns the ingredient names the
    /// backend detected in it.
    async fn detect_ingredients(
        &self,
        image: &SelectedImage,
    ) -> Result<Vec<DetectedIngredient>, ApiError>;

    /// Sends the pantry request and returns the suggested recipes.
    async fn recipes_from_pantry(
        &self,
        request: &PantryRequest,
    ) -> Result<PantryResponse, ApiError>;

    /// Sends one chat turn scoped to a recipe and returns the reply text.
    /// `history` already includes the message being sent.
    async fn dish_chat(
        &self,
        recipe: &Recipe,
        history: &[ChatMessage],
        user_message: &str,
    ) -> Result<String, ApiError>;
}

/// reqwest-backed kitchen client.
pub struct HttpKitchenClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpKitchenClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Maps a non-success response to `ApiError::Api`, draining the body
    /// into the error message for the log.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!("Kitchen backend error: {status} - {message}");
        Err(ApiError::Api { status, message })
    }
}

#[async_trait]
impl KitchenClient for HttpKitchenClient {
    async fn detect_ingredients(
        &self,
        image: &SelectedImage,
    ) -> Result<Vec<DetectedIngredient>, ApiError> {
        info!("Detecting ingredients from {}", image.path().display());

        let bytes = tokio::fs::read(image.path())
            .await
            .map_err(|e| ApiError::Image(e.to_string()))?;
        debug!("Read {} bytes from {}", bytes.len(), image.path().display());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(image.file_name());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/ingredients-from-image", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("Detection response status: {}", response.status());

        let response = Self::check_status(response).await?;
        let detected: DetectResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        info!("Detected {} ingredient(s)", detected.ingredients.len());
        Ok(detected.ingredients)
    }

    async fn recipes_from_pantry(
        &self,
        request: &PantryRequest,
    ) -> Result<PantryResponse, ApiError> {
        info!(
            "Requesting recipes: {} ingredient(s), difficulty={:?}, limit={}min, mode={:?}",
            request.ingredients.len(),
            request.difficulty,
            request.time_limit_minutes,
            request.assistant_mode
        );

        let response = self
            .client
            .post(format!("{}/recipe-from-pantry", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("Recipe response status: {}", response.status());

        let response = Self::check_status(response).await?;
        let recipes: PantryResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        info!("Received {} recipe(s)", recipes.recipes.len());
        Ok(recipes)
    }

    async fn dish_chat(
        &self,
        recipe: &Recipe,
        history: &[ChatMessage],
        user_message: &str,
    ) -> Result<String, ApiError> {
        info!(
            "Chat turn for '{}' ({} message(s) of history)",
            recipe.name,
            history.len()
        );

        let body = ChatRequest {
            recipe,
            history,
            user_message,
        };

        let response = self
            .client
            .post(format!("{}/dish-chat", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!("Chat response status: {}", response.status());

        let response = Self::check_status(response).await?;
        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        debug!("Chat reply: {} bytes", reply.reply.len());
        Ok(reply.reply)
    }
}
