//! Domain and wire types for the kitchen backend.
//!
//! The backend keeps the original service's camelCase field names
//! (`timeLimitMinutes`, `sanjiMode`, `sanjiMood`, ...), so the structs here
//! carry `serde` renames rather than leaking wire spelling into Rust code.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Requested recipe difficulty.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Cycles to the next difficulty (wraps around).
    pub fn next(self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Cycles to the previous difficulty (wraps around).
    pub fn prev(self) -> Difficulty {
        self.next().next()
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Tone selector passed through to the recipe and chat endpoints.
/// Not validated or interpreted client-side.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssistantMode {
    #[default]
    Chill,
    Flirty,
    Serious,
    Annoyed,
}

impl AssistantMode {
    pub fn next(self) -> AssistantMode {
        match self {
            AssistantMode::Chill => AssistantMode::Flirty,
            AssistantMode::Flirty => AssistantMode::Serious,
            AssistantMode::Serious => AssistantMode::Annoyed,
            AssistantMode::Annoyed => AssistantMode::Chill,
        }
    }

    pub fn prev(self) -> AssistantMode {
        self.next().next().next()
    }

    pub fn label(self) -> &'static str {
        match self {
            AssistantMode::Chill => "Chill",
            AssistantMode::Flirty => "Flirty",
            AssistantMode::Serious => "Serious",
            AssistantMode::Annoyed => "Annoyed",
        }
    }
}

/// Display-only mood hint the recipe endpoint may attach to a recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChefMood {
    Happy,
    Annoyed,
    Flirty,
    Serious,
}

/// Caption shown before any mood hint has arrived, and for unrecognized values.
pub const NEUTRAL_MOOD_CAPTION: &str = "The chef is listening.";

impl ChefMood {
    /// Parses a wire mood value. Unrecognized values map to `None`,
    /// which renders as the neutral caption.
    pub fn from_wire(value: &str) -> Option<ChefMood> {
        match value {
            "happy" => Some(ChefMood::Happy),
            "annoyed" => Some(ChefMood::Annoyed),
            "flirty" => Some(ChefMood::Flirty),
            "serious" => Some(ChefMood::Serious),
            _ => None,
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            ChefMood::Happy => "The chef is pleased.",
            ChefMood::Annoyed => "The chef is annoyed by your pantry.",
            ChefMood::Flirty => "The chef turns on the charm.",
            ChefMood::Serious => "The chef is focused.",
        }
    }
}

/// The bundle of ingredients and preferences sent to obtain recipe
/// suggestions. Built fresh from form state on every submit; never persisted.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PantryRequest {
    pub ingredients: Vec<String>,
    pub difficulty: Difficulty,
    #[serde(rename = "timeLimitMinutes")]
    pub time_limit_minutes: u32,
    pub mood: String,
    #[serde(rename = "sanjiMode")]
    pub assistant_mode: AssistantMode,
}

/// One ingredient name from the image-detection endpoint.
/// Extra fields (confidence scores etc.) are ignored.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct DetectedIngredient {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct DetectResponse {
    #[serde(default)]
    pub ingredients: Vec<DetectedIngredient>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

/// A recipe as returned by the recipe endpoint. Timing fields vary by
/// backend version: either prep/cook or a single estimate may be present,
/// and the step list arrives as `instructions` or `steps`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Recipe {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(rename = "prepTimeMinutes", skip_serializing_if = "Option::is_none")]
    pub prep_time_minutes: Option<u32>,
    #[serde(rename = "cookTimeMinutes", skip_serializing_if = "Option::is_none")]
    pub cook_time_minutes: Option<u32>,
    #[serde(rename = "estimatedTimeMinutes", skip_serializing_if = "Option::is_none")]
    pub estimated_time_minutes: Option<u32>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(alias = "steps", default)]
    pub instructions: Vec<String>,
    #[serde(rename = "sanjiComment", skip_serializing_if = "Option::is_none")]
    pub sanji_comment: Option<String>,
    #[serde(rename = "sanjiMood", skip_serializing_if = "Option::is_none")]
    pub sanji_mood: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct PantryResponse {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Delivery status of a chat message. The user's message is appended to the
/// transcript before the chat request resolves; this tag records whether the
/// backend ever acknowledged it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delivery {
    Pending,
    #[default]
    Sent,
    Failed,
}

/// One transcript entry. Only `role` and `content` go on the wire;
/// delivery status is client-side bookkeeping.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(skip)]
    pub delivery: Delivery,
}

impl ChatMessage {
    /// A user message awaiting backend acknowledgement.
    pub fn user_pending(content: String) -> ChatMessage {
        ChatMessage {
            role: Role::User,
            content,
            delivery: Delivery::Pending,
        }
    }

    pub fn assistant(content: String) -> ChatMessage {
        ChatMessage {
            role: Role::Assistant,
            content,
            delivery: Delivery::Sent,
        }
    }
}

/// The request body for the dish-chat endpoint.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub recipe: &'a Recipe,
    pub history: &'a [ChatMessage],
    #[serde(rename = "userMessage")]
    pub user_message: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct ChatReply {
    pub reply: String,
}

/// An owned handle to the currently selected ingredient photo.
///
/// Acquired when the user commits a path (the file is stat'ed then, so a bad
/// path fails at selection time, not at detection time) and released when the
/// selection is replaced or cleared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedImage {
    path: PathBuf,
    len: u64,
}

impl SelectedImage {
    pub fn acquire(path: impl AsRef<Path>) -> io::Result<SelectedImage> {
        let path = path.as_ref().to_path_buf();
        let meta = fs::metadata(&path)?;
        if meta.is_dir() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "is a directory"));
        }
        Ok(SelectedImage {
            len: meta.len(),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// One-line summary for the form: "pantry.jpg (34.2 KB)".
    pub fn describe(&self) -> String {
        format!("{} ({})", self.file_name(), format_size(self.len))
    }
}

fn format_size(len: u64) -> String {
    if len < 1024 {
        format!("{len} B")
    } else if len < 1024 * 1024 {
        format!("{:.1} KB", len as f64 / 1024.0)
    } else {
        format!("{:.1} MB", len as f64 / (1024.0 * 1024.0))
    }
}
