//! Reusable UI components.
//!
//! Components come in two flavors:
//! - Stateless, created each frame from core props (`Header`).
//! - Persistent-state + transient-wrapper pairs, where the `*State` struct
//!   lives in `TuiState` across frames and a borrowing wrapper renders it
//!   with the current core data (`PantryForm`, `RecipeList`, `ChatWindow`).

pub mod chat_window;
pub mod header;
pub mod pantry_form;
pub mod recipe_list;

pub use chat_window::{ChatEvent, ChatWindow, ChatWindowState};
pub use header::Header;
pub use pantry_form::{FormEvent, PantryForm, PantryFormState, FORM_HEIGHT};
pub use recipe_list::{RecipeEvent, RecipeList, RecipeListState};
