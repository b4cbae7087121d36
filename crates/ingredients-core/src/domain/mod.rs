//! Domain Layer
//!
//! Ingredient records, unit choices and the project they belong to.
//! Nothing in here knows about the browser or HTTP.

mod error;
mod ingredient;
mod project;

pub use error::{EditorError, EditorResult};
pub use ingredient::{Article, Ingredient, IngredientPatch, Preparation, Unit};
pub use project::{ProjectKind, ProjectRef};
