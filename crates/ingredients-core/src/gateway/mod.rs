//! Remote Gateway
//!
//! Abstract interface to the backend that stores ingredients.
//! The browser build talks HTTP; tests use an in-memory implementation.

pub mod wire;

use async_trait::async_trait;

use crate::domain::{EditorResult, Ingredient, ProjectRef};

/// CRUD operations on the ingredients of one project.
///
/// Futures are not `Send`: the browser event loop is single-threaded.
#[async_trait(?Send)]
pub trait IngredientGateway {
    /// Load every ingredient of the project, both lists
    async fn fetch_all(&self, project: &ProjectRef) -> EditorResult<Vec<Ingredient>>;

    /// Store a new ingredient and return the id the backend assigned
    async fn create(&self, project: &ProjectRef, ingredient: &Ingredient) -> EditorResult<u32>;

    /// Overwrite an existing ingredient
    async fn update(&self, project: &ProjectRef, ingredient: &Ingredient) -> EditorResult<()>;

    /// Delete an ingredient by id
    async fn delete(&self, project: &ProjectRef, id: u32) -> EditorResult<()>;
}
