//! Ingredients Editor Core
//!
//! Layered like the editor uses it:
//! - domain: ingredients, units, project references, errors
//! - reconciler: the normal/prepared list pair and its operations
//! - gateway: backend contract and JSON shapes
//! - sync: optimistic apply, push and rollback

pub mod domain;
pub mod gateway;
pub mod reconciler;
pub mod sync;
pub mod util;


pub use domain::{
    Article, EditorError, EditorResult, Ingredient, IngredientPatch, Preparation, ProjectKind,
    ProjectRef, Unit,
};
pub use gateway::IngredientGateway;
pub use reconciler::IngredientLists;
pub use sync::{EditAction, PendingEdits, PushFailure, Recovery, SyncPlan};
