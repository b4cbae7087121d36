//! Editor State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use ingredients_core::{IngredientLists, PendingEdits};
use reactive_stores::Store;

/// Progress of the initial fetch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    Failed,
}

/// Editor state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct EditorState {
    /// Both ingredient lists
    pub lists: IngredientLists,
    pub status: LoadStatus,
    /// Message for the error banner
    pub last_error: Option<String>,
    /// Bumped on every local edit; a failed push only rolls back if no
    /// newer edit happened since
    pub revision: u64,
    /// Bumped when the lists are replaced wholesale (load, rollback) so
    /// rows re-render their inputs
    pub generation: u64,
    /// Lists as they were when the current drag started
    pub drag_origin: Option<IngredientLists>,
    /// Typed edits waiting for the debounce to save them
    pub pending: PendingEdits,
}

/// Type alias for the store
pub type EditorStore = Store<EditorState>;
