//! Ingredients Editor App
//!
//! Root component: sets up the store and the editor context.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::IngredientsEditor;
use crate::config::EditorConfig;
use crate::context::EditorContext;
use crate::store::EditorState;

#[component]
pub fn App(config: EditorConfig) -> impl IntoView {
    let store = Store::new(EditorState::default());
    let ctx = EditorContext::new(store, &config);
    provide_context(ctx.clone());

    // Responses arriving after this point are dropped
    on_cleanup(move || ctx.unmount());

    view! {
        <IngredientsEditor />
    }
}
