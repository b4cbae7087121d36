//! Ingredients Editor Component
//!
//! The editor card: header, error banner, create form and the normal and
//! prepared lists. Owns the drag state shared by both lists.

use leptos::prelude::*;

use ingredients_core::Preparation;
use leptos_dragdrop::*;

use crate::components::{IngredientList, NewIngredientForm};
use crate::context::{use_editor, Boundary};
use crate::store::{EditorStateStoreFields, LoadStatus};

#[component]
pub fn IngredientsEditor() -> impl IntoView {
    let ctx = use_editor();
    let store = ctx.store;
    let project_name = ctx.project().project_name.clone();

    let dnd = create_dnd_signals::<Boundary>();
    let start_ctx = ctx.clone();
    let end_ctx = ctx.clone();
    bind_global_handlers(
        dnd,
        move |id| start_ctx.begin_drag(id),
        move |id, target: Option<DropTarget<Boundary>>| {
            log::debug!("[DND] Released {} over {:?}", id, target);
            end_ctx.end_drag(id);
        },
    );

    // Load on mount
    let load_ctx = ctx.clone();
    Effect::new(move |_| load_ctx.load());

    let banner_ctx = ctx.clone();
    let error_banner = move || {
        let ctx = banner_ctx.clone();
        store.last_error().get().map(|message| view! {
            <div class="error-banner" role="alert">
                <span class="error-text">{message}</span>
                <button type="button" class="dismiss-btn" on:click=move |_| ctx.dismiss_error()>
                    "×"
                </button>
            </div>
        })
    };

    let loading = move || {
        (store.status().get() == LoadStatus::Loading).then(|| view! {
            <p class="loading">"Loading ingredients..."</p>
        })
    };

    view! {
        <div class="card ingredients-editor">
            <div class="card-header">
                <h2>"Ingredients"</h2>
                <span class="project-name">{project_name}</span>
            </div>
            <div class="card-body">
                {error_banner}
                {loading}
                <NewIngredientForm />
                <IngredientList dnd=dnd list=Preparation::Normal title="Normal Ingredients" />
                <IngredientList dnd=dnd list=Preparation::Prepared title="Prepared Ingredients" />
            </div>
        </div>
    }
}
