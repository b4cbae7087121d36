//! Ingredient List Component
//!
//! One of the two lists: leading drop zone, rows, trailing drop zone.

use leptos::prelude::*;

use ingredients_core::{Ingredient, Preparation};
use leptos_dragdrop::DndSignals;

use crate::components::{IngredientRow, ListBoundary};
use crate::context::{use_editor, Boundary, Edge};
use crate::store::EditorStateStoreFields;

#[component]
pub fn IngredientList(
    dnd: DndSignals<Boundary>,
    list: Preparation,
    title: &'static str,
) -> impl IntoView {
    let store = use_editor().store;

    // Rows carry the generation so a reload or rollback rebuilds their inputs
    let rows = move || {
        let generation = store.generation().get();
        store.lists().with(|lists| {
            lists
                .list(list)
                .into_iter()
                .map(|ingr| (generation, ingr.clone()))
                .collect::<Vec<(u64, Ingredient)>>()
        })
    };

    view! {
        <section class=format!("ingredient-list {}", list.as_str())>
            <h3 class="list-title">{title}</h3>
            <ListBoundary dnd=dnd boundary=Boundary::new(list, Edge::Leading) />
            <For
                each=rows
                // Typed values and comments are left out; rebuilding a row
                // while its input has focus would drop the focus
                key=|(generation, ingr)| {
                    (*generation, ingr.id, ingr.position, ingr.preparation, ingr.current_unit.id)
                }
                children=move |(_, ingredient)| {
                    view! { <IngredientRow dnd=dnd ingredient=ingredient /> }
                }
            />
            <ListBoundary dnd=dnd boundary=Boundary::new(list, Edge::Trailing) />
        </section>
    }
}
