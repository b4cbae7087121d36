//! List Boundary Component
//!
//! Drop zones before the first and after the last row of a list. Dragging
//! an ingredient into one moves it to that end of the list.

use leptos::prelude::*;

use ingredients_core::Preparation;
use leptos_dragdrop::*;

use crate::context::{use_editor, Boundary, Edge};
use crate::store::EditorStateStoreFields;

/// Placeholder for an empty list
fn empty_text(list: Preparation) -> &'static str {
    match list {
        Preparation::Normal => "There are no normal ingredients yet. Drag some ingredients here!",
        Preparation::Prepared => {
            "There are no prepared ingredients yet. Drag some ingredients here to make them prepared!"
        }
    }
}

#[component]
pub fn ListBoundary(dnd: DndSignals<Boundary>, boundary: Boundary) -> impl IntoView {
    let ctx = use_editor();
    let store = ctx.store;

    let on_mouseenter = make_on_zone_mouseenter(dnd, boundary, move |dragged, zone| {
        ctx.hover_boundary(dragged, zone)
    });
    let on_mouseleave = make_on_mouseleave(dnd);

    let is_target = move || dnd.drop_target_read.get() == Some(DropTarget::Zone(boundary));
    let zone_class = move || {
        let mut c = String::from(match boundary.edge {
            Edge::Leading => "list-boundary leading",
            Edge::Trailing => "list-boundary trailing",
        });
        if is_target() { c.push_str(" drop-target"); }
        c
    };
    let min_height = match boundary.edge {
        Edge::Leading => "min-height: 1.5rem",
        Edge::Trailing => "min-height: 3rem",
    };

    let placeholder = move || {
        let empty = store.lists().with(|lists| lists.list_len(boundary.list) == 0);
        (boundary.edge == Edge::Trailing && empty).then(|| view! {
            <p class="list-placeholder">{empty_text(boundary.list)}</p>
        })
    };

    view! {
        <div
            class=zone_class
            style=min_height
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            {placeholder}
        </div>
    }
}
