//! Ingredient Row Component
//!
//! One draggable ingredient with inline editing of amount, unit and
//! comment. The inputs are uncontrolled: they start from the ingredient
//! the row was built with and report every change to the editor.

use leptos::prelude::*;

use ingredients_core::{EditAction, Ingredient, IngredientPatch, Unit};
use leptos_dragdrop::*;

use crate::components::{PreparedCheckbox, RemoveIngredientButton};
use crate::context::{use_editor, Boundary};
use crate::store::EditorStateStoreFields;

/// Parse an amount typed by the user, accepting a decimal comma
fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Selectable units, including the current one if the list lacks it
fn unit_choices(ingredient: &Ingredient) -> Vec<Unit> {
    let mut units = ingredient.units.clone();
    if ingredient.unit(ingredient.current_unit.id).is_none() {
        units.insert(0, ingredient.current_unit.clone());
    }
    units
}

#[component]
pub fn IngredientRow(dnd: DndSignals<Boundary>, ingredient: Ingredient) -> impl IntoView {
    let ctx = use_editor();
    let store = ctx.store;
    let id = ingredient.id;

    // DnD handlers
    let on_mousedown = make_on_mousedown(dnd, id);
    let hover_ctx = ctx.clone();
    let on_hover = make_on_item_hover(dnd, id, move |dragged, hovered, half| {
        hover_ctx.hover_item(dragged, hovered, half)
    });
    let on_mouseleave = make_on_mouseleave(dnd);

    let is_dragging = move || store.lists().with(|lists| lists.get(id).is_some_and(|i| i.being_dragged));
    let row_class = move || {
        if is_dragging() { "ingredient-row dragging" } else { "ingredient-row" }
    };

    // Inline edits
    let value_ctx = ctx.clone();
    let on_value = move |ev: web_sys::Event| {
        let raw = event_target_value(&ev);
        match parse_amount(&raw) {
            Some(value) => value_ctx.edit(id, IngredientPatch::value(value)),
            None => log::debug!("[ROW] Ignoring amount '{}' for {}", raw, id),
        }
    };
    let comment_ctx = ctx.clone();
    let on_comment = move |ev: web_sys::Event| {
        comment_ctx.edit(id, IngredientPatch::comment(event_target_value(&ev)));
    };
    let unit_ctx = ctx.clone();
    let on_unit = move |ev: web_sys::Event| {
        if let Ok(unit_id) = event_target_value(&ev).parse::<u32>() {
            unit_ctx.perform(EditAction::SelectUnit { id, unit_id });
        }
    };

    let toggle_ctx = ctx.clone();
    let on_toggle = Callback::new(move |_: ()| toggle_ctx.perform(EditAction::TogglePreparation { id }));

    let current_unit = ingredient.current_unit.id;
    let unit_options = unit_choices(&ingredient)
        .into_iter()
        .map(|unit| {
            view! {
                <option value=unit.id.to_string() selected=unit.id == current_unit>
                    {unit.label()}
                </option>
            }
        })
        .collect_view();

    view! {
        <div
            class=row_class
            on:mousedown=on_mousedown
            on:mouseenter=on_hover.clone()
            on:mousemove=on_hover
            on:mouseleave=on_mouseleave
        >
            <span class="drag-handle" title="Drag to reorder">"⠿"</span>
            <span class="article-name" title=ingredient.article.comment.clone()>
                {ingredient.article.name.clone()}
            </span>
            <input
                type="number"
                class="value-input"
                step="any"
                min="0"
                value=ingredient.value.to_string()
                on:input=on_value
            />
            <select class="unit-select" on:change=on_unit>
                {unit_options}
            </select>
            <input
                type="text"
                class="comment-input"
                placeholder="Comment"
                value=ingredient.comment.clone()
                on:input=on_comment
            />
            <PreparedCheckbox checked=ingredient.is_prepared() on_toggle=on_toggle />
            <RemoveIngredientButton id=id article=ingredient.article.name.clone() />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingredients_core::Article;

    fn gram() -> Unit {
        Unit { id: 1, short_name: "g".to_string(), long_name: "gram".to_string() }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("2.5"), Some(2.5));
        assert_eq!(parse_amount(" 2,5 "), Some(2.5));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("-1"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn test_unit_choices_keep_current_unit() {
        let cup = Unit { id: 9, short_name: "cup".to_string(), long_name: "cup".to_string() };
        let article = Article { name: "Flour".to_string(), comment: String::new() };
        let ingr = Ingredient::new(1, article, 100.0, cup.clone(), vec![gram()]);
        let choices = unit_choices(&ingr);
        assert_eq!(choices, vec![cup, gram()]);

        let mut listed = ingr.clone();
        listed.current_unit = gram();
        assert_eq!(unit_choices(&listed), vec![gram()]);
    }
}
