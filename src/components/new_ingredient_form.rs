//! New Ingredient Form Component
//!
//! Article name, amount and unit; the created ingredient is added to the
//! end of the normal list once the backend returned its id.

use leptos::prelude::*;
use leptos::task::spawn_local;

use ingredients_core::{Article, EditorError, Ingredient};

use crate::context::use_editor;

#[component]
pub fn NewIngredientForm() -> impl IntoView {
    let ctx = use_editor();

    let (name, set_name) = signal(String::new());
    let (amount, set_amount) = signal(String::new());
    let (unit_id, set_unit_id) = signal(None::<u32>);
    let (busy, set_busy) = signal(false);

    let units_ctx = ctx.clone();
    let units = Memo::new(move |_| units_ctx.known_units());

    let create_ingredient = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let article = name.get_untracked().trim().to_string();
        if article.is_empty() || busy.get_untracked() {
            return;
        }
        let raw = amount.get_untracked();
        let value = if raw.trim().is_empty() {
            0.0
        } else {
            match raw.trim().replace(',', ".").parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => v,
                _ => {
                    ctx.report(EditorError::InvalidState(format!("'{}' is not an amount", raw)));
                    return;
                }
            }
        };
        let available = units.get_untracked();
        let chosen = unit_id
            .get_untracked()
            .and_then(|id| available.iter().find(|u| u.id == id).cloned())
            .or_else(|| available.first().cloned());
        let Some(unit) = chosen else {
            ctx.report(EditorError::InvalidState("no units to choose from".to_string()));
            return;
        };

        let draft = Ingredient::new(0, Article { name: article, comment: String::new() }, value, unit, available);
        set_busy.set(true);
        let ctx = ctx.clone();
        spawn_local(async move {
            let created = ctx.create(draft).await;
            if !ctx.is_mounted() {
                return;
            }
            if created {
                set_name.set(String::new());
                set_amount.set(String::new());
            }
            set_busy.set(false);
        });
    };

    view! {
        <form class="new-ingredient-form" on:submit=create_ingredient>
            <input
                type="text"
                class="article-input"
                placeholder="Add ingredient..."
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <input
                type="text"
                class="value-input"
                inputmode="decimal"
                placeholder="Amount"
                prop:value=move || amount.get()
                on:input=move |ev| set_amount.set(event_target_value(&ev))
            />
            <select
                class="unit-select"
                on:change=move |ev| set_unit_id.set(event_target_value(&ev).parse().ok())
            >
                <For
                    each=move || units.get()
                    key=|unit| unit.id
                    children=move |unit| {
                        let id = unit.id;
                        view! {
                            <option value=id.to_string() selected=move || unit_id.get() == Some(id)>
                                {unit.label()}
                            </option>
                        }
                    }
                />
            </select>
            <button type="submit" disabled=move || busy.get() || units.with(|u| u.is_empty())>
                "Add"
            </button>
        </form>
    }
}
