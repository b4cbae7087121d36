//! Remove Ingredient Button Component
//!
//! Removal asks first, naming the ingredient. Leaving the row with the
//! pointer withdraws the question.

use leptos::prelude::*;

use ingredients_core::EditAction;

use crate::context::use_editor;

/// Prompt shown before removing `article`
fn removal_prompt(article: &str) -> String {
    if article.trim().is_empty() {
        "Remove this ingredient?".to_string()
    } else {
        format!("Remove {}?", article.trim())
    }
}

#[component]
pub fn RemoveIngredientButton(id: u32, article: String) -> impl IntoView {
    let ctx = use_editor();
    let (asking, set_asking) = signal(false);
    let prompt = removal_prompt(&article);

    let remove = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        set_asking.set(false);
        ctx.perform(EditAction::Remove { id });
    };

    view! {
        <span class="remove-ingredient" on:mouseleave=move |_| set_asking.set(false)>
            <Show
                when=move || asking.get()
                fallback=move || view! {
                    <button
                        type="button"
                        class="remove-btn"
                        title="Remove ingredient"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_asking.set(true);
                        }
                    >
                        "×"
                    </button>
                }
            >
                <span class="remove-prompt">{prompt.clone()}</span>
                <button type="button" class="confirm-btn" on:click=remove.clone()>"Remove"</button>
                <button type="button" class="cancel-btn" on:click=move |_| set_asking.set(false)>
                    "Keep"
                </button>
            </Show>
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removal_prompt_names_article() {
        assert_eq!(removal_prompt(" Flour "), "Remove Flour?");
        assert_eq!(removal_prompt(""), "Remove this ingredient?");
    }
}
