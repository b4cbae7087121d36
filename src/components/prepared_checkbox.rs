//! Prepared Checkbox Component

use leptos::prelude::*;

/// Checkbox moving an ingredient between the normal and prepared lists
#[component]
pub fn PreparedCheckbox(
    checked: bool,
    #[prop(into)] on_toggle: Callback<()>,
) -> impl IntoView {
    view! {
        <label class="prepared-toggle" title="Prepare beforehand">
            <input
                type="checkbox"
                prop:checked=checked
                on:change=move |_| on_toggle.run(())
            />
            <span class="prepared-label">"prepared"</span>
        </label>
    }
}
