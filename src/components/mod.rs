//! UI Components
//!
//! Leptos components of the ingredients editor.

mod ingredient_list;
mod ingredient_row;
mod ingredients_editor;
mod list_boundary;
mod new_ingredient_form;
mod prepared_checkbox;
mod remove_ingredient_button;

pub use ingredient_list::IngredientList;
pub use ingredient_row::IngredientRow;
pub use ingredients_editor::IngredientsEditor;
pub use list_boundary::ListBoundary;
pub use new_ingredient_form::NewIngredientForm;
pub use prepared_checkbox::PreparedCheckbox;
pub use remove_ingredient_button::RemoveIngredientButton;
