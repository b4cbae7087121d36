//! Ingredients Editor Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod logger;
mod store;

use app::App;
use config::EditorConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, warnings) = EditorConfig::from_document();
    logger::init(config.log_level);
    for warning in &warnings {
        log::warn!("[CONFIG] {}", warning);
    }
    log::info!(
        "[APP] Editing ingredients of {}",
        config.project.base_url(&config.backend_url)
    );

    match config::mount_element() {
        Some(root) => leptos::mount::mount_to(root, move || view! { <App config=config /> }).forget(),
        None => mount_to_body(move || view! { <App config=config /> }),
    }
}
