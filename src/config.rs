//! Editor Configuration
//!
//! Built-in defaults, overridden by `data-*` attributes on the mount element:
//!
//! ```html
//! <div id="ingredients-editor-root"
//!      data-backend="https://kitchen.example.org/api"
//!      data-kind="dish" data-project-id="3" data-project-name="summer"
//!      data-specific-id="12" data-log-level="debug"
//!      data-units='[{"id":1,"short_name":"g","long_name":"gram"}]'></div>
//! ```

use ingredients_core::{ProjectKind, ProjectRef, Unit};
use log::LevelFilter;
use wasm_bindgen::JsCast;

/// Id of the element the editor mounts into
pub const MOUNT_ID: &str = "ingredients-editor-root";

/// Backend base URL, overridable at build time
const DEFAULT_BACKEND: &str = match option_env!("INGREDIENTS_BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8080",
};

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub backend_url: String,
    pub project: ProjectRef,
    /// Units offered for new ingredients before any are loaded
    pub units: Vec<Unit>,
    pub log_level: LevelFilter,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND.to_string(),
            project: ProjectRef::new(ProjectKind::Dish, 1, "default", 1),
            units: Vec::new(),
            log_level: LevelFilter::Info,
        }
    }
}

impl EditorConfig {
    /// Read overrides through `attr` (attribute name without `data-`).
    /// Returns the config and a warning for every value that was ignored.
    pub fn from_attributes(attr: impl Fn(&str) -> Option<String>) -> (Self, Vec<String>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        if let Some(url) = attr("backend").filter(|u| !u.trim().is_empty()) {
            config.backend_url = url.trim().to_string();
        }
        if let Some(kind) = attr("kind") {
            match ProjectKind::parse(&kind) {
                Some(kind) => config.project.kind = kind,
                None => warnings.push(format!("unknown project kind '{}'", kind)),
            }
        }
        if let Some(name) = attr("project-name") {
            config.project.project_name = name;
        }
        for (key, slot) in [
            ("project-id", &mut config.project.project_id),
            ("specific-id", &mut config.project.specific_id),
        ] {
            if let Some(raw) = attr(key) {
                match raw.trim().parse::<u32>() {
                    Ok(value) => *slot = value,
                    Err(_) => warnings.push(format!("data-{} is not a number: '{}'", key, raw)),
                }
            }
        }
        if let Some(raw) = attr("units") {
            match serde_json::from_str::<Vec<Unit>>(&raw) {
                Ok(units) => config.units = units,
                Err(e) => warnings.push(format!("data-units is not a unit list: {}", e)),
            }
        }
        if let Some(raw) = attr("log-level") {
            match raw.trim().parse::<LevelFilter>() {
                Ok(level) => config.log_level = level,
                Err(_) => warnings.push(format!("unknown log level '{}'", raw)),
            }
        }

        (config, warnings)
    }

    /// Read overrides from the mount element, if the page has one
    pub fn from_document() -> (Self, Vec<String>) {
        match mount_element() {
            Some(element) => Self::from_attributes(|key| element.get_attribute(&format!("data-{}", key))),
            None => (Self::default(), Vec::new()),
        }
    }
}

/// The page element to mount into
pub fn mount_element() -> Option<web_sys::HtmlElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(MOUNT_ID)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults_without_attributes() {
        let (config, warnings) = EditorConfig::from_attributes(|_| None);
        assert_eq!(config, EditorConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_overrides() {
        let map = attrs(&[
            ("backend", "https://api.example.org/"),
            ("kind", "recipe"),
            ("project-id", "3"),
            ("project-name", "summer"),
            ("specific-id", "12"),
            ("log-level", "debug"),
            ("units", r#"[{"id":1,"short_name":"g","long_name":"gram"}]"#),
        ]);
        let (config, warnings) = EditorConfig::from_attributes(|k| map.get(k).cloned());
        assert!(warnings.is_empty());
        assert_eq!(
            config.project.base_url(&config.backend_url),
            "https://api.example.org/project/3/summer/recipe/12"
        );
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.units.len(), 1);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let map = attrs(&[("project-id", "three"), ("kind", "menu"), ("units", "[")]);
        let (config, warnings) = EditorConfig::from_attributes(|k| map.get(k).cloned());
        assert_eq!(config.project.project_id, 1);
        assert_eq!(config.project.kind, ProjectKind::Dish);
        assert!(config.units.is_empty());
        assert_eq!(warnings.len(), 3);
    }
}
