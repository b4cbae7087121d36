//! Project Reference
//!
//! Identifies the backend collection (a recipe or a dish of a project)
//! the ingredients belong to.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

/// Characters escaped inside a single URL path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    #[default]
    Recipe,
    Dish,
}

impl ProjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Recipe => "recipe",
            ProjectKind::Dish => "dish",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recipe" => Some(ProjectKind::Recipe),
            "dish" => Some(ProjectKind::Dish),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub kind: ProjectKind,
    pub project_id: u32,
    pub project_name: String,
    /// Id of the recipe or dish inside the project
    pub specific_id: u32,
}

impl ProjectRef {
    pub fn new(kind: ProjectKind, project_id: u32, project_name: impl Into<String>, specific_id: u32) -> Self {
        Self {
            kind,
            project_id,
            project_name: project_name.into(),
            specific_id,
        }
    }

    /// `{backend}/project/{id}/{name}/{recipe|dish}/{specific_id}`
    pub fn base_url(&self, backend: &str) -> String {
        format!(
            "{}/project/{}/{}/{}/{}",
            backend.trim_end_matches('/'),
            self.project_id,
            utf8_percent_encode(&self.project_name, SEGMENT),
            self.kind.as_str(),
            self.specific_id,
        )
    }

    /// Collection endpoint
    pub fn ingredients_url(&self, backend: &str) -> String {
        format!("{}/ingredients", self.base_url(backend))
    }

    /// Single ingredient endpoint
    pub fn ingredient_url(&self, backend: &str, id: u32) -> String {
        format!("{}/ingredients/{}", self.base_url(backend), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dish_base_url() {
        let project = ProjectRef::new(ProjectKind::Dish, 3, "summer", 12);
        assert_eq!(
            project.base_url("http://localhost:8080/"),
            "http://localhost:8080/project/3/summer/dish/12"
        );
    }

    #[test]
    fn test_recipe_urls_escape_name() {
        let project = ProjectRef::new(ProjectKind::Recipe, 1, "Menu 1/2", 4);
        assert_eq!(
            project.ingredients_url("http://api"),
            "http://api/project/1/Menu%201%2F2/recipe/4/ingredients"
        );
        assert_eq!(
            project.ingredient_url("http://api", 9),
            "http://api/project/1/Menu%201%2F2/recipe/4/ingredients/9"
        );
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(ProjectKind::parse(" Dish "), Some(ProjectKind::Dish));
        assert_eq!(ProjectKind::parse("menu"), None);
    }
}
