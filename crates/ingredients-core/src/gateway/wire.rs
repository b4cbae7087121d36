//! Backend JSON Shapes
//!
//! Responses arrive wrapped as `{ "data": ... }`. The ingredient list is
//! either one flat array or a pair of arrays `[normal, prepared]`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Article, EditorError, EditorResult, Ingredient, Preparation, Unit};
use crate::util;

/// Article as the backend sends it; `comment` may be null
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleJson {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Ingredient as the backend sends and accepts it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientJson {
    pub id: u32,
    #[serde(default)]
    pub position: u32,
    #[serde(default, alias = "preparation", alias = "prepared")]
    pub prepare: bool,
    pub article: ArticleJson,
    #[serde(default)]
    pub value: f64,
    pub current_unit: Unit,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl From<IngredientJson> for Ingredient {
    fn from(json: IngredientJson) -> Self {
        Ingredient {
            id: json.id,
            position: json.position,
            preparation: Preparation::from_flag(json.prepare),
            article: Article {
                name: json.article.name,
                comment: json.article.comment.unwrap_or_default(),
            },
            value: json.value,
            current_unit: json.current_unit,
            units: json.units,
            comment: json.comment.unwrap_or_default(),
            being_dragged: false,
        }
    }
}

impl From<&Ingredient> for IngredientJson {
    fn from(ingr: &Ingredient) -> Self {
        IngredientJson {
            id: ingr.id,
            position: ingr.position,
            prepare: ingr.is_prepared(),
            article: ArticleJson {
                name: ingr.article.name.clone(),
                comment: Some(ingr.article.comment.clone()),
            },
            value: ingr.value,
            current_unit: ingr.current_unit.clone(),
            units: ingr.units.clone(),
            comment: Some(ingr.comment.clone()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IngredientsPayload {
    Split(Vec<Vec<IngredientJson>>),
    Flat(Vec<IngredientJson>),
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Parse the body of `GET .../ingredients`
pub fn parse_ingredients(body: &str) -> EditorResult<Vec<Ingredient>> {
    let payload = match serde_json::from_str::<Envelope<IngredientsPayload>>(body) {
        Ok(envelope) => envelope.data,
        Err(_) => serde_json::from_str::<IngredientsPayload>(body)
            .map_err(|e| EditorError::Parse(format!("ingredient list: {}", e)))?,
    };

    match payload {
        IngredientsPayload::Flat(list) => Ok(list.into_iter().map(Ingredient::from).collect()),
        IngredientsPayload::Split(lists) => {
            if lists.len() > 2 {
                return Err(EditorError::Parse(format!(
                    "expected at most two ingredient lists, got {}",
                    lists.len()
                )));
            }
            let mut result = Vec::new();
            for (index, list) in lists.into_iter().enumerate() {
                let preparation = Preparation::from_flag(index == 1);
                result.extend(list.into_iter().map(|json| {
                    let mut ingr = Ingredient::from(json);
                    ingr.preparation = preparation;
                    ingr
                }));
            }
            Ok(result)
        }
    }
}

/// Parse the body of `POST .../ingredients`: `{"data": 5}`,
/// `{"data": {"id": 5}}`, `{"id": 5}` or a bare `5`
pub fn parse_created_id(body: &str) -> EditorResult<u32> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| EditorError::Parse(format!("create response: {}", e)))?;
    let data = match &value {
        Value::Object(map) if map.contains_key("data") => &map["data"],
        other => other,
    };
    let id = match data {
        Value::Object(map) => util::of::<u32>(map.get("id")),
        other => util::of::<u32>(Some(other)),
    };
    id.ok_or_else(|| EditorError::Parse(format!("create response carries no id: {}", body)))
}

/// Request body for create and update
pub fn to_body(ingredient: &Ingredient) -> IngredientJson {
    IngredientJson::from(ingredient)
}
