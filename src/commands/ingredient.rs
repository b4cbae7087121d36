//! Ingredient Commands
//!
//! `IngredientGateway` over `fetch`, one request per operation:
//! `GET`/`POST {base}/ingredients`, `PUT`/`DELETE {base}/ingredients/{id}`.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};

use ingredients_core::gateway::{wire, IngredientGateway};
use ingredients_core::{EditorError, EditorResult, Ingredient, ProjectRef};

/// HTTP gateway to one backend
#[derive(Debug, Clone, PartialEq)]
pub struct HttpGateway {
    backend_url: String,
}

impl HttpGateway {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self { backend_url: backend_url.into() }
    }
}

fn transport(e: gloo_net::Error) -> EditorError {
    EditorError::Transport(e.to_string())
}

/// Body of a successful response
async fn read_body(response: Response) -> EditorResult<String> {
    if !response.ok() {
        return Err(EditorError::Transport(format!(
            "{} {} from {}",
            response.status(),
            response.status_text(),
            response.url()
        )));
    }
    response
        .text()
        .await
        .map_err(|e| EditorError::Parse(e.to_string()))
}

#[async_trait(?Send)]
impl IngredientGateway for HttpGateway {
    async fn fetch_all(&self, project: &ProjectRef) -> EditorResult<Vec<Ingredient>> {
        let url = project.ingredients_url(&self.backend_url);
        log::debug!("[HTTP] GET {}", url);
        let response = Request::get(&url).send().await.map_err(transport)?;
        let body = read_body(response).await?;
        wire::parse_ingredients(&body)
    }

    async fn create(&self, project: &ProjectRef, ingredient: &Ingredient) -> EditorResult<u32> {
        let url = project.ingredients_url(&self.backend_url);
        log::debug!("[HTTP] POST {}", url);
        let response = Request::post(&url)
            .json(&wire::to_body(ingredient))
            .map_err(|e| EditorError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(transport)?;
        let body = read_body(response).await?;
        wire::parse_created_id(&body)
    }

    async fn update(&self, project: &ProjectRef, ingredient: &Ingredient) -> EditorResult<()> {
        let url = project.ingredient_url(&self.backend_url, ingredient.id);
        log::debug!("[HTTP] PUT {}", url);
        let response = Request::put(&url)
            .json(&wire::to_body(ingredient))
            .map_err(|e| EditorError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(transport)?;
        read_body(response).await.map(|_| ())
    }

    async fn delete(&self, project: &ProjectRef, id: u32) -> EditorResult<()> {
        let url = project.ingredient_url(&self.backend_url, id);
        log::debug!("[HTTP] DELETE {}", url);
        let response = Request::delete(&url).send().await.map_err(transport)?;
        read_body(response).await.map(|_| ())
    }
}
