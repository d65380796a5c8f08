use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::RelayError;
use crate::model::{NewsArticle, Recipe};
use crate::pipelines::{answer_question, featured_recipes, search_recipes};
use crate::server::{ApiError, AppState};
use crate::spoonacular::RecipeQuery;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub cuisine: String,
}

#[derive(Debug, Serialize)]
pub struct RecipesResponse {
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub articles: Vec<NewsArticle>,
}

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    #[serde(default)]
    pub question: String,
    pub recipe: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub answer: String,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<RecipesResponse>, ApiError> {
    let query = RecipeQuery::new(params.query.trim(), params.cuisine.trim());
    if query.query.is_empty() && query.cuisine.is_empty() {
        return Err(ApiError::bad_request("No search query or cuisine provided"));
    }

    let recipes = search_recipes(&state.recipes, &state.fallback, &query)
        .await
        .map_err(|e| {
            let details = match e {
                RelayError::Upstream { body, .. } => body,
                other => other.to_string(),
            };
            ApiError::internal("Failed to fetch recipes from Spoonacular").with_details(details)
        })?;

    Ok(Json(RecipesResponse { recipes }))
}

pub async fn featured(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RecipesResponse>, ApiError> {
    let recipes = featured_recipes(&state.recipes, &state.featured_dishes).await;
    if recipes.is_empty() {
        return Err(ApiError::internal("Failed to fetch curated featured recipes"));
    }

    Ok(Json(RecipesResponse { recipes }))
}

pub async fn food_news(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NewsResponse>, ApiError> {
    let articles = state
        .news
        .latest()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(NewsResponse { articles }))
}

pub async fn cooking_assistant(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AssistantRequest>,
) -> Result<Json<AssistantResponse>, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::bad_request("No question provided"));
    }

    let answer = answer_question(
        state.assistant.as_deref(),
        &request.question,
        request.recipe.as_deref(),
    )
    .await
    .map_err(|e| match e {
        RelayError::ServiceUnavailable(_) => {
            ApiError::unavailable("Cooking assistant is not configured")
        }
        other => ApiError::internal("Failed to generate a response").with_details(other.to_string()),
    })?;

    Ok(Json(AssistantResponse { answer }))
}
