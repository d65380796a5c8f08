mod normalize;

pub use normalize::{normalize_recipe, normalize_results, split_raw_instructions};

use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::SpoonacularConfig;
use crate::error::RelayError;
use crate::model::Recipe;

const COMPLEX_SEARCH_PATH: &str = "/recipes/complexSearch";

#[derive(Debug, Deserialize)]
struct ComplexSearchResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

/// What to search for. Empty strings are forwarded as-is.
#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    pub query: String,
    pub cuisine: String,
}

impl RecipeQuery {
    pub fn new(query: impl Into<String>, cuisine: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            cuisine: cuisine.into(),
        }
    }

    pub fn dish(query: impl Into<String>) -> Self {
        Self::new(query, "")
    }
}

/// Client for the Spoonacular `complexSearch` endpoint.
pub struct SpoonacularClient {
    client: Client,
    api_key: String,
    base_url: String,
    number: u32,
}

impl SpoonacularClient {
    /// Create a new client from configuration
    pub fn new(config: &SpoonacularConfig, timeout: Duration) -> Result<Self, RelayError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            number: config.number,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            number: 12,
        }
    }

    /// Search with the configured result count.
    pub async fn search(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, RelayError> {
        self.search_with_limit(query, self.number).await
    }

    /// Search and normalize at most `number` recipes.
    ///
    /// A non-success status becomes [`RelayError::Upstream`] carrying the
    /// raw body. Malformed individual results are skipped.
    pub async fn search_with_limit(
        &self,
        query: &RecipeQuery,
        number: u32,
    ) -> Result<Vec<Recipe>, RelayError> {
        let number = number.to_string();
        let response = self
            .client
            .get(format!("{}{}", self.base_url, COMPLEX_SEARCH_PATH))
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("query", query.query.as_str()),
                ("cuisine", query.cuisine.as_str()),
                ("number", number.as_str()),
                ("addRecipeInformation", "true"),
                ("addRecipeNutrition", "true"),
                ("fillIngredients", "true"),
                ("instructionsRequired", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                "Spoonacular search for {:?} failed with status {}",
                query.query, status
            );
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: ComplexSearchResponse = response.json().await?;
        let results = body.results.unwrap_or_default();
        debug!(
            "Spoonacular returned {} results for {:?}",
            results.len(),
            query.query
        );

        Ok(normalize_results(results))
    }
}
