use log::info;

use crate::error::RelayError;
use crate::model::Recipe;
use crate::pipelines::FallbackPipeline;
use crate::spoonacular::{RecipeQuery, SpoonacularClient};

/// Search Spoonacular, falling back to a generated recipe when a
/// non-empty query finds nothing.
///
/// Upstream failures of the search itself propagate; the fallback never fails.
pub async fn search_recipes(
    client: &SpoonacularClient,
    fallback: &FallbackPipeline,
    query: &RecipeQuery,
) -> Result<Vec<Recipe>, RelayError> {
    let recipes = client.search(query).await?;

    if recipes.is_empty() && !query.query.trim().is_empty() {
        info!(
            "No Spoonacular results for {:?}, trying generated fallback",
            query.query
        );
        return Ok(fallback.run(&query.query).await);
    }

    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{LlmProvider, ResponseFormat};
    use async_trait::async_trait;
    use mockito::{Matcher, Server};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for CountingGenerator {
        fn provider_name(&self) -> &str {
            "counting"
        }

        async fn complete(
            &self,
            _system: &str,
            _prompt: &str,
            _format: ResponseFormat,
        ) -> Result<String, RelayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(r#"{"title": "Generated"}"#.to_string())
        }
    }

    async fn empty_results(server: &mut Server) -> mockito::Mock {
        server
            .mock("GET", "/recipes/complexSearch")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"results": []}"#)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_cuisine_only_search_skips_fallback() {
        let mut server = Server::new_async().await;
        let _mock = empty_results(&mut server).await;

        let generator = Arc::new(CountingGenerator::default());
        let fallback = FallbackPipeline::new(Some(generator.clone() as Arc<dyn LlmProvider>), None);
        let client = SpoonacularClient::with_base_url("key".to_string(), server.url());

        let recipes = search_recipes(&client, &fallback, &RecipeQuery::new("  ", "Nordic"))
            .await
            .unwrap();

        assert!(recipes.is_empty());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_query_result_runs_fallback() {
        let mut server = Server::new_async().await;
        let _mock = empty_results(&mut server).await;

        let generator = Arc::new(CountingGenerator::default());
        let fallback = FallbackPipeline::new(Some(generator.clone() as Arc<dyn LlmProvider>), None);
        let client = SpoonacularClient::with_base_url("key".to_string(), server.url());

        let recipes = search_recipes(&client, &fallback, &RecipeQuery::dish("Litti Chokha"))
            .await
            .unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Generated");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/recipes/complexSearch")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("internal")
            .create_async()
            .await;

        let client = SpoonacularClient::with_base_url("key".to_string(), server.url());
        let result = search_recipes(
            &client,
            &FallbackPipeline::disabled(),
            &RecipeQuery::dish("Sushi"),
        )
        .await;

        assert!(matches!(result, Err(RelayError::Upstream { status: 500, .. })));
    }
}
