use std::sync::Arc;

use crate::news::NewsFeed;
use crate::pipelines::FallbackPipeline;
use crate::providers::LlmProvider;
use crate::spoonacular::SpoonacularClient;

/// Services shared by every handler. Nothing in here is mutated after start-up.
pub struct AppState {
    pub recipes: SpoonacularClient,
    pub fallback: FallbackPipeline,
    pub assistant: Option<Arc<dyn LlmProvider>>,
    pub news: NewsFeed,
    pub featured_dishes: Vec<String>,
}
