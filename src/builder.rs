use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::RelayError;
use crate::images::{ImageSearch, SerpApiImageSearch};
use crate::news::NewsFeed;
use crate::pipelines::FallbackPipeline;
use crate::providers::{GroqProvider, LlmProvider};
use crate::server::AppState;
use crate::spoonacular::SpoonacularClient;

/// Builder for the relay's shared application state
///
/// Services that are not supplied explicitly are constructed from the
/// configuration. A service whose credentials are missing is left out and
/// the features depending on it are disabled.
#[derive(Default)]
pub struct RelayBuilder {
    config: Option<AppConfig>,
    generator: Option<Arc<dyn LlmProvider>>,
    image_search: Option<Arc<dyn ImageSearch>>,
}

impl RelayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this configuration instead of the defaults
    ///
    /// # Example
    /// ```
    /// use recipe_relay::{AppConfig, RelayBuilder};
    ///
    /// let mut config = AppConfig::default();
    /// config.spoonacular.api_key = Some("your-api-key".to_string());
    ///
    /// let state = RelayBuilder::new().config(config).build();
    /// assert!(state.is_ok());
    /// ```
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom generative text service for fallback recipes and the
    /// cooking assistant
    pub fn generator(mut self, generator: Arc<dyn LlmProvider>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Use a custom image search for fallback recipes
    pub fn image_search(mut self, image_search: Arc<dyn ImageSearch>) -> Self {
        self.image_search = Some(image_search);
        self
    }

    /// Construct every service
    ///
    /// # Errors
    /// Returns `RelayError` if an HTTP client cannot be created.
    pub fn build(self) -> Result<AppState, RelayError> {
        let config = self.config.unwrap_or_default();
        let timeout = Duration::from_secs(config.timeout);

        let generator = self.generator.or_else(|| {
            match GroqProvider::new(&config.groq, timeout) {
                Ok(provider) => Some(Arc::new(provider) as Arc<dyn LlmProvider>),
                Err(e) => {
                    warn!("Generative fallback disabled: {}", e);
                    None
                }
            }
        });

        let image_search = self.image_search.or_else(|| {
            match SerpApiImageSearch::new(&config.serpapi, timeout) {
                Ok(search) => Some(Arc::new(search) as Arc<dyn ImageSearch>),
                Err(e) => {
                    warn!("Image lookup disabled: {}", e);
                    None
                }
            }
        });

        if let Some(generator) = &generator {
            info!("Using {} for generated recipes", generator.provider_name());
        }

        Ok(AppState {
            recipes: SpoonacularClient::new(&config.spoonacular, timeout)?,
            fallback: FallbackPipeline::new(generator.clone(), image_search),
            assistant: generator,
            news: NewsFeed::new(&config.news, timeout)?,
            featured_dishes: config.featured.queries,
        })
    }
}
