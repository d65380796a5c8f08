use config::{Config, ConfigError, Environment, File};
use log::{info, warn};
use serde::Deserialize;

/// Top level application configuration, built once at process start
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Request timeout in seconds for every outbound client
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub spoonacular: SpoonacularConfig,
    #[serde(default)]
    pub groq: GroqConfig,
    #[serde(default)]
    pub serpapi: SerpApiConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub featured: FeaturedConfig,
}

/// Recipe search API settings
#[derive(Debug, Deserialize, Clone)]
pub struct SpoonacularConfig {
    /// API key (can also be set via SPOONACULAR_API_KEY)
    pub api_key: Option<String>,
    #[serde(default = "default_spoonacular_url")]
    pub base_url: String,
    /// Result count requested per search
    #[serde(default = "default_result_count")]
    pub number: u32,
}

/// Generative text service settings (OpenAI-compatible chat completions)
#[derive(Debug, Deserialize, Clone)]
pub struct GroqConfig {
    /// API key (can also be set via GROQ_API_KEY)
    pub api_key: Option<String>,
    #[serde(default = "default_groq_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// Image search settings
#[derive(Debug, Deserialize, Clone)]
pub struct SerpApiConfig {
    /// API key (can also be set via SERPAPI_KEY)
    pub api_key: Option<String>,
    #[serde(default = "default_serpapi_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NewsConfig {
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    /// Number of feed entries returned
    #[serde(default = "default_news_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeaturedConfig {
    /// Curated dish names looked up by the featured endpoint
    #[serde(default = "default_featured_queries")]
    pub queries: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            timeout: default_timeout(),
            spoonacular: SpoonacularConfig::default(),
            groq: GroqConfig::default(),
            serpapi: SerpApiConfig::default(),
            news: NewsConfig::default(),
            featured: FeaturedConfig::default(),
        }
    }
}

impl Default for SpoonacularConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_spoonacular_url(),
            number: default_result_count(),
        }
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_groq_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for SerpApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_serpapi_url(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            limit: default_news_limit(),
        }
    }
}

impl Default for FeaturedConfig {
    fn default() -> Self {
        Self {
            queries: default_featured_queries(),
        }
    }
}

// Default value functions
fn default_bind_address() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_spoonacular_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_result_count() -> u32 {
    12
}

fn default_groq_url() -> String {
    "https://api.groq.com/openai".to_string()
}

fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_serpapi_url() -> String {
    "https://serpapi.com".to_string()
}

fn default_feed_url() -> String {
    "https://rss.nytimes.com/services/xml/rss/nyt/DiningandWine.xml".to_string()
}

fn default_news_limit() -> usize {
    4
}

fn default_featured_queries() -> Vec<String> {
    vec![
        "Sushi".to_string(),
        "Tacos de Adobada".to_string(),
        "Butter Chicken".to_string(),
    ]
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_RELAY__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Credentials missing from both fall back to SPOONACULAR_API_KEY,
    /// GROQ_API_KEY and SERPAPI_KEY.
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Fill credentials that were not configured explicitly from the
    /// conventional environment variables. Empty values count as missing.
    pub fn with_env_credentials(mut self) -> Self {
        self.spoonacular.api_key = resolve_key(self.spoonacular.api_key, "SPOONACULAR_API_KEY");
        self.groq.api_key = resolve_key(self.groq.api_key, "GROQ_API_KEY");
        self.serpapi.api_key = resolve_key(self.serpapi.api_key, "SERPAPI_KEY");
        self
    }

    /// Log which optional services are enabled. Never logs key values.
    pub fn log_summary(&self) {
        info!("Listening address: {}", self.bind_address);
        if self.spoonacular.api_key.is_none() {
            warn!("SPOONACULAR_API_KEY is not set; recipe searches will be rejected upstream");
        }
        if self.groq.api_key.is_none() {
            warn!("GROQ_API_KEY is not set; generated fallback recipes and the cooking assistant are disabled");
        }
        if self.serpapi.api_key.is_none() {
            warn!("SERPAPI_KEY is not set; fallback recipes will have no image");
        }
    }
}

fn resolve_key(configured: Option<String>, env_var: &str) -> Option<String> {
    configured
        .or_else(|| std::env::var(env_var).ok())
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

/// Load configuration from file and environment variables
///
/// Environment variable format: RECIPE_RELAY__GROQ__MODEL
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_RELAY__SERPAPI__BASE_URL
        .add_source(
            Environment::with_prefix("RECIPE_RELAY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    Ok(config.with_env_credentials())
}
