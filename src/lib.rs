//! A thin HTTP backend that relays recipe searches to Spoonacular, falls
//! back to a generated recipe when nothing is found, and proxies a food
//! news feed.
//!
//! # Example
//! ```no_run
//! use recipe_relay::{router, AppConfig, RelayBuilder};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = router(RelayBuilder::new().config(config.clone()).build()?);
//!
//! let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod images;
pub mod model;
pub mod news;
pub mod pipelines;
pub mod providers;
pub mod server;
pub mod spoonacular;

pub use builder::RelayBuilder;
pub use config::AppConfig;
pub use error::RelayError;
pub use model::{Ingredient, Measure, NewsArticle, Recipe};
pub use server::{router, AppState};
