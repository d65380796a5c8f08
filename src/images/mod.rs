mod serpapi;

pub use serpapi::SerpApiImageSearch;

use async_trait::async_trait;

use crate::error::RelayError;

/// Looks up a photo for a dish
#[async_trait]
pub trait ImageSearch: Send + Sync {
    fn provider_name(&self) -> &str;

    /// URL of the best matching image, if any
    async fn find_image(&self, dish: &str) -> Result<Option<String>, RelayError>;
}
