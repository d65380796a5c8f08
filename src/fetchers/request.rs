use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::error::RelayError;

/// Plain GET fetcher for public documents such as the news feed
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Duration) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; RecipeRelay/0.1)")
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a document body. A non-success status is an error.
    pub async fn fetch(&self, url: &str) -> Result<String, RelayError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!("GET {} -> {}", url, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}
