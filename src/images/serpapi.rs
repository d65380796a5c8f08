use crate::config::SerpApiConfig;
use crate::error::RelayError;
use crate::images::ImageSearch;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    images_results: Vec<ImageResult>,
}

#[derive(Debug, Deserialize)]
struct ImageResult {
    original: Option<String>,
}

/// Google Images search through SerpApi
pub struct SerpApiImageSearch {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SerpApiImageSearch {
    pub fn new(config: &SerpApiConfig, timeout: Duration) -> Result<Self, RelayError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| RelayError::ServiceUnavailable("SERPAPI_KEY not configured".into()))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl ImageSearch for SerpApiImageSearch {
    fn provider_name(&self) -> &str {
        "serpapi"
    }

    async fn find_image(&self, dish: &str) -> Result<Option<String>, RelayError> {
        let query = format!("{} food recipe high quality", dish.trim());
        let response = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&[
                ("engine", "google_images"),
                ("q", query.as_str()),
                ("api_key", self.api_key.as_str()),
                ("num", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body: ImagesResponse = response.json().await?;
        debug!("SerpApi returned {} images", body.images_results.len());

        Ok(body
            .images_results
            .into_iter()
            .next()
            .and_then(|image| image.original))
    }
}
