use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::config::{Config, SearchCredentials};
use crate::image::ImageResult;
use crate::request::{parse_successful_response, HttpError, ResponseErrorContext};

use super::*;

#[derive(Debug, Deserialize)]
pub struct GoogleSearchItem {
    // always present for image results, but one bad item shouldn't sink the page
    pub link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleSearchResponse {
    /// Google leaves the key out entirely when nothing matched
    #[serde(default)]
    pub items: Vec<GoogleSearchItem>,
}

impl GoogleSearchResponse {
    pub fn into_images(self) -> Vec<ImageResult> {
        self.items
            .into_iter()
            .filter_map(|item| item.link)
            .map(ImageResult::new)
            .collect()
    }
}

/// Google Custom Search restricted to image results
pub struct GoogleImageSearch {
    pub client: Arc<Client>,
    pub credentials: SearchCredentials,
    pub endpoint: Url,
}

impl GoogleImageSearch {
    pub fn new(client: Arc<Client>, config: &Config) -> Self {
        Self {
            client,
            credentials: config.credentials.clone(),
            endpoint: config.search_url.clone(),
        }
    }

    pub fn search_url(&self, query: &str) -> Url {
        let num = MAX_RESULTS.to_string();
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().extend_pairs(&[
            ("key", self.credentials.api_key.as_str()),
            ("cx", self.credentials.engine_id.as_str()),
            ("q", query),
            ("searchType", "image"),
            ("num", num.as_str()),
        ]);
        url
    }
}

#[async_trait]
impl ImageSearch for GoogleImageSearch {
    fn id(&self) -> &'static str {
        "google.custom_search"
    }

    async fn try_search(&self, query: &str) -> Result<Vec<ImageResult>, SearchFailure> {
        let response = self.client.get(self.search_url(query)).send().await?;
        let code = response.status();
        // anything but a plain 200 is treated as a failed search, including
        // other 2xx codes the API never sends in practice
        if code != StatusCode::OK {
            let url = response.url().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::FailStatus(ResponseErrorContext { url, body, code }).into());
        }
        let parsed = parse_successful_response::<GoogleSearchResponse>(response).await?;
        Ok(parsed.into_images())
    }
}
