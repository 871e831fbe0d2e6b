use async_trait::async_trait;
use log::{debug, error, warn};
use thiserror::Error;

use crate::image::ImageResult;
use crate::request::HttpError;

pub use google::*;

pub mod google;

/// The most results a single search is allowed to return
pub const MAX_RESULTS: usize = 8;

#[derive(Error, Debug)]
pub enum SearchFailure {
    #[error("Failed to process response from request")]
    HttpError(#[from] HttpError),
}

impl From<reqwest::Error> for SearchFailure {
    fn from(err: reqwest::Error) -> Self {
        SearchFailure::HttpError(HttpError::ReqwestError(err))
    }
}

/// An external service that turns free text into image urls.
#[async_trait]
pub trait ImageSearch: Sync + Send {
    /// a string that identifies this provider in logs
    fn id(&self) -> &'static str;

    /// Run a single query against the provider, in provider relevance order
    async fn try_search(&self, query: &str) -> Result<Vec<ImageResult>, SearchFailure>;

    /// Search without ever failing. Any problem with the provider is logged
    /// and shows up to the caller as "no images found"
    async fn search(&self, query: &str) -> Vec<ImageResult> {
        match self.try_search(query).await {
            Ok(mut images) => {
                images.truncate(MAX_RESULTS);
                debug!("{} found {} images for {:?}", self.id(), images.len(), query);
                images
            }
            Err(SearchFailure::HttpError(HttpError::ReqwestError(err))) => {
                error!("Could not reach {}: {}", self.id(), err);
                vec![]
            }
            Err(err) => {
                warn!("{} search for {:?} failed: {:?}", self.id(), query, err);
                vec![]
            }
        }
    }
}
