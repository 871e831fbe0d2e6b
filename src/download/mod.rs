use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::request::{successful_bytes, HttpError};

pub use sanitize::*;

pub mod sanitize;

/// Display name used when a request doesn't bring its own
pub const DEFAULT_IMAGE_NAME: &str = "image";

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("No url to download from")]
    MissingUrl,
    /// Covers both unreachable hosts and non 2xx responses
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("Could not save {}: {}", .path.display(), .source)]
    Io { path: PathBuf, source: io::Error },
}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        DownloadError::Http(HttpError::ReqwestError(err))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloadRequest {
    pub url: Option<String>,
    pub name: Option<String>,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            name: Some(name.into()),
        }
    }

    /// The name the image is stored under. Missing and empty names both
    /// fall back to [`DEFAULT_IMAGE_NAME`] so they don't all land on `.jpg`
    pub fn file_name(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => sanitize_filename(name),
            _ => sanitize_filename(DEFAULT_IMAGE_NAME),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub file_name: String,
    pub path: PathBuf,
    pub size: usize,
}

/// Fetches images and writes them into a single flat directory
pub struct Downloader {
    pub client: Arc<Client>,
    pub directory: PathBuf,
}

impl Downloader {
    pub fn new(client: Arc<Client>, directory: impl Into<PathBuf>) -> Self {
        Self {
            client,
            directory: directory.into(),
        }
    }

    /// Creates the downloads directory if it isn't there yet. Has to run
    /// before the first [`Downloader::save`]
    pub async fn prepare(&self) -> io::Result<()> {
        fs::create_dir_all(&self.directory).await
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }

    pub async fn save(&self, request: &DownloadRequest) -> Result<StoredImage, DownloadError> {
        let url = request.url.as_deref().ok_or(DownloadError::MissingUrl)?;
        let file_name = request.file_name();
        debug!("Downloading {} as {}", url, file_name);
        let response = self.client.get(url).send().await?;
        let bytes = successful_bytes(response).await?;
        let path = self.persist(&file_name, &bytes).await?;
        info!("Saved {} ({} bytes) from {}", path.display(), bytes.len(), url);
        Ok(StoredImage {
            file_name,
            path,
            size: bytes.len(),
        })
    }

    /// Writes next to the target first and renames over it, so readers see
    /// either the old file or the complete new one. Last rename wins.
    async fn persist(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError> {
        let target = self.path_for(file_name);
        let partial = self.path_for(&format!(
            ".{}.{:08x}.part",
            file_name,
            rand::random::<u32>()
        ));
        if let Err(source) = write_then_rename(&partial, &target, bytes).await {
            if let Err(cleanup) = fs::remove_file(&partial).await {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!("Could not remove {}: {}", partial.display(), cleanup);
                }
            }
            return Err(DownloadError::Io {
                path: target,
                source,
            });
        }
        Ok(target)
    }
}

async fn write_then_rename(partial: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(partial).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(partial, target).await
}
