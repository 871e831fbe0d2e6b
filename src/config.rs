use std::env;
use std::path::PathBuf;

use log::warn;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";
pub const DEFAULT_DOWNLOAD_DIR: &str = "static/downloads";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
    #[error("SEARCH_URL is not a valid url: {0:?}")]
    InvalidSearchUrl(String),
}

/// Credentials for the custom search API. Neither value is checked here,
/// a bad key simply shows up as searches that come back empty
#[derive(Debug, Clone, Default)]
pub struct SearchCredentials {
    pub api_key: String,
    pub engine_id: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: SearchCredentials,
    pub search_url: Url,
    pub download_dir: PathBuf,
    pub port: u16,
    pub user_agent: String,
}

impl Config {
    /// Reads everything from the process environment. Call [`dotenv::dotenv`]
    /// beforehand if a `.env` file should be honored
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY").unwrap_or_else(|| {
            warn!("API_KEY is not set, image searches will come back empty");
            String::new()
        });
        let engine_id = lookup("CSE_ID").unwrap_or_else(|| {
            warn!("CSE_ID is not set, image searches will come back empty");
            String::new()
        });
        let raw_search_url = lookup("SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_owned());
        let search_url =
            Url::parse(&raw_search_url).map_err(|_| ConfigError::InvalidSearchUrl(raw_search_url))?;
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        Ok(Config {
            credentials: SearchCredentials { api_key, engine_id },
            search_url,
            download_dir: lookup("DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DOWNLOAD_DIR)),
            port,
            user_agent: lookup("USER_AGENT").unwrap_or_else(default_user_agent),
        })
    }
}

pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
