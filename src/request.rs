use std::iter::FromIterator;

use log::{error, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

#[derive(Debug)]
pub struct ResponseErrorContext {
    pub url: Url,
    pub body: String,
    pub code: StatusCode,
}

/// Wrapper for providing actual useful information about
/// why responses failed since reqwest throws that information
/// away when it encounters errors
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("{} responded with {}", .0.url, .0.code)]
    FailStatus(ResponseErrorContext),
    #[error("Unexpected body from {}", .0.url)]
    UnexpectedBody(ResponseErrorContext),
    #[error("Request error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

pub async fn parse_successful_response<T: DeserializeOwned>(
    response: Response,
) -> Result<T, HttpError> {
    let response_code = response.status();
    let url = response.url().clone();
    let response_body = response.text().await?;
    if !response_code.is_success() {
        return Err(HttpError::FailStatus(ResponseErrorContext {
            url,
            body: response_body,
            code: response_code,
        }));
    }
    serde_json::from_str::<T>(&response_body).map_err(|_error| {
        error!("Failed to parse response from {}", url);
        HttpError::UnexpectedBody(ResponseErrorContext {
            url,
            body: response_body,
            code: response_code,
        })
    })
}

/// Reads the whole body of a 2xx response. Anything else is turned into
/// [`HttpError::FailStatus`] without reading more than the error page
pub async fn successful_bytes(response: Response) -> Result<Vec<u8>, HttpError> {
    let response_code = response.status();
    if !response_code.is_success() {
        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        return Err(HttpError::FailStatus(ResponseErrorContext {
            url,
            body,
            code: response_code,
        }));
    }
    Ok(response.bytes().await?.to_vec())
}

pub fn request_default_headers(user_agent: &str) -> HeaderMap {
    let value = HeaderValue::from_str(user_agent).unwrap_or_else(|_| {
        warn!("USER_AGENT {:?} is not a valid header value, using the default", user_agent);
        HeaderValue::from_static(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
    });
    HeaderMap::from_iter([(HeaderName::from_static("user-agent"), value)])
}

pub fn build_client(user_agent: &str) -> reqwest::Result<Client> {
    Client::builder()
        .default_headers(request_default_headers(user_agent))
        .build()
}
