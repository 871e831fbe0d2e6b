use std::io;
use std::sync::Arc;

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Extension, Form, Path};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::Config;
use crate::download::{is_sanitized, DownloadRequest, Downloader, IMAGE_EXTENSION};
use crate::search::ImageSearch;

pub mod pages;

pub struct Context {
    pub config: Config,
    pub search: Box<dyn ImageSearch>,
    pub downloader: Downloader,
}

pub enum AppError {
    NotFound,
    IoError(io::Error),
}

impl From<io::Error> for AppError {
    fn from(inner: io::Error) -> Self {
        match inner.kind() {
            io::ErrorKind::NotFound => AppError::NotFound,
            _ => AppError::IoError(inner),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_owned()),
            AppError::IoError(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Success,
    Error,
}

/// Body of every `/download` response. Callers look at `status`, the
/// http code is always 200
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadReport {
    pub status: DownloadStatus,
    pub message: String,
}

impl DownloadReport {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: DownloadStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: DownloadStatus::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub query: Option<String>,
}

pub async fn index() -> Html<String> {
    Html(pages::index())
}

pub async fn search(
    Extension(state): Extension<Arc<Context>>,
    payload: Result<Form<SearchForm>, FormRejection>,
) -> Html<String> {
    // a missing or unreadable form is searched as an empty query
    let query = match payload {
        Ok(Form(form)) => form.query.unwrap_or_default(),
        Err(rejection) => {
            warn!("Rejected search form: {}", rejection.body_text());
            String::new()
        }
    };
    let images = state.search.search(&query).await;
    Html(pages::results(&query, &images))
}

pub async fn download(
    Extension(state): Extension<Arc<Context>>,
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Json<DownloadReport> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected download body: {}", rejection.body_text());
            return Json(DownloadReport::error(rejection.body_text()));
        }
    };
    let report = match state.downloader.save(&request).await {
        Ok(stored) => DownloadReport::success(format!("{} downloaded.", stored.file_name)),
        Err(err) => {
            info!("Download of {:?} failed: {}", request.url, err);
            DownloadReport::error(err.to_string())
        }
    };
    Json(report)
}

/// Serves a previously saved image back out of the downloads directory
pub async fn stored_image(
    Extension(state): Extension<Arc<Context>>,
    Path(file): Path<String>,
) -> Result<Response, AppError> {
    // partial downloads are hidden `.part` files and never served
    if !is_sanitized(&file) || !file.ends_with(IMAGE_EXTENSION) {
        return Err(AppError::NotFound);
    }
    let bytes = tokio::fs::read(state.downloader.path_for(&file)).await?;
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response())
}
