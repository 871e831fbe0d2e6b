#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use imgfetch::config::{Config, SearchCredentials};
use reqwest::Client;
use tokio::net::TcpListener;
use url::Url;

pub const API_KEY: &str = "test-key";
pub const ENGINE_ID: &str = "test-cx";
pub const SEARCH_PATH: &str = "/customsearch/v1";

/// Serves `router` on an ephemeral localhost port for the rest of the test
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// An address nothing is listening on
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// A search endpoint that always answers with `status` and `body`
pub async fn fake_provider(status: StatusCode, body: &str) -> SocketAddr {
    let body = body.to_owned();
    let router = Router::new().route(
        SEARCH_PATH,
        get(move || {
            let body = body.clone();
            async move { (status, body) }
        }),
    );
    spawn(router).await
}

/// An image host serving each `(path, bytes)` pair
pub async fn fake_image_host(files: &[(&str, &[u8])]) -> SocketAddr {
    let mut router = Router::new();
    for (path, bytes) in files {
        let bytes = bytes.to_vec();
        router = router.route(
            path,
            get(move || {
                let bytes = bytes.clone();
                async move { ([("content-type", "image/png")], bytes) }
            }),
        );
    }
    spawn(router).await
}

pub fn search_url(addr: SocketAddr) -> String {
    format!("http://{}{}", addr, SEARCH_PATH)
}

pub fn config(search_url: &str, download_dir: &Path) -> Config {
    Config {
        credentials: SearchCredentials {
            api_key: API_KEY.to_owned(),
            engine_id: ENGINE_ID.to_owned(),
        },
        search_url: Url::parse(search_url).unwrap(),
        download_dir: download_dir.to_path_buf(),
        port: 0,
        user_agent: "imgfetch-tests".to_owned(),
    }
}

pub fn client() -> Arc<Client> {
    Arc::new(Client::new())
}

pub fn items_body(links: &[&str]) -> String {
    let items = links
        .iter()
        .map(|link| serde_json::json!({ "link": link, "mime": "image/jpeg" }))
        .collect::<Vec<_>>();
    serde_json::json!({ "kind": "customsearch#search", "items": items }).to_string()
}
