use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use axum::extract::Extension;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use tokio::net::TcpListener;

use crate::api::{download, index, search, stored_image, Context};
use crate::config::Config;
use crate::download::Downloader;
use crate::request::build_client;
use crate::search::GoogleImageSearch;

/// Wires the real search provider and downloader together from `config`
/// and makes sure the downloads directory exists
pub async fn build_context(config: Config) -> anyhow::Result<Arc<Context>> {
    let client = Arc::new(build_client(&config.user_agent).context("Could not build http client")?);
    let downloader = Downloader::new(Arc::clone(&client), config.download_dir.clone());
    downloader.prepare().await.with_context(|| {
        format!(
            "Could not create downloads directory {}",
            config.download_dir.display()
        )
    })?;
    let search = Box::new(GoogleImageSearch::new(client, &config));
    Ok(Arc::new(Context {
        config,
        search,
        downloader,
    }))
}

pub fn router(ctx: Arc<Context>) -> Router {
    Router::new()
        .route("/", get(index).post(search))
        .route("/download", post(download))
        .route("/static/downloads/:file", get(stored_image))
        .layer(Extension(ctx))
}

pub async fn run_server(ctx: Arc<Context>) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], ctx.config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not bind {}", addr))?;
    info!(
        "Serving on {}, saving images to {}",
        addr,
        ctx.downloader.directory().display()
    );
    axum::serve(listener, router(ctx)).await?;
    Ok(())
}
