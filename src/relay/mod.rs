//! Relay server
//!
//! Serves the prebuilt front-end and forwards everything under `/api` to the
//! backend. Unknown paths get `index.html` so client-side routes resolve.

pub mod proxy;

use axum::{routing::any, Router};
use log::info;
use reqwest::Client;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::services::{ServeDir, ServeFile};
use url::Url;

use crate::config::RelayConfig;
use crate::error::AppResult;
use crate::http_config::HttpConfig;

/// Largest request body forwarded to the backend
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct RelayState {
    pub client: Client,
    pub backend_url: Url,
}

pub fn router(config: &RelayConfig, client: Client) -> Router {
    let state = RelayState {
        client,
        backend_url: config.backend_url.clone(),
    };

    let assets = ServeDir::new(&config.static_dir).fallback(ServeFile::new(config.index_file()));

    Router::new()
        .route("/api", any(proxy::forward))
        .route("/api/", any(proxy::forward))
        .route("/api/{*path}", any(proxy::forward))
        .fallback_service(assets)
        .with_state(state)
}

/// Bind the configured port and serve until `shutdown` fires.
pub async fn serve(config: RelayConfig, shutdown: CancellationToken) -> AppResult<()> {
    let client = HttpConfig::relay().build_client()?;
    let app = router(&config, client);
    let listener = TcpListener::bind(config.bind_addr()).await?;
    run(listener, app, shutdown).await
}

pub async fn run(listener: TcpListener, app: Router, shutdown: CancellationToken) -> AppResult<()> {
    info!("Relay server running on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;
    info!("Relay server stopped");
    Ok(())
}
