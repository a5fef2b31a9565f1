//! Configuration module
//!
//! Everything comes from the environment. The relay reads the backend origin
//! and listening port; the console reads the API base URL it talks to.

use log::{info, warn};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use url::Url;

use crate::error::{AppError, AppResult};

pub const BACKEND_URL_VAR: &str = "SPRING_BOOT_API_URL";
pub const PORT_VAR: &str = "PORT";
pub const API_URL_VAR: &str = "MEETBOOK_API_URL";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Settings for the relay server process
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Origin every `/api` request is forwarded to
    pub backend_url: Url,
    pub port: u16,
    /// Prebuilt front-end assets, with `index.html` as the fallback page
    pub static_dir: PathBuf,
}

impl RelayConfig {
    pub fn new(backend_url: Url, port: u16, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend_url,
            port,
            static_dir: static_dir.into(),
        }
    }

    pub fn from_env() -> AppResult<Self> {
        let backend = non_empty_var(BACKEND_URL_VAR).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = parse_base_url(&backend, BACKEND_URL_VAR)?;

        let port = match non_empty_var(PORT_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("Invalid {} value '{}': expected a port number", PORT_VAR, raw))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self::new(backend_url, port, DEFAULT_STATIC_DIR))
    }

    /// Listen on every interface
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}

/// Settings for the console front-end
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the collection segments are appended to
    pub api_url: Url,
}

impl ClientConfig {
    pub fn new(api_url: Url) -> Self {
        Self { api_url }
    }

    pub fn from_env() -> AppResult<Self> {
        let raw = non_empty_var(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> AppResult<Self> {
        Ok(Self::new(parse_base_url(raw, API_URL_VAR)?))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an http(s) base URL, naming `source` in the error.
pub fn parse_base_url(raw: &str, source: &str) -> AppResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::config(format!("Invalid {} '{}': {}", source, raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AppError::config(format!(
            "{} must use http or https, got '{}://'",
            source,
            url.scheme()
        )));
    }
    if url.host_str().is_none() || url.cannot_be_a_base() {
        return Err(AppError::config(format!("{} '{}' has no host", source, raw)));
    }
    Ok(url)
}

/// Check a relay config before serving.
///
/// A missing asset directory is not fatal: `/api` still works, and the page
/// routes answer 404 until a build is dropped in place.
pub fn validate_config(config: &RelayConfig) -> AppResult<()> {
    info!(
        "Relay configuration: backend={}, port={}, static_dir={}",
        config.backend_url,
        config.port,
        config.static_dir.display()
    );

    if config.backend_url.query().is_some() {
        return Err(AppError::config(format!(
            "{} must not carry a query string",
            BACKEND_URL_VAR
        )));
    }
    if !config.index_file().is_file() {
        warn!(
            "No index.html under {}; page routes will return 404",
            config.static_dir.display()
        );
    }
    Ok(())
}
