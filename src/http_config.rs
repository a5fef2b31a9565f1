//! HTTP client configuration module
//!
//! Centralized timeouts and connection settings for the two HTTP clients:
//! the sync gateway talking to the REST API, and the relay forwarding
//! `/api` traffic to the backend.

use reqwest::{redirect, Client, ClientBuilder};
use std::time::Duration;

use crate::error::AppResult;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Total request timeout
    pub timeout: Duration,
    /// Whether redirects are followed or handed back to the caller
    pub follow_redirects: bool,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
            follow_redirects: true,
            user_agent: format!("meetbook/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// Config for gateway calls against the REST API
    pub fn gateway() -> Self {
        Self::default()
    }

    /// Config for the relay. Redirects and errors go back to the browser
    /// untouched.
    pub fn relay() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(60),
            follow_redirects: false,
            ..Self::default()
        }
    }

    /// Build a reqwest client with this configuration
    pub fn build_client(&self) -> AppResult<Client> {
        let policy = if self.follow_redirects {
            redirect::Policy::default()
        } else {
            redirect::Policy::none()
        };

        Ok(ClientBuilder::new()
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .redirect(policy)
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?)
    }
}
