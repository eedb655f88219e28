//! Environment-driven configuration for the client and the MCP server.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct MealieConfig {
    /// Root of the Mealie server, without the `/api` prefix.
    pub base_url: String,
    /// Long-lived API token created from the Mealie user profile page.
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    /// Address the SSE server listens on.
    pub bind_addr: String,
}

impl MealieConfig {
    /// Reads `MEALIE_BASE_URL`, `MEALIE_API_TOKEN`, `MEALIE_REQUEST_TIMEOUT_SECS`
    /// and `BIND_ADDR`, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("MEALIE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let api_token = env::var("MEALIE_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let request_timeout = match env::var("MEALIE_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().with_context(|| {
                    format!("MEALIE_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}")
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            base_url,
            api_token,
            request_timeout,
            bind_addr,
        })
    }
}

impl Default for MealieConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}
