//! Error type shared by the request executor and the typed API clients.
//!
//! Nothing here is translated or retried: a failed round trip surfaces as the
//! variant describing where it broke, with the raw server body kept for
//! debugging.

use reqwest::{Method, StatusCode};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout, ...).
    #[error("failed to reach Mealie at {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("{method} {path} failed with status {status}: {body}")]
    Status {
        method: Method,
        path: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to encode request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("invalid response from Mealie: {0}")]
    Deserialize(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network { source, .. } => source.status(),
            _ => None,
        }
    }
}
