//! Request execution for the Mealie API.
//!
//! [`ApiRequests`] is the seam every typed client goes through: it takes an
//! `/api/...` path (and a JSON body where the verb has one) and hands back the
//! raw response. [`ReqwestRequests`] is the production implementation; tests
//! swap in a recorder.

use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::error::ApiError;
use crate::config::MealieConfig;

/// Executes HTTP verbs against a Mealie server.
///
/// Implementations resolve `path` against their own base URL. Non-2xx answers
/// must come back as [`ApiError::Status`] so callers see failures unmodified.
pub trait ApiRequests: Send + Sync {
    fn get(&self, path: &str) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;

    fn post(
        &self,
        path: &str,
        body: Value,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;

    fn put(
        &self,
        path: &str,
        body: Value,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;

    fn patch(
        &self,
        path: &str,
        body: Value,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;

    fn delete(&self, path: &str) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;
}

/// A successful response as the executor received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Raw response tagged with the shape the endpoint is expected to return.
///
/// The body is kept as received; [`RequestResponse::data`] decodes it on demand.
#[derive(Debug)]
pub struct RequestResponse<T> {
    pub status: StatusCode,
    pub body: String,
    _data: PhantomData<fn() -> T>,
}

impl<T> From<ApiResponse> for RequestResponse<T> {
    fn from(response: ApiResponse) -> Self {
        Self {
            status: response.status,
            body: response.body,
            _data: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> RequestResponse<T> {
    pub fn data(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(ApiError::Deserialize)
    }
}

/// `reqwest`-backed executor with optional bearer token authentication.
#[derive(Debug, Clone)]
pub struct ReqwestRequests {
    base_url: String,
    client: Client,
    token: Option<String>,
    timeout: Duration,
}

impl ReqwestRequests {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config(config: &MealieConfig) -> Self {
        let requests = Self::new(config.base_url.clone()).with_timeout(config.request_timeout);
        match &config.api_token {
            Some(token) => requests.with_token(token.clone()),
            None => requests,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| {
            tracing::error!("Network error calling {} {}: {}", method, url, source);
            ApiError::Network {
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        tracing::debug!("{} {} responded with {}", method, path, status);

        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Network { url, source })?;

        if !status.is_success() {
            tracing::error!("{} {} failed with status {}", method, path, status);
            tracing::debug!("{} {} error body: {}", method, path, body);
            return Err(ApiError::Status {
                method,
                path: path.to_string(),
                status,
                body,
            });
        }

        Ok(ApiResponse { status, body })
    }
}

impl ApiRequests for ReqwestRequests {
    async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn patch(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.send(Method::PATCH, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(Method::DELETE, path, None).await
    }
}
