#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use mcp_mealie::client::{ApiError, ApiRequests, ApiResponse, ShoppingApi};
use reqwest::{Method, StatusCode};
use serde_json::Value;

/// One call as seen by the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Executor that records every call and replays queued responses.
///
/// With nothing queued it answers `200 {}`.
#[derive(Default)]
pub struct RecordingRequests {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
}

impl RecordingRequests {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond_with(&self, status: StatusCode, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse::new(status, body.to_string())));
    }

    pub fn fail_with(&self, method: Method, path: &str, status: StatusCode, body: &str) {
        self.responses.lock().unwrap().push_back(Err(ApiError::Status {
            method,
            path: path.to_string(),
            status,
            body: body.to_string(),
        }));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn single_call(&self) -> RecordedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one request, got {:?}", calls);
        calls.into_iter().next().unwrap()
    }

    fn record(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse::new(StatusCode::OK, "{}")))
    }
}

impl ApiRequests for RecordingRequests {
    async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.record(Method::GET, path, None)
    }

    async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.record(Method::POST, path, Some(body))
    }

    async fn put(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.record(Method::PUT, path, Some(body))
    }

    async fn patch(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.record(Method::PATCH, path, Some(body))
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.record(Method::DELETE, path, None)
    }
}

pub fn shopping_api() -> (Arc<RecordingRequests>, ShoppingApi<RecordingRequests>) {
    let requests = RecordingRequests::new();
    let api = ShoppingApi::new(Arc::clone(&requests));
    (requests, api)
}

pub fn init_test_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
