//! Shared test helpers: a scripted in-memory transport.

#![allow(dead_code)]

use bytes::Bytes;
use cognibank::api::{ApiRequest, ApiResponse, BackendClient, Transport};
use cognibank::config::RetryConfig;
use cognibank::errors::ApiError;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeState {
    responses: VecDeque<Result<ApiResponse, ApiError>>,
    requests: Vec<ApiRequest>,
}

/// Replays queued responses in order and records every request.
#[derive(Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.state.lock().unwrap().responses.push_back(Ok(ApiResponse {
            status,
            body: Bytes::copy_from_slice(body.as_bytes()),
        }));
        self
    }

    pub fn fail(&self, error: ApiError) -> &Self {
        self.state.lock().unwrap().responses.push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

impl Transport for FakeTransport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send {
        let response = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request);
            state
                .responses
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Connection("no scripted response".into())))
        };
        async move { response }
    }
}

/// Fast retries so failure paths do not slow the suite down.
pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        base_delay_ms: 1,
        jitter_factor: 0.0,
        ..Default::default()
    }
}

pub fn client(transport: &FakeTransport) -> BackendClient<FakeTransport> {
    BackendClient::with_transport(transport.clone(), fast_retry())
}

pub fn body_json(request: &ApiRequest) -> serde_json::Value {
    serde_json::from_slice(request.body.as_ref().expect("request has a body")).unwrap()
}
