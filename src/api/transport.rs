//! HTTP transport seam.
//!
//! [`BackendClient`](super::BackendClient) speaks to the backend through the
//! [`Transport`] trait so tests can swap the network for canned responses.
//! [`HyperTransport`] is the production implementation.

use bytes::Bytes;
use http::{header, Method, Request};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::future::Future;
use std::time::Duration;

use crate::errors::ApiError;

/// A request relative to the backend base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path plus optional query, starting with `/`
    pub path: String,
    /// JSON body, if any
    pub body: Option<Bytes>,
    /// Safe to resend after a retryable failure
    pub idempotent: bool,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
            idempotent: true,
        }
    }

    /// POSTs are sent once unless marked with [`ApiRequest::idempotent`].
    pub fn post(path: impl Into<String>, body: Option<Bytes>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body,
            idempotent: false,
        }
    }

    pub fn idempotent(mut self) -> Self {
        self.idempotent = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the raw response, whatever its status.
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;
}

/// Plain-HTTP transport over a pooled hyper client.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
    base_url: String,
    timeout: Duration,
}

impl HyperTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_nodelay(true);
        connector.set_connect_timeout(Some(timeout));

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(90))
            .build(connector);

        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(&self, request: ApiRequest) -> Result<Request<Full<Bytes>>, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let uri: hyper::Uri = url
            .parse()
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;

        let mut builder = Request::builder()
            .method(request.method)
            .uri(uri)
            .header(header::ACCEPT, "application/json");
        if request.body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }

        builder
            .body(Full::new(request.body.unwrap_or_default()))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))
    }
}

impl Transport for HyperTransport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send {
        async move {
            let method = request.method.clone();
            let path = request.path.clone();
            let http_request = self.build_request(request)?;

            tracing::debug!(%method, %path, "sending backend request");
            let response = tokio::time::timeout(self.timeout, self.client.request(http_request))
                .await
                .map_err(|_| ApiError::Timeout(self.timeout))?
                .map_err(|e| ApiError::Connection(e.to_string()))?;

            let status = response.status().as_u16();
            let body = tokio::time::timeout(self.timeout, response.into_body().collect())
                .await
                .map_err(|_| ApiError::Timeout(self.timeout))?
                .map_err(|e| ApiError::Connection(e.to_string()))?
                .to_bytes();

            tracing::debug!(%method, %path, status, bytes = body.len(), "backend responded");
            Ok(ApiResponse { status, body })
        }
    }
}
