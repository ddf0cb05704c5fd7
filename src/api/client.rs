//! Typed client for the CogniBank chat and admin endpoints.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};

use super::models::{
    Application, ExportsByLoanType, HealthStatus, LoanTypesResponse, MessageRequest,
    MessageResponse, SessionInfo, StartChatRequest, StartChatResponse, StatsByLoanType,
};
use super::transport::{ApiRequest, ApiResponse, HyperTransport, Transport};
use crate::calculator::LoanType;
use crate::config::{CogniConfig, RetryConfig};
use crate::errors::ApiError;

/// Default page size for application listings.
pub const DEFAULT_APPLICATION_LIMIT: u32 = 10;

#[derive(Clone)]
pub struct BackendClient<T = HyperTransport> {
    transport: T,
    retry: RetryConfig,
}

impl BackendClient<HyperTransport> {
    pub fn from_config(config: &CogniConfig) -> Self {
        let transport = HyperTransport::new(
            config.base_url(),
            Duration::from_secs(config.api.timeout_seconds),
        );
        Self::with_transport(transport, config.retry.clone())
    }
}

impl<T: Transport> BackendClient<T> {
    pub fn with_transport(transport: T, retry: RetryConfig) -> Self {
        Self { transport, retry }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send, retrying idempotent requests; non-2xx responses become [`ApiError::Status`].
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let started = Instant::now();
        let mut attempt = 0;

        loop {
            let error = match self.transport.send(request.clone()).await {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => ApiError::Status {
                    status: response.status,
                    body: String::from_utf8_lossy(&response.body).into_owned(),
                },
                Err(error) => error,
            };

            if !request.idempotent
                || !error.is_retryable()
                || !self.retry.should_retry(attempt, started.elapsed())
            {
                return Err(error);
            }

            attempt += 1;
            let delay = self.retry.delay_for_attempt(attempt);
            tracing::warn!(
                path = %request.path,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "retrying backend request: {}",
                error
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.execute(ApiRequest::get(path)).await?;
        decode(path, &response.body)
    }

    async fn post_json<B, R>(&self, path: &str, body: Option<&B>) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| ApiError::Decode {
                endpoint: path.to_string(),
                message: format!("could not encode request: {}", e),
            })?
            .map(Bytes::from);
        let response = self.execute(ApiRequest::post(path, payload)).await?;
        decode(path, &response.body)
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json("/health").await
    }

    pub async fn loan_types(&self) -> Result<LoanTypesResponse, ApiError> {
        self.get_json("/loan-types").await
    }

    pub async fn start_chat(&self, loan_type: LoanType) -> Result<StartChatResponse, ApiError> {
        let body = StartChatRequest {
            loan_type: loan_type.key(),
        };
        self.post_json("/chat/start", Some(&body)).await
    }

    pub async fn send_message(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<MessageResponse, ApiError> {
        let body = MessageRequest {
            session_id,
            message,
        };
        self.post_json("/chat/message", Some(&body)).await
    }

    pub async fn session_info(&self, session_id: &str) -> Result<SessionInfo, ApiError> {
        self.get_json(&format!("/session/{}", session_id)).await
    }

    pub async fn admin_stats(&self) -> Result<StatsByLoanType, ApiError> {
        self.get_json("/admin/stats").await
    }

    pub async fn applications(
        &self,
        loan_type: LoanType,
        limit: u32,
    ) -> Result<Vec<Application>, ApiError> {
        self.get_json(&format!("/admin/applications/{}?limit={}", loan_type, limit))
            .await
    }

    pub async fn exports(&self) -> Result<ExportsByLoanType, ApiError> {
        self.get_json("/admin/exports").await
    }

    /// Raw CSV content of the export for `loan_type`.
    pub async fn download_export(&self, loan_type: LoanType) -> Result<Bytes, ApiError> {
        let response = self
            .execute(ApiRequest::get(format!("/admin/export/{}", loan_type)))
            .await?;
        Ok(response.body)
    }

    /// Ask the backend to regenerate the CSV for `loan_type`.
    ///
    /// Regeneration overwrites the previous file, so the request is retried
    /// like a GET. The response body is not part of the contract and is returned as-is.
    pub async fn generate_report(&self, loan_type: LoanType) -> Result<serde_json::Value, ApiError> {
        let path = format!("/admin/generate-report/{}", loan_type);
        let response = self
            .execute(ApiRequest::post(path.as_str(), None).idempotent())
            .await?;
        if response.body.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        decode(&path, &response.body)
    }
}

fn decode<R: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<R, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}
