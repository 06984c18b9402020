//! Reqwest-backed gateway to the upstream employee API.
//!
//! # Responsibilities
//! - Build requests for the four upstream operations
//! - Classify non-success statuses (429 vs everything else)
//! - Decode `{ "data": ... }` envelopes, treating empty bodies as absent
//! - Record per-operation metrics
//!
//! Timeouts live in the reqwest client; there is no retry here.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::gateway::EmployeeGateway;
use crate::upstream::types::{
    CreateEmployeePayload, DataEnvelope, DeleteEmployeePayload, Employee, NewEmployee, Operation,
    UpstreamError, UpstreamResult,
};

/// Errors raised while constructing the gateway.
#[derive(Debug, Error)]
pub enum GatewayInitError {
    #[error("invalid upstream base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Gateway talking HTTP to `{base_url}`.
#[derive(Clone)]
pub struct HttpEmployeeGateway {
    client: Client,
    base_url: Url,
}

impl HttpEmployeeGateway {
    /// Build a gateway from configuration.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, GatewayInitError> {
        let base_url = Url::parse(&config.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Build a gateway around an existing client.
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn employee_url(&self, id: &str) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut().ok()?.pop_if_empty().push(id);
        Some(url)
    }

    /// Send a request and return the raw body of a successful response.
    async fn execute(&self, operation: Operation, request: RequestBuilder) -> UpstreamResult<Vec<u8>> {
        let start = Instant::now();
        let result = dispatch(operation, request).await;
        let outcome = match &result {
            Ok(_) => "success",
            Err(UpstreamError::RateLimited { .. }) => "rate_limited",
            Err(UpstreamError::Failure { .. }) => "failure",
        };
        metrics::record_upstream_call(operation.as_label(), outcome, start);
        result
    }
}

async fn dispatch(operation: Operation, request: RequestBuilder) -> UpstreamResult<Vec<u8>> {
    let response = request
        .send()
        .await
        .map_err(|e| transport_failure(operation, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(classify_status(operation, status));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| transport_failure(operation, e))?;
    Ok(body.to_vec())
}

/// Map a non-success status onto the gateway error taxonomy.
pub fn classify_status(operation: Operation, status: StatusCode) -> UpstreamError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!(operation = %operation, "Upstream rate limit exceeded");
        UpstreamError::RateLimited { operation }
    } else {
        tracing::warn!(operation = %operation, status = status.as_u16(), "Upstream returned error status");
        UpstreamError::Failure {
            operation,
            detail: format!("status {}", status.as_u16()),
        }
    }
}

fn transport_failure(operation: Operation, error: reqwest::Error) -> UpstreamError {
    tracing::error!(operation = %operation, error = %error, timeout = error.is_timeout(), "Upstream request failed");
    UpstreamError::Failure {
        operation,
        detail: error.to_string(),
    }
}

/// Decode a `{ "data": ... }` envelope. Empty or `null` bodies yield `None`.
fn decode<T: DeserializeOwned>(operation: Operation, body: &[u8]) -> UpstreamResult<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let envelope: Option<DataEnvelope<T>> = serde_json::from_slice(body).map_err(|e| {
        tracing::error!(operation = %operation, error = %e, "Undecodable upstream payload");
        UpstreamError::Failure {
            operation,
            detail: format!("invalid payload: {e}"),
        }
    })?;
    Ok(envelope.and_then(|envelope| envelope.data))
}

#[async_trait]
impl EmployeeGateway for HttpEmployeeGateway {
    async fn list_all(&self) -> UpstreamResult<Vec<Employee>> {
        let operation = Operation::ListAll;
        let body = self
            .execute(operation, self.client.get(self.base_url.clone()))
            .await?;
        let employees = decode::<Vec<Employee>>(operation, &body)?.unwrap_or_default();
        tracing::debug!(count = employees.len(), "Fetched employees");
        Ok(employees)
    }

    async fn get_by_id(&self, id: &str) -> UpstreamResult<Option<Employee>> {
        let operation = Operation::GetById;
        let url = self.employee_url(id).ok_or_else(|| UpstreamError::Failure {
            operation,
            detail: format!("cannot append id to {}", self.base_url),
        })?;
        let body = self.execute(operation, self.client.get(url)).await?;
        let employee = decode::<Employee>(operation, &body)?;
        if employee.is_none() {
            tracing::debug!(id = %id, "Upstream has no employee for id");
        }
        Ok(employee)
    }

    async fn create(&self, employee: &NewEmployee) -> UpstreamResult<Employee> {
        let operation = Operation::Create;
        let payload = CreateEmployeePayload::from(employee);
        let body = self
            .execute(operation, self.client.post(self.base_url.clone()).json(&payload))
            .await?;
        let created = decode::<Employee>(operation, &body)?.ok_or_else(|| UpstreamError::Failure {
            operation,
            detail: "empty payload".to_string(),
        })?;
        tracing::info!(id = %created.id, "Employee created upstream");
        Ok(created)
    }

    async fn delete_by_name(&self, name: &str) -> UpstreamResult<bool> {
        let operation = Operation::DeleteByName;
        let payload = DeleteEmployeePayload { name };
        let body = self
            .execute(operation, self.client.delete(self.base_url.clone()).json(&payload))
            .await?;
        let deleted = decode::<serde_json::Value>(operation, &body)?
            .and_then(|data| data.as_bool())
            .unwrap_or(false);
        tracing::info!(deleted, "Upstream delete processed");
        Ok(deleted)
    }
}

impl std::fmt::Debug for HttpEmployeeGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpEmployeeGateway")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}
