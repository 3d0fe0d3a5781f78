use std::env;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::observability;
use crate::types::{HealthStatus, QueryRequest, QueryResponse, ReindexResponse};

const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Client for the facts-only query service.
#[derive(Debug, Clone)]
pub struct FundFacts {
    client: ReqwestClient,
    base_url: String,
    timeout: Option<Duration>,
}

impl FundFacts {
    /// Create a new client.
    ///
    /// The base address can be provided directly or read from the
    /// FUNDFACTS_API_BASE environment variable; otherwise it defaults to a
    /// local development address.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    ///
    /// `timeout` bounds each request; when `None` (the default) requests are
    /// never timed out client-side and run until the server settles them.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url
            .or_else(|| env::var("FUNDFACTS_API_BASE").ok())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Url::parse(&base_url)?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The base address requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Process API response errors and convert to our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        // FastAPI error bodies carry a "detail" field.
        #[derive(Deserialize)]
        struct ErrorResponse {
            detail: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let error_message = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.detail)
            .unwrap_or_else(|| error_body.clone());

        match status_code {
            400 => Error::bad_request(error_message),
            404 => Error::not_found(error_message),
            408 => Error::timeout(error_message, None),
            429 => Error::rate_limit(error_message, retry_after),
            500 => Error::internal_server(error_message),
            502..=504 => Error::service_unavailable(error_message, retry_after),
            _ => Error::api(status_code, error_message),
        }
    }

    fn map_request_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                self.timeout.map(|t| t.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Send a question to the service and get the structured answer.
    ///
    /// Exactly one settlement: the structured answer on success, or an error
    /// for network failure, a non-success status, or an unparsable body. No
    /// retries, no partial results.
    pub async fn ask(&self, question: &str) -> Result<QueryResponse> {
        let url = format!("{}/query", self.base_url);
        let request = QueryRequest::new(question);

        observability::CLIENT_REQUESTS.click();
        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                observability::CLIENT_REQUEST_ERRORS.click();
                self.map_request_error(e)
            })?;
        observability::CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        if !response.status().is_success() {
            observability::CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<QueryResponse>().await.map_err(|e| {
            observability::CLIENT_REQUEST_ERRORS.click();
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Fetch the parsed health report from the service.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<HealthStatus>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse health response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Probe the health endpoint for liveness.
    ///
    /// Any failure (connect, non-success status) reduces to `false`; the
    /// response body is not inspected.
    pub async fn check_health(&self) -> bool {
        let url = format!("{}/health", self.base_url);

        observability::HEALTH_CHECKS.click();
        let healthy = match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        };
        if !healthy {
            observability::HEALTH_FAILURES.click();
        }
        healthy
    }

    /// Trigger a re-index of the service's source documents.
    ///
    /// Serverless deployments disable this and answer 501, which surfaces as
    /// an API error.
    pub async fn reindex(&self) -> Result<ReindexResponse> {
        let url = format!("{}/admin/reindex", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<ReindexResponse>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse reindex response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

/// The seam between the conversation layer and the query service.
///
/// `FundFacts` is the production implementation; tests substitute scripted
/// backends.
#[async_trait::async_trait]
pub trait QueryBackend: Send + Sync {
    /// Translate a question into exactly one outcome.
    async fn ask(&self, question: &str) -> Result<QueryResponse>;
}

#[async_trait::async_trait]
impl QueryBackend for FundFacts {
    async fn ask(&self, question: &str) -> Result<QueryResponse> {
        FundFacts::ask(self, question).await
    }
}
