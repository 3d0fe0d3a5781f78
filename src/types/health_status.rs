use serde::{Deserialize, Serialize};

/// The response body from the `/health` endpoint.
///
/// Deployments differ in how much they report: some return only a status
/// string, others include a timestamp and whether the vector store has been
/// loaded. The optional fields default accordingly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    /// Status string, `"ok"` or `"healthy"` when the service is up.
    pub status: String,

    /// Server-reported timestamp of the health check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Whether the service has its vector store loaded and can answer.
    #[serde(rename = "vectorStoreLoaded", default)]
    pub vector_store_loaded: bool,
}

impl HealthStatus {
    /// Returns true if the reported status indicates a healthy service.
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "ok" | "healthy")
    }
}
