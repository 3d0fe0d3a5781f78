use serde::{Deserialize, Serialize};

/// The response body from the `/admin/reindex` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReindexResponse {
    /// Number of documents indexed by the run.
    pub documents_indexed: u64,

    /// Human-readable completion message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialization() {
        let json = serde_json::json!({
            "documents_indexed": 42,
            "message": "Re-index completed."
        });
        let response: ReindexResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.documents_indexed, 42);
        assert_eq!(response.message, "Re-index completed.");
    }
}
