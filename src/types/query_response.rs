use serde::{Deserialize, Serialize};

/// The response body from the `/query` endpoint.
///
/// This is the exact shape echoed from the service: the client performs no
/// transformation of these fields beyond structural parsing. A refusal
/// carries an empty `source` and, usually, an `educational_link`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryResponse {
    /// The answer text, or the refusal message.
    pub answer: String,

    /// URL of the official source the answer was grounded on.
    ///
    /// Empty when the answer is not grounded (e.g., a refusal).
    pub source: String,

    /// Freestanding label describing source data recency.
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,

    /// True when the service declined to answer the question.
    #[serde(rename = "isRefusal", default)]
    pub is_refusal: bool,

    /// Link to investor-education material, sent alongside refusals.
    #[serde(
        rename = "educationalLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub educational_link: Option<String>,
}

impl QueryResponse {
    /// Returns true if this response carries a non-empty source citation.
    pub fn has_citation(&self) -> bool {
        !self.source.is_empty()
    }
}
