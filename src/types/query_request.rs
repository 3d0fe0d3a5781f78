use serde::{Deserialize, Serialize};

/// The request body for the `/query` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    /// The question to answer.
    pub question: String,

    /// Optional free-form context supplied alongside the question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl QueryRequest {
    /// Creates a new QueryRequest with the specified question.
    pub fn new<S: Into<String>>(question: S) -> Self {
        Self {
            question: question.into(),
            context: None,
        }
    }

    /// Adds context to this request.
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }
}
