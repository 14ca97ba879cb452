use serde::Serialize;
use serde_json::Value;

use crate::domain::QueryError;

use super::Prompt;

/// HTTP status the endpoint uses to signal an exhausted quota.
pub const RATE_LIMIT_STATUS: u16 = 429;

/// Wire payload for a single query: exactly `{"prompt": "..."}`.
#[derive(Debug, Serialize)]
pub struct QueryRequest<'a> {
    prompt: &'a str,
}

impl<'a> QueryRequest<'a> {
    pub fn new(prompt: &'a Prompt) -> Self {
        Self {
            prompt: prompt.as_str(),
        }
    }

    pub fn prompt(&self) -> &str {
        self.prompt
    }
}

/// Raw reply from the endpoint, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReply {
    status: u16,
    body: String,
}

impl QueryReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Classify the reply and pull out the trimmed `"res"` text.
    ///
    /// A 429 is reported as rate limiting regardless of what the body says.
    pub fn into_response_text(self) -> Result<String, QueryError> {
        if self.status == RATE_LIMIT_STATUS {
            return Err(QueryError::RateLimited);
        }
        if !self.is_success() {
            return Err(QueryError::UnexpectedStatus(self.status));
        }

        let value: Value = serde_json::from_str(&self.body)
            .map_err(|e| QueryError::malformed_body(e.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| QueryError::malformed_body("expected a JSON object"))?;

        object
            .get("res")
            .and_then(Value::as_str)
            .map(|res| res.trim().to_string())
            .ok_or(QueryError::MissingResponseField)
    }
}
