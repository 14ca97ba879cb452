use async_trait::async_trait;

use crate::domain::{Identity, QueryError, QueryReply, QueryRequest};

/// Carries one query to the inference endpoint and brings back whatever it said.
///
/// Implementors own the connection details (URL, deadline, header names).
/// Only failures to complete the exchange are errors here; a reply with any
/// status code is returned as-is and interpreted by the caller.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn send(
        &self,
        request: &QueryRequest<'_>,
        identity: Option<&Identity>,
    ) -> Result<QueryReply, QueryError>;

    /// Where requests go, for logging.
    fn endpoint(&self) -> &str;
}
