use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use crate::application::QueryTransport;
use crate::domain::{Identity, QueryError, QueryReply, QueryRequest};

/// What the mock saw for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedQuery {
    pub prompt: String,
    pub identity: Option<Identity>,
}

/// Offline [`QueryTransport`].
///
/// Plays back scripted replies in order; once the script runs out it answers
/// every prompt with `You asked: <prompt>`.
pub struct MockQueryTransport {
    script: Mutex<VecDeque<Result<QueryReply, QueryError>>>,
    received: Mutex<Vec<ReceivedQuery>>,
}

impl MockQueryTransport {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            received: Mutex::new(Vec::new()),
        }
    }

    pub async fn push_reply(&self, reply: QueryReply) {
        self.script.lock().await.push_back(Ok(reply));
    }

    pub async fn push_error(&self, error: QueryError) {
        self.script.lock().await.push_back(Err(error));
    }

    pub async fn received(&self) -> Vec<ReceivedQuery> {
        self.received.lock().await.clone()
    }

    fn echo(prompt: &str) -> QueryReply {
        let body = json!({ "res": format!("You asked: {prompt}") });
        QueryReply::new(200, body.to_string())
    }
}

impl Default for MockQueryTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryTransport for MockQueryTransport {
    async fn send(
        &self,
        request: &QueryRequest<'_>,
        identity: Option<&Identity>,
    ) -> Result<QueryReply, QueryError> {
        self.received.lock().await.push(ReceivedQuery {
            prompt: request.prompt().to_string(),
            identity: identity.cloned(),
        });

        match self.script.lock().await.pop_front() {
            Some(scripted) => scripted,
            None => Ok(Self::echo(request.prompt())),
        }
    }

    fn endpoint(&self) -> &str {
        "mock://scapegpt"
    }
}
