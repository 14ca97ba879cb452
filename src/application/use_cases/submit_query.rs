use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::QueryTransport;
use crate::domain::{ErrorMessages, Identity, Prompt, QueryError, QueryRequest};

/// Sends one prompt and turns whatever happens into text for the user.
///
/// Each call is a single, independent attempt: no retries, no history, no
/// caching. Failures never escape [`Self::execute`]; they are logged and
/// replaced by one of the fixed [`ErrorMessages`].
pub struct SubmitQueryUseCase {
    transport: Arc<dyn QueryTransport>,
    identity: Option<Identity>,
    messages: ErrorMessages,
}

impl SubmitQueryUseCase {
    pub fn new(transport: Arc<dyn QueryTransport>, messages: ErrorMessages) -> Self {
        Self {
            transport,
            identity: None,
            messages,
        }
    }

    pub fn with_identity(mut self, identity: Option<Identity>) -> Self {
        self.identity = identity;
        self
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn messages(&self) -> &ErrorMessages {
        &self.messages
    }

    /// Run the exchange and keep the detailed failure.
    pub async fn try_execute(&self, prompt: &Prompt) -> Result<String, QueryError> {
        let request = QueryRequest::new(prompt);
        let reply = self
            .transport
            .send(&request, self.identity.as_ref())
            .await?;

        debug!(
            "Endpoint replied with status {} ({} bytes)",
            reply.status(),
            reply.body().len()
        );

        reply.into_response_text()
    }

    /// Run the exchange and return what should be displayed.
    pub async fn execute(&self, prompt: Prompt) -> String {
        info!(
            "Submitting prompt ({} chars, identified={}) to {}",
            prompt.len_utf16(),
            self.identity.is_some(),
            self.transport.endpoint()
        );

        let start_time = Instant::now();

        match self.try_execute(&prompt).await {
            Ok(text) => {
                info!("Query answered in {:?}", start_time.elapsed());
                text
            }
            Err(e) => {
                warn!("Query failed after {:?}: {e}", start_time.elapsed());
                self.messages.message_for(&e).to_string()
            }
        }
    }
}
