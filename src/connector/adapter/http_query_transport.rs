use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use tracing::{debug, warn};

use crate::application::QueryTransport;
use crate::domain::{DomainError, Identity, QueryError, QueryReply, QueryRequest};

/// Default target: the stub server started by `scapegpt stub-server`.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4747/";
/// Bounds connection setup plus full receipt of the reply.
pub const DEFAULT_TIMEOUT_SECS: u64 = 45;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Header the host's session layer uses to identify a caller.
pub const DEFAULT_IDENTITY_HEADER: &str = "RUNELITE-AUTH";

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub identity_header: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            identity_header: DEFAULT_IDENTITY_HEADER.to_string(),
        }
    }
}

impl TransportConfig {
    /// Construct from environment variables, falling back to the defaults:
    ///
    /// | Variable                   | Default                  |
    /// |----------------------------|--------------------------|
    /// | `SCAPEGPT_URL`             | `http://localhost:4747/` |
    /// | `SCAPEGPT_TIMEOUT_SECS`    | `45`                     |
    /// | `SCAPEGPT_IDENTITY_HEADER` | `RUNELITE-AUTH`          |
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SCAPEGPT_URL") {
            config.endpoint = url;
        }

        if let Ok(raw) = std::env::var("SCAPEGPT_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(
                    "Ignoring SCAPEGPT_TIMEOUT_SECS={raw}: expected a positive number of seconds"
                ),
            }
        }

        if let Ok(header) = std::env::var("SCAPEGPT_IDENTITY_HEADER") {
            config.identity_header = header;
        }

        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        // Connect deadline never exceeds the overall one.
        self.connect_timeout = self.connect_timeout.min(timeout);
        self
    }
}

/// [`QueryTransport`] that POSTs JSON to the configured endpoint over HTTP.
///
/// One `reqwest::Client` (and its connection pool) is built up front and
/// reused by every call. The client-wide timeout caps each exchange end to
/// end, so a call never blocks longer than `TransportConfig::timeout`.
pub struct HttpQueryTransport {
    client: reqwest::Client,
    url: String,
    identity_header: HeaderName,
}

impl HttpQueryTransport {
    pub fn new(config: TransportConfig) -> Result<Self, DomainError> {
        let identity_header = HeaderName::from_bytes(config.identity_header.as_bytes())
            .map_err(|e| {
                DomainError::invalid_input(format!(
                    "invalid identity header name {:?}: {e}",
                    config.identity_header
                ))
            })?;

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| DomainError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.endpoint,
            identity_header,
        })
    }

    fn classify(error: reqwest::Error) -> QueryError {
        if error.is_timeout() {
            QueryError::timeout(error.to_string())
        } else if error.is_connect() {
            QueryError::connect(error.to_string())
        } else {
            QueryError::transport(error.to_string())
        }
    }
}

#[async_trait]
impl QueryTransport for HttpQueryTransport {
    async fn send(
        &self,
        request: &QueryRequest<'_>,
        identity: Option<&Identity>,
    ) -> Result<QueryReply, QueryError> {
        let mut builder = self.client.post(&self.url).json(request);

        if let Some(identity) = identity {
            let value = HeaderValue::from_str(identity.as_str()).map_err(|e| {
                QueryError::transport(format!("identity is not a valid header value: {e}"))
            })?;
            builder = builder.header(self.identity_header.clone(), value);
        }

        let response = builder.send().await.map_err(Self::classify)?;
        let status = response.status();

        if !status.is_success() {
            // The status alone decides the outcome; a broken body must not mask it.
            let body = response.text().await.unwrap_or_default();
            debug!("HttpQueryTransport: {} returned {status}: {body}", self.url);
            return Ok(QueryReply::new(status.as_u16(), body));
        }

        let body = response.text().await.map_err(Self::classify)?;
        Ok(QueryReply::new(status.as_u16(), body))
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_constants() {
        let config = TransportConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(45));
        assert_eq!(config.identity_header, "RUNELITE-AUTH");
    }

    #[test]
    fn short_timeout_caps_connect_timeout() {
        let config = TransportConfig::default().with_timeout(Duration::from_millis(200));
        assert_eq!(config.connect_timeout, Duration::from_millis(200));
    }

    #[test]
    fn rejects_invalid_header_name() {
        let config = TransportConfig {
            identity_header: "not a header".to_string(),
            ..TransportConfig::default()
        };
        let err = HttpQueryTransport::new(config).err().unwrap();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn endpoint_is_kept_verbatim() {
        let transport = HttpQueryTransport::new(
            TransportConfig::default().with_endpoint("http://example.test/ask"),
        )
        .unwrap();
        assert_eq!(transport.endpoint(), "http://example.test/ask");
    }
}
