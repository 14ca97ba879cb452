use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;
use uuid::Uuid;

use crate::application::{QueryTransport, SubmitQueryUseCase};
use crate::connector::{HttpQueryTransport, MockQueryTransport, TransportConfig};
use crate::domain::{ErrorMessages, Identity, RateLimitQuota};

#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    /// Overrides `SCAPEGPT_URL`.
    pub endpoint: Option<String>,
    /// Overrides `SCAPEGPT_TIMEOUT_SECS`.
    pub timeout_secs: Option<u64>,
    /// Caller token sent in the identity header. Blank means anonymous.
    pub identity: Option<String>,
    /// Generate a fresh session UUID as the identity when none is given.
    pub new_session: bool,
    /// Answer locally instead of calling the endpoint.
    pub mock: bool,
    pub quota: RateLimitQuota,
}

pub struct Container {
    submit_use_case: Arc<SubmitQueryUseCase>,
    endpoint: String,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let transport: Arc<dyn QueryTransport> = if config.mock {
            debug!("Using mock query transport");
            Arc::new(MockQueryTransport::new())
        } else {
            let mut transport_config = TransportConfig::from_env();
            if let Some(endpoint) = config.endpoint.as_deref() {
                transport_config = transport_config.with_endpoint(endpoint);
            }
            if let Some(secs) = config.timeout_secs {
                transport_config = transport_config.with_timeout(Duration::from_secs(secs));
            }
            debug!(
                "Using HTTP query transport: {} (timeout {:?}, identity header {})",
                transport_config.endpoint,
                transport_config.timeout,
                transport_config.identity_header
            );
            Arc::new(HttpQueryTransport::new(transport_config)?)
        };

        let identity = match Identity::parse_optional(config.identity.as_deref()) {
            Some(identity) => Some(identity),
            None if config.new_session => {
                let identity = Identity::from_uuid(Uuid::new_v4());
                debug!("Generated session identity {identity}");
                Some(identity)
            }
            None => None,
        };

        let endpoint = transport.endpoint().to_string();
        let submit_use_case = SubmitQueryUseCase::new(transport, ErrorMessages::new(config.quota))
            .with_identity(identity);

        Ok(Self {
            submit_use_case: Arc::new(submit_use_case),
            endpoint,
            config,
        })
    }

    pub fn submit_use_case(&self) -> Arc<SubmitQueryUseCase> {
        Arc::clone(&self.submit_use_case)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_mock(&self) -> bool {
        self.config.mock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Prompt;

    #[tokio::test]
    async fn mock_container_answers_locally() {
        let container = Container::new(ContainerConfig {
            mock: true,
            ..ContainerConfig::default()
        })
        .unwrap();

        assert!(container.is_mock());
        assert_eq!(container.endpoint(), "mock://scapegpt");

        let text = container
            .submit_use_case()
            .execute(Prompt::new("hello").unwrap())
            .await;
        assert_eq!(text, "You asked: hello");
    }

    #[test]
    fn identity_resolution() {
        let anonymous = Container::new(ContainerConfig {
            mock: true,
            identity: Some("  ".into()),
            ..ContainerConfig::default()
        })
        .unwrap();
        assert!(anonymous.submit_use_case().identity().is_none());

        let explicit = Container::new(ContainerConfig {
            mock: true,
            identity: Some("player-1".into()),
            new_session: true,
            ..ContainerConfig::default()
        })
        .unwrap();
        assert_eq!(
            explicit.submit_use_case().identity(),
            Identity::new("player-1").as_ref()
        );

        let session = Container::new(ContainerConfig {
            mock: true,
            new_session: true,
            ..ContainerConfig::default()
        })
        .unwrap();
        let identity = session.submit_use_case().identity().cloned().unwrap();
        assert!(Uuid::parse_str(identity.as_str()).is_ok());
    }

    #[tokio::test]
    async fn endpoint_override_wins() {
        let container = Container::new(ContainerConfig {
            endpoint: Some("http://127.0.0.1:9/ask".into()),
            timeout_secs: Some(5),
            ..ContainerConfig::default()
        })
        .unwrap();
        assert_eq!(container.endpoint(), "http://127.0.0.1:9/ask");
    }
}
