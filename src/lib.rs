pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{QueryTransport, SubmitQueryUseCase};

pub use cli::Commands;

pub use connector::{
    AskController, Container, ContainerConfig, HttpQueryTransport, MockQueryTransport,
    ReceivedQuery, StubServerConfig, TransportConfig,
};

pub use domain::{
    utf16_len, DomainError, ErrorMessages, Identity, InputEvent, InputSurface, Prompt,
    QueryError, QueryReply, QueryRequest, RateLimitQuota, SurfaceOutcome,
    GENERIC_FAILURE_MESSAGE, MAX_PROMPT_LENGTH,
};
