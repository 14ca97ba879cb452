use crate::domain::QueryError;

pub const GENERIC_FAILURE_MESSAGE: &str =
    "An unknown error occurred. Please try again in 1 minute.";

/// Query allowance advertised in the rate-limit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitQuota {
    pub per_minute: u32,
    pub per_day: u32,
}

impl Default for RateLimitQuota {
    fn default() -> Self {
        Self {
            per_minute: 3,
            per_day: 30,
        }
    }
}

/// The fixed set of strings a failed query can turn into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessages {
    generic: String,
    rate_limited: String,
}

impl ErrorMessages {
    pub fn new(quota: RateLimitQuota) -> Self {
        Self {
            generic: GENERIC_FAILURE_MESSAGE.to_string(),
            rate_limited: format!(
                "Too many requests! There is a limit of {} queries per minute, and {} queries per day.",
                quota.per_minute, quota.per_day
            ),
        }
    }

    pub fn rate_limited(&self) -> &str {
        &self.rate_limited
    }

    pub fn message_for(&self, error: &QueryError) -> &str {
        match error {
            QueryError::RateLimited => &self.rate_limited,
            QueryError::Connect(_)
            | QueryError::Timeout(_)
            | QueryError::Transport(_)
            | QueryError::UnexpectedStatus(_)
            | QueryError::MalformedBody(_)
            | QueryError::MissingResponseField => &self.generic,
        }
    }
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self::new(RateLimitQuota::default())
    }
}
