use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Upper bound on prompt length, counted in UTF-16 code units.
pub const MAX_PROMPT_LENGTH: usize = 200;

/// Length of `text` in UTF-16 code units, the unit every prompt limit is
/// expressed in.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// User-authored text bound for the inference endpoint.
///
/// Always within [`MAX_PROMPT_LENGTH`]. An empty prompt is valid and is sent
/// as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prompt(String);

impl Prompt {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        let len = utf16_len(&text);
        if len > MAX_PROMPT_LENGTH {
            return Err(DomainError::invalid_input(format!(
                "prompt is {len} characters long, the limit is {MAX_PROMPT_LENGTH}"
            )));
        }
        Ok(Self(text))
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len_utf16(&self) -> usize {
        utf16_len(&self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for Prompt {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Prompt> for String {
    fn from(prompt: Prompt) -> Self {
        prompt.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
