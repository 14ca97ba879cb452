use std::fmt;

use uuid::Uuid;

/// Opaque caller token attached to outgoing requests.
///
/// The host hands the client an `Option<Identity>`; `None` means anonymous and
/// the identity header is left off the request altogether.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// A blank token is no identity at all, so it yields `None`.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.trim().is_empty()).then_some(Self(token))
    }

    /// Account sessions are keyed by UUID; the header carries its hyphenated form.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.hyphenated().to_string())
    }

    /// Treats a missing or blank token as anonymous.
    pub fn parse_optional(token: Option<&str>) -> Option<Self> {
        token.map(str::trim).and_then(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_identity_uses_hyphenated_form() {
        let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let identity = Identity::from_uuid(uuid);
        assert_eq!(identity.as_str(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert_eq!(identity.to_string(), identity.as_str());
    }

    #[test]
    fn blank_token_is_anonymous() {
        assert_eq!(Identity::parse_optional(None), None);
        assert_eq!(Identity::parse_optional(Some("   ")), None);
        assert_eq!(
            Identity::parse_optional(Some("session-1")),
            Identity::new("session-1")
        );
    }

    #[test]
    fn blank_token_cannot_be_constructed() {
        assert_eq!(Identity::new(""), None);
        assert_eq!(Identity::new(" \t"), None);
        assert_eq!(
            Identity::new("abc-123").map(|i| i.as_str().to_string()),
            Some("abc-123".to_string())
        );
    }
}
