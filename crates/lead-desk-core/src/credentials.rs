//! Credential Provider
//!
//! The client never reads browser storage itself; whoever builds the
//! client hands it something that can produce the current token.

/// Source of the bearer token
pub trait CredentialProvider: Send + Sync {
    /// Current token, or `None` when the user is signed out
    fn token(&self) -> Option<String>;
}

/// Fixed token, used by tests and tooling
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// `Authorization` header value for a token.
/// Blank tokens count as missing.
pub fn authorization_header(provider: &dyn CredentialProvider) -> Option<String> {
    provider
        .token()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .map(|t| format!("Token {}", t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_format() {
        let provider = StaticToken::new("abc123");
        assert_eq!(authorization_header(&provider), Some("Token abc123".to_string()));
    }

    #[test]
    fn test_blank_token_is_missing() {
        assert_eq!(authorization_header(&StaticToken::new("  ")), None);
        assert_eq!(authorization_header(&StaticToken::none()), None);
    }
}
