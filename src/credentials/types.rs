//! Credential value types

use crate::error::{Error, Result};

/// Number of token characters preserved in diagnostic output.
const REDACTED_PREFIX_LEN: usize = 4;

/// Credentials for the practice-management GraphQL API.
///
/// The token is injected into a custom transport header on every
/// request. It is never exposed in full by `Debug` or log output;
/// use [`ApiCredentials::redacted_token`] for diagnostics.
#[derive(Clone)]
pub struct ApiCredentials {
    endpoint: String,
    token: String,
}

impl ApiCredentials {
    /// Create credentials, validating the endpoint URL.
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        let token = token.into();

        url::Url::parse(&endpoint)?;
        if token.is_empty() {
            return Err(Error::credentials("token must not be empty"));
        }

        Ok(Self { endpoint, token })
    }

    /// The GraphQL endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The full secret token. Callers must not log this.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// A bounded prefix of the token, safe for diagnostic output.
    pub fn redacted_token(&self) -> String {
        let prefix: String = self.token.chars().take(REDACTED_PREFIX_LEN).collect();
        format!("{prefix}…")
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("endpoint", &self.endpoint)
            .field("token", &self.redacted_token())
            .finish()
    }
}
