//! Credential provider seam
//!
//! The workflow host owns credential storage and retrieval; the engine
//! only needs a way to ask for the current credentials at the start of
//! a logical fetch.

use super::types::ApiCredentials;
use crate::error::Result;
use async_trait::async_trait;

/// Supplies credentials to the engine.
///
/// Resolved once per logical fetch; implementations may hit a secret
/// store, a cache, or anything else behind this seam.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Return credentials for the upcoming request(s).
    async fn credentials(&self) -> Result<ApiCredentials>;
}

/// A provider that always returns the same credentials.
///
/// Useful for tests and for hosts that resolve credentials themselves
/// before invoking the engine.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: ApiCredentials,
}

impl StaticCredentials {
    /// Wrap fixed credentials in a provider.
    pub fn new(credentials: ApiCredentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn credentials(&self) -> Result<ApiCredentials> {
        Ok(self.credentials.clone())
    }
}
