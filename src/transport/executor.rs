//! GraphQL transport executor
//!
//! Issues one logical request per call. Server-error responses are
//! retried with backoff up to the configured maximum; client errors,
//! connectivity failures, and GraphQL error payloads surface
//! immediately.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::types::{truncate_body, GraphqlResponse, RequestSpec};
use crate::credentials::ApiCredentials;
use crate::error::{Error, Result};
use crate::types::{BackoffType, JsonValue, StringMap};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Header the API expects its token in. Not a bearer-auth header.
pub(crate) const DEFAULT_TOKEN_HEADER: &str = "x-token";

/// Configuration for the transport executor
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries, unless the request overrides it
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Header name carrying the credential token
    pub token_header: String,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
            rate_limit: Some(RateLimiterConfig::default()),
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            default_headers: StringMap::new(),
            user_agent: format!("practiq/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ExecutorConfig {
    /// Create a new config builder
    pub fn builder() -> ExecutorConfigBuilder {
        ExecutorConfigBuilder::default()
    }
}

/// Builder for executor config
#[derive(Default)]
pub struct ExecutorConfigBuilder {
    config: ExecutorConfig,
}

impl ExecutorConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Set the token header name
    pub fn token_header(mut self, name: impl Into<String>) -> Self {
        self.config.token_header = name.into();
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ExecutorConfig {
        self.config
    }
}

/// GraphQL executor with retry and rate limiting
pub struct GraphqlExecutor {
    client: Client,
    config: ExecutorConfig,
    rate_limiter: Option<RateLimiter>,
}

impl GraphqlExecutor {
    /// Create a new executor with default configuration
    pub fn new() -> Self {
        Self::with_config(ExecutorConfig::default())
    }

    /// Create a new executor with custom configuration
    pub fn with_config(config: ExecutorConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Self {
            client,
            config,
            rate_limiter,
        }
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Execute one GraphQL operation.
    ///
    /// Returns the unwrapped `data` payload on success; `Null` when the
    /// server returned a well-formed response with no payload.
    pub async fn execute(
        &self,
        spec: &RequestSpec,
        credentials: &ApiCredentials,
    ) -> Result<JsonValue> {
        let operation = spec.operation();
        let max_retries = spec.max_retries.unwrap_or(self.config.max_retries);
        let body = json!({
            "query": spec.query,
            "variables": spec.variables,
        });

        let mut attempt: u32 = 0;

        loop {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            if spec.verbose {
                debug!(
                    operation,
                    attempt,
                    endpoint = credentials.endpoint(),
                    token = %credentials.redacted_token(),
                    "sending GraphQL request"
                );
            }

            let mut req = self
                .client
                .post(credentials.endpoint())
                .header(self.config.token_header.as_str(), credentials.token());

            for (key, value) in &self.config.default_headers {
                req = req.header(key.as_str(), value.as_str());
            }

            // Connectivity failures (DNS, refused, TLS, timeout) are
            // terminal for this engine; only server-error statuses
            // qualify for retry.
            let response = req.json(&body).send().await.map_err(Error::Http)?;
            let status = response.status();

            if status.is_success() {
                let envelope: GraphqlResponse = response.json().await.map_err(Error::Http)?;

                // An error payload in a successful transport response
                // means the operation itself was rejected; retrying the
                // identical request cannot succeed.
                if !envelope.is_ok() {
                    return Err(Error::graphql(operation, envelope.error_messages()));
                }

                if spec.verbose {
                    debug!(operation, "request succeeded");
                }
                return Ok(envelope.data.unwrap_or(JsonValue::Null));
            }

            let status_code = status.as_u16();
            let excerpt = truncate_body(response.text().await.unwrap_or_default());
            let err = Error::http_status(status_code, excerpt);

            if !err.is_retryable() {
                return Err(err);
            }

            if attempt >= max_retries {
                return Err(Error::retries_exhausted(
                    operation,
                    attempt + 1,
                    err.to_string(),
                ));
            }

            let delay = self.calculate_backoff(attempt);
            warn!(
                "Operation '{operation}' got {status_code}, attempt {}/{}, retrying in {delay:?}",
                attempt + 1,
                max_retries + 1,
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff * factor
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl Default for GraphqlExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GraphqlExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphqlExecutor")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
