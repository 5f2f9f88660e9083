//! Transport module
//!
//! Executes single GraphQL operations against the remote API with
//! credential injection, retry, backoff, and rate limiting.
//!
//! # Features
//!
//! - **Token header injection**: the API wants its token in a custom
//!   header, not a standard bearer header
//! - **Automatic retries**: server-error responses retried with
//!   configurable backoff; everything else surfaces immediately
//! - **Error short-circuit**: GraphQL `errors` payloads fail fast,
//!   never retried
//! - **Rate limiting**: token bucket rate limiter using governor

mod executor;
mod rate_limit;
mod types;

pub use executor::{ExecutorConfig, ExecutorConfigBuilder, GraphqlExecutor};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use types::{GraphqlError, GraphqlResponse, RequestSpec};

#[cfg(test)]
mod tests;
