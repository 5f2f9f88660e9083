//! # practiq
//!
//! Resilient paginated GraphQL execution engine for practice-management
//! workflow nodes.
//!
//! The practice-management API this engine talks to exposes list
//! operations with a page/pageSize model and a boolean `hasMore`
//! continuation flag. This crate owns the part of the integration with
//! actual engineering depth: executing one GraphQL operation with
//! retry/backoff, and driving page-by-page accumulation over an
//! unbounded remote collection with guaranteed termination.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use practiq::{
//!     normalize, ApiCredentials, DataLocation, FetchEngine, GraphqlExecutor,
//!     RawFetchOptions, RequestSpec, Result, StaticCredentials,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let creds = StaticCredentials::new(ApiCredentials::new(
//!         "https://api.example.com/graphql",
//!         "secret-token",
//!     )?);
//!
//!     let spec = RequestSpec::new(
//!         "query Records($pagination: Pagination) { records(pagination: $pagination) { data { id } pageInfo { hasMore } } }",
//!     )
//!     .with_operation_name("Records");
//!
//!     let config = normalize(RawFetchOptions {
//!         return_all: Some(true),
//!         ..Default::default()
//!     })?;
//!
//!     let engine = FetchEngine::new(GraphqlExecutor::new());
//!     let result = engine
//!         .fetch(&creds, &spec, &DataLocation::new("records"), &config)
//!         .await?;
//!
//!     println!("{} records in {} pages", result.total_records, result.pages_processed);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        FetchEngine                          │
//! │  fetch(spec, location, config) → PaginationResult           │
//! └─────────────────────────────────────────────────────────────┘
//!                │                                │
//! ┌──────────────┴───────────┐   ┌────────────────┴─────────────┐
//! │     normalize(raw)       │   │       GraphqlExecutor        │
//! ├──────────────────────────┤   ├──────────────────────────────┤
//! │ defaults                 │   │ token header injection       │
//! │ page-size validation     │   │ retry + exponential backoff  │
//! │ empty-search coercion    │   │ rate limiting                │
//! │                          │   │ GraphQL error short-circuit  │
//! └──────────────────────────┘   └──────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

/// Error types for the engine
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credentials and the credential provider seam
pub mod credentials;

/// GraphQL transport executor with retry and rate limiting
pub mod transport;

/// Pagination driver
pub mod pagination;

/// Caller-option normalization
pub mod config;

pub use config::{normalize, RawFetchOptions};
pub use credentials::{ApiCredentials, CredentialProvider, StaticCredentials};
pub use error::{Error, Result};
pub use pagination::{DataLocation, FetchEngine, PaginationConfig, PaginationResult};
pub use transport::{ExecutorConfig, GraphqlExecutor, RequestSpec};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
