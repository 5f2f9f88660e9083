//! Pagination driver
//!
//! Fetches either exactly one page or the entire remote collection,
//! accumulating records in server-emission order.

use super::types::{
    DataLocation, PageEnvelope, PaginationConfig, PaginationResult, AUTO_PAGE_SIZE,
};
use crate::credentials::{ApiCredentials, CredentialProvider};
use crate::error::Result;
use crate::transport::{GraphqlExecutor, RequestSpec};
use serde_json::json;
use tracing::{debug, warn};

/// Drives paginated fetches through a [`GraphqlExecutor`].
///
/// Holds no mutable state across fetches; each call owns its own
/// accumulator, so concurrent fetches need no coordination.
pub struct FetchEngine {
    executor: GraphqlExecutor,
}

impl FetchEngine {
    /// Create an engine around the given executor.
    pub fn new(executor: GraphqlExecutor) -> Self {
        Self { executor }
    }

    /// The underlying executor.
    pub fn executor(&self) -> &GraphqlExecutor {
        &self.executor
    }

    /// Fetch one page or the whole collection, per `config.return_all`.
    ///
    /// Credentials are resolved once from the provider and used for
    /// every page request of this fetch.
    pub async fn fetch(
        &self,
        provider: &dyn CredentialProvider,
        spec: &RequestSpec,
        location: &DataLocation,
        config: &PaginationConfig,
    ) -> Result<PaginationResult> {
        let credentials = provider.credentials().await?;

        if config.return_all {
            self.fetch_all(&credentials, spec, location, config).await
        } else {
            self.fetch_single(&credentials, spec, location, config)
                .await
        }
    }

    /// Fetch exactly page 1 at the configured page size.
    async fn fetch_single(
        &self,
        credentials: &ApiCredentials,
        spec: &RequestSpec,
        location: &DataLocation,
        config: &PaginationConfig,
    ) -> Result<PaginationResult> {
        let page_spec = page_request(spec, 1, config.page_size, config);
        let payload = self.executor.execute(&page_spec, credentials).await?;
        let page = PageEnvelope::extract(&payload, location);

        debug!(
            operation = spec.operation(),
            location = %location,
            records = page.len(),
            has_more = page.has_more,
            "fetched single page"
        );

        Ok(PaginationResult {
            total_records: page.len(),
            has_more: Some(page.has_more),
            records: page.records,
            pages_processed: 1,
        })
    }

    /// Walk the collection page by page until exhausted.
    async fn fetch_all(
        &self,
        credentials: &ApiCredentials,
        spec: &RequestSpec,
        location: &DataLocation,
        config: &PaginationConfig,
    ) -> Result<PaginationResult> {
        let mut records = Vec::new();
        let mut pages_processed: u32 = 0;
        let mut page: u32 = 1;

        loop {
            let page_spec = page_request(spec, page, AUTO_PAGE_SIZE, config);
            let payload = self.executor.execute(&page_spec, credentials).await?;
            let envelope = PageEnvelope::extract(&payload, location);
            let count = envelope.len();

            records.extend(envelope.records);
            pages_processed += 1;

            debug!(
                operation = spec.operation(),
                page,
                records = count,
                has_more = envelope.has_more,
                "fetched page"
            );

            // Missing indicator reads as false, so a non-conforming
            // response cannot keep the loop alive.
            if !envelope.has_more {
                break;
            }

            // An empty page with the indicator still set means no
            // forward progress; stop rather than trust the signal.
            if count == 0 {
                if pages_processed >= config.page_limit {
                    warn!(
                        operation = spec.operation(),
                        pages_processed, "stopping: page bound reached with no records arriving"
                    );
                } else {
                    warn!(
                        operation = spec.operation(),
                        pages_processed,
                        "stopping: empty page with continuation indicator still set"
                    );
                }
                break;
            }

            // The bound is a progress check, not a page ceiling: pages
            // that keep yielding records keep the loop running so large
            // collections are never truncated.
            if pages_processed == config.page_limit {
                debug!(
                    operation = spec.operation(),
                    page_limit = config.page_limit,
                    "page bound crossed with records still arriving"
                );
            }

            page += 1;
        }

        Ok(PaginationResult {
            total_records: records.len(),
            records,
            pages_processed,
            has_more: None,
        })
    }
}

impl std::fmt::Debug for FetchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchEngine")
            .field("executor", &self.executor)
            .finish()
    }
}

/// Build the per-page request: the caller's variables plus the
/// pagination block, search term, and extra options.
pub(super) fn page_request(
    spec: &RequestSpec,
    page: u32,
    page_size: u32,
    config: &PaginationConfig,
) -> RequestSpec {
    let mut variables = spec.variables.clone();
    variables.insert(
        "pagination".to_string(),
        json!({ "page": page, "pageSize": page_size }),
    );
    if let Some(search) = &config.search {
        variables.insert("search".to_string(), json!(search));
    }
    if !config.options.is_empty() {
        variables.insert(
            "options".to_string(),
            serde_json::Value::Object(config.options.clone()),
        );
    }
    spec.clone().with_variables(variables)
}
