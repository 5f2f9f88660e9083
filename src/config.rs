//! Caller-option normalization
//!
//! Workflow hosts hand the engine loosely-typed options. This module
//! turns them into a canonical [`PaginationConfig`] at the boundary,
//! so validation failures surface before any request is made.

use crate::error::{Error, Result};
use crate::pagination::{PaginationConfig, DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_SIZE};
use crate::types::{JsonObject, OptionStringExt};
use serde::Deserialize;

/// Raw fetch options as supplied by a workflow host.
///
/// Every field is optional; [`normalize`] applies the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFetchOptions {
    /// Requested page size. Zero or negative is rejected.
    pub page_size: Option<i64>,
    /// Fetch the whole collection instead of one bounded page.
    pub return_all: Option<bool>,
    /// Free-text search term. An empty string means "no search".
    pub search: Option<String>,
    /// Extra operation options forwarded verbatim.
    pub options: Option<JsonObject>,
    /// Override for the no-progress page bound.
    pub page_limit: Option<u32>,
}

/// Normalize raw options into a fully-specified configuration.
///
/// Pure; the only failure is a non-positive page size. An empty search
/// term coerces to `None` — an empty string is a different filter than
/// no filter to this API and must not be forwarded.
pub fn normalize(raw: RawFetchOptions) -> Result<PaginationConfig> {
    let page_size = match raw.page_size {
        None => DEFAULT_PAGE_SIZE,
        Some(size) if size <= 0 => {
            return Err(Error::invalid_config(
                "pageSize",
                format!("must be a positive integer, got {size}"),
            ));
        }
        Some(size) => u32::try_from(size).map_err(|_| {
            Error::invalid_config("pageSize", format!("out of range: {size}"))
        })?,
    };

    Ok(PaginationConfig {
        page_size,
        return_all: raw.return_all.unwrap_or(false),
        search: raw.search.none_if_empty(),
        options: raw.options.unwrap_or_default(),
        page_limit: raw.page_limit.unwrap_or(DEFAULT_PAGE_LIMIT),
    })
}
