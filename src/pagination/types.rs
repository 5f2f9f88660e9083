//! Pagination types
//!
//! Configuration, the per-page response shape, and the accumulated
//! fetch result.

use crate::types::{JsonObject, JsonValue};

/// Default page size for single-page fetches.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Fixed page size used in auto-pagination mode.
///
/// Large fixed batches reduce round-trips when the full collection is
/// being consumed anyway; the caller's requested size is ignored.
pub const AUTO_PAGE_SIZE: u32 = 100;

/// Default page-count bound for the no-progress check.
pub const DEFAULT_PAGE_LIMIT: u32 = 1000;

// ============================================================================
// Pagination Config
// ============================================================================

/// Fully-specified pagination configuration.
///
/// Produced by [`normalize`] from raw caller options; consumed by
/// [`FetchEngine::fetch`].
///
/// [`normalize`]: crate::config::normalize
/// [`FetchEngine::fetch`]: super::FetchEngine::fetch
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationConfig {
    /// Records per page (single-page mode only)
    pub page_size: u32,
    /// Walk the whole collection instead of one page
    pub return_all: bool,
    /// Free-text search term forwarded in the variables
    pub search: Option<String>,
    /// Extra operation options forwarded verbatim
    pub options: JsonObject,
    /// Page-count bound for the no-progress check
    pub page_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            return_all: false,
            search: None,
            options: JsonObject::new(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

// ============================================================================
// Data Location
// ============================================================================

/// Where a list operation's page lives inside the response payload.
///
/// A dotted path relative to the unwrapped `data` payload, e.g.
/// `"records"` or `"practice.records"`. The container at the path is
/// expected to hold `{ data: [...], pageInfo?: { hasMore } }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLocation {
    path: String,
}

impl DataLocation {
    /// Create a location from a dotted path.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The dotted path.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Walk the dotted path into a payload value.
    pub(crate) fn resolve<'a>(&self, payload: &'a JsonValue) -> Option<&'a JsonValue> {
        let mut current = payload;
        for part in self.path.split('.') {
            match current {
                JsonValue::Object(map) => {
                    current = map.get(part)?;
                }
                _ => return None,
            }
        }
        Some(current)
    }
}

impl std::fmt::Display for DataLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

// ============================================================================
// Page Envelope
// ============================================================================

/// One page as extracted from a response payload.
#[derive(Debug, Clone, Default)]
pub struct PageEnvelope {
    /// Records in server-emission order
    pub records: Vec<JsonValue>,
    /// Continuation indicator; absent reads as `false`
    pub has_more: bool,
}

impl PageEnvelope {
    /// Extract a page from the payload at the given location.
    ///
    /// Any absent or malformed layer degrades to an empty page with no
    /// continuation rather than failing; partial and evolving response
    /// shapes are common in this domain.
    pub fn extract(payload: &JsonValue, location: &DataLocation) -> Self {
        let container = location.resolve(payload);

        let records = container
            .and_then(|c| c.get("data"))
            .and_then(JsonValue::as_array)
            .cloned()
            .unwrap_or_default();

        let has_more = container
            .and_then(|c| c.get("pageInfo"))
            .and_then(|info| info.get("hasMore"))
            .and_then(JsonValue::as_bool)
            .unwrap_or(false);

        Self { records, has_more }
    }

    /// Number of records in the page.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the page carried no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// Pagination Result
// ============================================================================

/// The accumulated result of one logical fetch.
#[derive(Debug, Clone, Default)]
pub struct PaginationResult {
    /// All records, in server page-emission order
    pub records: Vec<JsonValue>,
    /// Number of pages fetched
    pub pages_processed: u32,
    /// Total record count
    pub total_records: usize,
    /// Whether the last page indicated more remain.
    ///
    /// Only meaningful in single-page mode; `None` when auto-paginating.
    pub has_more: Option<bool>,
}
