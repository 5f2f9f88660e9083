//! Pagination module
//!
//! Drives page-by-page fetching over the API's page/pageSize model
//! with its boolean `hasMore` continuation flag.
//!
//! # Overview
//!
//! The driver runs in one of two modes: a single bounded page, or
//! auto-pagination that walks the whole remote collection. Termination
//! is guaranteed even against non-conforming responses: a missing
//! continuation flag reads as "no more pages," and a page that yields
//! no records while claiming more remain ends the loop.

mod driver;
mod types;

pub use driver::FetchEngine;
pub use types::{
    DataLocation, PageEnvelope, PaginationConfig, PaginationResult, AUTO_PAGE_SIZE,
    DEFAULT_PAGE_LIMIT, DEFAULT_PAGE_SIZE,
};
