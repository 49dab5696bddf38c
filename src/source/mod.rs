//! Remote country data sources.
//!
//! This module provides:
//! - [`CountrySource`], the seam between the pagination core and the network
//! - [`HttpCountrySource`], a blocking HTTP client for the countries API
//! - [`FetchWorker`], a background thread that executes one request at a time
//!   so the TUI thread never blocks on I/O

use crate::model::{Country, FetchError, PageRequest};

pub mod http;
pub mod worker;

pub use http::HttpCountrySource;
pub use worker::FetchWorker;

/// Something that can fetch one page of countries.
///
/// Implementations perform the request synchronously; callers that must not
/// block run them on a [`FetchWorker`].
pub trait CountrySource {
    /// Fetch the batch described by `request`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` for any failure. Failures are recoverable; the
    /// caller decides whether to retry.
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Country>, FetchError>;
}

impl<S: CountrySource + ?Sized> CountrySource for Box<S> {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Country>, FetchError> {
        (**self).fetch_page(request)
    }
}

impl<S: CountrySource + ?Sized> CountrySource for std::sync::Arc<S> {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Country>, FetchError> {
        (**self).fetch_page(request)
    }
}
