//! Page-number pagination.
//!
//! Booker list endpoints page with `UsePaging`/`PageSize`/`PageNumber`
//! parameters. The [`Paginator`] drives one such walk as a small state
//! machine:
//!
//! ```text
//! NotStarted -> FetchingPage -> Accumulated -> FetchingPage -> ... -> Exhausted
//!                    |                |
//!                    +----> Failed <--+
//! ```
//!
//! Each page is fetched with the same parameters apart from `PageNumber`.
//! Records are hydrated and appended in server order. The walk ends when:
//!
//! - only one page was requested (`fetch_all == false`)
//! - a page comes back empty
//! - the page reached the reported `TotalPages` (or the page count derived
//!   from `TotalResultsCount`)
//! - with no reported totals, a page comes back shorter than the page size
//!
//! Indicators that contradict the records received are reported as
//! [`BookerError::MalformedResponse`] rather than guessed around. Any failure
//! discards the records accumulated so far.

use std::future::Future;

use serde_json::Value;

use crate::clients::BookerError;
use crate::rest::params::{PAGE_NUMBER, PAGE_SIZE};
use crate::rest::{ModelDescriptor, Params, ResponseEnvelope};

/// Position within a paged listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageDescriptor {
    page_number: u32,
    page_size: u32,
    is_last: bool,
}

impl PageDescriptor {
    /// Creates a descriptor for a page that is not yet known to be the last.
    ///
    /// Page numbers are 1-based.
    #[must_use]
    pub const fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number,
            page_size,
            is_last: false,
        }
    }

    /// Creates a descriptor for the first page.
    #[must_use]
    pub const fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    /// Reads `PageNumber` and `PageSize` from a parameter set.
    ///
    /// Missing values fall back to page 1 and `default_page_size`.
    ///
    /// # Errors
    ///
    /// Returns [`BookerError::InvalidPagination`] if either value is present
    /// but is not a positive integer.
    pub fn from_params(params: &Params, default_page_size: u32) -> Result<Self, BookerError> {
        let page_number = read_positive(params, PAGE_NUMBER)?.unwrap_or(1);
        let page_size = match read_positive(params, PAGE_SIZE)? {
            Some(size) => size,
            None if default_page_size > 0 => default_page_size,
            None => {
                return Err(BookerError::InvalidPagination {
                    field: PAGE_SIZE,
                    value: default_page_size.to_string(),
                })
            }
        };
        Ok(Self::new(page_number, page_size))
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns `true` once this page is known to be the last.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.is_last
    }

    /// Returns the descriptor for the following page.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::new(self.page_number.saturating_add(1), self.page_size)
    }

    /// Decides whether this page ends the listing, given what it returned.
    ///
    /// # Errors
    ///
    /// Returns a description of the contradiction if the page's indicators
    /// and record count disagree.
    pub fn settle(self, envelope: &ResponseEnvelope) -> Result<Self, String> {
        let number = u64::from(self.page_number);
        let size = u64::from(self.page_size);
        let received = envelope.len() as u64;

        if received > size {
            return Err(format!(
                "page {number} returned {received} records for a page size of {size}"
            ));
        }

        let pages_from_count = envelope
            .total_results()
            .map(|total| total / size + u64::from(total % size != 0));
        let total_pages = match (envelope.total_pages(), pages_from_count) {
            (Some(pages), Some(counted)) if pages != counted => {
                return Err(format!(
                    "TotalPages {pages} disagrees with TotalResultsCount {} at page size {size}",
                    envelope.total_results().unwrap_or_default()
                ));
            }
            (Some(pages), _) => Some(pages),
            (None, counted) => counted,
        };

        let is_last = match total_pages {
            None => received < size,
            Some(total_pages) if number < total_pages => {
                if received < size {
                    return Err(format!(
                        "page {number} of {total_pages} returned only {received} of {size} records"
                    ));
                }
                false
            }
            Some(total_pages) if number == total_pages => {
                if let Some(total) = envelope.total_results() {
                    let expected = total - (total_pages - 1) * size;
                    if received != expected {
                        return Err(format!(
                            "last page {number} returned {received} records, \
                             expected {expected} of {total}"
                        ));
                    }
                }
                true
            }
            Some(total_pages) => {
                if received > 0 {
                    return Err(format!(
                        "page {number} returned records beyond the reported {total_pages} pages"
                    ));
                }
                true
            }
        };

        Ok(Self { is_last, ..self })
    }
}

fn read_positive(params: &Params, field: &'static str) -> Result<Option<u32>, BookerError> {
    let Some(value) = params.get(field) else {
        return Ok(None);
    };
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| *n > 0)
        .and_then(|n| u32::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| BookerError::InvalidPagination {
            field,
            value: value.to_string(),
        })
}

/// Lifecycle of a pagination walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaginationState {
    /// No page requested yet.
    NotStarted,
    /// A page request is in flight.
    FetchingPage,
    /// A page's records have been appended.
    Accumulated,
    /// All requested pages were collected.
    Exhausted,
    /// A page failed; accumulated records were discarded.
    Failed,
}

/// Walks a paged listing, accumulating hydrated records.
///
/// # Example
///
/// ```rust
/// use booker_api::rest::{ModelDescriptor, Paginator, Params};
/// use serde_json::{json, Value};
///
/// # tokio_test::block_on(async {
/// let params = Params::new().with("PageSize", 2);
/// let model = ModelDescriptor::<Value>::of();
/// let paginator = Paginator::new("/v4.1/merchant/employees", model, &params, 50)
///     .unwrap()
///     .fetch_all(true);
///
/// let records = paginator
///     .run(|page| {
///         let body = match page.get("PageNumber").and_then(Value::as_u64) {
///             Some(1) => json!({"Results": [{"ID": 1}, {"ID": 2}]}),
///             _ => json!({"Results": [{"ID": 3}]}),
///         };
///         std::future::ready(Ok(body))
///     })
///     .await
///     .unwrap();
///
/// assert_eq!(records.len(), 3);
/// # });
/// ```
#[derive(Debug)]
pub struct Paginator<'a, M> {
    path: &'a str,
    params: &'a Params,
    model: ModelDescriptor<M>,
    fetch_all: bool,
    max_pages: Option<u32>,
    page: PageDescriptor,
    pages_fetched: u32,
    state: PaginationState,
    records: Vec<M>,
}

impl<'a, M> Paginator<'a, M> {
    /// Creates a paginator over `params`, starting at the page they name.
    ///
    /// Every page request is `params` stamped with that page's number.
    ///
    /// # Errors
    ///
    /// Returns [`BookerError::InvalidPagination`] if `params` carries a
    /// non-positive `PageNumber` or `PageSize`.
    pub fn new(
        path: &'a str,
        model: ModelDescriptor<M>,
        params: &'a Params,
        default_page_size: u32,
    ) -> Result<Self, BookerError> {
        Ok(Self {
            path,
            params,
            model,
            fetch_all: false,
            max_pages: None,
            page: PageDescriptor::from_params(params, default_page_size)?,
            pages_fetched: 0,
            state: PaginationState::NotStarted,
            records: Vec::new(),
        })
    }

    /// Whether to follow subsequent pages (default: only the starting page).
    #[must_use]
    pub const fn fetch_all(mut self, fetch_all: bool) -> Self {
        self.fetch_all = fetch_all;
        self
    }

    /// Caps the number of pages fetched; `None` removes the cap.
    #[must_use]
    pub const fn max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> PaginationState {
        self.state
    }

    /// Returns the current page descriptor.
    #[must_use]
    pub const fn page(&self) -> PageDescriptor {
        self.page
    }

    /// Runs the walk to completion.
    ///
    /// `fetch` performs one request with the given parameters and returns the
    /// decoded body. It is called once per page, strictly in sequence.
    ///
    /// # Errors
    ///
    /// Returns the first error from `fetch`, a
    /// [`BookerError::MalformedResponse`] for a page that is not a collection
    /// or contradicts its indicators, a [`BookerError::Hydration`] for a
    /// record that does not fit the model, or
    /// [`BookerError::PaginationExceeded`] when the page cap is reached with
    /// pages remaining.
    pub async fn run<F, Fut>(mut self, mut fetch: F) -> Result<Vec<M>, BookerError>
    where
        F: FnMut(Params) -> Fut,
        Fut: Future<Output = Result<Value, BookerError>>,
    {
        self.transition(PaginationState::FetchingPage);
        loop {
            let body = match fetch(self.params.for_page(&self.page)).await {
                Ok(body) => body,
                Err(error) => return Err(self.fail(error)),
            };
            self.pages_fetched += 1;

            if let Err(error) = self.accumulate(body) {
                return Err(self.fail(error));
            }
            self.transition(PaginationState::Accumulated);

            if !self.fetch_all || self.page.is_last() {
                self.transition(PaginationState::Exhausted);
                return Ok(self.records);
            }

            if let Some(max_pages) = self.max_pages {
                if self.pages_fetched >= max_pages {
                    let error = BookerError::PaginationExceeded {
                        path: self.path.to_string(),
                        max_pages,
                    };
                    return Err(self.fail(error));
                }
            }

            self.page = self.page.next();
            self.transition(PaginationState::FetchingPage);
        }
    }

    fn accumulate(&mut self, body: Value) -> Result<(), BookerError> {
        let envelope = ResponseEnvelope::parse(body, self.model.collection_key())
            .map_err(|reason| self.malformed(reason))?;
        self.page = self
            .page
            .settle(&envelope)
            .map_err(|reason| self.malformed(reason))?;

        let batch = self.model.construct_all(envelope.into_records())?;
        tracing::debug!(
            path = self.path,
            page = self.page.page_number(),
            received = batch.len(),
            last = self.page.is_last(),
            "Accumulated page"
        );
        self.records.extend(batch);
        Ok(())
    }

    fn malformed(&self, reason: String) -> BookerError {
        BookerError::MalformedResponse {
            path: self.path.to_string(),
            reason,
        }
    }

    fn fail(&mut self, error: BookerError) -> BookerError {
        self.records.clear();
        self.transition(PaginationState::Failed);
        tracing::debug!(path = self.path, error = %error, "Pagination failed");
        error
    }

    fn transition(&mut self, next: PaginationState) {
        tracing::debug!(
            path = self.path,
            from = ?self.state,
            to = ?next,
            page = self.page.page_number(),
            "Pagination state change"
        );
        self.state = next;
    }
}
