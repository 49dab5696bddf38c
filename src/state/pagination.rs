//! Pagination fetch controller (pure state machine).
//!
//! Drives incremental loading of the country list:
//!
//! ```text
//!        load_next_page            complete(Ok)
//! Idle ─────────────────▶ Loading ─────────────▶ Idle
//!  ▲                         │
//!  │ tick (timeout)          │ complete(Err)
//!  │ dismiss_error           ▼
//!  └───────────────────── Error ── load_next_page ──▶ Loading
//! ```
//!
//! The controller never performs I/O itself. [`Pagination::load_next_page`] hands
//! out a [`PageRequest`]; whoever executes it feeds the tagged [`PageResponse`]
//! back through [`Pagination::complete`]. At most one request is outstanding.
//!
//! Every reset bumps a generation counter. Requests carry the generation they
//! were issued under, and a response from an older generation is discarded
//! without touching the list, so a reset issued mid-flight can never be
//! corrupted by the stale page.

use crate::model::{Country, CountryQuery, PageRequest, PageResponse, PageTicket};
use crate::source::CountrySource;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Items requested per page.
pub const DEFAULT_BATCH_SIZE: usize = 12;

/// How long a fetch error stays on screen before it expires.
pub const DEFAULT_ERROR_DISPLAY: Duration = Duration::from_secs(3);

// ===== FetchState =====

/// Fetch lifecycle. Sum type enforces exactly one state at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// No request outstanding.
    Idle,
    /// One request outstanding.
    Loading,
    /// Last request failed; message shown until `since + timeout`.
    Error {
        /// User-facing message.
        message: String,
        /// When the failure was recorded.
        since: Instant,
    },
}

// ===== Completion =====

/// What `complete` did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Items were stored and the cursor advanced.
    Loaded {
        /// Number of items in the batch.
        count: usize,
        /// Whether a further page is expected.
        has_more: bool,
    },
    /// The fetch failed; list, cursor and `has_more` are unchanged.
    Failed {
        /// Message now shown in the error state.
        message: String,
    },
    /// The response belonged to an earlier generation and was dropped.
    ///
    /// If a reset happened while it was in flight, the reload request for the
    /// new generation is returned here and is now the outstanding request.
    Stale {
        /// Deferred reload, now issued.
        reissued: Option<PageRequest>,
    },
}

// ===== Pagination =====

/// Page cursor, result list, `has_more` flag and fetch state.
#[derive(Debug, Clone)]
pub struct Pagination {
    items: Vec<Country>,
    page: u32,
    has_more: bool,
    fetch_state: FetchState,
    generation: u64,
    in_flight: Option<PageTicket>,
    pending_reload: Option<CountryQuery>,
    batch_size: usize,
    error_display: Duration,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, DEFAULT_ERROR_DISPLAY)
    }
}

impl Pagination {
    /// Create a controller at page 1 with an empty list.
    ///
    /// A zero `batch_size` is treated as 1.
    pub fn new(batch_size: usize, error_display: Duration) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            has_more: true,
            fetch_state: FetchState::Idle,
            generation: 0,
            in_flight: None,
            pending_reload: None,
            batch_size: batch_size.max(1),
            error_display,
        }
    }

    // ===== Accessors =====

    /// Loaded countries, in arrival order.
    pub fn items(&self) -> &[Country] {
        &self.items
    }

    /// Next page to request (1-based).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Whether the server may have more items.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Current fetch state.
    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch_state
    }

    /// Whether a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.fetch_state == FetchState::Loading
    }

    /// Error message, while in the error state.
    pub fn error_message(&self) -> Option<&str> {
        match &self.fetch_state {
            FetchState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Ticket of the outstanding request, if any.
    pub fn in_flight(&self) -> Option<PageTicket> {
        self.in_flight
    }

    /// Current epoch.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Items requested per page.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Whether a sentinel-visibility signal should trigger a load.
    pub fn should_load_on_sentinel(&self) -> bool {
        self.has_more && !self.is_loading()
    }

    // ===== Transitions =====

    /// Issue the request for the next page.
    ///
    /// Returns `None` while a request is outstanding or once the list is
    /// exhausted. From the error state this acts as a retry and discards the
    /// error notice.
    pub fn load_next_page(&mut self, query: CountryQuery) -> Option<PageRequest> {
        if self.is_loading() {
            debug!(page = self.page, "Load ignored: request already in flight");
            return None;
        }
        if !self.has_more {
            debug!(page = self.page, "Load ignored: no more pages");
            return None;
        }

        let ticket = PageTicket {
            generation: self.generation,
            page: self.page,
        };
        self.in_flight = Some(ticket);
        self.fetch_state = FetchState::Loading;

        debug!(
            generation = ticket.generation,
            page = ticket.page,
            endpoint = ?query.endpoint,
            "Issuing page request"
        );

        Some(PageRequest {
            ticket,
            limit: self.batch_size,
            query,
        })
    }

    /// Start a new epoch: empty list, page 1, `has_more` set.
    ///
    /// An outstanding request becomes stale; its slot stays occupied until its
    /// response arrives.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.page = 1;
        self.has_more = true;
        self.pending_reload = None;
        if let FetchState::Error { .. } = self.fetch_state {
            self.fetch_state = FetchState::Idle;
        }
        info!(generation = self.generation, "Pagination reset");
    }

    /// Reset, then load page 1 for `query`.
    ///
    /// If a stale request is still in flight, the reload is deferred until its
    /// response arrives (see [`Completion::Stale`]) and `None` is returned.
    pub fn reset_and_reload(&mut self, query: CountryQuery) -> Option<PageRequest> {
        self.reset();
        if self.is_loading() {
            debug!("Reload deferred until in-flight request returns");
            self.pending_reload = Some(query);
            return None;
        }
        self.load_next_page(query)
    }

    /// Apply a response.
    pub fn complete(&mut self, response: PageResponse, now: Instant) -> Completion {
        if self.in_flight != Some(response.ticket) {
            warn!(
                ticket_generation = response.ticket.generation,
                ticket_page = response.ticket.page,
                "Dropping response that matches no outstanding request"
            );
            return Completion::Stale { reissued: None };
        }
        self.in_flight = None;
        self.fetch_state = FetchState::Idle;

        if response.ticket.generation != self.generation {
            debug!(
                ticket_generation = response.ticket.generation,
                generation = self.generation,
                "Discarding stale page"
            );
            let reissued = self
                .pending_reload
                .take()
                .and_then(|query| self.load_next_page(query));
            return Completion::Stale { reissued };
        }

        match response.result {
            Ok(batch) => {
                let count = batch.len();
                if self.page == 1 {
                    self.items = batch;
                } else {
                    self.items.extend(batch);
                }
                self.has_more = count == self.batch_size;
                self.page += 1;
                info!(
                    count,
                    total = self.items.len(),
                    has_more = self.has_more,
                    next_page = self.page,
                    "Page loaded"
                );
                Completion::Loaded {
                    count,
                    has_more: self.has_more,
                }
            }
            Err(err) => {
                let message = err.user_message();
                warn!(error = %err, page = self.page, "Page fetch failed");
                self.fetch_state = FetchState::Error {
                    message: message.clone(),
                    since: now,
                };
                Completion::Failed { message }
            }
        }
    }

    /// Expire the error state once the display timeout has elapsed.
    ///
    /// Returns `true` if the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.fetch_state {
            FetchState::Error { since, .. }
                if now.saturating_duration_since(*since) >= self.error_display =>
            {
                self.fetch_state = FetchState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Dismiss the error state immediately.
    ///
    /// Returns `true` if an error was showing.
    pub fn dismiss_error(&mut self) -> bool {
        if let FetchState::Error { .. } = self.fetch_state {
            self.fetch_state = FetchState::Idle;
            true
        } else {
            false
        }
    }

    /// Issue, execute and complete one request synchronously.
    ///
    /// Returns `None` if the guard rejected the load.
    pub fn load_with<S>(&mut self, query: CountryQuery, source: &S, now: Instant) -> Option<Completion>
    where
        S: CountrySource + ?Sized,
    {
        let request = self.load_next_page(query)?;
        let result = source.fetch_page(&request);
        Some(self.complete(PageResponse::for_request(&request, result), now))
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
