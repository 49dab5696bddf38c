//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state. It composes the
//! filter holder and the pagination controller with the UI-only bits (input
//! mode, panels, grid selection, sentinel edge detection).
//!
//! Transitions never perform I/O. Any transition that wants data returns the
//! [`PageRequest`] to execute; the shell hands it to the fetch worker and feeds
//! the response back through [`AppState::apply_response`].

use crate::model::{Country, FetchError, KeyAction, PageRequest, PageResponse, REGIONS};
use crate::state::pagination::{Completion, FetchState, Pagination};
use crate::state::scroll_handler::{handle_scroll_action, GridScroll, GridViewport};
use crate::state::{FilterState, TextInput};
use std::time::Instant;
use tracing::debug;

// ===== InputMode =====

/// Which widget receives character input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are dispatched through key bindings.
    #[default]
    Browse,
    /// Typing into the search field.
    EditSearch,
    /// Typing into the timezone field.
    EditTimezone,
}

// ===== AppState =====

/// Application state. Pure data, no side effects.
///
/// # Loading triggers
///
/// - **Startup**: [`AppState::start`] loads page 1.
/// - **Submit/apply**: [`AppState::reset_and_reload`] starts a new epoch.
/// - **Clear**: [`AppState::clear_filters`] resets filters and reloads.
/// - **Sentinel**: selection/viewport changes that bring the sentinel row into
///   view load the next page, but only on the hidden → visible edge.
/// - **Retry**: [`AppState::load_next_page`] from the retry key.
///
/// Typing and region toggles only edit filters; they never fetch.
#[derive(Debug, Clone)]
pub struct AppState {
    filters: FilterState,
    pagination: Pagination,

    /// Search field contents.
    pub search_input: TextInput,

    /// Timezone field contents.
    pub timezone_input: TextInput,

    /// Which field, if any, has keyboard focus.
    pub input_mode: InputMode,

    /// Whether the region/timezone panel is shown.
    pub filters_visible: bool,

    /// Whether the help overlay is currently visible.
    pub help_visible: bool,

    scroll: GridScroll,
    viewport: GridViewport,
    sentinel_was_visible: bool,
    /// Set when the last completion failed. Layout changes may not retry the
    /// failed page until a key press or a successful load clears it.
    retry_blocked: bool,
}

impl AppState {
    /// Create state around a configured pagination controller.
    pub fn new(pagination: Pagination) -> Self {
        Self {
            filters: FilterState::new(),
            pagination,
            search_input: TextInput::default(),
            timezone_input: TextInput::default(),
            input_mode: InputMode::Browse,
            filters_visible: false,
            help_visible: false,
            scroll: GridScroll::default(),
            viewport: GridViewport::default(),
            sentinel_was_visible: false,
            retry_blocked: false,
        }
    }

    /// Start with pre-set filters (from the command line).
    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.search_input = TextInput::with_text(filters.search_text());
        self.timezone_input = TextInput::with_text(filters.timezone());
        self.filters = filters;
        self
    }

    // ===== Accessors =====

    /// Current filters.
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Pagination controller.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Loaded countries.
    pub fn countries(&self) -> &[Country] {
        self.pagination.items()
    }

    /// Current fetch state.
    pub fn fetch_state(&self) -> &FetchState {
        self.pagination.fetch_state()
    }

    /// Selection and first visible row.
    pub fn scroll(&self) -> GridScroll {
        self.scroll
    }

    /// Grid geometry last reported by the view.
    pub fn viewport(&self) -> GridViewport {
        self.viewport
    }

    /// Selected country, if any are loaded.
    pub fn selected_country(&self) -> Option<&Country> {
        self.countries().get(self.scroll.selected)
    }

    // ===== Loading =====

    /// Initial load. The sentinel of an empty list is visible, so this also
    /// consumes the first visibility edge.
    pub fn start(&mut self) -> Option<PageRequest> {
        self.sentinel_was_visible = true;
        self.load_next_page()
    }

    /// Request the next page with the current filters (guarded).
    pub fn load_next_page(&mut self) -> Option<PageRequest> {
        self.retry_blocked = false;
        let query = self.filters.build_query_params();
        self.pagination.load_next_page(query)
    }

    /// Start a new epoch with the current filters and load page 1.
    pub fn reset_and_reload(&mut self) -> Option<PageRequest> {
        self.scroll = GridScroll::default();
        self.sentinel_was_visible = true;
        self.retry_blocked = false;
        self.input_mode = InputMode::Browse;
        let query = self.filters.build_query_params();
        debug!(query = ?query, "Reset and reload");
        self.pagination.reset_and_reload(query)
    }

    /// Reset every filter and reload from page 1.
    pub fn clear_filters(&mut self) -> Option<PageRequest> {
        self.filters.clear();
        self.search_input = TextInput::default();
        self.timezone_input = TextInput::default();
        self.reset_and_reload()
    }

    /// Feed a worker response back in.
    ///
    /// Returns a follow-up request when one is due: the deferred reload after a
    /// stale response, or the next page when the sentinel is still in view
    /// after a successful load.
    pub fn apply_response(&mut self, response: PageResponse, now: Instant) -> Option<PageRequest> {
        match self.pagination.complete(response, now) {
            Completion::Loaded { .. } => {
                self.scroll = self.scroll.clamped(self.countries().len(), self.viewport);
                // A successful load re-arms the sentinel
                self.sentinel_was_visible = false;
                self.retry_blocked = false;
                self.check_sentinel()
            }
            Completion::Failed { .. } => {
                self.retry_blocked = true;
                None
            }
            Completion::Stale { reissued } => reissued,
        }
    }

    /// Fail the outstanding request, if any, without a worker response.
    ///
    /// Used when the fetch thread is gone and its answer will never arrive.
    pub fn fail_in_flight(&mut self, error: FetchError, now: Instant) -> Option<PageRequest> {
        let ticket = self.pagination.in_flight()?;
        self.apply_response(
            PageResponse {
                ticket,
                result: Err(error),
            },
            now,
        )
    }

    /// Expire a timed-out error. Returns `true` if the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.pagination.tick(now)
    }

    /// Dismiss the error notification.
    pub fn dismiss_error(&mut self) -> bool {
        self.pagination.dismiss_error()
    }

    // ===== Sentinel =====

    /// Update grid geometry (terminal resize, first layout, banner shown or
    /// hidden). After a failure this never retries on its own.
    pub fn set_viewport(&mut self, viewport: GridViewport) -> Option<PageRequest> {
        self.viewport = viewport;
        self.scroll = self.scroll.clamped(self.countries().len(), viewport);
        self.check_sentinel()
    }

    /// Apply a selection action and load more if the sentinel came into view.
    pub fn handle_selection(&mut self, action: KeyAction) -> Option<PageRequest> {
        self.retry_blocked = false;
        self.scroll = handle_scroll_action(self.scroll, action, self.countries().len(), self.viewport);
        self.check_sentinel()
    }

    /// Whether the sentinel row is currently on screen.
    pub fn sentinel_visible(&self) -> bool {
        self.scroll
            .sentinel_visible(self.countries().len(), self.viewport)
    }

    fn check_sentinel(&mut self) -> Option<PageRequest> {
        let visible = self.sentinel_visible();
        let became_visible = visible && !self.sentinel_was_visible;
        self.sentinel_was_visible = visible;

        if became_visible && !self.retry_blocked && self.pagination.should_load_on_sentinel() {
            debug!(page = self.pagination.page(), "Sentinel visible, loading next page");
            self.load_next_page()
        } else {
            None
        }
    }

    // ===== Filter editing =====

    /// Focus the search field.
    pub fn begin_search(&mut self) {
        self.input_mode = InputMode::EditSearch;
    }

    /// Open the filter panel and focus the timezone field.
    pub fn begin_timezone(&mut self) {
        self.filters_visible = true;
        self.input_mode = InputMode::EditTimezone;
    }

    /// Return keyboard focus to the card grid. Text is kept.
    pub fn leave_input(&mut self) {
        self.input_mode = InputMode::Browse;
    }

    /// Edit the focused field and mirror it into the filters. Never fetches.
    pub fn edit_input(&mut self, edit: impl FnOnce(TextInput) -> TextInput) {
        match self.input_mode {
            InputMode::EditSearch => {
                self.search_input = edit(std::mem::take(&mut self.search_input));
                self.filters.set_search_text(self.search_input.text());
            }
            InputMode::EditTimezone => {
                self.timezone_input = edit(std::mem::take(&mut self.timezone_input));
                self.filters.set_timezone(self.timezone_input.text());
            }
            InputMode::Browse => {}
        }
    }

    /// Toggle the region at `index` in [`REGIONS`]. Out-of-range is a no-op.
    pub fn toggle_region(&mut self, index: usize) {
        if let Some(region) = REGIONS.get(index) {
            self.filters.toggle_region(region);
        }
    }

    /// Show or hide the filter panel.
    pub fn toggle_filters_panel(&mut self) {
        self.filters_visible = !self.filters_visible;
        if !self.filters_visible && self.input_mode == InputMode::EditTimezone {
            self.input_mode = InputMode::Browse;
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Pagination::default())
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
