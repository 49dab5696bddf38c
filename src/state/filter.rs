//! Filter/query state holder.
//!
//! Owns the raw filter fields the user edits and turns them into a normalized
//! [`CountryQuery`] on demand. Every mutator here is a pure state update: none of
//! them triggers a fetch. Fetching is the caller's decision (submit, clear, scroll).

use crate::model::{CountryQuery, Endpoint};
use std::collections::BTreeSet;

// ===== FilterState =====

/// Current search text, region selection and timezone filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search_text: String,
    selected_regions: BTreeSet<String>,
    timezone: String,
}

impl FilterState {
    /// Empty filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the search text. Stored verbatim; trimmed when the query is built.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Add the region if it is not selected, remove it if it is.
    ///
    /// Surrounding whitespace is ignored; a blank region is a no-op.
    pub fn toggle_region(&mut self, region: &str) {
        let region = region.trim();
        if region.is_empty() {
            return;
        }
        if !self.selected_regions.remove(region) {
            self.selected_regions.insert(region.to_string());
        }
    }

    /// Replace the timezone filter. An empty string unsets it.
    pub fn set_timezone(&mut self, timezone: impl Into<String>) {
        self.timezone = timezone.into();
    }

    /// Reset every field to its default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Raw search text as typed.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Raw timezone as typed.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Whether `region` is currently selected.
    pub fn is_region_selected(&self, region: &str) -> bool {
        self.selected_regions.contains(region.trim())
    }

    /// Selected regions in sorted order.
    pub fn selected_regions(&self) -> impl Iterator<Item = &str> {
        self.selected_regions.iter().map(String::as_str)
    }

    /// Number of active filters, as shown on the filter badge.
    ///
    /// Non-blank search text and timezone count once each; every selected
    /// region counts once.
    pub fn applied_filter_count(&self) -> usize {
        usize::from(!self.search_text.trim().is_empty())
            + usize::from(!self.timezone.trim().is_empty())
            + self.selected_regions.len()
    }

    /// Whether no filter is active.
    pub fn is_empty(&self) -> bool {
        self.applied_filter_count() == 0
    }

    /// Build the normalized query for the next fetch.
    ///
    /// Selected regions or non-blank search text route to [`Endpoint::Search`];
    /// otherwise [`Endpoint::ListAll`] is used. The timezone, when set, is carried
    /// with either variant.
    pub fn build_query_params(&self) -> CountryQuery {
        let name = non_blank(&self.search_text);
        let timezone = non_blank(&self.timezone);
        let regions: Vec<String> = self.selected_regions.iter().cloned().collect();

        let endpoint = if name.is_some() || !regions.is_empty() {
            Endpoint::Search
        } else {
            Endpoint::ListAll
        };

        CountryQuery {
            endpoint,
            name,
            regions,
            timezone,
        }
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_build_list_all_query() {
        let filters = FilterState::new();
        assert_eq!(filters.build_query_params(), CountryQuery::list_all());
        assert!(filters.is_empty());
    }

    #[test]
    fn search_text_routes_to_search_endpoint_trimmed() {
        let mut filters = FilterState::new();
        filters.set_search_text("  fra ");

        let query = filters.build_query_params();

        assert_eq!(query.endpoint, Endpoint::Search);
        assert_eq!(query.name.as_deref(), Some("fra"));
    }

    #[test]
    fn whitespace_search_text_is_ignored() {
        let mut filters = FilterState::new();
        filters.set_search_text("   ");

        let query = filters.build_query_params();

        assert_eq!(query.endpoint, Endpoint::ListAll);
        assert_eq!(query.name, None);
        assert_eq!(filters.applied_filter_count(), 0);
    }

    #[test]
    fn region_selection_routes_to_search_endpoint() {
        let mut filters = FilterState::new();
        filters.toggle_region("Europe");

        let query = filters.build_query_params();

        assert_eq!(query.endpoint, Endpoint::Search);
        assert_eq!(query.regions, vec!["Europe".to_string()]);
        assert_eq!(query.name, None);
    }

    #[test]
    fn toggle_region_twice_deselects() {
        let mut filters = FilterState::new();
        filters.toggle_region("Asia");
        filters.toggle_region("Asia");

        assert!(!filters.is_region_selected("Asia"));
        assert_eq!(filters.build_query_params().endpoint, Endpoint::ListAll);
    }

    #[test]
    fn regions_are_trimmed_deduplicated_and_sorted() {
        let mut filters = FilterState::new();
        filters.toggle_region("Oceania");
        filters.toggle_region(" Africa ");
        filters.toggle_region("");
        filters.toggle_region("  ");

        let query = filters.build_query_params();

        assert_eq!(
            query.regions,
            vec!["Africa".to_string(), "Oceania".to_string()]
        );
        assert!(filters.is_region_selected("Africa"));
    }

    #[test]
    fn toggle_with_padding_removes_existing_region() {
        let mut filters = FilterState::new();
        filters.toggle_region("Africa");
        filters.toggle_region(" Africa");

        assert!(!filters.is_region_selected("Africa"));
    }

    #[test]
    fn timezone_alone_keeps_list_all_endpoint() {
        let mut filters = FilterState::new();
        filters.set_timezone(" UTC+01:00 ");

        let query = filters.build_query_params();

        assert_eq!(query.endpoint, Endpoint::ListAll);
        assert_eq!(query.timezone.as_deref(), Some("UTC+01:00"));
    }

    #[test]
    fn timezone_is_carried_with_search_endpoint() {
        let mut filters = FilterState::new();
        filters.set_search_text("an");
        filters.set_timezone("UTC+02:00");

        let query = filters.build_query_params();

        assert_eq!(query.endpoint, Endpoint::Search);
        assert_eq!(query.timezone.as_deref(), Some("UTC+02:00"));
    }

    #[test]
    fn applied_filter_count_counts_each_filter() {
        let mut filters = FilterState::new();
        filters.set_search_text("a");
        filters.set_timezone("UTC");
        filters.toggle_region("Asia");
        filters.toggle_region("Europe");

        assert_eq!(filters.applied_filter_count(), 4);
    }

    #[test]
    fn clear_resets_all_fields() {
        let mut filters = FilterState::new();
        filters.set_search_text("fra");
        filters.set_timezone("UTC");
        filters.toggle_region("Europe");

        filters.clear();

        assert_eq!(filters, FilterState::default());
        assert_eq!(filters.build_query_params(), CountryQuery::list_all());
    }
}
