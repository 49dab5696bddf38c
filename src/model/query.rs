//! Normalized fetch parameters and page request/response envelopes.

use crate::model::{Country, FetchError};
use serde::Serialize;

// ===== Endpoint =====

/// Which variant of the remote endpoint a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Unfiltered listing of every country.
    ListAll,
    /// Filtered listing by name and/or region.
    Search,
}

impl Endpoint {
    /// Path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::ListAll => "countries",
            Endpoint::Search => "countries/search",
        }
    }
}

// ===== CountryQuery =====

/// Normalized, serializable snapshot of the current filters.
///
/// Built by `FilterState::build_query_params`. Values are already trimmed,
/// blanks are `None`, and regions are deduplicated and sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryQuery {
    /// Endpoint variant selected from the filters.
    pub endpoint: Endpoint,
    /// Name search text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Selected regions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,
    /// Timezone filter, sent with either endpoint variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl CountryQuery {
    /// Query for the unfiltered listing.
    pub fn list_all() -> Self {
        Self {
            endpoint: Endpoint::ListAll,
            name: None,
            regions: Vec::new(),
            timezone: None,
        }
    }

    /// Filter parameters as `(key, value)` pairs, excluding paging.
    pub fn filter_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.endpoint == Endpoint::Search {
            if let Some(name) = &self.name {
                pairs.push(("name", name.clone()));
            }
            if !self.regions.is_empty() {
                pairs.push(("region", self.regions.join(",")));
            }
        }
        if let Some(timezone) = &self.timezone {
            pairs.push(("timezone", timezone.clone()));
        }
        pairs
    }
}

impl Default for CountryQuery {
    fn default() -> Self {
        Self::list_all()
    }
}

// ===== PageTicket =====

/// Tag identifying which epoch and page a request was issued for.
///
/// Responses whose `generation` no longer matches the controller's are stale
/// and get discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageTicket {
    /// Controller generation at issue time.
    pub generation: u64,
    /// Page cursor at issue time (1-based).
    pub page: u32,
}

// ===== PageRequest =====

/// One request for one batch of countries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Epoch tag echoed back in the response.
    pub ticket: PageTicket,
    /// Batch size.
    pub limit: usize,
    /// Filters in effect when the request was issued.
    pub query: CountryQuery,
}

impl PageRequest {
    /// Page number being requested.
    pub fn page(&self) -> u32 {
        self.ticket.page
    }

    /// Full query string pairs: paging first, then filters.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.ticket.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        pairs.extend(self.query.filter_pairs());
        pairs
    }
}

// ===== PageResponse =====

/// Outcome of a `PageRequest`, tagged with the request's ticket.
#[derive(Debug)]
pub struct PageResponse {
    /// Ticket of the originating request.
    pub ticket: PageTicket,
    /// Fetched batch or the failure.
    pub result: Result<Vec<Country>, FetchError>,
}

impl PageResponse {
    /// Pair a result with the request it answers.
    pub fn for_request(request: &PageRequest, result: Result<Vec<Country>, FetchError>) -> Self {
        Self {
            ticket: request.ticket,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: CountryQuery) -> PageRequest {
        PageRequest {
            ticket: PageTicket {
                generation: 0,
                page: 3,
            },
            limit: 12,
            query,
        }
    }

    #[test]
    fn list_all_pairs_contain_only_paging() {
        let pairs = request(CountryQuery::list_all()).query_pairs();
        assert_eq!(
            pairs,
            vec![("page", "3".to_string()), ("limit", "12".to_string())]
        );
    }

    #[test]
    fn search_pairs_include_name_and_joined_regions() {
        let query = CountryQuery {
            endpoint: Endpoint::Search,
            name: Some("fra".to_string()),
            regions: vec!["Africa".to_string(), "Europe".to_string()],
            timezone: None,
        };

        let pairs = request(query).query_pairs();

        assert!(pairs.contains(&("name", "fra".to_string())));
        assert!(pairs.contains(&("region", "Africa,Europe".to_string())));
    }

    #[test]
    fn timezone_is_sent_with_list_all() {
        let query = CountryQuery {
            timezone: Some("UTC+01:00".to_string()),
            ..CountryQuery::list_all()
        };

        let pairs = query.filter_pairs();

        assert_eq!(pairs, vec![("timezone", "UTC+01:00".to_string())]);
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::ListAll.path(), "countries");
        assert_eq!(Endpoint::Search.path(), "countries/search");
    }

    #[test]
    fn query_serializes_without_empty_fields() {
        let json = serde_json::to_string(&CountryQuery::list_all()).unwrap();
        assert_eq!(json, r#"{"endpoint":"list_all"}"#);
    }
}
