//! Tests for the pagination controller.

use super::*;
use crate::model::{Endpoint, FetchError, FETCH_FALLBACK_MESSAGE};
use std::cell::RefCell;
use std::collections::VecDeque;

// ===== Test Helpers =====

fn countries(prefix: &str, count: usize) -> Vec<Country> {
    (0..count)
        .map(|i| Country::named(format!("{prefix}-{i}")))
        .collect()
}

fn ok_response(request: &PageRequest, count: usize) -> PageResponse {
    PageResponse::for_request(request, Ok(countries(&format!("p{}", request.page()), count)))
}

fn err_response(request: &PageRequest, err: FetchError) -> PageResponse {
    PageResponse::for_request(request, Err(err))
}

/// Source that replays scripted results and records every request.
struct ScriptedSource {
    results: RefCell<VecDeque<Result<Vec<Country>, FetchError>>>,
    requests: RefCell<Vec<PageRequest>>,
}

impl ScriptedSource {
    fn new(results: Vec<Result<Vec<Country>, FetchError>>) -> Self {
        Self {
            results: RefCell::new(results.into()),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl CountrySource for ScriptedSource {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Country>, FetchError> {
        self.requests.borrow_mut().push(request.clone());
        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

// ===== Initial state =====

#[test]
fn new_controller_starts_idle_on_page_one() {
    let pagination = Pagination::default();

    assert_eq!(pagination.page(), 1);
    assert!(pagination.has_more());
    assert!(pagination.items().is_empty());
    assert_eq!(pagination.fetch_state(), &FetchState::Idle);
    assert_eq!(pagination.batch_size(), DEFAULT_BATCH_SIZE);
    assert!(pagination.should_load_on_sentinel());
}

#[test]
fn zero_batch_size_is_clamped_to_one() {
    let pagination = Pagination::new(0, DEFAULT_ERROR_DISPLAY);
    assert_eq!(pagination.batch_size(), 1);
}

// ===== load_next_page =====

#[test]
fn load_next_page_issues_request_for_current_page() {
    let mut pagination = Pagination::default();

    let request = pagination
        .load_next_page(CountryQuery::list_all())
        .expect("should issue request");

    assert_eq!(request.page(), 1);
    assert_eq!(request.limit, 12);
    assert_eq!(request.ticket.generation, 0);
    assert!(pagination.is_loading());
}

#[test]
fn load_next_page_while_loading_is_noop() {
    let mut pagination = Pagination::default();
    let _first = pagination.load_next_page(CountryQuery::list_all()).unwrap();

    for _ in 0..5 {
        assert!(pagination.load_next_page(CountryQuery::list_all()).is_none());
    }
    assert!(pagination.is_loading());
    assert_eq!(pagination.page(), 1);
}

#[test]
fn load_next_page_when_exhausted_is_noop() {
    let mut pagination = Pagination::default();
    let request = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(ok_response(&request, 3), Instant::now());
    assert!(!pagination.has_more());

    assert!(pagination.load_next_page(CountryQuery::list_all()).is_none());
    assert_eq!(pagination.page(), 2, "Cursor must not advance once exhausted");
    assert!(!pagination.should_load_on_sentinel());
}

// ===== complete: success =====

#[test]
fn full_batch_keeps_has_more_and_advances_cursor() {
    let mut pagination = Pagination::default();
    let request = pagination.load_next_page(CountryQuery::list_all()).unwrap();

    let completion = pagination.complete(ok_response(&request, 12), Instant::now());

    assert_eq!(
        completion,
        Completion::Loaded {
            count: 12,
            has_more: true
        }
    );
    assert!(pagination.has_more());
    assert_eq!(pagination.page(), 2);
    assert_eq!(pagination.items().len(), 12);
    assert_eq!(pagination.fetch_state(), &FetchState::Idle);
}

#[test]
fn short_batch_clears_has_more() {
    let mut pagination = Pagination::default();
    let request = pagination.load_next_page(CountryQuery::list_all()).unwrap();

    pagination.complete(ok_response(&request, 0), Instant::now());

    assert!(!pagination.has_more());
    assert_eq!(pagination.page(), 2);
    assert!(pagination.items().is_empty());
}

#[test]
fn twelve_then_five_items_exhausts_list() {
    let mut pagination = Pagination::default();
    let now = Instant::now();

    let first = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(ok_response(&first, 12), now);
    assert!(pagination.has_more());
    assert_eq!(pagination.page(), 2);

    let second = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    assert_eq!(second.page(), 2);
    pagination.complete(ok_response(&second, 5), now);

    assert!(!pagination.has_more());
    assert_eq!(pagination.page(), 3);
    assert_eq!(pagination.items().len(), 17);
    assert!(!pagination.should_load_on_sentinel());
    assert!(pagination.load_next_page(CountryQuery::list_all()).is_none());
}

#[test]
fn later_pages_append_in_order() {
    let mut pagination = Pagination::default();
    let now = Instant::now();

    let first = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(ok_response(&first, 12), now);
    let second = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(ok_response(&second, 2), now);

    let keys: Vec<&str> = pagination.items().iter().map(Country::key).collect();
    assert_eq!(keys[0], "p1-0");
    assert_eq!(keys[11], "p1-11");
    assert_eq!(keys[12], "p2-0");
    assert_eq!(keys[13], "p2-1");
}

// ===== complete: failure =====

#[test]
fn failure_leaves_list_cursor_and_has_more_unchanged() {
    let mut pagination = Pagination::default();
    let now = Instant::now();

    let first = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(ok_response(&first, 12), now);

    let second = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    let completion = pagination.complete(
        err_response(&second, FetchError::Transport("network down".to_string())),
        now,
    );

    assert_eq!(
        completion,
        Completion::Failed {
            message: FETCH_FALLBACK_MESSAGE.to_string()
        }
    );
    assert_eq!(pagination.items().len(), 12);
    assert_eq!(pagination.page(), 2);
    assert!(pagination.has_more());
    assert_eq!(pagination.error_message(), Some(FETCH_FALLBACK_MESSAGE));
}

#[test]
fn failure_surfaces_server_message() {
    let mut pagination = Pagination::default();
    let request = pagination.load_next_page(CountryQuery::list_all()).unwrap();

    pagination.complete(
        err_response(
            &request,
            FetchError::Status {
                status: 400,
                message: Some("Unknown region".to_string()),
            },
        ),
        Instant::now(),
    );

    assert_eq!(pagination.error_message(), Some("Unknown region"));
}

#[test]
fn error_expires_after_display_timeout() {
    let mut pagination = Pagination::new(12, Duration::from_secs(3));
    let failed_at = Instant::now();
    let request = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(
        err_response(&request, FetchError::Transport("x".to_string())),
        failed_at,
    );

    assert!(!pagination.tick(failed_at + Duration::from_millis(2_999)));
    assert!(pagination.error_message().is_some());

    assert!(pagination.tick(failed_at + Duration::from_secs(3)));
    assert_eq!(pagination.fetch_state(), &FetchState::Idle);
}

#[test]
fn tick_is_noop_outside_error_state() {
    let mut pagination = Pagination::default();
    assert!(!pagination.tick(Instant::now()));

    let _request = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    assert!(!pagination.tick(Instant::now() + Duration::from_secs(60)));
    assert!(pagination.is_loading());
}

#[test]
fn dismiss_error_returns_to_idle() {
    let mut pagination = Pagination::default();
    let request = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(
        err_response(&request, FetchError::Transport("x".to_string())),
        Instant::now(),
    );

    assert!(pagination.dismiss_error());
    assert_eq!(pagination.fetch_state(), &FetchState::Idle);
    assert!(!pagination.dismiss_error());
}

#[test]
fn retry_from_error_requests_same_page() {
    let mut pagination = Pagination::default();
    let now = Instant::now();
    let first = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(ok_response(&first, 12), now);
    let failed = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(
        err_response(&failed, FetchError::Transport("x".to_string())),
        now,
    );

    let retry = pagination
        .load_next_page(CountryQuery::list_all())
        .expect("retry allowed from error state");

    assert_eq!(retry.page(), 2);
    assert!(pagination.is_loading());
    assert_eq!(pagination.error_message(), None);
}

// ===== reset_and_reload =====

#[test]
fn reset_and_reload_replaces_list_with_first_page() {
    let mut pagination = Pagination::default();
    let now = Instant::now();
    let first = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(ok_response(&first, 12), now);
    let second = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(ok_response(&second, 12), now);
    assert_eq!(pagination.items().len(), 24);

    let search = CountryQuery {
        endpoint: Endpoint::Search,
        name: Some("fra".to_string()),
        regions: Vec::new(),
        timezone: None,
    };
    let reload = pagination
        .reset_and_reload(search.clone())
        .expect("reload issues page 1");

    assert_eq!(reload.page(), 1);
    assert_eq!(reload.query, search);
    assert!(pagination.items().is_empty());
    assert_eq!(pagination.generation(), 1);

    pagination.complete(ok_response(&reload, 2), now);
    assert_eq!(pagination.items().len(), 2);
    assert_eq!(pagination.items()[0].key(), "p1-0");
    assert_eq!(pagination.page(), 2);
}

#[test]
fn reset_restores_has_more_after_exhaustion() {
    let mut pagination = Pagination::default();
    let request = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(ok_response(&request, 1), Instant::now());
    assert!(!pagination.has_more());

    let reload = pagination.reset_and_reload(CountryQuery::list_all());

    assert!(reload.is_some());
    assert!(pagination.has_more());
    assert_eq!(pagination.page(), 1);
}

#[test]
fn reset_clears_error_notice() {
    let mut pagination = Pagination::default();
    let request = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(
        err_response(&request, FetchError::Transport("x".to_string())),
        Instant::now(),
    );

    pagination.reset();

    assert_eq!(pagination.fetch_state(), &FetchState::Idle);
}

// ===== Epoch guard =====

#[test]
fn reset_mid_flight_discards_stale_page_and_reissues() {
    let mut pagination = Pagination::default();
    let now = Instant::now();
    let first = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(ok_response(&first, 12), now);

    let stale = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    let search = CountryQuery {
        endpoint: Endpoint::Search,
        name: Some("ger".to_string()),
        regions: Vec::new(),
        timezone: None,
    };

    assert!(
        pagination.reset_and_reload(search.clone()).is_none(),
        "Reload must wait for the in-flight request"
    );
    assert!(pagination.is_loading());
    assert!(pagination.items().is_empty());

    let completion = pagination.complete(ok_response(&stale, 12), now);

    let reissued = match completion {
        Completion::Stale {
            reissued: Some(request),
        } => request,
        other => panic!("Expected Stale with reissued request, got {:?}", other),
    };
    assert!(pagination.items().is_empty(), "Stale page must not be appended");
    assert_eq!(reissued.page(), 1);
    assert_eq!(reissued.query, search);
    assert_eq!(reissued.ticket.generation, pagination.generation());
    assert!(pagination.is_loading());

    pagination.complete(ok_response(&reissued, 4), now);
    assert_eq!(pagination.items().len(), 4);
    assert!(!pagination.has_more());
}

#[test]
fn stale_failure_does_not_enter_error_state() {
    let mut pagination = Pagination::default();
    let stale = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.reset();

    let completion = pagination.complete(
        err_response(&stale, FetchError::Transport("x".to_string())),
        Instant::now(),
    );

    assert_eq!(completion, Completion::Stale { reissued: None });
    assert_eq!(pagination.fetch_state(), &FetchState::Idle);
}

#[test]
fn latest_query_wins_when_reset_twice_mid_flight() {
    let mut pagination = Pagination::default();
    let stale = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    let first_search = CountryQuery {
        endpoint: Endpoint::Search,
        name: Some("a".to_string()),
        regions: Vec::new(),
        timezone: None,
    };
    let second_search = CountryQuery {
        name: Some("ab".to_string()),
        ..first_search.clone()
    };

    assert!(pagination.reset_and_reload(first_search).is_none());
    assert!(pagination.reset_and_reload(second_search.clone()).is_none());

    match pagination.complete(ok_response(&stale, 12), Instant::now()) {
        Completion::Stale {
            reissued: Some(request),
        } => assert_eq!(request.query, second_search),
        other => panic!("Expected reissued request, got {:?}", other),
    }
}

#[test]
fn unknown_ticket_is_ignored_without_touching_state() {
    let mut pagination = Pagination::default();
    let request = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    let bogus = PageResponse {
        ticket: PageTicket {
            generation: 0,
            page: 7,
        },
        result: Ok(countries("bogus", 12)),
    };

    let completion = pagination.complete(bogus, Instant::now());

    assert_eq!(completion, Completion::Stale { reissued: None });
    assert!(pagination.is_loading(), "Real request is still outstanding");
    assert!(pagination.items().is_empty());

    pagination.complete(ok_response(&request, 1), Instant::now());
    assert_eq!(pagination.items().len(), 1);
}

#[test]
fn duplicate_response_is_ignored() {
    let mut pagination = Pagination::default();
    let request = pagination.load_next_page(CountryQuery::list_all()).unwrap();
    pagination.complete(ok_response(&request, 12), Instant::now());

    let completion = pagination.complete(ok_response(&request, 12), Instant::now());

    assert_eq!(completion, Completion::Stale { reissued: None });
    assert_eq!(pagination.items().len(), 12);
    assert_eq!(pagination.page(), 2);
}

// ===== load_with =====

#[test]
fn load_with_runs_request_against_source() {
    let source = ScriptedSource::new(vec![Ok(countries("a", 12)), Ok(countries("b", 5))]);
    let mut pagination = Pagination::default();
    let now = Instant::now();

    let first = pagination.load_with(CountryQuery::list_all(), &source, now);
    let second = pagination.load_with(CountryQuery::list_all(), &source, now);
    let third = pagination.load_with(CountryQuery::list_all(), &source, now);

    assert!(matches!(first, Some(Completion::Loaded { count: 12, .. })));
    assert!(matches!(
        second,
        Some(Completion::Loaded {
            count: 5,
            has_more: false
        })
    ));
    assert_eq!(third, None, "Exhausted list must not issue a request");

    let pages: Vec<u32> = source.requests.borrow().iter().map(PageRequest::page).collect();
    assert_eq!(pages, vec![1, 2]);
    assert_eq!(pagination.items().len(), 17);
}

#[test]
fn load_with_failure_keeps_cursor() {
    let source = ScriptedSource::new(vec![
        Ok(countries("a", 12)),
        Err(FetchError::Transport("network".to_string())),
        Ok(countries("b", 12)),
    ]);
    let mut pagination = Pagination::default();
    let now = Instant::now();

    pagination.load_with(CountryQuery::list_all(), &source, now);
    let failed = pagination.load_with(CountryQuery::list_all(), &source, now);
    assert!(matches!(failed, Some(Completion::Failed { .. })));
    assert_eq!(pagination.page(), 2);

    pagination.load_with(CountryQuery::list_all(), &source, now);

    let pages: Vec<u32> = source.requests.borrow().iter().map(PageRequest::page).collect();
    assert_eq!(pages, vec![1, 2, 2], "Failed page is retried, not skipped");
    assert_eq!(pagination.items().len(), 24);
}
