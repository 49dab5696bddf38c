//! Background fetch thread.
//!
//! The TUI thread owns all state and must never block on the network. A
//! `FetchWorker` moves a [`CountrySource`] onto its own thread and serves
//! requests from a channel in order, sending each tagged [`PageResponse`] back.
//! The pagination controller guarantees at most one request is queued at a time.

use crate::model::{FetchError, PageRequest, PageResponse};
use crate::source::CountrySource;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Handle to the fetch thread.
///
/// Dropping the handle closes the request channel; the thread exits after
/// finishing whatever request it is executing.
#[derive(Debug)]
pub struct FetchWorker {
    requests: Sender<PageRequest>,
    responses: Receiver<PageResponse>,
}

impl FetchWorker {
    /// Spawn the fetch thread for `source`.
    pub fn spawn<S>(source: S) -> Self
    where
        S: CountrySource + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<PageRequest>();
        let (response_tx, response_rx) = mpsc::channel::<PageResponse>();

        thread::Builder::new()
            .name("cbrowse-fetch".to_string())
            .spawn(move || {
                for request in request_rx {
                    debug!(
                        page = request.page(),
                        generation = request.ticket.generation,
                        "Worker fetching"
                    );
                    let result = source.fetch_page(&request);
                    if response_tx
                        .send(PageResponse::for_request(&request, result))
                        .is_err()
                    {
                        break;
                    }
                }
                debug!("Fetch worker exiting");
            })
            .map_err(|e| warn!(error = %e, "Failed to spawn fetch worker"))
            .ok();

        Self {
            requests: request_tx,
            responses: response_rx,
        }
    }

    /// Queue a request.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::WorkerGone` if the thread has exited.
    pub fn submit(&self, request: PageRequest) -> Result<(), FetchError> {
        self.requests
            .send(request)
            .map_err(|_| FetchError::WorkerGone)
    }

    /// Take a finished response without blocking.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::WorkerGone` once the thread has exited and every
    /// response it sent has been taken.
    pub fn try_recv(&self) -> Result<Option<PageResponse>, FetchError> {
        match self.responses.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(FetchError::WorkerGone),
        }
    }

    /// Wait up to `timeout` for a finished response.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<PageResponse> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Country, CountryQuery, PageTicket};
    use std::sync::{Arc, Mutex};

    struct RecordingSource {
        seen: Arc<Mutex<Vec<u32>>>,
    }

    impl CountrySource for RecordingSource {
        fn fetch_page(&self, request: &PageRequest) -> Result<Vec<Country>, FetchError> {
            self.seen.lock().unwrap().push(request.page());
            if request.page() == 2 {
                Err(FetchError::Transport("boom".to_string()))
            } else {
                Ok(vec![Country::named(format!("page-{}", request.page()))])
            }
        }
    }

    fn request(generation: u64, page: u32) -> PageRequest {
        PageRequest {
            ticket: PageTicket { generation, page },
            limit: 12,
            query: CountryQuery::list_all(),
        }
    }

    #[test]
    fn worker_answers_with_matching_ticket() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let worker = FetchWorker::spawn(RecordingSource { seen: seen.clone() });

        worker.submit(request(4, 1)).unwrap();
        let response = worker
            .recv_timeout(Duration::from_secs(5))
            .expect("worker should respond");

        assert_eq!(response.ticket, PageTicket { generation: 4, page: 1 });
        assert_eq!(response.result.unwrap()[0].key(), "page-1");
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn worker_forwards_failures() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let worker = FetchWorker::spawn(RecordingSource { seen });

        worker.submit(request(0, 2)).unwrap();
        let response = worker
            .recv_timeout(Duration::from_secs(5))
            .expect("worker should respond");

        assert!(matches!(response.result, Err(FetchError::Transport(_))));
    }

    #[test]
    fn worker_serves_requests_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let worker = FetchWorker::spawn(RecordingSource { seen: seen.clone() });

        worker.submit(request(0, 1)).unwrap();
        worker.submit(request(0, 3)).unwrap();

        let first = worker.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = worker.recv_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(first.ticket.page, 1);
        assert_eq!(second.ticket.page, 3);
        assert_eq!(*seen.lock().unwrap(), vec![1, 3]);
    }

    #[test]
    fn try_recv_is_empty_before_any_request() {
        let worker = FetchWorker::spawn(RecordingSource {
            seen: Arc::new(Mutex::new(Vec::new())),
        });
        assert!(matches!(worker.try_recv(), Ok(None)));
    }

    struct CrashingSource;

    impl CountrySource for CrashingSource {
        fn fetch_page(&self, _request: &PageRequest) -> Result<Vec<Country>, FetchError> {
            panic!("source crashed");
        }
    }

    #[test]
    fn try_recv_reports_crashed_worker() {
        let worker = FetchWorker::spawn(CrashingSource);
        worker.submit(request(0, 1)).unwrap();

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        loop {
            match worker.try_recv() {
                Err(error) => {
                    assert!(matches!(error, FetchError::WorkerGone));
                    break;
                }
                Ok(Some(response)) => panic!("unexpected response {:?}", response),
                Ok(None) => {
                    assert!(std::time::Instant::now() < deadline, "worker never exited");
                    thread::sleep(Duration::from_millis(10));
                }
            }
        }
    }
}
