//! Background covering generation.
//!
//! Big coverings take a moment, so interactive hosts generate them on a
//! worker thread. Requests are numbered; when a newer request has been made
//! the older result is thrown away on arrival rather than cancelled.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::covering::{Covering, CoveringRequest};
use crate::error::Result;

/// Result from one background generation.
struct Finished {
    ticket: u64,
    result: Result<Covering>,
}

pub struct CoveringWorker {
    tx: Sender<Finished>,
    rx: Receiver<Finished>,
    /// Ticket of the most recent request.
    latest: u64,
    pending: bool,
}

impl Default for CoveringWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl CoveringWorker {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx, latest: 0, pending: false }
    }

    /// Start generating; supersedes any request still in flight.
    pub fn request(&mut self, request: CoveringRequest) -> u64 {
        self.latest += 1;
        self.pending = true;
        let ticket = self.latest;
        let tx = self.tx.clone();

        debug!("covering request #{ticket}: {request:?}");
        thread::spawn(move || {
            let result = request.generate();
            // The worker may be gone by now; nobody is waiting then.
            let _ = tx.send(Finished { ticket, result });
        });
        ticket
    }

    /// Non-blocking: the latest request's result if it has arrived.
    pub fn poll(&mut self) -> Option<Result<Covering>> {
        while let Ok(finished) = self.rx.try_recv() {
            if let Some(result) = self.accept(finished) {
                return Some(result);
            }
        }
        None
    }

    /// Block until the latest request finishes or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> Option<Result<Covering>> {
        if !self.pending {
            return None;
        }
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(left) {
                Ok(finished) => {
                    if let Some(result) = self.accept(finished) {
                        return Some(result);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    /// Is the latest request still running?
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    fn accept(&mut self, finished: Finished) -> Option<Result<Covering>> {
        if finished.ticket != self.latest {
            trace!("dropping stale covering #{} (latest #{})", finished.ticket, self.latest);
            return None;
        }
        self.pending = false;
        Some(finished.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::covering::CoveringType;

    const TIMEOUT: Duration = Duration::from_secs(30);

    #[test]
    fn delivers_the_result() {
        let mut worker = CoveringWorker::new();
        worker.request(CoveringRequest::new(300.0, 200.0, 12, CoveringType::Shards).with_seed(Some(1)));
        assert!(worker.is_pending());
        let covering = worker.wait(TIMEOUT).unwrap().unwrap();
        assert_eq!(covering.len(), 12);
        assert!(!worker.is_pending());
    }

    #[test]
    fn superseded_results_are_dropped() {
        let mut worker = CoveringWorker::new();
        worker.request(CoveringRequest::new(300.0, 200.0, 5, CoveringType::Rectangles));
        worker.request(CoveringRequest::new(300.0, 200.0, 7, CoveringType::Rectangles));
        let covering = worker.wait(TIMEOUT).unwrap().unwrap();
        assert_eq!(covering.len(), 7);
        // The first result is never handed out, even if it arrives later.
        std::thread::sleep(Duration::from_millis(50));
        assert!(worker.poll().is_none());
    }

    #[test]
    fn errors_come_through() {
        let mut worker = CoveringWorker::new();
        worker.request(CoveringRequest::new(4.0, 4.0, 100, CoveringType::Triangles));
        let result = worker.wait(TIMEOUT).unwrap();
        assert!(matches!(result, Err(crate::Error::TooManyTiles { .. })));
    }

    #[test]
    fn wait_without_request_returns_immediately() {
        let mut worker = CoveringWorker::new();
        assert!(worker.wait(TIMEOUT).is_none());
    }
}
