//! # Async Compute Host
//!
//! Runs [`ReportAggregator`] on a dedicated thread so the caller's thread
//! never blocks on an analysis.
//!
//! Every request gets a [`RequestId`] and every reply carries it back.
//! Callers can cancel an in-flight request, or submit with
//! [`AsyncComputeHost::submit_latest`] to cancel everything older first
//! (timeline scrubbing). Cancellation is checked before and after the
//! computation; a cancelled request always answers `ANALYSIS_CANCELLED`.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::messages::{RequestId, WorkerRequest, WorkerResponse};
use crate::config::IntelConfig;
use crate::error::{IntelError, Result};
use crate::models::{PlayerPositionSample, Snapshot};
use crate::report::{AnalysisResult, ReportAggregator};

/// Shared cancellation flag for one request.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

struct Job {
    id: RequestId,
    samples: Snapshot,
    cancel: CancelToken,
}

/// Handle to the analysis worker thread. Dropping it stops the worker.
pub struct AsyncComputeHost {
    jobs: Option<Sender<Job>>,
    replies: Receiver<WorkerResponse>,
    handle: Option<JoinHandle<()>>,
    next_id: u64,
    latest: Option<RequestId>,
    in_flight: HashMap<RequestId, CancelToken>,
}

impl AsyncComputeHost {
    /// Validate `config` and start the worker thread.
    pub fn spawn(config: IntelConfig) -> Result<Self> {
        config.check()?;
        let thread_name = config.worker.thread_name.clone();
        let aggregator = ReportAggregator::new(config);
        Self::spawn_with(thread_name, move |samples| aggregator.analyze(samples))
    }

    /// Start a worker that runs `analyze` for every job.
    pub(crate) fn spawn_with<F>(thread_name: String, analyze: F) -> Result<Self>
    where
        F: Fn(&[PlayerPositionSample]) -> Result<AnalysisResult> + Send + 'static,
    {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (reply_tx, reply_rx) = mpsc::channel::<WorkerResponse>();

        let handle = thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || run_worker(analyze, job_rx, reply_tx))?;

        info!(thread = %thread_name, "analysis worker started");

        Ok(Self {
            jobs: Some(job_tx),
            replies: reply_rx,
            handle: Some(handle),
            next_id: 1,
            latest: None,
            in_flight: HashMap::new(),
        })
    }

    /// Queue a snapshot for analysis.
    pub fn submit(&mut self, samples: Snapshot) -> Result<RequestId> {
        let id = RequestId(self.next_id);
        self.enqueue(id, samples)
    }

    /// Cancel every in-flight request, then queue `samples`.
    pub fn submit_latest(&mut self, samples: Snapshot) -> Result<RequestId> {
        for (id, token) in &self.in_flight {
            debug!(request = %id, "superseded");
            token.cancel();
        }
        self.submit(samples)
    }

    /// Queue a wire request, keeping its id when it carries one.
    ///
    /// # Errors
    /// * [`IntelError::DuplicateRequest`] - the id is still in flight
    pub fn post(&mut self, request: WorkerRequest) -> Result<RequestId> {
        let WorkerRequest::AnalyzeTacticalData { data, request_id } = request;
        let id = request_id.unwrap_or(RequestId(self.next_id));
        self.enqueue(id, data)
    }

    fn enqueue(&mut self, id: RequestId, samples: Snapshot) -> Result<RequestId> {
        let jobs = self.jobs.as_ref().ok_or(IntelError::WorkerUnavailable)?;
        if self.in_flight.contains_key(&id) {
            warn!(request = %id, "duplicate request id");
            return Err(IntelError::DuplicateRequest(id.0));
        }
        let cancel = CancelToken::new();
        debug!(request = %id, samples = samples.len(), "analysis requested");

        jobs.send(Job {
            id,
            samples,
            cancel: cancel.clone(),
        })
        .map_err(|_| IntelError::WorkerUnavailable)?;

        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.latest = Some(id);
        self.in_flight.insert(id, cancel);
        Ok(id)
    }

    /// Request cancellation. Returns `false` if `id` is not in flight.
    pub fn cancel(&mut self, id: RequestId) -> bool {
        match self.in_flight.get(&id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Id of the most recent submission.
    pub fn latest(&self) -> Option<RequestId> {
        self.latest
    }

    /// Whether a reply answers the most recent submission.
    pub fn is_current(&self, response: &WorkerResponse) -> bool {
        self.latest == Some(response.request_id())
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn try_recv(&mut self) -> Result<Option<WorkerResponse>> {
        match self.replies.try_recv() {
            Ok(response) => Ok(Some(self.settle(response))),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(IntelError::WorkerUnavailable),
        }
    }

    /// Block until the next reply arrives.
    pub fn recv(&mut self) -> Result<WorkerResponse> {
        let response = self.replies.recv().map_err(|_| IntelError::WorkerUnavailable)?;
        Ok(self.settle(response))
    }

    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<WorkerResponse>> {
        match self.replies.recv_timeout(timeout) {
            Ok(response) => Ok(Some(self.settle(response))),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(IntelError::WorkerUnavailable),
        }
    }

    /// Block until the reply for the latest submission arrives, discarding
    /// replies to superseded requests.
    pub fn recv_current(&mut self) -> Result<WorkerResponse> {
        loop {
            let response = self.recv()?;
            if self.is_current(&response) {
                return Ok(response);
            }
            debug!(request = %response.request_id(), "discarding stale reply");
        }
    }

    fn settle(&mut self, response: WorkerResponse) -> WorkerResponse {
        self.in_flight.remove(&response.request_id());
        response
    }
}

impl Drop for AsyncComputeHost {
    fn drop(&mut self) {
        for token in self.in_flight.values() {
            token.cancel();
        }
        // Closing the job channel ends the worker loop.
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("analysis worker exited abnormally");
            }
        }
    }
}

fn run_worker<F>(analyze: F, jobs: Receiver<Job>, replies: Sender<WorkerResponse>)
where
    F: Fn(&[PlayerPositionSample]) -> Result<AnalysisResult>,
{
    for job in jobs {
        let response = run_job(job.id, &job.samples, Some(&job.cancel), &analyze);
        if replies.send(response).is_err() {
            break;
        }
    }
    debug!("analysis worker stopped");
}

/// Run one analysis and wrap the outcome in a reply.
///
/// Panics inside `analyze` are caught and reported as `ANALYSIS_ERROR`;
/// the worker keeps serving.
pub fn run_job<F>(
    id: RequestId,
    samples: &[PlayerPositionSample],
    cancel: Option<&CancelToken>,
    analyze: F,
) -> WorkerResponse
where
    F: FnOnce(&[PlayerPositionSample]) -> Result<AnalysisResult>,
{
    let cancelled = || cancel.is_some_and(CancelToken::is_cancelled);

    if cancelled() {
        debug!(request = %id, "cancelled before start");
        return WorkerResponse::AnalysisCancelled { request_id: id };
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| analyze(samples)));

    if cancelled() {
        debug!(request = %id, "cancelled during analysis");
        return WorkerResponse::AnalysisCancelled { request_id: id };
    }

    match outcome {
        Ok(Ok(result)) => WorkerResponse::AnalysisComplete {
            result: Box::new(result),
            request_id: id,
        },
        Ok(Err(err)) => {
            warn!(request = %id, error = %err, "analysis failed");
            WorkerResponse::AnalysisError {
                error: err.to_string(),
                request_id: id,
            }
        }
        Err(payload) => {
            let err = IntelError::ComputationPanicked(panic_message(payload.as_ref()));
            warn!(request = %id, error = %err, "analysis panicked");
            WorkerResponse::AnalysisError {
                error: err.to_string(),
                request_id: id,
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::player;
    use crate::models::Side;
    use std::sync::Mutex;

    const WAIT: Duration = Duration::from_secs(10);

    /// Host whose analyses block until the returned sender is dropped.
    fn gated_host() -> (AsyncComputeHost, Sender<()>) {
        let (release, gate) = mpsc::channel::<()>();
        let gate = Mutex::new(gate);
        let aggregator = ReportAggregator::default();
        let host = AsyncComputeHost::spawn_with("ti-test-worker".to_string(), move |samples| {
            let _ = gate.lock().map(|rx| rx.recv());
            aggregator.analyze(samples)
        })
        .unwrap();
        (host, release)
    }

    fn next_reply(host: &mut AsyncComputeHost) -> WorkerResponse {
        host.recv_timeout(WAIT).unwrap().expect("reply")
    }

    fn snapshot(n: usize) -> Snapshot {
        (0..n)
            .map(|i| player(if i % 2 == 0 { Side::T } else { Side::Ct }, 100.0, i as f64 * 100.0, 0.0))
            .collect()
    }

    #[test]
    fn test_round_trip_preserves_sample_count() {
        let mut host = AsyncComputeHost::spawn(IntelConfig::default()).unwrap();
        let id = host.submit(snapshot(10)).unwrap();
        let response = host.recv_timeout(WAIT).unwrap().expect("reply");
        assert_eq!(response.request_id(), id);
        assert_eq!(response.result().unwrap().data_points, 10);
        assert_eq!(host.in_flight(), 0);
    }

    #[test]
    fn test_error_is_non_fatal() {
        let mut config = IntelConfig::default();
        config.worker.max_snapshot_samples = 3;
        let mut host = AsyncComputeHost::spawn(config).unwrap();

        let bad = host.submit(snapshot(4)).unwrap();
        let response = host.recv().unwrap();
        assert_eq!(response.request_id(), bad);
        match response {
            WorkerResponse::AnalysisError { error, .. } => assert!(error.contains("too large")),
            other => panic!("expected error, got {:?}", other),
        }

        host.submit(snapshot(2)).unwrap();
        assert!(host.recv().unwrap().result().is_some());
    }

    #[test]
    fn test_submit_latest_supersedes() {
        let mut host = AsyncComputeHost::spawn(IntelConfig::default()).unwrap();
        let first = host.submit(snapshot(6)).unwrap();
        let second = host.submit_latest(snapshot(8)).unwrap();
        assert!(second > first);

        let current = host.recv_current().unwrap();
        assert_eq!(current.request_id(), second);
        assert_eq!(current.result().unwrap().data_points, 8);
    }

    #[test]
    fn test_post_keeps_caller_id() {
        let mut host = AsyncComputeHost::spawn(IntelConfig::default()).unwrap();
        let id = host
            .post(WorkerRequest::AnalyzeTacticalData {
                data: snapshot(3),
                request_id: Some(RequestId(41)),
            })
            .unwrap();
        assert_eq!(id, RequestId(41));
        assert_eq!(host.submit(snapshot(1)).unwrap(), RequestId(42));
    }

    #[test]
    fn test_cancel_unknown_id() {
        let mut host = AsyncComputeHost::spawn(IntelConfig::default()).unwrap();
        assert!(!host.cancel(RequestId(999)));
    }

    #[test]
    fn test_run_job_cancelled_before_start() {
        let token = CancelToken::new();
        token.cancel();
        let response = run_job(RequestId(1), &[], Some(&token), |_| unreachable!());
        assert_eq!(response, WorkerResponse::AnalysisCancelled { request_id: RequestId(1) });
    }

    #[test]
    fn test_run_job_catches_panic() {
        let response = run_job(RequestId(2), &[], None, |_| panic!("degenerate geometry"));
        match response {
            WorkerResponse::AnalysisError { error, request_id } => {
                assert_eq!(request_id, RequestId(2));
                assert!(error.contains("degenerate geometry"));
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_cancel_queued_request() {
        let (mut host, release) = gated_host();
        let running = host.submit(snapshot(4)).unwrap();
        let queued = host.submit(snapshot(6)).unwrap();
        assert!(host.cancel(queued));
        drop(release);

        let first = next_reply(&mut host);
        assert_eq!(first.request_id(), running);
        assert_eq!(first.result().unwrap().data_points, 4);
        assert_eq!(
            next_reply(&mut host),
            WorkerResponse::AnalysisCancelled { request_id: queued }
        );
        assert_eq!(host.in_flight(), 0);
        assert!(host.try_recv().unwrap().is_none());
    }

    #[test]
    fn test_submit_latest_answers_every_request_once() {
        let (mut host, release) = gated_host();
        let running = host.submit(snapshot(4)).unwrap();
        let queued = host.submit(snapshot(6)).unwrap();
        let latest = host.submit_latest(snapshot(8)).unwrap();
        assert_eq!(host.in_flight(), 3);
        drop(release);

        assert_eq!(
            next_reply(&mut host),
            WorkerResponse::AnalysisCancelled { request_id: running }
        );
        assert_eq!(
            next_reply(&mut host),
            WorkerResponse::AnalysisCancelled { request_id: queued }
        );
        let current = next_reply(&mut host);
        assert_eq!(current.request_id(), latest);
        assert_eq!(current.result().unwrap().data_points, 8);

        assert_eq!(host.in_flight(), 0);
        assert!(host.try_recv().unwrap().is_none());
    }

    #[test]
    fn test_duplicate_in_flight_id_rejected() {
        let (mut host, release) = gated_host();
        let request = |n| WorkerRequest::AnalyzeTacticalData {
            data: snapshot(n),
            request_id: Some(RequestId(5)),
        };

        host.post(request(2)).unwrap();
        let err = host.post(request(3)).unwrap_err();
        assert!(matches!(err, IntelError::DuplicateRequest(5)));
        assert_eq!(host.in_flight(), 1);
        drop(release);

        let reply = next_reply(&mut host);
        assert_eq!(reply.request_id(), RequestId(5));
        assert_eq!(reply.result().unwrap().data_points, 2);
        assert_eq!(host.in_flight(), 0);

        // Settled ids can be reused and stay cancellable until answered.
        host.post(request(3)).unwrap();
        assert!(host.cancel(RequestId(5)));
        assert_eq!(next_reply(&mut host).request_id(), RequestId(5));
        assert_eq!(host.in_flight(), 0);
    }

    #[test]
    fn test_max_request_id_does_not_overflow() {
        let mut host = AsyncComputeHost::spawn(IntelConfig::default()).unwrap();
        let id = host
            .post(WorkerRequest::AnalyzeTacticalData {
                data: Vec::new(),
                request_id: Some(RequestId(u64::MAX)),
            })
            .unwrap();
        assert_eq!(id, RequestId(u64::MAX));

        let reply = next_reply(&mut host);
        assert_eq!(reply.request_id(), id);
        assert_eq!(reply.result().unwrap().data_points, 0);
    }
}
