//! Polling components that feed the engine state.
//!
//! This module owns the recurring measurement poll and the on-demand
//! optimization request. Both take an injected [`MetricsApi`] collaborator
//! and are the sole writers of the state they own:
//!
//! - [`StatsPoller`] ticks on a fixed period, decodes each measurement into
//!   samples, and folds them into the bounded series and summaries.
//! - [`Optimizer`] issues a one-shot optimization request guarded by an
//!   in-flight flag.

pub mod optimizer;

pub use optimizer::Optimizer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use crate::client::MetricsApi;
use crate::state::{NetworkState, PollPhase};

/// Default period between measurement requests.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Default number of samples retained per signal.
pub const DEFAULT_WINDOW: usize = 20;

/// State shared between the controller handle and its polling task.
struct PollerShared {
    api: Arc<dyn MetricsApi>,
    state: Mutex<NetworkState>,
    /// Cleared by `stop()`; a fetch that settles afterwards is discarded.
    active: AtomicBool,
    /// In-flight guard: a tick that fires mid-fetch is skipped, not queued.
    in_flight: AtomicBool,
}

impl PollerShared {
    /// One poll tick: fetch, decode, fold into state.
    ///
    /// All state mutation happens synchronously under one lock after the
    /// fetch settles, so readers never observe a partial update. A failed
    /// fetch records `last_error` and touches nothing else.
    async fn poll_once(&self) {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("previous fetch still in flight, skipping tick");
            return;
        }

        {
            let mut state = self.state.lock().unwrap();
            if state.phase == PollPhase::Stopped {
                self.in_flight.store(false, Ordering::SeqCst);
                return;
            }
            state.phase = PollPhase::Fetching;
        }

        let result = self.api.fetch_stats().await;

        {
            let mut state = self.state.lock().unwrap();
            if !self.active.load(Ordering::SeqCst) {
                // Stopped while the request was in flight; discard the result.
                self.in_flight.store(false, Ordering::SeqCst);
                return;
            }

            match result {
                Ok(stats) => {
                    state.apply_stats(&stats, Utc::now());
                }
                Err(error) => {
                    warn!(%error, "network stats poll failed");
                    state.record_error(error.to_string());
                }
            }
            state.phase = PollPhase::Scheduled;
        }

        self.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Controller for the recurring measurement poll.
///
/// Owns the bounded series and summary trackers for the polled signals and
/// the lifecycle of the timer task. Readers take [`snapshot`]s; only the
/// polling task mutates the series.
///
/// [`snapshot`]: StatsPoller::snapshot
pub struct StatsPoller {
    shared: Arc<PollerShared>,
    poll_interval: Duration,
    handle: Option<JoinHandle<()>>,
}

impl StatsPoller {
    pub fn new(api: Arc<dyn MetricsApi>, window: usize, poll_interval: Duration) -> Self {
        Self {
            shared: Arc::new(PollerShared {
                api,
                state: Mutex::new(NetworkState::new(window)),
                active: AtomicBool::new(true),
                in_flight: AtomicBool::new(false),
            }),
            poll_interval,
            handle: None,
        }
    }

    /// Arms the recurring poll.
    ///
    /// No-op unless the controller is idle: calling `start` while already
    /// polling never arms a second timer, and a stopped controller stays
    /// stopped.
    pub fn start(&mut self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            if state.phase != PollPhase::Idle {
                return;
            }
            state.phase = PollPhase::Scheduled;
        }

        let shared = Arc::clone(&self.shared);
        let period = self.poll_interval;
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if !shared.active.load(Ordering::SeqCst) {
                    break;
                }
                shared.poll_once().await;
            }
        }));
        debug!(period_ms = self.poll_interval.as_millis() as u64, "measurement poll started");
    }

    /// Cancels the timer. Terminal and idempotent.
    ///
    /// An in-flight fetch is not aborted, but its result is discarded when
    /// it settles.
    pub fn stop(&mut self) {
        self.shared.active.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        let mut state = self.shared.state.lock().unwrap();
        if state.phase != PollPhase::Stopped {
            state.phase = PollPhase::Stopped;
            debug!("measurement poll stopped");
        }
    }

    /// Whether the recurring poll is currently armed.
    pub fn is_polling(&self) -> bool {
        self.shared.state.lock().unwrap().is_polling()
    }

    /// An immutable copy of the current engine state.
    pub fn snapshot(&self) -> NetworkState {
        self.shared.state.lock().unwrap().clone()
    }
}

impl Drop for StatsPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ApiError, OptimizeResponse, StatsResponse};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    fn stats(download: f64, upload: f64, ping: f64) -> StatsResponse {
        StatsResponse {
            download_speed: Some(download),
            upload_speed: Some(upload),
            ping: Some(ping),
        }
    }

    /// Replays a fixed sequence of responses, then errors.
    struct ScriptedApi {
        responses: Mutex<VecDeque<Result<StatsResponse, ApiError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedApi {
        fn new(responses: Vec<Result<StatsResponse, ApiError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetricsApi for ScriptedApi {
        async fn fetch_stats(&self) -> Result<StatsResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ApiError::Status(StatusCode::SERVICE_UNAVAILABLE)))
        }

        async fn optimize(&self) -> Result<OptimizeResponse, ApiError> {
            Err(ApiError::Status(StatusCode::NOT_IMPLEMENTED))
        }
    }

    /// Blocks each fetch until released, for overlap and cancellation tests.
    struct GatedApi {
        gate: Notify,
        calls: AtomicUsize,
    }

    impl GatedApi {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                gate: Notify::new(),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetricsApi for GatedApi {
        async fn fetch_stats(&self) -> Result<StatsResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(stats(50.0, 10.0, 20.0))
        }

        async fn optimize(&self) -> Result<OptimizeResponse, ApiError> {
            Err(ApiError::Status(StatusCode::NOT_IMPLEMENTED))
        }
    }

    fn poller_for(api: Arc<dyn MetricsApi>) -> StatsPoller {
        let poller = StatsPoller::new(api, DEFAULT_WINDOW, DEFAULT_POLL_INTERVAL);
        // Arm the phase machine without starting the real timer; tests drive
        // ticks by calling poll_once directly.
        poller.shared.state.lock().unwrap().phase = PollPhase::Scheduled;
        poller
    }

    #[tokio::test]
    async fn failed_tick_is_isolated_and_self_heals() {
        let api = ScriptedApi::new(vec![
            Ok(stats(50.0, 10.0, 20.0)),
            Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
            Ok(stats(60.0, 12.0, 18.0)),
        ]);
        let poller = poller_for(api.clone());

        poller.shared.poll_once().await;
        let snap = poller.snapshot();
        assert_eq!(snap.download.values(), vec![50.0]);
        assert_eq!(snap.last_error, None);

        poller.shared.poll_once().await;
        let snap = poller.snapshot();
        // The failed tick left every series untouched.
        assert_eq!(snap.download.values(), vec![50.0]);
        assert_eq!(snap.upload.values(), vec![10.0]);
        assert_eq!(snap.ping.values(), vec![20.0]);
        assert!(snap.last_error.is_some());
        assert_eq!(snap.phase, PollPhase::Scheduled);

        poller.shared.poll_once().await;
        let snap = poller.snapshot();
        assert_eq!(snap.download.values(), vec![50.0, 60.0]);
        assert_eq!(snap.last_error, None);
        assert_eq!(snap.download_summary.running_max(), 60.0);
        assert_eq!(snap.ping_summary.current(), 18.0);
        assert_eq!(api.calls(), 3);
    }

    #[tokio::test]
    async fn absent_fields_are_recorded_as_zero() {
        let api = ScriptedApi::new(vec![Ok(StatsResponse {
            download_speed: Some(42.0),
            upload_speed: None,
            ping: None,
        })]);
        let poller = poller_for(api);

        poller.shared.poll_once().await;
        let snap = poller.snapshot();
        assert_eq!(snap.upload.values(), vec![0.0]);
        assert_eq!(snap.ping.values(), vec![0.0]);
        assert_eq!(snap.ping_summary.current(), 0.0);
        assert_eq!(snap.download_summary.current(), 42.0);
    }

    #[tokio::test]
    async fn overlapping_tick_is_skipped_not_queued() {
        let api = GatedApi::new();
        let poller = poller_for(api.clone());

        let shared = Arc::clone(&poller.shared);
        let in_flight = tokio::spawn(async move { shared.poll_once().await });
        while api.calls() == 0 {
            tokio::task::yield_now().await;
        }

        // A second tick while the first fetch is pending returns immediately
        // without issuing a request.
        poller.shared.poll_once().await;
        assert_eq!(api.calls(), 1);
        assert!(poller.snapshot().download.is_empty());

        api.gate.notify_one();
        in_flight.await.unwrap();
        assert_eq!(api.calls(), 1);
        assert_eq!(poller.snapshot().download.values(), vec![50.0]);
    }

    #[tokio::test]
    async fn result_arriving_after_stop_is_discarded() {
        let api = GatedApi::new();
        let mut poller = poller_for(api.clone());

        let shared = Arc::clone(&poller.shared);
        let pending = tokio::spawn(async move { shared.poll_once().await });
        while api.calls() == 0 {
            tokio::task::yield_now().await;
        }

        poller.stop();
        api.gate.notify_one();
        pending.await.unwrap();

        let snap = poller.snapshot();
        assert!(snap.download.is_empty());
        assert_eq!(snap.phase, PollPhase::Stopped);
    }

    #[tokio::test]
    async fn start_and_stop_are_idempotent() {
        let api = ScriptedApi::new(vec![]);
        let mut poller = StatsPoller::new(api, DEFAULT_WINDOW, DEFAULT_POLL_INTERVAL);
        assert!(!poller.is_polling());

        poller.start();
        assert!(poller.is_polling());

        // Second start never arms a second timer.
        poller.start();
        assert!(poller.is_polling());

        poller.stop();
        assert!(!poller.is_polling());
        assert_eq!(poller.snapshot().phase, PollPhase::Stopped);

        poller.stop();
        // A stopped controller stays stopped.
        poller.start();
        assert_eq!(poller.snapshot().phase, PollPhase::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn polling_loop_ticks_on_the_period_until_stopped() {
        let api = ScriptedApi::new(
            (0..16).map(|i| Ok(stats(40.0 + i as f64, 10.0, 20.0))).collect(),
        );
        let mut poller = StatsPoller::new(api.clone(), DEFAULT_WINDOW, DEFAULT_POLL_INTERVAL);

        poller.start();
        tokio::time::sleep(Duration::from_millis(9100)).await;
        assert!(api.calls() >= 3);

        poller.stop();
        let calls_at_stop = api.calls();
        tokio::time::sleep(Duration::from_millis(30_000)).await;
        assert_eq!(api.calls(), calls_at_stop);
    }
}
