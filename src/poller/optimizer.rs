//! On-demand network optimization requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::client::MetricsApi;
use crate::state::{NetworkReading, OptimizerState};

/// Message surfaced to the user when an optimization request fails.
const OPTIMIZE_FAILED: &str = "Failed to optimize the network.";

/// Issues one-shot optimization requests and owns the resulting reading.
///
/// `run()` is guarded by an in-flight flag: invoking it while a request is
/// outstanding is a no-op rather than queueing a second request. The flag is
/// released when the request settles, success or failure.
#[derive(Clone)]
pub struct Optimizer {
    api: Arc<dyn MetricsApi>,
    state: Arc<Mutex<OptimizerState>>,
    running: Arc<AtomicBool>,
}

impl Optimizer {
    pub fn new(api: Arc<dyn MetricsApi>) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(OptimizerState::default())),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether an optimization request is currently outstanding.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// An immutable copy of the latest reading and error.
    pub fn snapshot(&self) -> OptimizerState {
        self.state.lock().unwrap().clone()
    }

    /// Runs one optimization request.
    ///
    /// Suggestions and the error message are cleared up front; numeric
    /// readings from an earlier successful run are deliberately left in
    /// place until a new response replaces them, and survive a failed run.
    pub async fn run(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            debug!("optimization already in flight, ignoring request");
            return;
        }

        {
            let mut state = self.state.lock().unwrap();
            state.reading.suggestions.clear();
            state.error = None;
        }

        let result = self.api.optimize().await;

        {
            let mut state = self.state.lock().unwrap();
            match result {
                Ok(response) => {
                    state.reading = NetworkReading::from(response);
                }
                Err(error) => {
                    warn!(%error, "network optimization failed");
                    state.error = Some(OPTIMIZE_FAILED.to_string());
                }
            }
        }

        self.running.store(false, Ordering::SeqCst);
    }
}
