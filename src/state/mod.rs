//! Engine-owned application state.
//!
//! The polling controller and the optimization requester are the only
//! writers; the rendering surface reads this state under a lock and never
//! holds a live handle to internal storage.

mod series;
mod status;

pub use series::{BoundedSeries, Sample, SummaryTracker};
pub use status::{classify, NetworkStatus};

use chrono::{DateTime, Utc};

use crate::client::{OptimizeResponse, StatsResponse};

/// Lifecycle phase of the recurring measurement poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// Not started.
    Idle,
    /// Timer armed, no request in flight.
    Scheduled,
    /// Measurement request in flight.
    Fetching,
    /// Terminal: timer cancelled.
    Stopped,
}

/// Windowed series and summary statistics for the polled signals.
#[derive(Debug, Clone)]
pub struct NetworkState {
    pub phase: PollPhase,
    /// Download rate window, Mbps.
    pub download: BoundedSeries,
    /// Upload rate window, Mbps.
    pub upload: BoundedSeries,
    /// Round-trip delay window, ms.
    pub ping: BoundedSeries,
    pub download_summary: SummaryTracker,
    pub ping_summary: SummaryTracker,
    /// Most recent poll failure, cleared by the next successful poll.
    pub last_error: Option<String>,
    pub last_update: Option<DateTime<Utc>>,
}

impl NetworkState {
    pub fn new(window: usize) -> Self {
        Self {
            phase: PollPhase::Idle,
            download: BoundedSeries::new(window),
            upload: BoundedSeries::new(window),
            ping: BoundedSeries::new(window),
            download_summary: SummaryTracker::new(),
            ping_summary: SummaryTracker::new(),
            last_error: None,
            last_update: None,
        }
    }

    pub fn is_polling(&self) -> bool {
        matches!(self.phase, PollPhase::Scheduled | PollPhase::Fetching)
    }

    /// Current upload rate, or zero before the first successful poll.
    pub fn upload_current(&self) -> f64 {
        self.upload.latest().map(|s| s.value).unwrap_or(0.0)
    }

    /// Current round-trip delay; `None` until a poll has delivered one.
    pub fn ping_current(&self) -> Option<f64> {
        self.ping.latest().map(|s| s.value)
    }

    /// Folds one successful measurement into the windows and summaries.
    ///
    /// All three signals are stamped with the same instant. Absent scalars
    /// are recorded as zero, per the endpoint's convention.
    pub(crate) fn apply_stats(&mut self, stats: &StatsResponse, now: DateTime<Utc>) {
        self.download
            .append(Sample::new(now, stats.download_speed.unwrap_or(0.0)));
        self.upload
            .append(Sample::new(now, stats.upload_speed.unwrap_or(0.0)));
        self.ping.append(Sample::new(now, stats.ping.unwrap_or(0.0)));

        self.download_summary.observe(stats.download_speed);
        self.ping_summary.observe(stats.ping);

        self.last_error = None;
        self.last_update = Some(now);
    }

    /// Records a failed poll without touching any series or summary.
    pub(crate) fn record_error(&mut self, message: String) {
        self.last_error = Some(message);
    }
}

/// Result of the most recent optimization run.
///
/// Fully replaced on each successful run, never merged.
#[derive(Debug, Clone, Default)]
pub struct NetworkReading {
    pub efficiency: Option<f64>,
    pub stability: Option<String>,
    pub signal: Option<String>,
    pub suggestions: Vec<String>,
}

impl NetworkReading {
    pub fn status(&self) -> NetworkStatus {
        classify(self.efficiency)
    }
}

impl From<OptimizeResponse> for NetworkReading {
    fn from(resp: OptimizeResponse) -> Self {
        Self {
            efficiency: resp.efficiency,
            stability: resp.stability,
            signal: resp.signal,
            suggestions: resp.suggestions,
        }
    }
}

/// State owned by the optimization requester.
#[derive(Debug, Clone, Default)]
pub struct OptimizerState {
    pub reading: NetworkReading,
    pub error: Option<String>,
}
