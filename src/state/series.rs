//! Time-series primitives for measured signals.
//!
//! Each polled signal keeps a fixed-capacity window of recent samples for
//! charting plus a summary fold (current value, running maximum) that is
//! independent of window eviction.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// A single timestamped observation of one signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// An ordered, fixed-capacity buffer of samples.
///
/// Appending past capacity evicts from the front, so the buffer always holds
/// the most recent samples in chronological order. Capacity is fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct BoundedSeries {
    capacity: usize,
    items: VecDeque<Sample>,
}

impl BoundedSeries {
    /// Creates an empty series. `capacity` must be non-zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "series capacity must be non-zero");
        Self {
            capacity,
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends a sample, evicting the oldest entries if the window is full.
    pub fn append(&mut self, sample: Sample) {
        self.items.push_back(sample);
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }

    /// Returns the retained samples, oldest first, by value.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.items.iter().copied().collect()
    }

    /// Returns just the values, oldest first, for chart rendering.
    pub fn values(&self) -> Vec<f64> {
        self.items.iter().map(|s| s.value).collect()
    }

    /// The most recently appended sample, if any.
    pub fn latest(&self) -> Option<Sample> {
        self.items.back().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Current value and running maximum for a stream of observations.
///
/// The running maximum covers every value ever observed, including ones the
/// bounded window has since evicted. Absent measurements are observed as
/// `0.0`, matching the endpoint's convention of reporting missing readings
/// as zero rather than "no data".
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryTracker {
    current: f64,
    running_max: f64,
}

impl SummaryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an observation, folding it into the summary.
    pub fn observe(&mut self, value: Option<f64>) {
        let value = value.unwrap_or(0.0);
        self.current = value;
        self.running_max = self.running_max.max(value);
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn running_max(&self) -> f64 {
        self.running_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(value: f64) -> Sample {
        Sample::new(Utc::now(), value)
    }

    #[test]
    fn series_keeps_insertion_order_below_capacity() {
        let mut series = BoundedSeries::new(20);
        for v in 0..5 {
            series.append(sample(v as f64));
        }

        assert_eq!(series.len(), 5);
        assert_eq!(series.values(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn series_evicts_oldest_beyond_capacity() {
        let mut series = BoundedSeries::new(20);
        for v in 0..25 {
            series.append(sample(v as f64));
            assert!(series.len() <= 20);
        }

        let expected: Vec<f64> = (5..25).map(|v| v as f64).collect();
        assert_eq!(series.values(), expected);
        assert_eq!(series.latest().unwrap().value, 24.0);
    }

    #[test]
    fn snapshot_is_detached_from_internal_storage() {
        let mut series = BoundedSeries::new(3);
        series.append(sample(1.0));

        let snap = series.snapshot();
        series.append(sample(2.0));

        assert_eq!(snap.len(), 1);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn tracker_follows_current_and_running_max() {
        let mut tracker = SummaryTracker::new();

        tracker.observe(Some(50.0));
        assert_eq!(tracker.current(), 50.0);
        assert_eq!(tracker.running_max(), 50.0);

        tracker.observe(Some(30.0));
        assert_eq!(tracker.current(), 30.0);
        assert_eq!(tracker.running_max(), 50.0);

        tracker.observe(Some(80.0));
        assert_eq!(tracker.current(), 80.0);
        assert_eq!(tracker.running_max(), 80.0);
    }

    #[test]
    fn tracker_records_absent_observation_as_zero() {
        // Pinned behavior: an absent measurement observes 0.0 rather than
        // leaving the previous value in place. The skip-update alternative
        // was considered and rejected; see DESIGN.md.
        let mut tracker = SummaryTracker::new();
        tracker.observe(Some(42.0));
        tracker.observe(None);

        assert_eq!(tracker.current(), 0.0);
        assert_eq!(tracker.running_max(), 42.0);
    }

    #[test]
    fn running_max_survives_window_eviction() {
        let mut series = BoundedSeries::new(3);
        let mut tracker = SummaryTracker::new();

        for v in [90.0, 10.0, 20.0, 30.0, 40.0] {
            series.append(sample(v));
            tracker.observe(Some(v));
        }

        // 90.0 has been evicted from the window but not from the summary.
        assert_eq!(series.values(), vec![20.0, 30.0, 40.0]);
        assert_eq!(tracker.running_max(), 90.0);
    }
}
