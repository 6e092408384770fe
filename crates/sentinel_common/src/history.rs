//! History - Bounded rolling windows feeding the chart panels
//!
//! Drop-oldest FIFO over a `VecDeque`. The window cap is fixed at
//! construction; append never fails and never grows past the cap.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default window size for the chart panels
pub const DEFAULT_HISTORY_CAP: usize = 20;

/// One charted sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Wall-clock time of the sample, epoch milliseconds
    pub time: i64,

    /// Sampled value
    pub value: f64,
}

impl HistoryPoint {
    /// Point stamped with the current wall-clock time
    pub fn now(value: f64) -> Self {
        Self {
            time: chrono::Utc::now().timestamp_millis(),
            value,
        }
    }
}

/// Bounded FIFO window of chart samples
#[derive(Debug, Clone)]
pub struct RollingHistory {
    points: VecDeque<HistoryPoint>,
    cap: usize,
}

impl RollingHistory {
    /// Empty window with the default cap
    pub fn new() -> Self {
        Self::with_cap(DEFAULT_HISTORY_CAP)
    }

    /// Empty window with an explicit cap (must be non-zero)
    pub fn with_cap(cap: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(cap.max(1)),
            cap: cap.max(1),
        }
    }

    /// Append a point, evicting the oldest when the window is full
    pub fn push(&mut self, point: HistoryPoint) {
        if self.points.len() == self.cap {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Number of points currently held
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the window holds no points yet
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Window cap
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Most recent point, if any
    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    /// Oldest-to-newest iteration
    pub fn iter(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }

    /// Values scaled to `u64` for sparkline widgets
    ///
    /// Values are clamped to `[0, max_value]` before scaling so an
    /// out-of-range overlay (e.g. an injected decay above the chart ceiling)
    /// pegs the bar instead of distorting the axis.
    pub fn sparkline(&self, max_value: f64, scale: u64) -> Vec<u64> {
        self.points
            .iter()
            .map(|p| {
                let clamped = p.value.clamp(0.0, max_value);
                ((clamped / max_value) * scale as f64).round() as u64
            })
            .collect()
    }
}

impl Default for RollingHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(time: i64, value: f64) -> HistoryPoint {
        HistoryPoint { time, value }
    }

    #[test]
    fn test_never_exceeds_cap() {
        let mut history = RollingHistory::with_cap(20);
        for i in 0..500 {
            history.push(point(i, i as f64));
            assert!(history.len() <= 20);
        }
        assert_eq!(history.len(), 20);
    }

    #[test]
    fn test_oldest_evicted_first() {
        let mut history = RollingHistory::with_cap(3);
        for i in 0..5 {
            history.push(point(i, i as f64));
        }
        let times: Vec<i64> = history.iter().map(|p| p.time).collect();
        assert_eq!(times, vec![2, 3, 4]);
        assert_eq!(history.latest().unwrap().time, 4);
    }

    #[test]
    fn test_zero_cap_is_promoted_to_one() {
        let mut history = RollingHistory::with_cap(0);
        history.push(point(1, 1.0));
        history.push(point(2, 2.0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().time, 2);
    }

    #[test]
    fn test_sparkline_clamps_out_of_range_values() {
        let mut history = RollingHistory::with_cap(4);
        history.push(point(0, -0.5));
        history.push(point(1, 0.1));
        history.push(point(2, 0.2));
        history.push(point(3, 0.9)); // above ceiling
        let bars = history.sparkline(0.2, 100);
        assert_eq!(bars, vec![0, 50, 100, 100]);
    }
}
