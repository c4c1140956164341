//! Multiplexer metrics.
//!
//! Provides atomic counters for monitoring traffic over one connection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Metrics for one multiplexed connection.
#[derive(Debug)]
pub struct MuxMetrics {
    /// Frames transmitted.
    frames_sent: AtomicU64,

    /// Text frames received.
    frames_received: AtomicU64,

    /// Responses delivered to a per-request handler.
    responses_routed: AtomicU64,

    /// Responses with no matching pending request.
    unmatched: AtomicU64,

    /// Frames that failed to parse.
    malformed: AtomicU64,

    /// Deliveries to the global handler.
    global_deliveries: AtomicU64,

    /// Start time for rate calculation.
    start_time: Instant,
}

impl Default for MuxMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MuxMetrics {
    /// Creates a new metrics instance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames_sent: AtomicU64::new(0),
            frames_received: AtomicU64::new(0),
            responses_routed: AtomicU64::new(0),
            unmatched: AtomicU64::new(0),
            malformed: AtomicU64::new(0),
            global_deliveries: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a transmitted frame.
    pub fn record_frame_sent(&self) {
        self.frames_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a received text frame.
    pub fn record_frame_received(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a response delivered to its request handler.
    pub fn record_routed(&self) {
        self.responses_routed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a message that matched no pending request.
    pub fn record_unmatched(&self) {
        self.unmatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a frame that could not be parsed.
    pub fn record_malformed(&self) {
        self.malformed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a delivery to the global handler.
    pub fn record_global_delivery(&self) {
        self.global_deliveries.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of transmitted frames.
    #[must_use]
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent.load(Ordering::Relaxed)
    }

    /// Returns the number of received text frames.
    #[must_use]
    pub fn frames_received(&self) -> u64 {
        self.frames_received.load(Ordering::Relaxed)
    }

    /// Returns the number of routed responses.
    #[must_use]
    pub fn responses_routed(&self) -> u64 {
        self.responses_routed.load(Ordering::Relaxed)
    }

    /// Returns the number of unmatched messages.
    #[must_use]
    pub fn unmatched(&self) -> u64 {
        self.unmatched.load(Ordering::Relaxed)
    }

    /// Returns the number of malformed frames.
    #[must_use]
    pub fn malformed(&self) -> u64 {
        self.malformed.load(Ordering::Relaxed)
    }

    /// Returns the number of global handler deliveries.
    #[must_use]
    pub fn global_deliveries(&self) -> u64 {
        self.global_deliveries.load(Ordering::Relaxed)
    }

    /// Returns the time since the metrics were created.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the received frame rate per second.
    #[must_use]
    pub fn receive_rate(&self) -> f64 {
        let secs = self.uptime().as_secs_f64();
        if secs > 0.0 {
            self.frames_received() as f64 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = MuxMetrics::new();
        assert_eq!(metrics.frames_sent(), 0);
        assert_eq!(metrics.frames_received(), 0);
        assert_eq!(metrics.responses_routed(), 0);
        assert_eq!(metrics.malformed(), 0);
    }

    #[test]
    fn test_metrics_record() {
        let metrics = MuxMetrics::new();

        metrics.record_frame_sent();
        metrics.record_frame_sent();
        metrics.record_frame_received();
        metrics.record_routed();
        metrics.record_unmatched();
        metrics.record_malformed();
        metrics.record_global_delivery();

        assert_eq!(metrics.frames_sent(), 2);
        assert_eq!(metrics.frames_received(), 1);
        assert_eq!(metrics.responses_routed(), 1);
        assert_eq!(metrics.unmatched(), 1);
        assert_eq!(metrics.malformed(), 1);
        assert_eq!(metrics.global_deliveries(), 1);
    }

    #[test]
    fn test_metrics_receive_rate_non_negative() {
        let metrics = MuxMetrics::default();
        metrics.record_frame_received();
        assert!(metrics.receive_rate() >= 0.0);
    }
}
