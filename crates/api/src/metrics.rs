use extract::ExtractionError;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

pub struct Metrics {
    // Counters
    total_requests: AtomicUsize,
    successful_requests: AtomicUsize,
    transport_errors: AtomicUsize,
    no_payload_found: AtomicUsize,
    malformed_payloads: AtomicUsize,
    schema_mismatches: AtomicUsize,
    stale_completions: AtomicUsize,

    // Timing (in microseconds)
    total_extract_time_us: AtomicU64,
}

impl Metrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            total_requests: AtomicUsize::new(0),
            successful_requests: AtomicUsize::new(0),
            transport_errors: AtomicUsize::new(0),
            no_payload_found: AtomicUsize::new(0),
            malformed_payloads: AtomicUsize::new(0),
            schema_mismatches: AtomicUsize::new(0),
            stale_completions: AtomicUsize::new(0),
            total_extract_time_us: AtomicU64::new(0),
        })
    }

    pub fn record_extraction(&self, duration: Duration, error: Option<&ExtractionError>) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.total_extract_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);

        let counter = match error {
            None => &self.successful_requests,
            Some(ExtractionError::Transport(_)) => &self.transport_errors,
            Some(ExtractionError::NoPayloadFound) => &self.no_payload_found,
            Some(ExtractionError::MalformedPayload(_)) => &self.malformed_payloads,
            Some(ExtractionError::SchemaMismatch { .. }) => &self.schema_mismatches,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// A response arrived after a newer generation had been started.
    pub fn record_stale(&self) {
        self.stale_completions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let total = self.total_requests.load(Ordering::Relaxed);
        let successful = self.successful_requests.load(Ordering::Relaxed);
        let total_us = self.total_extract_time_us.load(Ordering::Relaxed) as f64;

        MetricsSnapshot {
            total_requests: total,
            successful_requests: successful,
            failed_requests: total.saturating_sub(successful),
            transport_errors: self.transport_errors.load(Ordering::Relaxed),
            no_payload_found: self.no_payload_found.load(Ordering::Relaxed),
            malformed_payloads: self.malformed_payloads.load(Ordering::Relaxed),
            schema_mismatches: self.schema_mismatches.load(Ordering::Relaxed),
            stale_completions: self.stale_completions.load(Ordering::Relaxed),
            avg_extract_time_ms: if total > 0 {
                total_us / total as f64 / 1000.0
            } else {
                0.0
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    pub transport_errors: usize,
    pub no_payload_found: usize,
    pub malformed_payloads: usize,
    pub schema_mismatches: usize,
    pub stale_completions: usize,
    pub avg_extract_time_ms: f64,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
