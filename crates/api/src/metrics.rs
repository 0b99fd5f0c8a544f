use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use extract::{TaskOutcome, TaskPrediction};

#[derive(Default)]
pub struct Metrics {
    // Counters
    predict_requests: AtomicUsize,
    tasks_total: AtomicUsize,
    tasks_succeeded: AtomicUsize,
    tasks_failed: AtomicUsize,
    tasks_empty: AtomicUsize,
    spans_emitted: AtomicUsize,

    // Timing (in microseconds)
    total_predict_time_us: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_predict(&self, duration: Duration, predictions: &[TaskPrediction]) {
        self.predict_requests.fetch_add(1, Ordering::Relaxed);
        self.total_predict_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.tasks_total.fetch_add(predictions.len(), Ordering::Relaxed);

        for prediction in predictions {
            let counter = match prediction.outcome {
                TaskOutcome::Succeeded => &self.tasks_succeeded,
                TaskOutcome::Failed => &self.tasks_failed,
                TaskOutcome::Empty => &self.tasks_empty,
            };
            counter.fetch_add(1, Ordering::Relaxed);
            self.spans_emitted
                .fetch_add(prediction.record.result.len(), Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.predict_requests.load(Ordering::Relaxed);
        let total_us = self.total_predict_time_us.load(Ordering::Relaxed) as f64;

        MetricsSnapshot {
            predict_requests: requests,
            tasks_total: self.tasks_total.load(Ordering::Relaxed),
            tasks_succeeded: self.tasks_succeeded.load(Ordering::Relaxed),
            tasks_failed: self.tasks_failed.load(Ordering::Relaxed),
            tasks_empty: self.tasks_empty.load(Ordering::Relaxed),
            spans_emitted: self.spans_emitted.load(Ordering::Relaxed),
            avg_predict_time_ms: if requests > 0 {
                total_us / requests as f64 / 1000.0 // Convert to ms
            } else {
                0.0
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub predict_requests: usize,
    pub tasks_total: usize,
    pub tasks_succeeded: usize,
    pub tasks_failed: usize,
    /// Tasks without input text; no model was called for these.
    pub tasks_empty: usize,
    pub spans_emitted: usize,
    pub avg_predict_time_ms: f64,
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
