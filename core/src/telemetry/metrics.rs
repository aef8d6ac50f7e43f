use std::sync::Mutex;

/// Batch counters shared across concurrent point assessments.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    assessed: usize,
    failures: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                assessed: 0,
                failures: 0,
            }),
        }
    }

    pub fn record_assessed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.assessed += 1;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failures += 1;
        }
    }

    /// Returns (assessed, failures).
    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.assessed, metrics.failures)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
