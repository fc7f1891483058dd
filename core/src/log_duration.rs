use std::time::{Duration, Instant};
use tracing::info;

/// Logs how long a scope took when dropped.
#[must_use = "the duration is logged when the guard is dropped"]
pub struct LogDuration {
    operation: String,
    start: Instant,
}

impl LogDuration {
    pub fn new(operation: impl Into<String>) -> Self {
        Self { operation: operation.into(), start: Instant::now() }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for LogDuration {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        info!(
            operation = %self.operation,
            took_ms = elapsed.as_millis() as u64,
            took_s = elapsed.as_secs_f64(),
            "operation finished"
        );
    }
}

/// Time the rest of the enclosing scope: `log_duration!("remove duplicates");`
#[macro_export]
macro_rules! log_duration {
    ($operation:expr) => {
        let _log_duration_guard = $crate::log_duration::LogDuration::new($operation);
    };
}
