//! Store metrics collection.
//!
//! Provides functions for recording store-related metrics.

use metrics::histogram;
use std::time::Instant;

/// Record store operation duration.
pub fn record_operation_duration(operation: &str, duration_secs: f64) {
    histogram!(
        "store_operation_duration_seconds",
        "operation" => operation.to_string()
    )
    .record(duration_secs);
}

/// A helper to time store operations and record metrics.
///
/// Usage:
/// ```ignore
/// let timer = OpTimer::new("customers.insert");
/// let result = store.insert(customer);
/// timer.record();
/// result
/// ```
pub struct OpTimer {
    operation: String,
    start: Instant,
}

impl OpTimer {
    /// Create a new timer for the given operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            start: Instant::now(),
        }
    }

    /// Record the elapsed duration to metrics.
    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_operation_duration(&self.operation, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_timer_creation() {
        let timer = OpTimer::new("test_operation");
        assert_eq!(timer.operation, "test_operation");
    }

    #[test]
    fn test_op_timer_with_string() {
        let name = String::from("test_operation");
        let timer = OpTimer::new(name);
        assert_eq!(timer.operation, "test_operation");
    }
}
