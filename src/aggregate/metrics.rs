use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Running sum and sample count of one metric
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    pub sum: f64,
    pub count: u64,
}

impl Sample {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricSums {
    pub time: Sample,
    pub size: Sample,
}

/// Mean response time (ms) and size (bytes) of an item
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Mean {
    pub time: f64,
    pub size: f64,
}

/// Per-item response time and size sums
#[derive(Debug, Default)]
pub struct MetricAccumulator {
    by_item: HashMap<String, MetricSums>,
}

impl MetricAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking an item with zero sums
    pub fn seed(&mut self, item_id: &str) {
        self.by_item.entry(item_id.to_string()).or_default();
    }

    /// Add one execution's metrics. A missing value counts as a zero sample,
    /// and the time and size counts always advance together.
    pub fn record(&mut self, item_id: &str, time: Option<f64>, size: Option<f64>) {
        let sums = self.by_item.entry(item_id.to_string()).or_default();
        sums.time.add(time.unwrap_or(0.0));
        sums.size.add(size.unwrap_or(0.0));
    }

    pub fn sums(&self, item_id: &str) -> Option<&MetricSums> {
        self.by_item.get(item_id)
    }

    pub fn finalize(&self, item_id: &str) -> Mean {
        self.by_item
            .get(item_id)
            .map(|sums| Mean {
                time: sums.time.mean(),
                size: sums.size.mean(),
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_samples() {
        let mut metrics = MetricAccumulator::new();
        metrics.seed("a");
        metrics.record("a", Some(100.0), Some(1000.0));
        metrics.record("a", Some(200.0), Some(3000.0));

        let mean = metrics.finalize("a");
        assert_eq!(mean.time, 150.0);
        assert_eq!(mean.size, 2000.0);
    }

    #[test]
    fn test_missing_values_count_as_zero() {
        let mut metrics = MetricAccumulator::new();
        metrics.record("a", Some(300.0), None);
        metrics.record("a", None, Some(90.0));

        let sums = metrics.sums("a").unwrap();
        assert_eq!(sums.time, Sample { sum: 300.0, count: 2 });
        assert_eq!(sums.size, Sample { sum: 90.0, count: 2 });

        let mean = metrics.finalize("a");
        assert_eq!(mean.time, 150.0);
        assert_eq!(mean.size, 45.0);
    }

    #[test]
    fn test_seed_does_not_count() {
        let mut metrics = MetricAccumulator::new();
        metrics.seed("a");
        metrics.seed("a");
        assert_eq!(metrics.sums("a"), Some(&MetricSums::default()));
        assert_eq!(metrics.finalize("a"), Mean::default());
    }

    #[test]
    fn test_unknown_item_has_zero_mean() {
        let metrics = MetricAccumulator::new();
        assert_eq!(metrics.finalize("missing"), Mean::default());
    }
}
