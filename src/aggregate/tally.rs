use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionOutcome {
    Passed,
    Failed,
}

impl AssertionOutcome {
    pub fn from_failed(failed: bool) -> Self {
        if failed {
            AssertionOutcome::Failed
        } else {
            AssertionOutcome::Passed
        }
    }
}

/// Pass/fail counts of one named assertion across all executions of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionCounts {
    pub name: String,
    pub passed: u64,
    pub failed: u64,
}

impl AssertionOutcome {
    fn bump(self, passed: &mut u64, failed: &mut u64) {
        match self {
            AssertionOutcome::Passed => *passed += 1,
            AssertionOutcome::Failed => *failed += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCounts {
    pub passed: u64,
    pub failed: u64,
}

impl TestCounts {

    pub fn total(&self) -> u64 {
        self.passed + self.failed
    }
}

/// Assertion counts of a single item, names in first-seen order
#[derive(Debug, Clone, Default)]
pub struct ItemTally {
    by_name: IndexMap<String, AssertionCounts>,
    totals: TestCounts,
}

impl ItemTally {
    fn record(&mut self, name: &str, outcome: AssertionOutcome) {
        let counts = self
            .by_name
            .entry(name.to_string())
            .or_insert_with(|| AssertionCounts {
                name: name.to_string(),
                passed: 0,
                failed: 0,
            });
        outcome.bump(&mut counts.passed, &mut counts.failed);
        outcome.bump(&mut self.totals.passed, &mut self.totals.failed);
    }

    pub fn assertions(&self) -> Vec<AssertionCounts> {
        self.by_name.values().cloned().collect()
    }

    pub fn totals(&self) -> TestCounts {
        self.totals
    }
}

/// Per-item assertion tallies
#[derive(Debug, Default)]
pub struct AssertionTally {
    by_item: HashMap<String, ItemTally>,
}

impl AssertionTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&mut self, item_id: &str) {
        self.by_item.entry(item_id.to_string()).or_default();
    }

    pub fn record(&mut self, item_id: &str, name: &str, outcome: AssertionOutcome) {
        self.by_item
            .entry(item_id.to_string())
            .or_default()
            .record(name, outcome);
    }

    pub fn item(&self, item_id: &str) -> Option<&ItemTally> {
        self.by_item.get(item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_per_name_and_total() {
        let mut tally = AssertionTally::new();
        tally.seed("a");
        tally.record("a", "status code is 200", AssertionOutcome::Passed);
        tally.record("a", "has body", AssertionOutcome::Failed);
        tally.record("a", "status code is 200", AssertionOutcome::Failed);

        let item = tally.item("a").unwrap();
        assert_eq!(
            item.assertions(),
            vec![
                AssertionCounts {
                    name: "status code is 200".to_string(),
                    passed: 1,
                    failed: 1,
                },
                AssertionCounts {
                    name: "has body".to_string(),
                    passed: 0,
                    failed: 1,
                },
            ]
        );
        assert_eq!(item.totals(), TestCounts { passed: 1, failed: 2 });
        assert_eq!(item.totals().total(), 3);
    }

    #[test]
    fn test_items_are_independent() {
        let mut tally = AssertionTally::new();
        tally.record("a", "ok", AssertionOutcome::Passed);
        tally.record("b", "ok", AssertionOutcome::Failed);

        assert_eq!(tally.item("a").unwrap().totals(), TestCounts { passed: 1, failed: 0 });
        assert_eq!(tally.item("b").unwrap().totals(), TestCounts { passed: 0, failed: 1 });
        assert!(tally.item("c").is_none());
    }

    #[test]
    fn test_seeded_item_is_empty() {
        let mut tally = AssertionTally::new();
        tally.seed("a");
        let item = tally.item("a").unwrap();
        assert!(item.assertions().is_empty());
        assert_eq!(item.totals(), TestCounts::default());
    }
}
