//! Measurement outcomes.
//!
//! Bitstrings are keyed by classical-bit declaration order: character `i`
//! of a bitstring is the value written to classical bit `i`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Multiset of measured bitstrings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty set of counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Occurrences of `bitstring` (zero if never seen).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct bitstrings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(bitstring, count)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// The most frequent bitstring.
    ///
    /// Ties are broken towards the lexicographically smallest bitstring, so
    /// the answer never depends on hash-map iteration order.
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.counts
            .iter()
            .filter(|&(_, &c)| c > 0)
            .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
            .map(|(s, &c)| (s, c))
    }

    /// All outcomes sorted by count (descending), then bitstring.
    pub fn most_common(&self) -> Vec<(&str, u64)> {
        let mut sorted: Vec<_> = self.counts.iter().map(|(s, &c)| (s.as_str(), c)).collect();
        sorted.sort_by(|(a, ca), (b, cb)| cb.cmp(ca).then_with(|| a.cmp(b)));
        sorted
    }

    /// Empirical probability of each bitstring.
    #[allow(clippy::cast_precision_loss)]
    pub fn probabilities(&self) -> FxHashMap<String, f64> {
        let total = self.total_shots() as f64;
        if total == 0.0 {
            return FxHashMap::default();
        }
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

/// Result of executing a circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Set the execution time.
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_accumulates() {
        let mut counts = Counts::new();
        counts.insert("01", 3);
        counts.insert("01", 2);
        counts.insert("10", 1);
        assert_eq!(counts.get("01"), 5);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.total_shots(), 6);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_most_frequent() {
        let counts: Counts = [("000", 5), ("101", 90), ("111", 5)].into_iter().collect();
        assert_eq!(counts.most_frequent(), Some((&"101".to_string(), 90)));
    }

    #[test]
    fn test_most_frequent_tie_break() {
        let counts: Counts = [("110", 40), ("011", 40), ("100", 20)].into_iter().collect();
        let (best, n) = counts.most_frequent().unwrap();
        assert_eq!(best, "011");
        assert_eq!(n, 40);
    }

    #[test]
    fn test_most_frequent_empty() {
        assert!(Counts::new().most_frequent().is_none());
        let zero: Counts = [("0", 0)].into_iter().collect();
        assert!(zero.most_frequent().is_none());
    }

    #[test]
    fn test_most_common_order() {
        let counts: Counts = [("10", 1), ("01", 3), ("00", 3)].into_iter().collect();
        assert_eq!(counts.most_common(), vec![("00", 3), ("01", 3), ("10", 1)]);
    }

    #[test]
    fn test_probabilities() {
        let counts: Counts = [("0", 1), ("1", 3)].into_iter().collect();
        let p = counts.probabilities();
        assert!((p["1"] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_counts_serialize_as_map() {
        let counts: Counts = [("1", 2)].into_iter().collect();
        assert_eq!(serde_json::to_string(&counts).unwrap(), r#"{"1":2}"#);
    }

    #[test]
    fn test_execution_result() {
        let result = ExecutionResult::new(Counts::new(), 10).with_execution_time(3);
        assert_eq!(result.shots, 10);
        assert_eq!(result.execution_time_ms, Some(3));
    }
}
