//! Deduplication Ledger
//!
//! Append-only set of match ids already applied to one league's table.
//! Persisted as a plain JSON array in insertion order and rehydrated into
//! set semantics on load. Only an explicit reset clears it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Ledger {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn already_applied(&self, match_id: &str) -> bool {
        self.seen.contains(match_id)
    }

    /// Returns `true` when `match_id` was not present before. Recording an
    /// id twice is a no-op.
    pub fn record(&mut self, match_id: impl Into<String>) -> bool {
        let match_id = match_id.into();
        if self.seen.contains(&match_id) {
            return false;
        }
        self.seen.insert(match_id.clone());
        self.order.push(match_id);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in the order they were recorded
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Operator reset only
    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }
}

impl From<Vec<String>> for Ledger {
    fn from(ids: Vec<String>) -> Self {
        let mut ledger = Ledger::new();
        for id in ids {
            ledger.record(id);
        }
        ledger
    }
}

impl From<Ledger> for Vec<String> {
    fn from(ledger: Ledger) -> Self {
        ledger.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_idempotent() {
        let mut ledger = Ledger::new();

        assert!(ledger.record("401"));
        assert!(!ledger.record("401"));
        assert!(ledger.record("402"));

        assert_eq!(ledger.len(), 2);
        assert!(ledger.already_applied("401"));
        assert!(!ledger.already_applied("403"));
    }

    #[test]
    fn test_serializes_as_ordered_array() {
        let mut ledger = Ledger::new();
        ledger.record("b");
        ledger.record("a");
        ledger.record("c");

        assert_eq!(serde_json::to_string(&ledger).unwrap(), r#"["b","a","c"]"#);
    }

    #[test]
    fn test_rehydrates_and_drops_duplicates() {
        let ledger: Ledger = serde_json::from_str(r#"["1","2","1","3"]"#).unwrap();

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.iter().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert!(ledger.already_applied("3"));
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(serde_json::from_str::<Ledger>(r#"{"ids": []}"#).is_err());
    }

    #[test]
    fn test_clear() {
        let mut ledger = Ledger::from(vec!["1".to_string(), "2".to_string()]);
        ledger.clear();
        assert!(ledger.is_empty());
        assert!(!ledger.already_applied("1"));
    }
}
