//! Transition history tracking.
//!
//! Every transition a machine applies is appended here. Long-running game
//! objects tick forever, so a history can be bounded to the newest N records.

use super::state::StateKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use stance::core::TransitionRecord;
/// use stance::state_key;
/// use chrono::Utc;
///
/// state_key! {
///     enum Gait { Idle, Walk }
/// }
///
/// let record = TransitionRecord {
///     from: Gait::Idle,
///     to: Gait::Walk,
///     tick: 12,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.tick, 12);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<K: StateKey> {
    /// The state that was exited
    pub from: K,
    /// The state that was entered
    pub to: K,
    /// The machine tick on which the transition was applied
    pub tick: u64,
    /// Wall-clock time of the transition
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of applied transitions.
///
/// # Example
///
/// ```rust
/// use stance::core::{StateHistory, TransitionRecord};
/// use stance::state_key;
/// use chrono::Utc;
///
/// state_key! {
///     enum Step { A, B, C }
/// }
///
/// let mut history = StateHistory::bounded(8);
/// history.record(TransitionRecord { from: Step::A, to: Step::B, tick: 0, timestamp: Utc::now() });
/// history.record(TransitionRecord { from: Step::B, to: Step::C, tick: 1, timestamp: Utc::now() });
///
/// assert_eq!(history.get_path(), vec![&Step::A, &Step::B, &Step::C]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<K: StateKey> {
    records: VecDeque<TransitionRecord<K>>,
    capacity: Option<usize>,
}

impl<K: StateKey> Default for StateHistory<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey> StateHistory<K> {
    /// Create a new, unbounded history.
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
            capacity: None,
        }
    }

    /// Create a history that keeps only the newest `capacity` records.
    ///
    /// A capacity of zero records nothing.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Maximum number of retained records, `None` if unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord<K>) {
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return;
            }
            while self.records.len() >= capacity {
                self.records.pop_front();
            }
        }
        self.records.push_back(record);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained record followed by
    /// the `to` state of every record.
    pub fn get_path(&self) -> Vec<&K> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Wall-clock span between the oldest and newest retained records.
    ///
    /// Returns `None` if there are no records.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.records.front()?;
        let last = self.records.back()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no records are retained.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&TransitionRecord<K>> {
        self.records.back()
    }

    /// Iterate records from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &TransitionRecord<K>> {
        self.records.iter()
    }

    /// Keys referenced by any retained record.
    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> {
        self.records.iter().flat_map(|r| [&r.from, &r.to])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestKey {
        Idle,
        Walk,
        Run,
    }

    impl StateKey for TestKey {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Walk => "Walk",
                Self::Run => "Run",
            }
        }
    }

    fn record(from: TestKey, to: TestKey, tick: u64) -> TransitionRecord<TestKey> {
        TransitionRecord {
            from,
            to,
            tick,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestKey> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
        assert_eq!(history.capacity(), None);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.record(record(TestKey::Idle, TestKey::Walk, 1));
        history.record(record(TestKey::Walk, TestKey::Run, 4));

        let path = history.get_path();
        assert_eq!(path, vec![&TestKey::Idle, &TestKey::Walk, &TestKey::Run]);
        assert_eq!(history.last().map(|r| r.tick), Some(4));
    }

    #[test]
    fn bounded_history_evicts_oldest() {
        let mut history = StateHistory::bounded(2);
        history.record(record(TestKey::Idle, TestKey::Walk, 1));
        history.record(record(TestKey::Walk, TestKey::Run, 2));
        history.record(record(TestKey::Run, TestKey::Idle, 3));

        assert_eq!(history.len(), 2);
        let ticks: Vec<u64> = history.iter().map(|r| r.tick).collect();
        assert_eq!(ticks, vec![2, 3]);
        assert_eq!(
            history.get_path(),
            vec![&TestKey::Walk, &TestKey::Run, &TestKey::Idle]
        );
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut history = StateHistory::bounded(0);
        history.record(record(TestKey::Idle, TestKey::Walk, 1));

        assert!(history.is_empty());
        assert_eq!(history.capacity(), Some(0));
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        let start = Utc::now();
        history.record(TransitionRecord {
            from: TestKey::Idle,
            to: TestKey::Walk,
            tick: 0,
            timestamp: start,
        });
        history.record(TransitionRecord {
            from: TestKey::Walk,
            to: TestKey::Idle,
            tick: 5,
            timestamp: start + chrono::Duration::milliseconds(250),
        });

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn single_record_has_duration_zero() {
        let mut history = StateHistory::new();
        history.record(record(TestKey::Idle, TestKey::Walk, 0));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn keys_lists_both_ends_of_each_record() {
        let mut history = StateHistory::new();
        history.record(record(TestKey::Idle, TestKey::Run, 0));

        let keys: Vec<&TestKey> = history.keys().collect();
        assert_eq!(keys, vec![&TestKey::Idle, &TestKey::Run]);
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::bounded(4);
        history.record(record(TestKey::Idle, TestKey::Walk, 3));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestKey> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.capacity(), Some(4));
        assert_eq!(deserialized.last().map(|r| r.to), Some(TestKey::Walk));
    }
}
