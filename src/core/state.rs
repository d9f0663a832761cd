//! The key type that names a state.
//!
//! Keys are plain values, usually field-less enums. The behaviour that runs
//! while a state is active lives elsewhere (see [`crate::machine::StateBehaviour`]);
//! a key only identifies it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state keys.
///
/// # Required Traits
///
/// - `Clone`: keys are copied into history records and checkpoints
/// - `Eq` + `Hash`: keys index the machine's behaviour table
/// - `Debug`: keys show up in diagnostics
/// - `Serialize` + `Deserialize`: keys are persisted in checkpoints
///
/// # Example
///
/// ```rust
/// use stance::core::StateKey;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl StateKey for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Closed.name(), "Closed");
/// ```
pub trait StateKey:
    Clone + Eq + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

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

    #[test]
    fn key_name_returns_correct_value() {
        assert_eq!(TestKey::Idle.name(), "Idle");
        assert_eq!(TestKey::Walk.name(), "Walk");
        assert_eq!(TestKey::Run.name(), "Run");
    }

    #[test]
    fn keys_index_a_map() {
        let mut table = HashMap::new();
        table.insert(TestKey::Idle, 1);
        table.insert(TestKey::Walk, 2);

        assert_eq!(table.get(&TestKey::Walk), Some(&2));
        assert!(!table.contains_key(&TestKey::Run));
    }

    #[test]
    fn key_serializes_correctly() {
        let key = TestKey::Walk;
        let json = serde_json::to_string(&key).unwrap();
        let deserialized: TestKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, deserialized);
    }
}
