//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::StateKey;
use crate::machine::{BehaviourTable, StateBehaviour, StateMachine};
use std::collections::HashMap;

/// Builder for constructing state machines with a fluent API.
pub struct StateMachineBuilder<K: StateKey, D, O = ()> {
    initial: Option<K>,
    states: Vec<Box<dyn StateBehaviour<K, D, O>>>,
    config: MachineConfig,
}

impl<K: StateKey, D, O> StateMachineBuilder<K, D, O> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            config: MachineConfig::default(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, key: K) -> Self {
        self.initial = Some(key);
        self
    }

    /// Register a behaviour under the key it reports.
    pub fn state<B>(self, behaviour: B) -> Self
    where
        B: StateBehaviour<K, D, O> + 'static,
    {
        self.boxed_state(Box::new(behaviour))
    }

    /// Register an already boxed behaviour.
    pub fn boxed_state(mut self, behaviour: Box<dyn StateBehaviour<K, D, O>>) -> Self {
        self.states.push(behaviour);
        self
    }

    /// Replace the default configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the state machine around the given owner data.
    /// Returns an error if required fields are missing or keys clash.
    pub fn build(self, data: D) -> Result<StateMachine<K, D, O>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        self.config.validate()?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut table: BehaviourTable<K, D, O> = HashMap::with_capacity(self.states.len());
        for behaviour in self.states {
            let key = behaviour.key();
            if table.contains_key(&key) {
                return Err(BuildError::DuplicateState {
                    state: key.name().to_string(),
                });
            }
            table.insert(key, behaviour);
        }

        if !table.contains_key(&initial) {
            return Err(BuildError::UnknownInitialState {
                state: initial.name().to_string(),
            });
        }

        Ok(StateMachine::from_parts(table, initial, data, self.config))
    }
}

impl<K: StateKey, D, O> Default for StateMachineBuilder<K, D, O> {
    fn default() -> Self {
        Self::new()
    }
}
