//! Build errors for the state machine builder.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(key) before .build()")]
    MissingInitialState,

    #[error("No states registered. Add at least one behaviour with .state()")]
    NoStates,

    #[error("State '{state}' registered more than once")]
    DuplicateState { state: String },

    #[error("Initial state '{state}' has no registered behaviour")]
    UnknownInitialState { state: String },

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}
