//! Runtime errors for driving a state machine.

use thiserror::Error;

/// Errors that can occur while ticking or signalling a state machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("State machine has not been started. Call .start() first")]
    NotStarted,

    #[error("State machine was already started")]
    AlreadyStarted,

    #[error("No behaviour registered for state '{state}'")]
    UnknownState { state: String },
}
