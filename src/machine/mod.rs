//! The runtime side of a state machine.
//!
//! # Key Concepts
//!
//! - **Behaviours**: one `StateBehaviour` per key, with enter/update/exit and
//!   trigger-contact hooks
//! - **Context**: what a hook may touch: owner data and the transition queue
//! - **State Machine**: holds the active key and applies at most one queued
//!   transition per tick
//!
//! The machine never polls anything itself. The host game loop calls
//! `start`, `update` and the `trigger_*` methods explicitly.

mod behaviour;
mod error;
mod state_machine;

pub use behaviour::{Context, StateBehaviour};
pub use error::MachineError;
pub use state_machine::StateMachine;

pub(crate) use state_machine::BehaviourTable;
