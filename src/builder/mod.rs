//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder and a key-declaring macro so a
//! machine can be assembled with minimal boilerplate while keeping the
//! behaviour table validated up front.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
