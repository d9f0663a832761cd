//! Core value types shared by every machine.
//!
//! - State keys via the `StateKey` trait
//! - Records of applied transitions and their bounded history
//!
//! Nothing in this module runs hooks or touches owner data.

mod history;
mod state;

pub use history::{StateHistory, TransitionRecord};
pub use state::StateKey;
