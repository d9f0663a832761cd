//! Stance: a keyed finite state machine for game-object behaviour
//!
//! Stance drives players and NPCs with one active state at a time. Each state
//! is a behaviour object with enter/update/exit and trigger-contact hooks.
//! Transitions are queued and applied once per tick, after the active state
//! has updated. The host game loop drives everything with explicit calls.
//!
//! # Core Concepts
//!
//! - **Keys**: states are named by a `StateKey`, usually declared with `state_key!`
//! - **Behaviours**: per-state hooks implementing `StateBehaviour`
//! - **Deferred transitions**: `queue` now, applied at the end of `update`
//! - **History**: a bounded log of applied transitions
//! - **Checkpoints**: serializable snapshots for save games and snapshots
//!
//! # Example
//!
//! ```rust
//! use stance::builder::StateMachineBuilder;
//! use stance::machine::{Context, StateBehaviour};
//! use stance::state_key;
//!
//! state_key! {
//!     enum Door { Closed, Open }
//! }
//!
//! struct Closed;
//! struct Open;
//!
//! impl StateBehaviour<Door, bool> for Closed {
//!     fn key(&self) -> Door {
//!         Door::Closed
//!     }
//!
//!     fn update(&mut self, ctx: &mut Context<'_, Door, bool>) {
//!         if *ctx.data() {
//!             ctx.queue(Door::Open);
//!         }
//!     }
//! }
//!
//! impl StateBehaviour<Door, bool> for Open {
//!     fn key(&self) -> Door {
//!         Door::Open
//!     }
//!
//!     fn update(&mut self, _ctx: &mut Context<'_, Door, bool>) {}
//! }
//!
//! let mut door = StateMachineBuilder::<Door, bool>::new()
//!     .initial(Door::Closed)
//!     .state(Closed)
//!     .state(Open)
//!     .build(false)
//!     .unwrap();
//!
//! door.start().unwrap();
//! door.update().unwrap();
//! assert_eq!(door.current_state(), &Door::Closed);
//!
//! *door.data_mut() = true;
//! door.update().unwrap();
//! assert_eq!(door.current_state(), &Door::Open);
//! assert_eq!(door.history().len(), 1);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod locomotion;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use config::MachineConfig;
pub use crate::core::{StateHistory, StateKey, TransitionRecord};
pub use machine::{Context, MachineError, StateBehaviour, StateMachine};
