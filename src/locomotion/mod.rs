//! Idle/Walk locomotion for players and NPCs.
//!
//! A [`Locomotion`] wraps a two-state machine. Players feed it sampled input
//! every frame through [`Locomotion::drive`]. NPCs are steered by game events
//! through [`Locomotion::signal`] and ticked with [`Locomotion::tick`]. In both
//! cases the states notice the changed intent during their update and queue
//! the switch themselves.
//!
//! # Example
//!
//! ```rust
//! use stance::config::MachineConfig;
//! use stance::locomotion::{Gait, InputState, Locomotion};
//!
//! let mut player = Locomotion::new(MachineConfig::named("player")).unwrap();
//! player.start().unwrap();
//!
//! player.drive(&InputState { walk_held: true }).unwrap();
//! assert_eq!(player.gait(), Gait::Walk);
//!
//! player.drive(&InputState::default()).unwrap();
//! assert_eq!(player.gait(), Gait::Idle);
//! ```

mod body;
mod states;

pub use body::{Body, Contact};
pub use states::{Gait, IdleState, WalkState};

use crate::builder::{BuildError, StateMachineBuilder};
use crate::config::MachineConfig;
use crate::machine::{MachineError, StateMachine};

/// Input sampled for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    /// The walk key is held down
    pub walk_held: bool,
}

impl InputState {
    /// The gait this input asks for.
    pub fn gait(&self) -> Gait {
        if self.walk_held {
            Gait::Walk
        } else {
            Gait::Idle
        }
    }
}

/// Locomotion controller for a single player or NPC.
pub struct Locomotion {
    machine: StateMachine<Gait, Body, Contact>,
}

impl Locomotion {
    /// Build an idle controller. Call [`start`](Self::start) before ticking.
    pub fn new(config: MachineConfig) -> Result<Self, BuildError> {
        let machine = StateMachineBuilder::<Gait, Body, Contact>::new()
            .initial(Gait::Idle)
            .state(IdleState)
            .state(WalkState)
            .config(config)
            .build(Body::default())?;
        Ok(Self { machine })
    }

    /// Enter the initial idle state.
    pub fn start(&mut self) -> Result<(), MachineError> {
        self.machine.start()
    }

    /// Player path: take the intent from this frame's input, then tick.
    pub fn drive(&mut self, input: &InputState) -> Result<(), MachineError> {
        self.signal(input.gait());
        self.tick()
    }

    /// NPC path: request a gait. It takes effect on the next tick.
    pub fn signal(&mut self, gait: Gait) {
        self.machine.data_mut().intent = gait;
    }

    /// Advance one frame without touching the intent.
    pub fn tick(&mut self) -> Result<(), MachineError> {
        self.machine.update()
    }

    /// Forward a contact that started overlapping.
    pub fn trigger_enter(&mut self, other: &Contact) -> Result<(), MachineError> {
        self.machine.trigger_enter(other)
    }

    /// Forward a contact that keeps overlapping.
    pub fn trigger_stay(&mut self, other: &Contact) -> Result<(), MachineError> {
        self.machine.trigger_stay(other)
    }

    /// Forward a contact that stopped overlapping.
    pub fn trigger_exit(&mut self, other: &Contact) -> Result<(), MachineError> {
        self.machine.trigger_exit(other)
    }

    /// The active gait.
    pub fn gait(&self) -> Gait {
        *self.machine.current_state()
    }

    /// The controlled body.
    pub fn body(&self) -> &Body {
        self.machine.data()
    }

    /// The underlying state machine.
    pub fn machine(&self) -> &StateMachine<Gait, Body, Contact> {
        &self.machine
    }

    /// Mutable access to the state machine, e.g. to restore a checkpoint.
    pub fn machine_mut(&mut self) -> &mut StateMachine<Gait, Body, Contact> {
        &mut self.machine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALK: InputState = InputState { walk_held: true };
    const REST: InputState = InputState { walk_held: false };

    fn started() -> Locomotion {
        let mut locomotion = Locomotion::new(MachineConfig::named("test")).unwrap();
        locomotion.start().unwrap();
        locomotion
    }

    #[test]
    fn starts_idle_and_enters_once() {
        let locomotion = started();
        assert_eq!(locomotion.gait(), Gait::Idle);
        assert_eq!(locomotion.body().idle_entries, 1);
        assert_eq!(locomotion.body().walk_entries, 0);
    }

    #[test]
    fn holding_walk_switches_on_the_same_tick() {
        let mut locomotion = started();

        locomotion.drive(&WALK).unwrap();
        assert_eq!(locomotion.gait(), Gait::Walk);
        assert_eq!(locomotion.body().walk_entries, 1);
        assert_eq!(locomotion.body().walk_ticks, 0);

        locomotion.drive(&WALK).unwrap();
        locomotion.drive(&WALK).unwrap();
        assert_eq!(locomotion.body().walk_ticks, 2);
        assert_eq!(locomotion.body().walk_entries, 1);
    }

    #[test]
    fn releasing_walk_returns_to_idle() {
        let mut locomotion = started();

        locomotion.drive(&WALK).unwrap();
        locomotion.drive(&REST).unwrap();

        assert_eq!(locomotion.gait(), Gait::Idle);
        assert_eq!(locomotion.body().idle_entries, 2);
        let path: Vec<Gait> = locomotion
            .machine()
            .history()
            .get_path()
            .into_iter()
            .copied()
            .collect();
        assert_eq!(path, vec![Gait::Idle, Gait::Walk, Gait::Idle]);
    }

    #[test]
    fn idle_input_keeps_idling_without_transitions() {
        let mut locomotion = started();

        for _ in 0..5 {
            locomotion.drive(&REST).unwrap();
        }

        assert_eq!(locomotion.body().idle_ticks, 5);
        assert_eq!(locomotion.body().idle_entries, 1);
        assert!(locomotion.machine().history().is_empty());
    }

    #[test]
    fn flickering_input_applies_one_transition_per_tick() {
        let mut locomotion = started();

        for frame in 0..6 {
            let input = if frame % 2 == 0 { WALK } else { REST };
            locomotion.drive(&input).unwrap();
            assert_eq!(locomotion.gait(), input.gait());
        }

        assert_eq!(locomotion.machine().history().len(), 6);
        assert_eq!(locomotion.body().walk_entries, 3);
        assert_eq!(locomotion.body().idle_entries, 4);
    }

    #[test]
    fn signal_steers_npc_on_next_tick() {
        let mut npc = started();

        npc.signal(Gait::Walk);
        assert_eq!(npc.gait(), Gait::Idle);

        npc.tick().unwrap();
        assert_eq!(npc.gait(), Gait::Walk);

        npc.tick().unwrap();
        npc.signal(Gait::Idle);
        npc.tick().unwrap();
        assert_eq!(npc.gait(), Gait::Idle);
        assert_eq!(npc.body().walk_ticks, 1);
    }

    #[test]
    fn triggers_track_overlapping_contacts_across_states() {
        let mut locomotion = started();
        let crate_box = Contact { id: 7 };
        let door = Contact { id: 9 };

        locomotion.trigger_enter(&crate_box).unwrap();
        locomotion.drive(&WALK).unwrap();
        locomotion.trigger_enter(&door).unwrap();
        locomotion.trigger_stay(&door).unwrap();
        locomotion.trigger_exit(&crate_box).unwrap();

        assert!(!locomotion.body().is_overlapping(&crate_box));
        assert!(locomotion.body().is_overlapping(&door));
        assert_eq!(locomotion.body().overlaps.len(), 1);
    }

    #[test]
    fn ticking_before_start_fails() {
        let mut locomotion = Locomotion::new(MachineConfig::default()).unwrap();
        assert_eq!(locomotion.drive(&WALK), Err(MachineError::NotStarted));
        assert_eq!(
            locomotion.trigger_enter(&Contact { id: 1 }),
            Err(MachineError::NotStarted)
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = Locomotion::new(MachineConfig::named(""));
        assert!(matches!(result, Err(BuildError::InvalidConfig(_))));
    }
}
