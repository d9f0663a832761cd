//! State machine that owns per-state behaviours and applies deferred transitions.

use crate::config::MachineConfig;
use crate::core::{StateHistory, StateKey, TransitionRecord};
use crate::machine::behaviour::{Context, StateBehaviour};
use crate::machine::error::MachineError;
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

pub(crate) type BehaviourTable<K, D, O> = HashMap<K, Box<dyn StateBehaviour<K, D, O>>>;

/// Hook dispatched to the active behaviour.
enum Hook<'o, O> {
    Enter,
    Update,
    Exit,
    TriggerEnter(&'o O),
    TriggerStay(&'o O),
    TriggerExit(&'o O),
}

/// Keyed state machine with one active state and at most one queued transition.
///
/// The host game loop drives it explicitly: [`start`](Self::start) once, then
/// [`update`](Self::update) every frame, plus the `trigger_*` methods whenever
/// the physics layer reports an overlap. A queued transition is applied after
/// the active state's update hook, so at most one transition happens per tick.
///
/// # Example
///
/// ```rust
/// use stance::builder::StateMachineBuilder;
/// use stance::machine::{Context, StateBehaviour};
/// use stance::state_key;
///
/// state_key! {
///     enum Gait { Idle, Walk }
/// }
///
/// struct Still(Gait);
///
/// impl StateBehaviour<Gait, ()> for Still {
///     fn key(&self) -> Gait {
///         self.0
///     }
///
///     fn update(&mut self, _ctx: &mut Context<'_, Gait, ()>) {}
/// }
///
/// let mut machine = StateMachineBuilder::<Gait, ()>::new()
///     .initial(Gait::Idle)
///     .state(Still(Gait::Idle))
///     .state(Still(Gait::Walk))
///     .build(())
///     .unwrap();
///
/// machine.start().unwrap();
/// machine.queue(Gait::Walk).unwrap();
/// assert_eq!(machine.current_state(), &Gait::Idle);
///
/// machine.update().unwrap();
/// assert_eq!(machine.current_state(), &Gait::Walk);
/// ```
pub struct StateMachine<K: StateKey, D, O = ()> {
    pub(crate) states: BehaviourTable<K, D, O>,
    pub(crate) current: K,
    pub(crate) queued: Option<K>,
    pub(crate) data: D,
    pub(crate) started: bool,
    pub(crate) tick: u64,
    pub(crate) ticks_in_state: u64,
    pub(crate) history: StateHistory<K>,
    pub(crate) config: MachineConfig,
}

impl<K: StateKey, D, O> StateMachine<K, D, O> {
    /// Assemble a machine from validated parts. See `StateMachineBuilder`.
    pub(crate) fn from_parts(
        states: BehaviourTable<K, D, O>,
        initial: K,
        data: D,
        config: MachineConfig,
    ) -> Self {
        Self {
            states,
            current: initial,
            queued: None,
            data,
            started: false,
            tick: 0,
            ticks_in_state: 0,
            history: StateHistory::bounded(config.history_capacity),
            config,
        }
    }

    /// Enter the initial state.
    pub fn start(&mut self) -> Result<(), MachineError> {
        if self.started {
            return Err(MachineError::AlreadyStarted);
        }
        self.started = true;
        debug!(
            machine = %self.config.name,
            state = self.current.name(),
            "machine started"
        );
        self.run_hook(Hook::Enter)
    }

    /// Run one tick: the active state's update hook, then the queued transition.
    ///
    /// A transition queued while that transition is being applied (from an
    /// exit or enter hook) stays queued for the next tick.
    pub fn update(&mut self) -> Result<(), MachineError> {
        self.ensure_started()?;
        if self.config.trace_updates {
            trace!(
                machine = %self.config.name,
                state = self.current.name(),
                tick = self.tick,
                "update"
            );
        }

        self.run_hook(Hook::Update)?;

        let applied = match self.queued.take() {
            Some(next) => self.apply(next),
            None => Ok(false),
        };

        self.tick += 1;
        match applied {
            Ok(true) => {
                self.ticks_in_state = 0;
                Ok(())
            }
            Ok(false) => {
                self.ticks_in_state += 1;
                Ok(())
            }
            Err(err) => {
                self.ticks_in_state += 1;
                Err(err)
            }
        }
    }

    /// Queue a transition to be applied on the next [`update`](Self::update).
    ///
    /// Replaces any previously queued key. Queuing the active state is allowed
    /// and does nothing when applied.
    pub fn queue(&mut self, next: K) -> Result<(), MachineError> {
        self.ensure_registered(&next)?;
        self.queued = Some(next);
        Ok(())
    }

    /// Drop the queued transition, returning it.
    pub fn cancel_queued(&mut self) -> Option<K> {
        self.queued.take()
    }

    /// Apply a transition immediately instead of waiting for the next tick.
    ///
    /// Returns `false` if `next` is already active. Any queued transition is
    /// left in place.
    pub fn transition_now(&mut self, next: K) -> Result<bool, MachineError> {
        self.ensure_started()?;
        let applied = self.apply(next)?;
        if applied {
            self.ticks_in_state = 0;
        }
        Ok(applied)
    }

    /// Forward a trigger-enter contact to the active state.
    pub fn trigger_enter(&mut self, other: &O) -> Result<(), MachineError> {
        self.ensure_started()?;
        self.run_hook(Hook::TriggerEnter(other))
    }

    /// Forward a trigger-stay contact to the active state.
    pub fn trigger_stay(&mut self, other: &O) -> Result<(), MachineError> {
        self.ensure_started()?;
        self.run_hook(Hook::TriggerStay(other))
    }

    /// Forward a trigger-exit contact to the active state.
    pub fn trigger_exit(&mut self, other: &O) -> Result<(), MachineError> {
        self.ensure_started()?;
        self.run_hook(Hook::TriggerExit(other))
    }

    /// The active state.
    pub fn current_state(&self) -> &K {
        &self.current
    }

    /// The transition waiting for the next tick, if any.
    pub fn queued_state(&self) -> Option<&K> {
        self.queued.as_ref()
    }

    /// The owner data.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Mutable access to the owner data.
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    /// Whether [`start`](Self::start) has run.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Number of completed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of completed ticks since the active state was entered.
    pub fn ticks_in_state(&self) -> u64 {
        self.ticks_in_state
    }

    /// True until the first tick completes in the active state.
    pub fn just_entered(&self) -> bool {
        self.started && self.ticks_in_state == 0
    }

    /// Applied transitions, bounded by the config.
    pub fn history(&self) -> &StateHistory<K> {
        &self.history
    }

    /// Configuration the machine was built with.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Check whether a behaviour is registered for `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.states.contains_key(key)
    }

    /// Registered keys, in no particular order.
    pub fn state_keys(&self) -> impl Iterator<Item = &K> {
        self.states.keys()
    }

    /// Switch to `next`, running exit on the active state and enter on the new one.
    /// Returns whether a transition happened.
    fn apply(&mut self, next: K) -> Result<bool, MachineError> {
        if next == self.current {
            trace!(
                machine = %self.config.name,
                state = next.name(),
                "state already active"
            );
            return Ok(false);
        }
        self.ensure_registered(&next)?;

        self.run_hook(Hook::Exit)?;
        let from = std::mem::replace(&mut self.current, next);
        self.run_hook(Hook::Enter)?;

        debug!(
            machine = %self.config.name,
            from = from.name(),
            to = self.current.name(),
            tick = self.tick,
            "transition applied"
        );
        self.history.record(TransitionRecord {
            from,
            to: self.current.clone(),
            tick: self.tick,
            timestamp: Utc::now(),
        });
        Ok(true)
    }

    fn run_hook(&mut self, hook: Hook<'_, O>) -> Result<(), MachineError> {
        let Some(behaviour) = self.states.get_mut(&self.current) else {
            return Err(MachineError::UnknownState {
                state: self.current.name().to_string(),
            });
        };
        let mut ctx = Context {
            current: &self.current,
            tick: self.tick,
            data: &mut self.data,
            queued: &mut self.queued,
        };

        match hook {
            Hook::Enter => behaviour.enter(&mut ctx),
            Hook::Update => behaviour.update(&mut ctx),
            Hook::Exit => behaviour.exit(&mut ctx),
            Hook::TriggerEnter(other) => behaviour.on_trigger_enter(other, &mut ctx),
            Hook::TriggerStay(other) => behaviour.on_trigger_stay(other, &mut ctx),
            Hook::TriggerExit(other) => behaviour.on_trigger_exit(other, &mut ctx),
        }
        Ok(())
    }

    fn ensure_started(&self) -> Result<(), MachineError> {
        if self.started {
            Ok(())
        } else {
            Err(MachineError::NotStarted)
        }
    }

    fn ensure_registered(&self, key: &K) -> Result<(), MachineError> {
        if self.states.contains_key(key) {
            return Ok(());
        }
        warn!(
            machine = %self.config.name,
            state = key.name(),
            "no behaviour registered for state"
        );
        Err(MachineError::UnknownState {
            state: key.name().to_string(),
        })
    }
}
