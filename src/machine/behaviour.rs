//! Per-state behaviour and the context hooks run against.

use crate::core::StateKey;

/// Behaviour that runs while one state is active.
///
/// `D` is the owner data the machine carries (a body, an NPC record, ...).
/// `O` is the payload of trigger contacts, opaque to the machine.
///
/// Only [`key`](Self::key) and [`update`](Self::update) are required; the other
/// hooks default to doing nothing.
///
/// # Example
///
/// ```rust
/// use stance::machine::{Context, StateBehaviour};
/// use stance::state_key;
///
/// state_key! {
///     enum Light { Off, On }
/// }
///
/// struct Off;
///
/// impl StateBehaviour<Light, bool> for Off {
///     fn key(&self) -> Light {
///         Light::Off
///     }
///
///     fn update(&mut self, ctx: &mut Context<'_, Light, bool>) {
///         if *ctx.data() {
///             ctx.queue(Light::On);
///         }
///     }
/// }
/// ```
pub trait StateBehaviour<K: StateKey, D, O = ()> {
    /// The key this behaviour is registered under.
    fn key(&self) -> K;

    /// Called once when the state becomes active.
    fn enter(&mut self, _ctx: &mut Context<'_, K, D>) {}

    /// Called once per tick while the state is active.
    fn update(&mut self, ctx: &mut Context<'_, K, D>);

    /// Called once when the state stops being active.
    fn exit(&mut self, _ctx: &mut Context<'_, K, D>) {}

    /// Called when a contact starts overlapping the owner.
    fn on_trigger_enter(&mut self, _other: &O, _ctx: &mut Context<'_, K, D>) {}

    /// Called every physics step while a contact keeps overlapping.
    fn on_trigger_stay(&mut self, _other: &O, _ctx: &mut Context<'_, K, D>) {}

    /// Called when a contact stops overlapping the owner.
    fn on_trigger_exit(&mut self, _other: &O, _ctx: &mut Context<'_, K, D>) {}
}

/// A hook's view of the machine it runs in.
///
/// Hooks cannot switch state directly. They queue a key, and the machine
/// applies it at the end of the current tick.
pub struct Context<'a, K: StateKey, D> {
    pub(crate) current: &'a K,
    pub(crate) tick: u64,
    pub(crate) data: &'a mut D,
    pub(crate) queued: &'a mut Option<K>,
}

impl<'a, K: StateKey, D> Context<'a, K, D> {
    /// The active state.
    pub fn current(&self) -> &K {
        self.current
    }

    /// Number of completed ticks since the machine started.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The owner data.
    pub fn data(&self) -> &D {
        &*self.data
    }

    /// Mutable access to the owner data.
    pub fn data_mut(&mut self) -> &mut D {
        &mut *self.data
    }

    /// Queue a transition, replacing any previously queued one.
    ///
    /// The key is checked against the machine's registered states when the
    /// transition is applied.
    pub fn queue(&mut self, next: K) {
        *self.queued = Some(next);
    }

    /// The key that is queued now, if any.
    pub fn queued(&self) -> Option<&K> {
        self.queued.as_ref()
    }

    /// Drop the queued transition, returning it.
    pub fn cancel_queued(&mut self) -> Option<K> {
        self.queued.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestKey {
        Idle,
        Walk,
    }

    impl StateKey for TestKey {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Walk => "Walk",
            }
        }
    }

    #[test]
    fn queue_replaces_previous_key() {
        let current = TestKey::Idle;
        let mut data = 0u32;
        let mut queued = None;
        let mut ctx = Context {
            current: &current,
            tick: 3,
            data: &mut data,
            queued: &mut queued,
        };

        ctx.queue(TestKey::Walk);
        ctx.queue(TestKey::Idle);
        assert_eq!(ctx.queued(), Some(&TestKey::Idle));
        assert_eq!(ctx.cancel_queued(), Some(TestKey::Idle));
        assert_eq!(ctx.queued(), None);
        assert_eq!(ctx.current(), &TestKey::Idle);
        assert_eq!(ctx.tick(), 3);
    }

    #[test]
    fn data_is_writable_through_context() {
        let current = TestKey::Walk;
        let mut data = 1u32;
        let mut queued = None;
        {
            let mut ctx = Context {
                current: &current,
                tick: 0,
                data: &mut data,
                queued: &mut queued,
            };
            *ctx.data_mut() += 1;
            assert_eq!(*ctx.data(), 2);
        }
        assert_eq!(data, 2);
    }
}
