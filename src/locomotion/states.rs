//! Idle and Walk behaviours.
//!
//! Both states follow the body's intent: while it matches their own key they
//! count ticks, otherwise they queue the intended gait and let the machine
//! switch at the end of the tick.

use super::body::{Body, Contact};
use crate::core::StateKey;
use crate::machine::{Context, StateBehaviour};
use crate::state_key;
use tracing::{debug, trace};

state_key! {
    /// Locomotion gait of a player or NPC.
    pub enum Gait {
        Idle,
        Walk,
    }
}

type BodyContext<'a> = Context<'a, Gait, Body>;

/// Returns true if the intent matches `own`; otherwise queues the intent.
fn follow_intent(own: Gait, ctx: &mut BodyContext<'_>) -> bool {
    let intent = ctx.data().intent;
    if intent == own {
        return true;
    }
    ctx.queue(intent);
    false
}

fn contact_entered(own: Gait, other: &Contact, ctx: &mut BodyContext<'_>) {
    if ctx.data_mut().overlaps.insert(other.id) {
        debug!(state = own.name(), contact = other.id, "trigger entered");
    }
}

fn contact_exited(own: Gait, other: &Contact, ctx: &mut BodyContext<'_>) {
    if ctx.data_mut().overlaps.remove(&other.id) {
        debug!(state = own.name(), contact = other.id, "trigger exited");
    }
}

#[derive(Debug, Default)]
pub struct IdleState;

impl StateBehaviour<Gait, Body, Contact> for IdleState {
    fn key(&self) -> Gait {
        Gait::Idle
    }

    fn enter(&mut self, ctx: &mut BodyContext<'_>) {
        debug!(tick = ctx.tick(), "entered idle");
        ctx.data_mut().idle_entries += 1;
    }

    fn update(&mut self, ctx: &mut BodyContext<'_>) {
        if follow_intent(Gait::Idle, ctx) {
            trace!("idling");
            ctx.data_mut().idle_ticks += 1;
        }
    }

    fn exit(&mut self, ctx: &mut BodyContext<'_>) {
        debug!(tick = ctx.tick(), "exited idle");
    }

    fn on_trigger_enter(&mut self, other: &Contact, ctx: &mut BodyContext<'_>) {
        contact_entered(Gait::Idle, other, ctx);
    }

    fn on_trigger_stay(&mut self, other: &Contact, _ctx: &mut BodyContext<'_>) {
        trace!(contact = other.id, "idle in trigger");
    }

    fn on_trigger_exit(&mut self, other: &Contact, ctx: &mut BodyContext<'_>) {
        contact_exited(Gait::Idle, other, ctx);
    }
}

#[derive(Debug, Default)]
pub struct WalkState;

impl StateBehaviour<Gait, Body, Contact> for WalkState {
    fn key(&self) -> Gait {
        Gait::Walk
    }

    fn enter(&mut self, ctx: &mut BodyContext<'_>) {
        debug!(tick = ctx.tick(), "entered walk");
        ctx.data_mut().walk_entries += 1;
    }

    fn update(&mut self, ctx: &mut BodyContext<'_>) {
        if follow_intent(Gait::Walk, ctx) {
            trace!("walking");
            ctx.data_mut().walk_ticks += 1;
        }
    }

    fn exit(&mut self, ctx: &mut BodyContext<'_>) {
        debug!(tick = ctx.tick(), "exited walk");
    }

    fn on_trigger_enter(&mut self, other: &Contact, ctx: &mut BodyContext<'_>) {
        contact_entered(Gait::Walk, other, ctx);
    }

    fn on_trigger_stay(&mut self, other: &Contact, _ctx: &mut BodyContext<'_>) {
        trace!(contact = other.id, "walking in trigger");
    }

    fn on_trigger_exit(&mut self, other: &Contact, ctx: &mut BodyContext<'_>) {
        contact_exited(Gait::Walk, other, ctx);
    }
}
