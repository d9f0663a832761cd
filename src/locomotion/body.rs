//! Owner data for the locomotion machine.

use super::states::Gait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A trigger-volume contact reported by the physics layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    pub id: u64,
}

/// Everything the Idle/Walk behaviours read and write.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Gait requested by input or by an external signal
    pub intent: Gait,
    /// Ticks spent idling with a matching intent
    pub idle_ticks: u64,
    /// Ticks spent walking with a matching intent
    pub walk_ticks: u64,
    pub idle_entries: u32,
    pub walk_entries: u32,
    /// Trigger contacts currently overlapping the body
    pub overlaps: BTreeSet<u64>,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            intent: Gait::Idle,
            idle_ticks: 0,
            walk_ticks: 0,
            idle_entries: 0,
            walk_entries: 0,
            overlaps: BTreeSet::new(),
        }
    }
}

impl Body {
    /// Check if `contact` is currently overlapping the body.
    pub fn is_overlapping(&self, contact: &Contact) -> bool {
        self.overlaps.contains(&contact.id)
    }
}
