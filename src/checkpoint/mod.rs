//! Checkpoint and restore for state machines.
//!
//! A checkpoint captures the machine's bookkeeping (active and queued keys,
//! tick counters, history) so a save game or a network snapshot can put a
//! machine back where it was. Behaviours and owner data are not included;
//! the machine being restored into already has its own.

use crate::core::{StateHistory, StateKey};
use crate::machine::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a state machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<K: StateKey> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Active state of the machine
    pub current_state: K,

    /// Transition waiting for the next tick
    pub queued_state: Option<K>,

    /// Whether the initial enter hook had already run
    pub started: bool,

    /// Completed ticks
    pub tick: u64,

    /// Completed ticks in the active state
    pub ticks_in_state: u64,

    /// Transition history
    pub history: StateHistory<K>,
}

impl<K: StateKey> Checkpoint<K> {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON, rejecting unknown format versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Serialize to the compact binary form.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from the compact binary form, rejecting unknown format versions.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl<K: StateKey, D, O> StateMachine<K, D, O> {
    /// Capture the machine's bookkeeping.
    pub fn checkpoint(&self) -> Checkpoint<K> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            current_state: self.current.clone(),
            queued_state: self.queued.clone(),
            started: self.started,
            tick: self.tick,
            ticks_in_state: self.ticks_in_state,
            history: self.history.clone(),
        }
    }

    /// Adopt a checkpoint's bookkeeping without running any hooks.
    ///
    /// Every key in the checkpoint must be registered in this machine. On
    /// error the machine is left untouched. The history keeps this machine's
    /// configured bound, so only the newest records of the checkpoint survive.
    pub fn restore(&mut self, checkpoint: &Checkpoint<K>) -> Result<(), CheckpointError> {
        checkpoint.check_version()?;

        let referenced = std::iter::once(&checkpoint.current_state)
            .chain(checkpoint.queued_state.as_ref())
            .chain(checkpoint.history.keys());
        for key in referenced {
            if !self.contains(key) {
                return Err(CheckpointError::UnknownState {
                    state: key.name().to_string(),
                });
            }
        }

        self.current = checkpoint.current_state.clone();
        self.queued = checkpoint.queued_state.clone();
        self.started = checkpoint.started;
        self.tick = checkpoint.tick;
        self.ticks_in_state = checkpoint.ticks_in_state;
        let mut history = StateHistory::bounded(self.config.history_capacity);
        for record in checkpoint.history.iter() {
            history.record(record.clone());
        }
        self.history = history;

        debug!(
            machine = %self.config.name,
            checkpoint = %checkpoint.id,
            state = self.current.name(),
            tick = self.tick,
            "restored from checkpoint"
        );
        Ok(())
    }
}
