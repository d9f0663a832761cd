//! Checkpoint error types.

use thiserror::Error;

/// Errors raised while saving or restoring a machine snapshot
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Encoding a checkpoint as JSON or bincode failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Decoding a checkpoint from JSON or bincode failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Checkpoint was written in a format version this crate cannot read
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Checkpoint refers to a state the target machine does not have
    #[error("Checkpoint refers to unregistered state '{state}'")]
    UnknownState { state: String },
}
