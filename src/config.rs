//! Machine configuration.
//!
//! Configuration is usually set in code through
//! [`StateMachineBuilder::config`](crate::builder::StateMachineBuilder::config),
//! but can also be loaded from JSON so designers can tune it without a rebuild.
//! Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse machine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid machine config: {0}")]
    Invalid(String),
}

/// Tunables for a single state machine.
///
/// # Example
///
/// ```rust
/// use stance::config::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "name": "player", "history_capacity": 8 }"#).unwrap();
/// assert_eq!(config.name, "player");
/// assert_eq!(config.history_capacity, 8);
/// assert!(!config.trace_updates);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Name attached to every log event emitted by the machine
    pub name: String,

    /// Number of transitions kept in history; 0 disables history
    pub history_capacity: usize,

    /// Emit a `trace` event on every tick
    pub trace_updates: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            name: "fsm".to_string(),
            history_capacity: 64,
            trace_updates: false,
        }
    }
}

impl MachineConfig {
    /// Config with the given machine name and default everything else.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("name must not be empty".to_string()));
        }
        Ok(())
    }
}
