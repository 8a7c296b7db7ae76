//! # Error Types
//!
//! Emission errors never leave the dispatcher: they are counted and logged
//! per descriptor. Config errors surface at startup.

use thiserror::Error;
use volley_shared::{ClientId, PacketKind};

/// A single particle, sound or packet could not be emitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmissionError {
    /// The host does not know this sound key.
    #[error("unknown sound: {0}")]
    UnknownSound(String),

    /// The host refused the call.
    #[error("host rejected emission: {reason}")]
    HostRejected {
        /// Host-supplied reason
        reason: String,
    },

    /// The client disconnected or has no player.
    #[error("recipient {0} is gone")]
    RecipientGone(ClientId),

    /// This host release cannot build the packet.
    #[error("packet kind {0:?} is unsupported on this host version")]
    Unsupported(PacketKind),
}

impl EmissionError {
    /// Convenience constructor for [`EmissionError::HostRejected`].
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::HostRejected { reason: reason.into() }
    }
}

/// Result type for emission.
pub type EmissionResult<T> = Result<T, EmissionError>;

/// Configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid TOML for [`EffectsConfig`](crate::config::EffectsConfig).
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but are out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;
