//! # Compat Error Types

use thiserror::Error;

/// Errors raised while binding host-runtime attributes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompatError {
    /// No strategy in the chain reached the attribute on this host release.
    #[error("unsupported host version: no strategy resolves {owner}::{attribute}")]
    UnsupportedHostVersion {
        /// Owning host type.
        owner: &'static str,
        /// Attribute that could not be reached.
        attribute: &'static str,
    },

    /// The cache holds a binding of another accessor type under this key.
    #[error("binding for {owner}::{attribute} was cached with a different accessor type")]
    BindingTypeMismatch {
        /// Owning host type.
        owner: &'static str,
        /// Attribute name.
        attribute: &'static str,
    },
}

/// Result type for compat operations.
pub type CompatResult<T> = Result<T, CompatError>;
