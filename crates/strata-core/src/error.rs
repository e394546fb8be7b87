//! Error types for Strata configuration resolution.
//!
//! Resolution distinguishes three failure classes, and they never blur into
//! each other:
//! - a required key with no configured value ([`ConfigError::PropertyNotFound`]),
//! - a value that was attempted but could not be converted
//!   ([`ConfigError::ConversionFailed`]),
//! - a target type with no explicit or implicit converter, where conversion
//!   was never attempted ([`ConfigError::NoConverter`]).
//!
//! A failed conversion is always surfaced; it is never coerced to a default
//! or an absent value.
//!
//! # Example
//!
//! ```
//! use strata_core::{ConfigError, Result};
//!
//! fn require(key: &str) -> Result<String> {
//!     Err(ConfigError::property_not_found(key))
//! }
//!
//! let err = require("db.url").unwrap_err();
//! assert!(err.is_not_found());
//! assert!(err.to_string().contains("db.url"));
//! ```

use thiserror::Error;

/// Error type for all Strata resolution and conversion operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required key has no value from any source and no usable default.
    #[error("no configured value found for config key '{key}'")]
    PropertyNotFound {
        /// The key that was requested.
        key: String,
    },

    /// A resolved or default string could not be converted to the requested
    /// type.
    #[error("could not convert value '{value}' to {target_type}: {reason}")]
    ConversionFailed {
        /// The offending input value.
        value: String,
        /// Name of the requested target type.
        target_type: &'static str,
        /// What went wrong while converting.
        reason: String,
    },

    /// The requested type has no explicit, implicit, or sequence converter.
    ///
    /// Distinct from [`ConfigError::ConversionFailed`]: the input was never
    /// attempted.
    #[error("no converter registered for {target_type}")]
    NoConverter {
        /// Name of the requested target type.
        target_type: &'static str,
    },
}

impl ConfigError {
    /// Creates a PropertyNotFound error.
    pub fn property_not_found(key: impl Into<String>) -> Self {
        Self::PropertyNotFound { key: key.into() }
    }

    /// Creates a ConversionFailed error.
    pub fn conversion_failed(
        value: impl Into<String>,
        target_type: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::ConversionFailed {
            value: value.into(),
            target_type,
            reason: reason.into(),
        }
    }

    /// Creates a NoConverter error.
    pub fn no_converter(target_type: &'static str) -> Self {
        Self::NoConverter { target_type }
    }

    /// Returns true if this error indicates a missing required key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PropertyNotFound { .. })
    }

    /// Returns true if this is a conversion failure.
    pub fn is_conversion_failure(&self) -> bool {
        matches!(self, Self::ConversionFailed { .. })
    }

    /// Returns true if no converter was available for the requested type.
    pub fn is_no_converter(&self) -> bool {
        matches!(self, Self::NoConverter { .. })
    }
}

/// Type alias for Results with ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;
