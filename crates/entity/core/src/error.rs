//! Common error infrastructure for entity-core.
//!
//! Domain-specific errors (`TableError`, `SpawnError`, `RegistryError`,
//! `ConfigError`) live beside the code that raises them. This module holds the
//! shared classification every one of them reports through [`CoreError`].
//!
//! Contract violations by the caller (updating a dead entity, an entity
//! damaging itself) are not represented here; they panic.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same request may succeed later.
    ///
    /// Examples: spawn tile currently unavailable
    Recoverable,

    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: entity not registered, position out of bounds
    Validation,

    /// Unexpected state inconsistency that indicates a bug.
    ///
    /// Examples: table row missing for a registered entity
    Internal,

    /// Simulation state cannot be trusted any more.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all entity-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Return a stable SCREAMING_SNAKE_CASE code from `error_code`
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str;
}
