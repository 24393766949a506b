//! Common error infrastructure shared by the world model and the display layer.
//!
//! Domain errors are defined next to the code that raises them. They all
//! implement [`GameError`] so callers can route them by severity and tag them
//! with a stable code in logs.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller can continue, usually with a degraded result
/// - **Validation**: invalid input that should be rejected
/// - **Internal**: an inconsistency in data that should never disagree
/// - **Fatal**: the subsystem cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: a glyph lookup fell back to a neutral symbol.
    Recoverable,

    /// Examples: malformed level text, a request with the wrong style.
    Validation,

    /// Examples: wall mode and wall shape disagree, unknown terrain.
    /// These indicate bugs in level data and should be investigated.
    Internal,

    /// Examples: no level loaded when one is required.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all errors raised by the map crates.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
