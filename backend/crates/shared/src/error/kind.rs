//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum shared by every ledger crate.

use serde::Serialize;

/// Error classification
///
/// Each domain error maps to exactly one kind, so callers can react to the
/// class of a failure without matching on every domain variant.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::InsufficientFunds;
/// assert_eq!(kind.code(), "INSUFFICIENT_FUNDS");
/// assert!(kind.is_caller_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Input is malformed or outside the accepted domain
    Validation,
    /// Referenced entity does not exist
    NotFound,
    /// The acting party has no right to the resource
    Forbidden,
    /// Request contradicts the current state
    Conflict,
    /// Amount exceeds the available balance
    InsufficientFunds,
    /// Invariant broken inside the library
    Internal,
}

impl ErrorKind {
    /// Human-readable name
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::InsufficientFunds => "Insufficient Funds",
            ErrorKind::Internal => "Internal",
        }
    }

    /// Stable machine-readable code, identical to the serialized form
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::InsufficientFunds => "INSUFFICIENT_FUNDS",
            ErrorKind::Internal => "INTERNAL",
        }
    }

    /// The caller can fix the request and try again.
    #[inline]
    pub const fn is_caller_error(&self) -> bool {
        !self.is_internal()
    }

    /// Errors of this kind point at a bug and should be logged loudly.
    #[inline]
    pub const fn is_internal(&self) -> bool {
        matches!(self, ErrorKind::Internal)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
