//! Client Name Value Object
//!
//! A client is identified to humans by a first and a last name. Both parts
//! are required; they are trimmed on input and never change afterwards.

use derive_more::Display;
use serde::Serialize;
use std::fmt;

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when client name validation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientNameError {
    /// First name is empty after trimming
    EmptyFirstName,

    /// Last name is empty after trimming
    EmptyLastName,
}

impl fmt::Display for ClientNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing = match self {
            Self::EmptyFirstName => "first name",
            Self::EmptyLastName => "last name",
        };
        write!(
            f,
            "a client must have a first name and a last name ({missing} is empty)"
        )
    }
}

impl std::error::Error for ClientNameError {}

// ============================================================================
// ClientName Value Object
// ============================================================================

/// Validated first/last name pair
///
/// # Invariants
/// - Neither part is empty
/// - Neither part has leading or trailing whitespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize)]
#[display("{first_name} {last_name}")]
pub struct ClientName {
    first_name: String,
    last_name: String,
}

impl ClientName {
    pub fn new(
        first_name: impl AsRef<str>,
        last_name: impl AsRef<str>,
    ) -> Result<Self, ClientNameError> {
        let first_name = first_name.as_ref().trim();
        let last_name = last_name.as_ref().trim();

        if first_name.is_empty() {
            return Err(ClientNameError::EmptyFirstName);
        }
        if last_name.is_empty() {
            return Err(ClientNameError::EmptyLastName);
        }

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    #[inline]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[inline]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}
