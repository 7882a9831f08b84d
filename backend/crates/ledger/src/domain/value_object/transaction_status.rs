//! Transaction Status Value Object
//!
//! A transaction is `Pending` from construction until it is executed.
//! `Executed` is terminal: there is no cancel and no way back.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Validated, balances not yet moved
    #[default]
    Pending,

    /// Balances moved; cannot run again
    Executed,
}

impl TransactionStatus {
    /// Get string code for serialization
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Executed => "executed",
        }
    }

    /// Check if this is a terminal state (cannot transition out)
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Executed)
    }

    /// Check if a transition to `next` is allowed
    #[inline]
    pub const fn can_transition_to(&self, next: TransactionStatus) -> bool {
        matches!((self, next), (Self::Pending, Self::Executed))
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(Self::Pending),
            "executed" => Some(Self::Executed),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
