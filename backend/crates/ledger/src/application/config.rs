//! Application Configuration
//!
//! Configuration for the ledger application layer.

/// How `execute` treats a transaction validated at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPolicy {
    /// Check holders and the sender balance again before moving money
    Revalidate,
    /// Trust construction-time checks; the sender balance may go negative
    AsValidated,
}

impl ExecutionPolicy {
    #[inline]
    pub const fn revalidates(&self) -> bool {
        matches!(self, Self::Revalidate)
    }
}

/// Ledger application configuration
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Checks applied when a pending transaction is executed
    pub execution_policy: ExecutionPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            execution_policy: ExecutionPolicy::Revalidate,
        }
    }
}

impl LedgerConfig {
    /// Execute transactions exactly as validated, without re-checking
    pub fn trusting() -> Self {
        Self {
            execution_policy: ExecutionPolicy::AsValidated,
        }
    }
}
