//! Ledger Error Types
//!
//! This module provides ledger-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::value_object::amount::{AmountError, MINIMUM_AMOUNT, MoneyOperation};
use crate::domain::value_object::client_name::ClientNameError;
use crate::domain::value_object::{AccountId, ClientId, TransactionId};

/// Ledger-specific result type alias
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-specific error variants
///
/// Every variant is raised before any state is touched, so a failed
/// operation leaves the ledger exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Client constructed with an empty first or last name
    #[error("{0}")]
    InvalidClientName(#[from] ClientNameError),

    /// Amount input is neither an integer nor a finite float
    #[error("`amount` has to be an integer or a float, got {found}")]
    InvalidAmountType { found: String },

    /// Amount cannot carry two decimal places
    #[error("`amount` is too large to be represented")]
    AmountOutOfRange,

    /// Account opened without a holder, or last holder removal
    #[error("an account must have at least one holder")]
    ZeroHolders,

    /// Client does not hold the account
    #[error("client {client} is not a holder of account {account}")]
    NotHolder { client: ClientId, account: AccountId },

    /// Converted amount is below 0.01
    #[error("minimal {operation} amount is {}", MINIMUM_AMOUNT)]
    MinimalAmountNotMet { operation: MoneyOperation },

    /// Amount is larger than the relevant balance
    #[error(
        "amount of {operation} ({requested}) cannot exceed the balance of the {} ({available})",
        .operation.balance_owner()
    )]
    BalanceExceeded {
        operation: MoneyOperation,
        requested: Decimal,
        available: Decimal,
    },

    /// Client already holds the account
    #[error("client {client} is already a holder of account {account}")]
    AlreadyHolder { client: ClientId, account: AccountId },

    /// Sender and receiver accounts are the same account
    #[error("the sender account and the receiver account have to be different")]
    SameAccountTransaction,

    /// Transaction executed a second time
    #[error("transaction {0} has already been executed")]
    ExecutedTransaction(TransactionId),

    /// Client id not registered in this ledger
    #[error("client {0} is not registered in this ledger")]
    UnknownClient(ClientId),

    /// Account id not registered in this ledger
    #[error("account {0} is not registered in this ledger")]
    UnknownAccount(AccountId),

    /// Resulting balance is not representable
    #[error("balance of account {0} would overflow")]
    BalanceOverflow(AccountId),
}

impl LedgerError {
    /// Attach the operation context to an amount error
    pub fn from_amount(err: AmountError, operation: MoneyOperation) -> Self {
        match err {
            AmountError::UnsupportedType { found } => LedgerError::InvalidAmountType { found },
            AmountError::NonFinite { value } => LedgerError::InvalidAmountType {
                found: value.to_string(),
            },
            AmountError::OutOfRange => LedgerError::AmountOutOfRange,
            AmountError::BelowMinimum { .. } => LedgerError::MinimalAmountNotMet { operation },
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidClientName(_)
            | LedgerError::InvalidAmountType { .. }
            | LedgerError::AmountOutOfRange
            | LedgerError::MinimalAmountNotMet { .. }
            | LedgerError::SameAccountTransaction => ErrorKind::Validation,
            LedgerError::UnknownClient(_) | LedgerError::UnknownAccount(_) => ErrorKind::NotFound,
            LedgerError::NotHolder { .. } => ErrorKind::Forbidden,
            LedgerError::ZeroHolders
            | LedgerError::AlreadyHolder { .. }
            | LedgerError::ExecutedTransaction(_)
            | LedgerError::BalanceOverflow(_) => ErrorKind::Conflict,
            LedgerError::BalanceExceeded { .. } => ErrorKind::InsufficientFunds,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the rejection with appropriate level
    pub(crate) fn log(&self) {
        match self {
            LedgerError::NotHolder { client, account } => {
                tracing::warn!(%client, %account, "Operation attempted by non-holder");
            }
            LedgerError::BalanceOverflow(account) => {
                tracing::warn!(%account, "Balance overflow rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Ledger operation rejected");
            }
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        err.to_app_error().with_source(err)
    }
}
