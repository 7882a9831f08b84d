//! Banking Ledger Module
//!
//! Clients, jointly held accounts and two-phase transfers between them,
//! kept entirely in memory.
//!
//! Structure:
//! - `domain/` - Value objects, entities and pure transfer logic
//! - `application/` - The `Ledger` aggregate and its configuration
//! - `error` - Typed failures, classified with the kernel `ErrorKind`
//!
//! ## Money
//! - Amounts and balances are `rust_decimal::Decimal` with two places
//! - Float input is truncated toward zero at the hundredths, never rounded
//! - The smallest accepted amount is `0.01`
//!
//! ## Usage
//! ```
//! use ledger::Ledger;
//!
//! let mut ledger = Ledger::new();
//! let anastasia = ledger.register_client("Anastasia", "Kukanova")?;
//! let maria = ledger.register_client("Maria", "Petrova")?;
//! let savings = ledger.open_account(Some(anastasia))?;
//! let checking = ledger.open_account(Some(maria))?;
//!
//! ledger.deposit(savings, anastasia, 1000)?;
//! let mut tx = ledger.transaction(anastasia, savings, maria, checking, 500)?;
//! tx.execute(&mut ledger)?;
//!
//! assert_eq!(ledger.balance(checking)?.to_string(), "500.00");
//! # Ok::<(), ledger::LedgerError>(())
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Re-exports for convenience
pub use application::config::{ExecutionPolicy, LedgerConfig};
pub use application::ledger::Ledger;
pub use domain::entity::{Account, Client, Transaction};
pub use domain::value_object::amount::{
    AMOUNT_SCALE, Amount, AmountError, MINIMUM_AMOUNT, MoneyOperation, RawAmount, convert_amount,
};
pub use domain::value_object::client_name::{ClientName, ClientNameError};
pub use domain::value_object::transaction_status::TransactionStatus;
pub use domain::value_object::{AccountId, ClientId, TransactionId};
pub use error::{LedgerError, LedgerResult};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
