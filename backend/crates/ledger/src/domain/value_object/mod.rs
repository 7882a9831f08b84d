//! Value Object Module

pub mod amount;
pub mod client_name;
pub mod transaction_status;

pub use kernel::id::{AccountId, ClientId, TransactionId};
