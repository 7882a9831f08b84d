//! Application Layer
//!
//! The `Ledger` aggregate owns every client and account and is the only
//! place where both sides of a holder link change.

pub mod config;
pub mod ledger;
