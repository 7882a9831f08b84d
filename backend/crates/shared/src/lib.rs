//! Shared Kernel - Domain-crossing minimal core
//!
//! The vocabulary every ledger crate agrees on:
//! - Typed entity identifiers
//! - Error classification and the unified [`error::app_error::AppError`]
//!
//! Only things that are hard to change and mean the same thing
//! everywhere belong here.

pub mod error {
    pub mod app_error;
    pub mod kind;
}
pub mod id;
