//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Value objects (Amount, ClientName, TransactionStatus)
//! - Entities (Client, Account, Transaction)
//! - Domain services (transfer validation and settlement)

pub mod entity;
pub mod services;
pub mod value_object;
