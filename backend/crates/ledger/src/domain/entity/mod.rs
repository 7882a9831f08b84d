pub mod account;
pub mod client;
pub mod transaction;

pub use account::Account;
pub use client::Client;
pub use transaction::Transaction;
