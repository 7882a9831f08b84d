//! Client Entity
//!
//! A named party that may hold any number of accounts. The list of
//! accessible accounts is only changed by the ledger's holder routines,
//! together with the matching account's holder list.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_object::{AccountId, ClientId, client_name::ClientName};

#[derive(Debug, Clone, Serialize)]
pub struct Client {
    client_id: ClientId,
    #[serde(flatten)]
    name: ClientName,
    accessible_accounts: Vec<AccountId>,
    created_at: DateTime<Utc>,
}

impl Client {
    pub(crate) fn new(name: ClientName) -> Self {
        Self {
            client_id: ClientId::new(),
            name,
            accessible_accounts: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn id(&self) -> ClientId {
        self.client_id
    }

    #[inline]
    pub fn name(&self) -> &ClientName {
        &self.name
    }

    #[inline]
    pub fn first_name(&self) -> &str {
        self.name.first_name()
    }

    #[inline]
    pub fn last_name(&self) -> &str {
        self.name.last_name()
    }

    /// Accounts this client can act on, in the order access was granted
    #[inline]
    pub fn accessible_accounts(&self) -> &[AccountId] {
        &self.accessible_accounts
    }

    pub fn has_access(&self, account: &AccountId) -> bool {
        self.accessible_accounts.contains(account)
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn grant_access(&mut self, account: AccountId) {
        if !self.has_access(&account) {
            self.accessible_accounts.push(account);
        }
    }

    pub(crate) fn revoke_access(&mut self, account: &AccountId) {
        self.accessible_accounts.retain(|held| held != account);
    }
}
