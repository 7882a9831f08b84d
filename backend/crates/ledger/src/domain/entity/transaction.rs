//! Transaction Entity
//!
//! A transfer instruction between two distinct accounts. It is validated
//! against the ledger when created (see [`crate::Ledger::transaction`]) and
//! moves money only when executed, at most once.
//!
//! The transaction refers to its parties by id and owns none of them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ledger::Ledger;
use crate::domain::value_object::amount::Amount;
use crate::domain::value_object::transaction_status::TransactionStatus;
use crate::domain::value_object::{AccountId, ClientId, TransactionId};
use crate::error::{LedgerError, LedgerResult};

#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    transaction_id: TransactionId,
    sender: ClientId,
    sender_account: AccountId,
    receiver: ClientId,
    receiver_account: AccountId,
    amount: Amount,
    status: TransactionStatus,
    created_at: DateTime<Utc>,
    executed_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Build a pending transaction from already validated parts
    pub(crate) fn new(
        sender: ClientId,
        sender_account: AccountId,
        receiver: ClientId,
        receiver_account: AccountId,
        amount: Amount,
    ) -> Self {
        Self {
            transaction_id: TransactionId::new(),
            sender,
            sender_account,
            receiver,
            receiver_account,
            amount,
            status: TransactionStatus::Pending,
            created_at: Utc::now(),
            executed_at: None,
        }
    }

    /// Apply this transfer to `ledger`
    ///
    /// Shorthand for [`Ledger::execute`].
    pub fn execute(&mut self, ledger: &mut Ledger) -> LedgerResult<()> {
        ledger.execute(self)
    }

    #[inline]
    pub fn id(&self) -> TransactionId {
        self.transaction_id
    }

    #[inline]
    pub fn sender(&self) -> ClientId {
        self.sender
    }

    #[inline]
    pub fn sender_account(&self) -> AccountId {
        self.sender_account
    }

    #[inline]
    pub fn receiver(&self) -> ClientId {
        self.receiver
    }

    #[inline]
    pub fn receiver_account(&self) -> AccountId {
        self.receiver_account
    }

    #[inline]
    pub fn amount(&self) -> Amount {
        self.amount
    }

    #[inline]
    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    #[inline]
    pub fn is_executed(&self) -> bool {
        self.status.is_terminal()
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[inline]
    pub fn executed_at(&self) -> Option<DateTime<Utc>> {
        self.executed_at
    }

    pub(crate) fn ensure_pending(&self) -> LedgerResult<()> {
        if self.status.can_transition_to(TransactionStatus::Executed) {
            Ok(())
        } else {
            Err(LedgerError::ExecutedTransaction(self.transaction_id))
        }
    }

    pub(crate) fn mark_executed(&mut self) -> LedgerResult<()> {
        self.ensure_pending()?;
        self.status = TransactionStatus::Executed;
        self.executed_at = Some(Utc::now());
        Ok(())
    }
}
