//! Domain Services
//!
//! Pure transfer logic over account snapshots. Nothing here writes to an
//! account; the ledger commits the result.

use rust_decimal::Decimal;

use crate::domain::entity::{Account, Transaction};
use crate::domain::value_object::ClientId;
use crate::domain::value_object::amount::{Amount, MoneyOperation, RawAmount, at_ledger_scale};
use crate::error::{LedgerError, LedgerResult};

/// Balances a transfer leaves behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferPlan {
    pub sender_balance: Decimal,
    pub receiver_balance: Decimal,
}

/// Validate a new transfer and convert its amount
///
/// Checks run in a fixed order and the first failure wins: holders,
/// distinct accounts, amount, sender balance.
pub fn validate_transfer(
    sender: &ClientId,
    sender_account: &Account,
    receiver: &ClientId,
    receiver_account: &Account,
    amount: impl Into<RawAmount>,
) -> LedgerResult<Amount> {
    sender_account.ensure_holder(sender)?;
    receiver_account.ensure_holder(receiver)?;

    if sender_account.id() == receiver_account.id() {
        return Err(LedgerError::SameAccountTransaction);
    }

    let amount = Amount::new(amount)
        .map_err(|e| LedgerError::from_amount(e, MoneyOperation::Transaction))?;
    sender_account.ensure_covers(&amount, MoneyOperation::Transaction)?;

    Ok(amount)
}

/// Check that a pending transaction still holds against current state
pub fn revalidate_transfer(
    transaction: &Transaction,
    sender_account: &Account,
    receiver_account: &Account,
) -> LedgerResult<()> {
    sender_account.ensure_holder(&transaction.sender())?;
    receiver_account.ensure_holder(&transaction.receiver())?;
    sender_account.ensure_covers(&transaction.amount(), MoneyOperation::Transaction)
}

/// Compute both resulting balances without touching either account
pub fn plan_transfer(
    sender_account: &Account,
    receiver_account: &Account,
    amount: &Amount,
) -> LedgerResult<TransferPlan> {
    let sender_balance = sender_account
        .balance()
        .checked_sub(amount.value())
        .and_then(at_ledger_scale)
        .ok_or(LedgerError::BalanceOverflow(sender_account.id()))?;
    let receiver_balance = receiver_account
        .balance()
        .checked_add(amount.value())
        .and_then(at_ledger_scale)
        .ok_or(LedgerError::BalanceOverflow(receiver_account.id()))?;

    Ok(TransferPlan {
        sender_balance,
        receiver_balance,
    })
}
