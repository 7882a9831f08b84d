//! Account Entity
//!
//! A balance held jointly by one or more clients.
//!
//! # Invariants
//! - `holders` is never empty and never contains a client twice
//! - `balance` carries two decimal places and is never negative
//!
//! Methods here only touch the account side of the holder relationship.
//! The client side is kept in step by [`crate::Ledger`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::value_object::amount::{
    Amount, MoneyOperation, RawAmount, ZERO_BALANCE, at_ledger_scale,
};
use crate::domain::value_object::{AccountId, ClientId};
use crate::error::{LedgerError, LedgerResult};

#[derive(Debug, Clone, Serialize)]
pub struct Account {
    account_id: AccountId,
    holders: Vec<ClientId>,
    balance: Decimal,
    opened_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    /// Open an account bound to its first holder with a `0.00` balance
    pub(crate) fn new(holder: ClientId) -> Self {
        let now = Utc::now();
        Self {
            account_id: AccountId::new(),
            holders: vec![holder],
            balance: ZERO_BALANCE,
            opened_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn id(&self) -> AccountId {
        self.account_id
    }

    #[inline]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Holders in the order they were added
    #[inline]
    pub fn holders(&self) -> &[ClientId] {
        &self.holders
    }

    pub fn is_holder(&self, client: &ClientId) -> bool {
        self.holders.contains(client)
    }

    #[inline]
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    #[inline]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn ensure_holder(&self, client: &ClientId) -> LedgerResult<()> {
        if self.is_holder(client) {
            Ok(())
        } else {
            Err(LedgerError::NotHolder {
                client: *client,
                account: self.account_id,
            })
        }
    }

    /// Add to the balance; returns the new balance
    pub(crate) fn deposit(
        &mut self,
        client: &ClientId,
        amount: impl Into<RawAmount>,
    ) -> LedgerResult<Decimal> {
        self.ensure_holder(client)?;
        let amount = Amount::new(amount)
            .map_err(|e| LedgerError::from_amount(e, MoneyOperation::Deposit))?;
        let balance = self
            .balance
            .checked_add(amount.value())
            .and_then(at_ledger_scale)
            .ok_or(LedgerError::BalanceOverflow(self.account_id))?;
        self.set_balance(balance);
        Ok(balance)
    }

    /// Take from the balance; returns the new balance
    pub(crate) fn withdraw(
        &mut self,
        client: &ClientId,
        amount: impl Into<RawAmount>,
    ) -> LedgerResult<Decimal> {
        self.ensure_holder(client)?;
        let amount = Amount::new(amount)
            .map_err(|e| LedgerError::from_amount(e, MoneyOperation::Withdrawal))?;
        self.ensure_covers(&amount, MoneyOperation::Withdrawal)?;
        let balance = self.balance - amount.value();
        self.set_balance(balance);
        Ok(balance)
    }

    pub(crate) fn ensure_covers(
        &self,
        amount: &Amount,
        operation: MoneyOperation,
    ) -> LedgerResult<()> {
        if amount.value() > self.balance {
            return Err(LedgerError::BalanceExceeded {
                operation,
                requested: amount.value(),
                available: self.balance,
            });
        }
        Ok(())
    }

    pub(crate) fn attach_holder(&mut self, client: ClientId) -> LedgerResult<()> {
        if self.is_holder(&client) {
            return Err(LedgerError::AlreadyHolder {
                client,
                account: self.account_id,
            });
        }
        self.holders.push(client);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Check that `client` may be detached without emptying the account
    pub(crate) fn ensure_detachable(&self, client: &ClientId) -> LedgerResult<()> {
        self.ensure_holder(client)?;
        if self.holders.len() == 1 {
            return Err(LedgerError::ZeroHolders);
        }
        Ok(())
    }

    pub(crate) fn detach_holder(&mut self, client: &ClientId) -> LedgerResult<()> {
        self.ensure_detachable(client)?;
        self.holders.retain(|holder| holder != client);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub(crate) fn set_balance(&mut self, balance: Decimal) {
        self.balance = balance;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account() -> (Account, ClientId) {
        let holder = ClientId::new();
        (Account::new(holder), holder)
    }

    #[test]
    fn test_new_account() {
        let (account, holder) = account();
        assert_eq!(account.balance().to_string(), "0.00");
        assert_eq!(account.holders(), &[holder]);
    }

    #[test]
    fn test_deposit_int_then_float() {
        let (mut account, holder) = account();
        account.deposit(&holder, 1000).unwrap();
        let balance = account.deposit(&holder, 500.0).unwrap();
        assert_eq!(balance.to_string(), "1500.00");
        assert_eq!(account.balance(), dec!(1500.00));
    }

    #[test]
    fn test_deposit_truncates_float() {
        let (mut account, holder) = account();
        account.deposit(&holder, 10.999).unwrap();
        assert_eq!(account.balance().to_string(), "10.99");
    }

    #[test]
    fn test_deposit_below_minimum() {
        let (mut account, holder) = account();
        let err = account.deposit(&holder, 0.0001).unwrap_err();
        assert_eq!(
            err,
            LedgerError::MinimalAmountNotMet {
                operation: MoneyOperation::Deposit
            }
        );
        assert_eq!(account.balance().to_string(), "0.00");
    }

    #[test]
    fn test_deposit_by_non_holder() {
        let (mut account, _) = account();
        let stranger = ClientId::new();
        let err = account.deposit(&stranger, 1000).unwrap_err();
        assert!(matches!(err, LedgerError::NotHolder { client, .. } if client == stranger));
    }

    #[test]
    fn test_holder_check_precedes_amount_check() {
        let (mut account, _) = account();
        let err = account.deposit(&ClientId::new(), "ten").unwrap_err();
        assert!(matches!(err, LedgerError::NotHolder { .. }));
    }

    #[test]
    fn test_deposit_unsupported_type() {
        let (mut account, holder) = account();
        let err = account.deposit(&holder, "1000").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmountType { .. }));
    }

    #[test]
    fn test_deposit_overflow_leaves_balance() {
        let (mut account, holder) = account();
        let near_max: i128 = 500_000_000_000_000_000_000_000_000;
        account.deposit(&holder, near_max).unwrap();
        let err = account.deposit(&holder, near_max).unwrap_err();
        assert_eq!(err, LedgerError::BalanceOverflow(account.id()));
        assert_eq!(account.balance(), Decimal::from(near_max));
    }

    #[test]
    fn test_withdraw() {
        let (mut account, holder) = account();
        account.deposit(&holder, 1000).unwrap();
        assert_eq!(account.withdraw(&holder, 500).unwrap(), dec!(500.00));
        assert_eq!(account.withdraw(&holder, 500.0).unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_withdraw_exceeding_balance() {
        let (mut account, holder) = account();
        let err = account.withdraw(&holder, 1500).unwrap_err();
        assert_eq!(
            err,
            LedgerError::BalanceExceeded {
                operation: MoneyOperation::Withdrawal,
                requested: dec!(1500.00),
                available: dec!(0.00),
            }
        );
    }

    #[test]
    fn test_withdraw_minimum_checked_before_balance() {
        let (mut account, holder) = account();
        let err = account.withdraw(&holder, 0.0001).unwrap_err();
        assert!(matches!(err, LedgerError::MinimalAmountNotMet { .. }));
    }

    #[test]
    fn test_attach_and_detach() {
        let (mut account, first) = account();
        let second = ClientId::new();

        account.attach_holder(second).unwrap();
        assert_eq!(account.holders(), &[first, second]);
        assert_eq!(
            account.attach_holder(second),
            Err(LedgerError::AlreadyHolder {
                client: second,
                account: account.id()
            })
        );

        account.detach_holder(&first).unwrap();
        assert_eq!(account.holders(), &[second]);
    }

    #[test]
    fn test_last_holder_cannot_be_detached() {
        let (mut account, holder) = account();
        assert_eq!(account.detach_holder(&holder), Err(LedgerError::ZeroHolders));
        assert_eq!(account.holders(), &[holder]);
    }

    #[test]
    fn test_detach_non_holder() {
        let (mut account, _) = account();
        let err = account.detach_holder(&ClientId::new()).unwrap_err();
        assert!(matches!(err, LedgerError::NotHolder { .. }));
    }

    #[test]
    fn test_serialized_balance_keeps_scale() {
        let (mut account, holder) = account();
        account.deposit(&holder, 42).unwrap();
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["balance"], "42.00");
        assert_eq!(json["holders"].as_array().unwrap().len(), 1);
    }
}
