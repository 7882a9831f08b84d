//! Ledger Aggregate
//!
//! Owns every client and account, keyed by id. All mutations go through
//! here so the client/account holder links always change together.
//!
//! Every operation validates first and writes last: a rejected call leaves
//! the ledger untouched and is logged through [`LedgerError::log`].

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::application::config::LedgerConfig;
use crate::domain::entity::{Account, Client, Transaction};
use crate::domain::services::{self, TransferPlan};
use crate::domain::value_object::amount::RawAmount;
use crate::domain::value_object::client_name::ClientName;
use crate::domain::value_object::{AccountId, ClientId};
use crate::error::{LedgerError, LedgerResult};

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    config: LedgerConfig,
    clients: HashMap<ClientId, Client>,
    accounts: HashMap<AccountId, Account>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Clients and accounts
    // ------------------------------------------------------------------------

    /// Register a client; both names must be non-empty after trimming
    pub fn register_client(
        &mut self,
        first_name: impl AsRef<str>,
        last_name: impl AsRef<str>,
    ) -> LedgerResult<ClientId> {
        let name = ClientName::new(first_name, last_name)
            .map_err(LedgerError::from)
            .inspect_err(LedgerError::log)?;
        let client = Client::new(name);
        let client_id = client.id();

        tracing::info!(%client_id, name = %client.name(), "Client registered");
        self.clients.insert(client_id, client);
        Ok(client_id)
    }

    /// Open an account with `holder` as its first holder and a zero balance
    pub fn open_account(&mut self, holder: Option<ClientId>) -> LedgerResult<AccountId> {
        self.try_open_account(holder).inspect_err(LedgerError::log)
    }

    fn try_open_account(&mut self, holder: Option<ClientId>) -> LedgerResult<AccountId> {
        let holder = holder.ok_or(LedgerError::ZeroHolders)?;
        let client = self
            .clients
            .get_mut(&holder)
            .ok_or(LedgerError::UnknownClient(holder))?;

        let account = Account::new(holder);
        let account_id = account.id();
        client.grant_access(account_id);
        self.accounts.insert(account_id, account);

        tracing::info!(%account_id, %holder, "Account opened");
        Ok(account_id)
    }

    // ------------------------------------------------------------------------
    // Balances
    // ------------------------------------------------------------------------

    /// Deposit on behalf of a holder; returns the new balance
    pub fn deposit(
        &mut self,
        account_id: AccountId,
        client_id: ClientId,
        amount: impl Into<RawAmount>,
    ) -> LedgerResult<Decimal> {
        let balance = self
            .account_mut(account_id)
            .and_then(|account| account.deposit(&client_id, amount))
            .inspect_err(LedgerError::log)?;

        tracing::info!(%account_id, %client_id, %balance, "Deposit applied");
        Ok(balance)
    }

    /// Withdraw on behalf of a holder; returns the new balance
    pub fn withdraw(
        &mut self,
        account_id: AccountId,
        client_id: ClientId,
        amount: impl Into<RawAmount>,
    ) -> LedgerResult<Decimal> {
        let balance = self
            .account_mut(account_id)
            .and_then(|account| account.withdraw(&client_id, amount))
            .inspect_err(LedgerError::log)?;

        tracing::info!(%account_id, %client_id, %balance, "Withdrawal applied");
        Ok(balance)
    }

    // ------------------------------------------------------------------------
    // Holders
    // ------------------------------------------------------------------------

    /// Make `client_id` a holder of `account_id`
    pub fn add_holder(&mut self, account_id: AccountId, client_id: ClientId) -> LedgerResult<()> {
        self.link_holder(account_id, client_id)
            .inspect_err(LedgerError::log)?;

        tracing::info!(%account_id, %client_id, "Holder added");
        Ok(())
    }

    /// Remove `client_id` from the holders of `account_id`
    ///
    /// The last holder of an account cannot be removed.
    pub fn remove_holder(
        &mut self,
        account_id: AccountId,
        client_id: ClientId,
    ) -> LedgerResult<()> {
        self.unlink_holder(account_id, client_id)
            .inspect_err(LedgerError::log)?;

        tracing::info!(%account_id, %client_id, "Holder removed");
        Ok(())
    }

    fn link_holder(&mut self, account_id: AccountId, client_id: ClientId) -> LedgerResult<()> {
        let account = self
            .accounts
            .get_mut(&account_id)
            .ok_or(LedgerError::UnknownAccount(account_id))?;
        let client = self
            .clients
            .get_mut(&client_id)
            .ok_or(LedgerError::UnknownClient(client_id))?;

        account.attach_holder(client_id)?;
        client.grant_access(account_id);
        Ok(())
    }

    fn unlink_holder(&mut self, account_id: AccountId, client_id: ClientId) -> LedgerResult<()> {
        let account = self
            .accounts
            .get_mut(&account_id)
            .ok_or(LedgerError::UnknownAccount(account_id))?;
        let client = self
            .clients
            .get_mut(&client_id)
            .ok_or(LedgerError::UnknownClient(client_id))?;

        account.detach_holder(&client_id)?;
        client.revoke_access(&account_id);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------------

    /// Validate a transfer and return it as a pending transaction
    ///
    /// Nothing moves until the transaction is executed.
    pub fn transaction(
        &self,
        sender: ClientId,
        sender_account: AccountId,
        receiver: ClientId,
        receiver_account: AccountId,
        amount: impl Into<RawAmount>,
    ) -> LedgerResult<Transaction> {
        let build = || -> LedgerResult<Transaction> {
            let from = self.account_ref(sender_account)?;
            let to = self.account_ref(receiver_account)?;
            let amount = services::validate_transfer(&sender, from, &receiver, to, amount)?;
            Ok(Transaction::new(
                sender,
                sender_account,
                receiver,
                receiver_account,
                amount,
            ))
        };
        let transaction = build().inspect_err(LedgerError::log)?;

        tracing::debug!(
            transaction_id = %transaction.id(),
            %sender_account,
            %receiver_account,
            amount = %transaction.amount(),
            "Transaction validated"
        );
        Ok(transaction)
    }

    /// Move the money of a pending transaction
    ///
    /// Fails with `ExecutedTransaction` on a second call. Under the default
    /// [`ExecutionPolicy::Revalidate`](crate::ExecutionPolicy::Revalidate)
    /// holders and the sender balance are checked again; a failure leaves
    /// the transaction pending.
    pub fn execute(&mut self, transaction: &mut Transaction) -> LedgerResult<()> {
        let plan = self
            .plan_execution(transaction)
            .inspect_err(LedgerError::log)?;

        self.account_mut(transaction.sender_account())?
            .set_balance(plan.sender_balance);
        self.account_mut(transaction.receiver_account())?
            .set_balance(plan.receiver_balance);
        transaction.mark_executed()?;

        tracing::info!(
            transaction_id = %transaction.id(),
            sender_account = %transaction.sender_account(),
            receiver_account = %transaction.receiver_account(),
            amount = %transaction.amount(),
            "Transaction executed"
        );
        Ok(())
    }

    fn plan_execution(&self, transaction: &Transaction) -> LedgerResult<TransferPlan> {
        transaction.ensure_pending()?;
        let from = self.account_ref(transaction.sender_account())?;
        let to = self.account_ref(transaction.receiver_account())?;

        if self.config.execution_policy.revalidates() {
            services::revalidate_transfer(transaction, from, to)?;
        }
        services::plan_transfer(from, to, &transaction.amount())
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn client(&self, client_id: ClientId) -> Option<&Client> {
        self.clients.get(&client_id)
    }

    pub fn account(&self, account_id: AccountId) -> Option<&Account> {
        self.accounts.get(&account_id)
    }

    pub fn balance(&self, account_id: AccountId) -> LedgerResult<Decimal> {
        self.account_ref(account_id).map(Account::balance)
    }

    pub fn holders_of(&self, account_id: AccountId) -> LedgerResult<&[ClientId]> {
        self.account_ref(account_id).map(Account::holders)
    }

    pub fn accounts_of(&self, client_id: ClientId) -> LedgerResult<&[AccountId]> {
        self.clients
            .get(&client_id)
            .map(Client::accessible_accounts)
            .ok_or(LedgerError::UnknownClient(client_id))
    }

    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.clients.values()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Whether every holder link is recorded on both sides
    pub fn holder_links_consistent(&self) -> bool {
        let accounts_agree = self.accounts.values().all(|account| {
            !account.holders().is_empty()
                && account.holders().iter().all(|holder| {
                    self.clients
                        .get(holder)
                        .is_some_and(|client| client.has_access(&account.id()))
                })
        });
        let clients_agree = self.clients.values().all(|client| {
            client.accessible_accounts().iter().all(|account_id| {
                self.accounts
                    .get(account_id)
                    .is_some_and(|account| account.is_holder(&client.id()))
            })
        });
        accounts_agree && clients_agree
    }

    fn account_ref(&self, account_id: AccountId) -> LedgerResult<&Account> {
        self.accounts
            .get(&account_id)
            .ok_or(LedgerError::UnknownAccount(account_id))
    }

    fn account_mut(&mut self, account_id: AccountId) -> LedgerResult<&mut Account> {
        self.accounts
            .get_mut(&account_id)
            .ok_or(LedgerError::UnknownAccount(account_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::ExecutionPolicy;
    use crate::domain::value_object::amount::MoneyOperation;
    use rust_decimal_macros::dec;

    struct Fixture {
        ledger: Ledger,
        anastasia: ClientId,
        maria: ClientId,
        savings: AccountId,
        checking: AccountId,
    }

    fn fixture(config: LedgerConfig) -> Fixture {
        let mut ledger = Ledger::with_config(config);
        let anastasia = ledger.register_client("Anastasia", "Kukanova").unwrap();
        let maria = ledger.register_client("Maria", "Petrova").unwrap();
        let savings = ledger.open_account(Some(anastasia)).unwrap();
        let checking = ledger.open_account(Some(maria)).unwrap();
        ledger.deposit(savings, anastasia, 1000).unwrap();
        Fixture {
            ledger,
            anastasia,
            maria,
            savings,
            checking,
        }
    }

    #[test]
    fn test_register_client_rejects_empty_name() {
        let mut ledger = Ledger::new();
        let err = ledger.register_client("", "Kukanova").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidClientName(_)));
        assert_eq!(ledger.clients().count(), 0);
    }

    #[test]
    fn test_open_account_links_both_sides() {
        let mut ledger = Ledger::new();
        let client = ledger.register_client("Anastasia", "Kukanova").unwrap();
        let account = ledger.open_account(Some(client)).unwrap();

        assert_eq!(ledger.holders_of(account).unwrap(), &[client]);
        assert_eq!(ledger.accounts_of(client).unwrap(), &[account]);
        assert_eq!(ledger.balance(account).unwrap().to_string(), "0.00");
        assert!(ledger.holder_links_consistent());
    }

    #[test]
    fn test_open_account_without_holder() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.open_account(None), Err(LedgerError::ZeroHolders));

        let ghost = ClientId::new();
        assert_eq!(
            ledger.open_account(Some(ghost)),
            Err(LedgerError::UnknownClient(ghost))
        );
        assert_eq!(ledger.accounts().count(), 0);
    }

    #[test]
    fn test_unknown_account() {
        let mut f = fixture(LedgerConfig::default());
        let ghost = AccountId::new();
        assert_eq!(
            f.ledger.deposit(ghost, f.anastasia, 10),
            Err(LedgerError::UnknownAccount(ghost))
        );
        assert_eq!(
            f.ledger.balance(ghost),
            Err(LedgerError::UnknownAccount(ghost))
        );
        assert!(f.ledger.account(ghost).is_none());
    }

    #[test]
    fn test_add_and_remove_holder() {
        let mut f = fixture(LedgerConfig::default());

        f.ledger.add_holder(f.savings, f.maria).unwrap();
        assert_eq!(f.ledger.holders_of(f.savings).unwrap(), &[f.anastasia, f.maria]);
        assert_eq!(f.ledger.accounts_of(f.maria).unwrap(), &[f.checking, f.savings]);
        assert!(f.ledger.holder_links_consistent());

        // a joint holder can spend
        assert_eq!(f.ledger.withdraw(f.savings, f.maria, 100).unwrap(), dec!(900.00));

        f.ledger.remove_holder(f.savings, f.anastasia).unwrap();
        assert_eq!(f.ledger.holders_of(f.savings).unwrap(), &[f.maria]);
        assert!(f.ledger.accounts_of(f.anastasia).unwrap().is_empty());
        assert!(f.ledger.holder_links_consistent());
    }

    #[test]
    fn test_add_holder_twice() {
        let mut f = fixture(LedgerConfig::default());
        assert_eq!(
            f.ledger.add_holder(f.savings, f.anastasia),
            Err(LedgerError::AlreadyHolder {
                client: f.anastasia,
                account: f.savings
            })
        );
        assert_eq!(f.ledger.accounts_of(f.anastasia).unwrap(), &[f.savings]);
    }

    #[test]
    fn test_add_holder_unknown_parties() {
        let mut f = fixture(LedgerConfig::default());
        let ghost = ClientId::new();
        assert_eq!(
            f.ledger.add_holder(f.savings, ghost),
            Err(LedgerError::UnknownClient(ghost))
        );
        assert_eq!(f.ledger.holders_of(f.savings).unwrap(), &[f.anastasia]);
    }

    #[test]
    fn test_remove_holder_errors() {
        let mut f = fixture(LedgerConfig::default());
        assert!(matches!(
            f.ledger.remove_holder(f.savings, f.maria),
            Err(LedgerError::NotHolder { .. })
        ));
        assert_eq!(
            f.ledger.remove_holder(f.savings, f.anastasia),
            Err(LedgerError::ZeroHolders)
        );
        assert!(f.ledger.holder_links_consistent());
    }

    #[test]
    fn test_transaction_does_not_move_money_until_executed() {
        let f = fixture(LedgerConfig::default());
        let tx = f
            .ledger
            .transaction(f.anastasia, f.savings, f.maria, f.checking, 500)
            .unwrap();

        assert!(!tx.is_executed());
        assert_eq!(f.ledger.balance(f.savings).unwrap(), dec!(1000.00));
        assert_eq!(f.ledger.balance(f.checking).unwrap(), dec!(0.00));
    }

    #[test]
    fn test_transaction_unknown_account_first() {
        let f = fixture(LedgerConfig::default());
        let ghost = AccountId::new();
        assert_eq!(
            f.ledger
                .transaction(f.maria, ghost, f.maria, f.checking, 500)
                .unwrap_err(),
            LedgerError::UnknownAccount(ghost)
        );
    }

    #[test]
    fn test_execute_moves_money() {
        let mut f = fixture(LedgerConfig::default());
        let mut tx = f
            .ledger
            .transaction(f.anastasia, f.savings, f.maria, f.checking, 250.555)
            .unwrap();

        f.ledger.execute(&mut tx).unwrap();
        assert!(tx.is_executed());
        assert!(tx.executed_at().is_some());
        assert_eq!(f.ledger.balance(f.savings).unwrap().to_string(), "749.45");
        assert_eq!(f.ledger.balance(f.checking).unwrap().to_string(), "250.55");
    }

    #[test]
    fn test_execute_twice() {
        let mut f = fixture(LedgerConfig::default());
        let mut tx = f
            .ledger
            .transaction(f.anastasia, f.savings, f.maria, f.checking, 500)
            .unwrap();
        tx.execute(&mut f.ledger).unwrap();

        assert_eq!(
            tx.execute(&mut f.ledger),
            Err(LedgerError::ExecutedTransaction(tx.id()))
        );
        assert_eq!(f.ledger.balance(f.savings).unwrap(), dec!(500.00));
        assert_eq!(f.ledger.balance(f.checking).unwrap(), dec!(500.00));
    }

    #[test]
    fn test_revalidation_rejects_spent_balance() {
        let mut f = fixture(LedgerConfig::default());
        let mut tx = f
            .ledger
            .transaction(f.anastasia, f.savings, f.maria, f.checking, 800)
            .unwrap();
        f.ledger.withdraw(f.savings, f.anastasia, 500).unwrap();

        assert_eq!(
            f.ledger.execute(&mut tx),
            Err(LedgerError::BalanceExceeded {
                operation: MoneyOperation::Transaction,
                requested: dec!(800.00),
                available: dec!(500.00),
            })
        );
        assert!(!tx.is_executed());
        assert_eq!(f.ledger.balance(f.savings).unwrap(), dec!(500.00));
        assert_eq!(f.ledger.balance(f.checking).unwrap(), dec!(0.00));

        // topping up makes the same transaction executable again
        f.ledger.deposit(f.savings, f.anastasia, 300).unwrap();
        f.ledger.execute(&mut tx).unwrap();
        assert_eq!(f.ledger.balance(f.savings).unwrap(), dec!(0.00));
    }

    #[test]
    fn test_revalidation_rejects_removed_holder() {
        let mut f = fixture(LedgerConfig::default());
        f.ledger.add_holder(f.savings, f.maria).unwrap();
        let mut tx = f
            .ledger
            .transaction(f.anastasia, f.savings, f.maria, f.checking, 100)
            .unwrap();
        f.ledger.remove_holder(f.savings, f.anastasia).unwrap();

        assert!(matches!(
            f.ledger.execute(&mut tx),
            Err(LedgerError::NotHolder { client, .. }) if client == f.anastasia
        ));
        assert!(!tx.is_executed());
    }

    #[test]
    fn test_trusting_policy_executes_as_validated() {
        let mut f = fixture(LedgerConfig::trusting());
        assert_eq!(
            f.ledger.config().execution_policy,
            ExecutionPolicy::AsValidated
        );
        let mut tx = f
            .ledger
            .transaction(f.anastasia, f.savings, f.maria, f.checking, 800)
            .unwrap();
        f.ledger.withdraw(f.savings, f.anastasia, 500).unwrap();

        f.ledger.execute(&mut tx).unwrap();
        assert_eq!(f.ledger.balance(f.savings).unwrap(), dec!(-300.00));
        assert_eq!(f.ledger.balance(f.checking).unwrap(), dec!(800.00));
    }

    #[test]
    fn test_transaction_from_other_ledger() {
        let f = fixture(LedgerConfig::default());
        let mut tx = f
            .ledger
            .transaction(f.anastasia, f.savings, f.maria, f.checking, 100)
            .unwrap();

        let mut other = Ledger::new();
        assert_eq!(
            other.execute(&mut tx),
            Err(LedgerError::UnknownAccount(f.savings))
        );
        assert!(!tx.is_executed());
    }
}
