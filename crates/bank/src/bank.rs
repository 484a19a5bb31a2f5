//! The bank registry: customers, accounts and the transaction journal.

use chrono::{DateTime, Utc};
use serde::Serialize;

use desk_core::{DomainError, DomainResult, Entity, Registry};

use crate::account::{Account, AccountId, SavingsTerms};
use crate::customer::{Customer, CustomerId};
use crate::transaction::{Transaction, TransactionId, TransactionKind};

/// Source of transaction timestamps.
pub type Clock = fn() -> DateTime<Utc>;

/// Counts and totals across every account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankSummary {
    pub customers: usize,
    pub accounts: usize,
    pub checking: usize,
    pub savings: usize,
    pub total_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankStatistics {
    pub average: f64,
    pub highest: (AccountId, f64),
    pub lowest: (AccountId, f64),
}

#[derive(Debug, Clone)]
pub struct Bank {
    customers: Registry<Customer>,
    accounts: Registry<Account>,
    transactions: Registry<Transaction>,
    clock: Clock,
}

impl Default for Bank {
    fn default() -> Self {
        Self::with_clock(Utc::now)
    }
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank whose journal is stamped by `clock` instead of the system time.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            customers: Registry::new(),
            accounts: Registry::new(),
            transactions: Registry::new(),
            clock,
        }
    }

    pub fn create_customer(&mut self, name: impl Into<String>) -> CustomerId {
        let name = name.into();
        self.customers.create(|id| Customer::new(id, name))
    }

    pub fn open_checking(&mut self, owner: impl Into<String>, initial: f64) -> DomainResult<AccountId> {
        ensure_opening_balance(initial)?;
        let owner = owner.into();
        Ok(self
            .accounts
            .create(|id| Account::checking(id, owner, initial)))
    }

    pub fn open_savings(
        &mut self,
        owner: impl Into<String>,
        initial: f64,
        terms: SavingsTerms,
    ) -> DomainResult<AccountId> {
        ensure_opening_balance(initial)?;
        if !terms.annual_rate.is_finite() || terms.annual_rate < 0.0 {
            return Err(DomainError::validation("interest rate must not be negative"));
        }
        if !terms.withdrawal_limit.is_finite() || terms.withdrawal_limit <= 0.0 {
            return Err(DomainError::validation("withdrawal limit must be positive"));
        }
        let owner = owner.into();
        Ok(self
            .accounts
            .create(|id| Account::savings(id, owner, initial, terms)))
    }

    /// Attach `account` to `customer`. An account has at most one holder.
    pub fn assign_account(&mut self, customer: CustomerId, account: AccountId) -> DomainResult<()> {
        self.accounts.ensure(account)?;
        self.customers.ensure(customer)?;
        if let Some(holder) = self.customers.find_by(|c| c.owns(account)) {
            return Err(DomainError::rule(format!(
                "account {account} already belongs to customer {}",
                holder.id()
            )));
        }
        self.customers.require_mut(customer)?.add_account(account);
        Ok(())
    }

    pub fn deposit(&mut self, account: AccountId, amount: f64) -> DomainResult<TransactionId> {
        self.accounts.require_mut(account)?.deposit(amount)?;
        self.record(account, TransactionKind::Deposit, amount, None)
    }

    pub fn withdraw(&mut self, account: AccountId, amount: f64) -> DomainResult<TransactionId> {
        self.accounts.require_mut(account)?.withdraw(amount)?;
        self.record(account, TransactionKind::Withdrawal, amount, None)
    }

    /// Move `amount` from `from` to `to` under the source's withdrawal rules.
    ///
    /// Both accounts are resolved before either balance moves.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: f64) -> DomainResult<()> {
        if from == to {
            return Err(DomainError::validation("cannot transfer to the same account"));
        }
        self.accounts.ensure(from)?;
        self.accounts.require(to)?.credited(amount)?;

        self.accounts.require_mut(from)?.withdraw(amount)?;
        self.accounts.require_mut(to)?.deposit(amount)?;
        self.record(from, TransactionKind::Withdrawal, amount, Some(to))?;
        self.record(to, TransactionKind::Deposit, amount, Some(from))?;
        Ok(())
    }

    /// Credit one month of interest to every savings account.
    pub fn apply_interest_to_savings(&mut self) -> usize {
        let savings: Vec<AccountId> = self
            .accounts
            .iter()
            .filter(|a| a.is_savings())
            .map(Entity::id)
            .collect();

        let mut credited = 0;
        for id in savings {
            let Some(interest) = self.accounts.find_mut(id).and_then(Account::apply_interest) else {
                continue;
            };
            if self.record(id, TransactionKind::Interest, interest, None).is_ok() {
                credited += 1;
            }
        }
        credited
    }

    /// Month end: reset savings withdrawal counters, then pay interest.
    pub fn close_month(&mut self) -> usize {
        for account in self.accounts.iter_mut() {
            account.reset_month();
        }
        self.apply_interest_to_savings()
    }

    pub fn customer_total_balance(&self, customer: CustomerId) -> DomainResult<f64> {
        let customer = self.customers.require(customer)?;
        Ok(customer
            .accounts()
            .iter()
            .filter_map(|id| self.accounts.find(*id))
            .map(Account::balance)
            .sum())
    }

    pub fn summary(&self) -> BankSummary {
        let savings = self.accounts.iter().filter(|a| a.is_savings()).count();
        BankSummary {
            customers: self.customers.len(),
            accounts: self.accounts.len(),
            checking: self.accounts.len() - savings,
            savings,
            total_balance: self.accounts.iter().map(Account::balance).sum(),
        }
    }

    /// Balance statistics; `None` while no account exists.
    ///
    /// Ties go to the lowest account id.
    pub fn statistics(&self) -> Option<BankStatistics> {
        let mut accounts = self.accounts.iter();
        let first = accounts.next()?;
        let seed = (first.id(), first.balance());

        let (total, highest, lowest) = accounts.fold(
            (first.balance(), seed, seed),
            |(total, high, low), a| {
                let entry = (a.id(), a.balance());
                (
                    total + a.balance(),
                    if entry.1 > high.1 { entry } else { high },
                    if entry.1 < low.1 { entry } else { low },
                )
            },
        );

        Some(BankStatistics {
            average: total / self.accounts.len() as f64,
            highest,
            lowest,
        })
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.find(id)
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.find(id)
    }

    /// Journal entries for `account`, oldest first.
    pub fn transactions_for(&self, account: AccountId) -> DomainResult<Vec<&Transaction>> {
        let account = self.accounts.require(account)?;
        Ok(account
            .history()
            .iter()
            .filter_map(|id| self.transactions.find(*id))
            .collect())
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    fn record(
        &mut self,
        account: AccountId,
        kind: TransactionKind,
        amount: f64,
        counterparty: Option<AccountId>,
    ) -> DomainResult<TransactionId> {
        let at = (self.clock)();
        let id = self
            .transactions
            .create(|id| Transaction::new(id, account, kind, amount, counterparty, at));
        self.accounts.require_mut(account)?.record(id);
        Ok(id)
    }
}

fn ensure_opening_balance(initial: f64) -> DomainResult<()> {
    if !initial.is_finite() || initial < 0.0 {
        return Err(DomainError::validation("initial balance must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::MAX_MONTHLY_WITHDRAWALS;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    fn terms(annual_rate: f64, withdrawal_limit: f64) -> SavingsTerms {
        SavingsTerms {
            annual_rate,
            withdrawal_limit,
        }
    }

    fn balance(bank: &Bank, id: AccountId) -> f64 {
        bank.account(id).unwrap().balance()
    }

    #[test]
    fn savings_scenario_limit_then_monthly_cap() {
        let mut bank = Bank::with_clock(fixed_clock);
        let acct = bank
            .open_savings("Alice Johnson", 5000.0, terms(0.025, 500.0))
            .unwrap();

        let err = bank.withdraw(acct, 600.0).unwrap_err();
        assert!(matches!(err, DomainError::RuleViolation(_)));
        assert_eq!(balance(&bank, acct), 5000.0);

        for _ in 0..MAX_MONTHLY_WITHDRAWALS {
            bank.withdraw(acct, 400.0).unwrap();
        }
        assert!(bank.withdraw(acct, 400.0).is_err());
        assert_eq!(balance(&bank, acct), 2600.0);
        assert_eq!(bank.transactions_for(acct).unwrap().len(), 6);

        assert_eq!(bank.close_month(), 1);
        bank.withdraw(acct, 400.0).unwrap();
    }

    #[test]
    fn ids_are_sequential_per_registry() {
        let mut bank = Bank::new();
        assert_eq!(bank.create_customer("Alice Johnson"), CustomerId::new(1));
        assert_eq!(bank.open_checking("Alice Johnson", 1000.0), Ok(AccountId::new(1)));
        assert_eq!(
            bank.open_savings("Alice Johnson", 5000.0, SavingsTerms::default()),
            Ok(AccountId::new(2))
        );
        assert_eq!(bank.create_customer("Bob Smith"), CustomerId::new(2));
    }

    #[test]
    fn opening_rejects_bad_inputs() {
        let mut bank = Bank::new();
        assert!(bank.open_checking("X", -1.0).is_err());
        assert!(bank.open_savings("X", 10.0, terms(-0.1, 100.0)).is_err());
        assert!(bank.open_savings("X", 10.0, terms(0.02, 0.0)).is_err());
        assert_eq!(bank.accounts().count(), 0);
    }

    #[test]
    fn assign_requires_both_sides_and_a_single_holder() {
        let mut bank = Bank::new();
        let alice = bank.create_customer("Alice Johnson");
        let bob = bank.create_customer("Bob Smith");
        let acct = bank.open_checking("Alice Johnson", 1000.0).unwrap();

        assert_eq!(
            bank.assign_account(CustomerId::new(9), acct),
            Err(DomainError::not_found("customer", 9))
        );
        assert_eq!(
            bank.assign_account(alice, AccountId::new(9)),
            Err(DomainError::not_found("account", 9))
        );

        bank.assign_account(alice, acct).unwrap();
        assert!(matches!(
            bank.assign_account(bob, acct),
            Err(DomainError::RuleViolation(_))
        ));
        assert!(bank.assign_account(alice, acct).is_err());
        assert_eq!(bank.customer(alice).unwrap().accounts(), &[acct]);
        assert!(bank.customer(bob).unwrap().accounts().is_empty());
    }

    #[test]
    fn transfer_validates_before_moving_money() {
        let mut bank = Bank::with_clock(fixed_clock);
        let alice = bank.open_checking("Alice Johnson", 1000.0).unwrap();
        let bob = bank.open_checking("Bob Smith", 750.0).unwrap();

        assert_eq!(
            bank.transfer(alice, AccountId::new(99), 100.0),
            Err(DomainError::not_found("account", 99))
        );
        assert!(bank.transfer(alice, alice, 100.0).is_err());
        assert!(bank.transfer(bob, alice, 10_000.0).is_err());
        assert_eq!(balance(&bank, alice), 1000.0);
        assert_eq!(balance(&bank, bob), 750.0);

        bank.transfer(alice, bob, 100.0).unwrap();
        assert_eq!(balance(&bank, alice), 900.0);
        assert_eq!(balance(&bank, bob), 850.0);

        let sent = bank.transactions_for(alice).unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind(), TransactionKind::Withdrawal);
        assert_eq!(sent[0].counterparty(), Some(bob));
        assert_eq!(sent[0].at(), fixed_clock());

        let received = bank.transactions_for(bob).unwrap();
        assert_eq!(received[0].kind(), TransactionKind::Deposit);
        assert_eq!(received[0].counterparty(), Some(alice));
    }

    #[test]
    fn overflowing_credits_leave_both_sides_untouched() {
        let mut bank = Bank::with_clock(fixed_clock);
        let rich = bank.open_checking("Rich", f64::MAX).unwrap();
        let other = bank.open_checking("Other", f64::MAX / 2.0).unwrap();

        let err = bank.deposit(rich, f64::MAX).unwrap_err();
        assert!(matches!(err, DomainError::RuleViolation(_)));
        let err = bank.transfer(other, rich, f64::MAX / 2.0).unwrap_err();
        assert!(matches!(err, DomainError::RuleViolation(_)));
        assert_eq!(balance(&bank, rich), f64::MAX);
        assert_eq!(balance(&bank, other), f64::MAX / 2.0);
        assert!(bank.transactions_for(other).unwrap().is_empty());
        assert!(bank.transactions_for(rich).unwrap().is_empty());

        let capped = bank.open_savings("Capped", f64::MAX, terms(12.0, 500.0)).unwrap();
        assert_eq!(bank.apply_interest_to_savings(), 0);
        assert_eq!(balance(&bank, capped), f64::MAX);
    }

    #[test]
    fn lookups_of_unissued_ids_return_none() {
        let mut bank = Bank::new();
        assert!(bank.customer(CustomerId::new(1)).is_none());
        assert!(bank.account(AccountId::new(1)).is_none());

        let alice = bank.create_customer("Alice Johnson");
        let acct = bank.open_checking("Alice Johnson", 10.0).unwrap();
        assert!(bank.customer(alice).is_some());
        assert!(bank.account(acct).is_some());
        assert!(bank.customer(CustomerId::new(2)).is_none());
        assert!(bank.account(AccountId::new(2)).is_none());
        assert!(bank.customer(CustomerId::new(0)).is_none());
        assert_eq!(
            bank.transactions_for(AccountId::new(2)).unwrap_err(),
            DomainError::not_found("account", 2)
        );
    }

    #[test]
    fn interest_only_touches_savings() {
        let mut bank = Bank::new();
        let checking = bank.open_checking("Alice Johnson", 1000.0).unwrap();
        let savings = bank
            .open_savings("Alice Johnson", 6000.0, terms(0.025, 500.0))
            .unwrap();
        let charlie = bank
            .open_savings("Charlie Brown", 3000.0, terms(0.03, 300.0))
            .unwrap();

        assert_eq!(bank.apply_interest_to_savings(), 2);
        assert_eq!(balance(&bank, checking), 1000.0);
        assert!((balance(&bank, savings) - 6012.5).abs() < 1e-9);
        assert!((balance(&bank, charlie) - 3007.5).abs() < 1e-9);

        let journal = bank.transactions_for(savings).unwrap();
        assert_eq!(journal[0].kind(), TransactionKind::Interest);
        assert!(bank.transactions_for(checking).unwrap().is_empty());
    }

    #[test]
    fn summary_statistics_and_customer_totals() {
        let mut bank = Bank::new();
        assert_eq!(bank.statistics(), None);

        let alice = bank.create_customer("Alice Johnson");
        let a1 = bank.open_checking("Alice Johnson", 1000.0).unwrap();
        let a2 = bank
            .open_savings("Alice Johnson", 5000.0, terms(0.025, 500.0))
            .unwrap();
        let b1 = bank.open_checking("Bob Smith", 750.0).unwrap();
        bank.assign_account(alice, a1).unwrap();
        bank.assign_account(alice, a2).unwrap();

        assert_eq!(bank.customer_total_balance(alice), Ok(6000.0));
        assert!(bank.customer_total_balance(CustomerId::new(5)).is_err());

        let summary = bank.summary();
        assert_eq!(summary.customers, 1);
        assert_eq!(summary.accounts, 3);
        assert_eq!(summary.checking, 2);
        assert_eq!(summary.savings, 1);
        assert_eq!(summary.total_balance, 6750.0);

        let stats = bank.statistics().unwrap();
        assert_eq!(stats.average, 2250.0);
        assert_eq!(stats.highest, (a2, 5000.0));
        assert_eq!(stats.lowest, (b1, 750.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: a savings account never goes negative, never allows
        /// more than the monthly cap, and its balance always equals the
        /// opening balance plus the net of its journal.
        #[test]
        fn savings_withdrawals_respect_every_rule(
            opening in 0.0f64..2000.0,
            limit in 1.0f64..500.0,
            amounts in prop::collection::vec(-50.0f64..600.0, 0..20)
        ) {
            let mut bank = Bank::with_clock(fixed_clock);
            let acct = bank.open_savings("P", opening, terms(0.02, limit)).unwrap();

            for amount in amounts {
                let before = balance(&bank, acct);
                if bank.withdraw(acct, amount).is_ok() {
                    prop_assert!(amount > 0.0 && amount <= limit && amount <= before);
                } else {
                    prop_assert_eq!(balance(&bank, acct), before);
                }
                let policy = *bank.account(acct).unwrap().savings_policy().unwrap();
                prop_assert!(policy.withdrawals_this_month <= MAX_MONTHLY_WITHDRAWALS);
                prop_assert!(balance(&bank, acct) >= 0.0);
            }

            let withdrawn: f64 = bank
                .transactions_for(acct)
                .unwrap()
                .iter()
                .map(|t| t.amount())
                .sum();
            prop_assert!((opening - withdrawn - balance(&bank, acct)).abs() < 1e-6);
        }
    }
}
