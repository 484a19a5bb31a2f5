use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use desk_core::{DomainError, DomainResult, Entity, define_id};

use crate::transaction::TransactionId;

define_id!(AccountId, "AccountId");

/// Withdrawals a savings account allows per month.
pub const MAX_MONTHLY_WITHDRAWALS: u32 = 6;

/// Terms chosen when a savings account is opened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsTerms {
    /// Annual interest rate as a fraction (0.025 = 2.5%).
    pub annual_rate: f64,
    /// Largest single withdrawal allowed.
    pub withdrawal_limit: f64,
}

impl Default for SavingsTerms {
    fn default() -> Self {
        Self {
            annual_rate: 0.02,
            withdrawal_limit: 1000.0,
        }
    }
}

/// Savings restrictions plus the running monthly counter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsPolicy {
    pub annual_rate: f64,
    pub withdrawal_limit: f64,
    pub withdrawals_this_month: u32,
}

impl SavingsPolicy {
    fn new(terms: SavingsTerms) -> Self {
        Self {
            annual_rate: terms.annual_rate,
            withdrawal_limit: terms.withdrawal_limit,
            withdrawals_this_month: 0,
        }
    }

    /// Checks applied before the shared withdrawal rules.
    fn check(&self, amount: f64) -> DomainResult<()> {
        if self.withdrawals_this_month >= MAX_MONTHLY_WITHDRAWALS {
            return Err(DomainError::rule(format!(
                "exceeded monthly withdrawal limit ({MAX_MONTHLY_WITHDRAWALS}) for savings account"
            )));
        }
        if amount > self.withdrawal_limit {
            return Err(DomainError::rule(format!(
                "withdrawal amount exceeds limit of ${:.2}",
                self.withdrawal_limit
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum AccountKind {
    Checking,
    Savings(SavingsPolicy),
}

impl AccountKind {
    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Checking => "Checking Account",
            AccountKind::Savings(_) => "Savings Account",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    owner: String,
    balance: f64,
    kind: AccountKind,
    history: Vec<TransactionId>,
}

impl Account {
    pub(crate) fn new(id: AccountId, owner: String, balance: f64, kind: AccountKind) -> Self {
        Self {
            id,
            owner,
            balance,
            kind,
            history: Vec::new(),
        }
    }

    pub(crate) fn checking(id: AccountId, owner: String, balance: f64) -> Self {
        Self::new(id, owner, balance, AccountKind::Checking)
    }

    pub(crate) fn savings(id: AccountId, owner: String, balance: f64, terms: SavingsTerms) -> Self {
        Self::new(id, owner, balance, AccountKind::Savings(SavingsPolicy::new(terms)))
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn savings_policy(&self) -> Option<&SavingsPolicy> {
        match &self.kind {
            AccountKind::Savings(policy) => Some(policy),
            AccountKind::Checking => None,
        }
    }

    pub fn is_savings(&self) -> bool {
        self.savings_policy().is_some()
    }

    /// Transactions touching this account, oldest first.
    pub fn history(&self) -> &[TransactionId] {
        &self.history
    }

    /// Orders accounts by balance.
    pub fn compare_balance(&self, other: &Account) -> Ordering {
        self.balance.total_cmp(&other.balance)
    }

    /// Interest one month would earn at the current balance; zero for checking.
    pub fn monthly_interest(&self) -> f64 {
        match &self.kind {
            AccountKind::Savings(policy) => self.balance * (policy.annual_rate / 12.0),
            AccountKind::Checking => 0.0,
        }
    }

    /// Balance after crediting `amount`, without applying it.
    pub(crate) fn credited(&self, amount: f64) -> DomainResult<f64> {
        ensure_positive(amount, "deposit")?;
        let balance = self.balance + amount;
        if !balance.is_finite() {
            return Err(DomainError::rule("deposit would overflow the account balance"));
        }
        Ok(balance)
    }

    pub(crate) fn deposit(&mut self, amount: f64) -> DomainResult<()> {
        self.balance = self.credited(amount)?;
        Ok(())
    }

    /// Withdraw, honouring savings restrictions when present.
    ///
    /// Balance and counters are untouched on failure.
    pub(crate) fn withdraw(&mut self, amount: f64) -> DomainResult<()> {
        if let AccountKind::Savings(policy) = &self.kind {
            policy.check(amount)?;
        }

        ensure_positive(amount, "withdrawal")?;
        if amount > self.balance {
            return Err(DomainError::rule(format!(
                "insufficient funds: balance ${:.2}",
                self.balance
            )));
        }
        self.balance -= amount;

        if let AccountKind::Savings(policy) = &mut self.kind {
            policy.withdrawals_this_month += 1;
        }
        Ok(())
    }

    /// Credit one month of interest; returns the amount credited.
    ///
    /// `None` for checking accounts, or when the new balance would not be finite.
    pub(crate) fn apply_interest(&mut self) -> Option<f64> {
        if !self.is_savings() {
            return None;
        }
        let interest = self.monthly_interest();
        let balance = self.balance + interest;
        if !interest.is_finite() || !balance.is_finite() {
            return None;
        }
        self.balance = balance;
        Some(interest)
    }

    pub(crate) fn reset_month(&mut self) {
        if let AccountKind::Savings(policy) = &mut self.kind {
            policy.withdrawals_this_month = 0;
        }
    }

    pub(crate) fn record(&mut self, transaction: TransactionId) {
        self.history.push(transaction);
    }
}

fn ensure_positive(amount: f64, what: &str) -> DomainResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DomainError::validation(format!(
            "{what} amount must be positive"
        )));
    }
    Ok(())
}

impl Entity for Account {
    type Id = AccountId;
    const KIND: &'static str = "account";

    fn id(&self) -> AccountId {
        self.id
    }
}

impl core::fmt::Display for Account {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Account {} ({}): ${:.2}", self.id, self.owner, self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn savings(balance: f64, rate: f64, limit: f64) -> Account {
        Account::savings(
            AccountId::new(2),
            "Alice Johnson".to_string(),
            balance,
            SavingsTerms {
                annual_rate: rate,
                withdrawal_limit: limit,
            },
        )
    }

    #[test]
    fn checking_rejects_overdraft_and_non_positive_amounts() {
        let mut acct = Account::checking(AccountId::new(1), "Bob Smith".into(), 750.0);
        assert!(matches!(acct.withdraw(10_000.0), Err(DomainError::RuleViolation(_))));
        assert!(matches!(acct.withdraw(0.0), Err(DomainError::Validation(_))));
        assert!(matches!(acct.deposit(-5.0), Err(DomainError::Validation(_))));
        assert!(matches!(acct.deposit(f64::NAN), Err(DomainError::Validation(_))));
        assert_eq!(acct.balance(), 750.0);

        acct.withdraw(750.0).unwrap();
        assert_eq!(acct.balance(), 0.0);
    }

    #[test]
    fn balance_never_overflows_to_infinity() {
        let mut acct = Account::checking(AccountId::new(1), "X".into(), f64::MAX);
        assert!(matches!(acct.deposit(f64::MAX), Err(DomainError::RuleViolation(_))));
        assert_eq!(acct.balance(), f64::MAX);

        let mut saving = savings(f64::MAX, 12.0, 500.0);
        assert_eq!(saving.apply_interest(), None);
        assert_eq!(saving.balance(), f64::MAX);
    }

    #[test]
    fn savings_limit_is_checked_before_funds() {
        let mut acct = savings(5000.0, 0.025, 500.0);
        let err = acct.withdraw(600.0).unwrap_err();
        assert!(err.to_string().contains("exceeds limit of $500.00"));
        assert_eq!(acct.balance(), 5000.0);
        assert_eq!(acct.savings_policy().unwrap().withdrawals_this_month, 0);
    }

    #[test]
    fn savings_allows_exactly_six_withdrawals_a_month() {
        let mut acct = savings(5000.0, 0.025, 500.0);
        for _ in 0..MAX_MONTHLY_WITHDRAWALS {
            acct.withdraw(400.0).unwrap();
        }
        assert_eq!(acct.balance(), 2600.0);

        let err = acct.withdraw(400.0).unwrap_err();
        assert!(err.to_string().contains("monthly withdrawal limit"));
        assert_eq!(acct.balance(), 2600.0);
        assert_eq!(acct.savings_policy().unwrap().withdrawals_this_month, 6);

        acct.reset_month();
        acct.withdraw(400.0).unwrap();
        assert_eq!(acct.savings_policy().unwrap().withdrawals_this_month, 1);
    }

    #[test]
    fn failed_savings_withdrawal_does_not_count() {
        let mut acct = savings(100.0, 0.02, 1000.0);
        assert!(acct.withdraw(500.0).is_err());
        assert_eq!(acct.savings_policy().unwrap().withdrawals_this_month, 0);
    }

    #[test]
    fn monthly_interest_is_rate_over_twelve() {
        let mut acct = savings(6000.0, 0.025, 500.0);
        assert!((acct.monthly_interest() - 12.5).abs() < 1e-9);
        let credited = acct.apply_interest().unwrap();
        assert!((credited - 12.5).abs() < 1e-9);
        assert!((acct.balance() - 6012.5).abs() < 1e-9);

        let mut checking = Account::checking(AccountId::new(1), "Bob".into(), 100.0);
        assert_eq!(checking.apply_interest(), None);
        assert_eq!(checking.balance(), 100.0);
    }

    #[test]
    fn display_and_balance_ordering() {
        let checking = Account::checking(AccountId::new(1), "Alice Johnson".into(), 1050.0);
        let saving = savings(6000.0, 0.025, 500.0);
        assert_eq!(checking.to_string(), "Account 1 (Alice Johnson): $1050.00");
        assert_eq!(saving.compare_balance(&checking), Ordering::Greater);
        assert_eq!(checking.compare_balance(&checking), Ordering::Equal);
    }
}
