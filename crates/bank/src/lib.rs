//! Bank-account domain module.
//!
//! Customers, checking and savings accounts, and the transaction journal,
//! implemented as deterministic domain logic. Transaction timestamps come
//! from an injectable [`Clock`].

pub mod account;
pub mod bank;
pub mod customer;
pub mod transaction;

pub use account::{
    Account, AccountId, AccountKind, MAX_MONTHLY_WITHDRAWALS, SavingsPolicy, SavingsTerms,
};
pub use bank::{Bank, BankStatistics, BankSummary, Clock};
pub use customer::{Customer, CustomerId};
pub use transaction::{Transaction, TransactionId, TransactionKind};
