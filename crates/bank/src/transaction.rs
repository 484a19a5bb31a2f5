use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use desk_core::{Entity, define_id};

use crate::account::AccountId;

define_id!(TransactionId, "TransactionId");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Interest,
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Interest => "Interest",
        })
    }
}

/// A journal line. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    account: AccountId,
    kind: TransactionKind,
    amount: f64,
    /// Other side of a transfer, if this line is one half of it.
    counterparty: Option<AccountId>,
    at: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn new(
        id: TransactionId,
        account: AccountId,
        kind: TransactionKind,
        amount: f64,
        counterparty: Option<AccountId>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            account,
            kind,
            amount,
            counterparty,
            at,
        }
    }

    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn counterparty(&self) -> Option<AccountId> {
        self.counterparty
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }
}

impl Entity for Transaction {
    type Id = TransactionId;
    const KIND: &'static str = "transaction";

    fn id(&self) -> TransactionId {
        self.id
    }
}
