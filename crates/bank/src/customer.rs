use serde::{Deserialize, Serialize};

use desk_core::{Entity, define_id};

use crate::account::AccountId;

define_id!(CustomerId, "CustomerId");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    accounts: Vec<AccountId>,
}

impl Customer {
    pub(crate) fn new(id: CustomerId, name: String) -> Self {
        Self {
            id,
            name,
            accounts: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accounts(&self) -> &[AccountId] {
        &self.accounts
    }

    pub fn owns(&self, account: AccountId) -> bool {
        self.accounts.contains(&account)
    }

    pub(crate) fn add_account(&mut self, account: AccountId) {
        self.accounts.push(account);
    }
}

impl Entity for Customer {
    type Id = CustomerId;
    const KIND: &'static str = "customer";

    fn id(&self) -> CustomerId {
        self.id
    }
}
