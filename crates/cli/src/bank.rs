//! Bank menu and renderers.

use std::io::{BufRead, Write};

use desk_bank::{Account, AccountId, AccountKind, Bank, Customer, CustomerId, SavingsTerms, Transaction};
use desk_core::{DomainError, Entity};

use crate::menu::{Menu, Outcome, listing, money};
use crate::prompt::{Prompt, PromptError};

pub struct BankMenu {
    bank: Bank,
}

impl BankMenu {
    pub fn new(bank: Bank) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }
}

impl Menu for BankMenu {
    const NAME: &'static str = "bank";
    const TITLE: &'static str = "BANK ACCOUNT MANAGEMENT MENU";
    const OPTIONS: &'static [&'static str] = &[
        "Create Customer",
        "Open Checking Account",
        "Open Savings Account",
        "Assign Account to Customer",
        "Deposit",
        "Withdraw",
        "Transfer",
        "Apply Interest to Savings",
        "Perform Monthly Operations",
        "Show All Customers",
        "Show All Accounts",
        "Show Account Transactions",
        "System Summary",
        "System Statistics",
    ];

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: usize,
        prompt: &mut Prompt<R, W>,
    ) -> Result<Outcome, PromptError> {
        match choice {
            1 => {
                let name = prompt.text("Enter customer name: ")?;
                let id = self.bank.create_customer(name);
                tracing::info!(entity = "customer", %id, "customer created");
                Ok(Ok(format!("Customer created with ID: {id}")))
            }
            2 => self.open_checking(prompt),
            3 => self.open_savings(prompt),
            4 => {
                let customer = prompt.value::<CustomerId>("Enter customer ID: ")?;
                let account = prompt.value::<AccountId>("Enter account number: ")?;
                Ok(self.bank.assign_account(customer, account).map(|()| {
                    tracing::info!(entity = "customer", id = %customer, %account, "account assigned");
                    format!("Account {account} assigned to customer {customer}")
                }))
            }
            5 => self.deposit(prompt),
            6 => self.withdraw(prompt),
            7 => self.transfer(prompt),
            8 => {
                let count = self.bank.apply_interest_to_savings();
                tracing::info!(entity = "account", count, "interest applied");
                Ok(Ok(format!("Interest applied to {count} savings accounts.")))
            }
            9 => {
                let count = self.bank.close_month();
                tracing::info!(entity = "account", count, "month closed");
                Ok(Ok(format!(
                    "Withdrawal counters reset; interest applied to {count} savings accounts."
                )))
            }
            10 => Ok(Ok(listing(self.bank.customers(), "No customers in the system.", |c| {
                customer_card(&self.bank, c)
            }))),
            11 => Ok(Ok(listing(self.bank.accounts(), "No accounts in the system.", account_card))),
            12 => {
                let account = prompt.value::<AccountId>("Enter account number: ")?;
                Ok(self.bank.transactions_for(account).map(|journal| {
                    listing(journal, "No transactions", transaction_line)
                }))
            }
            13 => Ok(Ok(self.summary())),
            14 => Ok(Ok(self.statistics())),
            other => Ok(Err(DomainError::validation(format!("no menu option {other}")))),
        }
    }
}

impl BankMenu {
    fn open_checking<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let owner = p.text("Enter owner name: ")?;
        let initial = p.value::<f64>("Enter initial balance: $")?;
        Ok(self.bank.open_checking(owner, initial).map(|id| {
            tracing::info!(entity = "account", %id, "checking account opened");
            format!("Checking account opened with number: {id}")
        }))
    }

    fn open_savings<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let owner = p.text("Enter owner name: ")?;
        let initial = p.value::<f64>("Enter initial balance: $")?;
        let defaults = SavingsTerms::default();
        let annual_rate = p
            .optional::<f64>(&format!(
                "Enter annual interest rate as a fraction (blank for {}): ",
                defaults.annual_rate
            ))?
            .unwrap_or(defaults.annual_rate);
        let withdrawal_limit = p
            .optional::<f64>(&format!(
                "Enter per-withdrawal limit (blank for {}): $",
                defaults.withdrawal_limit
            ))?
            .unwrap_or(defaults.withdrawal_limit);

        let terms = SavingsTerms {
            annual_rate,
            withdrawal_limit,
        };
        Ok(self.bank.open_savings(owner, initial, terms).map(|id| {
            tracing::info!(entity = "account", %id, "savings account opened");
            format!("Savings account opened with number: {id}")
        }))
    }

    fn deposit<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let account = p.value::<AccountId>("Enter account number: ")?;
        let amount = p.value::<f64>("Enter amount: $")?;
        Ok(self.bank.deposit(account, amount).map(|_| {
            tracing::info!(entity = "account", id = %account, amount, "deposit");
            format!("Deposited {} to account {account}", money(amount))
        }))
    }

    fn withdraw<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let account = p.value::<AccountId>("Enter account number: ")?;
        let amount = p.value::<f64>("Enter amount: $")?;
        Ok(self.bank.withdraw(account, amount).map(|_| {
            tracing::info!(entity = "account", id = %account, amount, "withdrawal");
            format!("Withdrew {} from account {account}", money(amount))
        }))
    }

    fn transfer<R: BufRead, W: Write>(&mut self, p: &mut Prompt<R, W>) -> Result<Outcome, PromptError> {
        let from = p.value::<AccountId>("Enter source account number: ")?;
        let to = p.value::<AccountId>("Enter destination account number: ")?;
        let amount = p.value::<f64>("Enter amount: $")?;
        Ok(self.bank.transfer(from, to, amount).map(|()| {
            tracing::info!(entity = "account", id = %from, %to, amount, "transfer");
            format!(
                "Transfer successful: {} from account {from} to account {to}",
                money(amount)
            )
        }))
    }

    fn summary(&self) -> String {
        let summary = self.bank.summary();
        format!(
            "=== BANKING SYSTEM SUMMARY ===\nTotal Customers: {}\nTotal Accounts: {}\n\
             Regular Accounts: {}\nSavings Accounts: {}\nTotal System Balance: {}",
            summary.customers,
            summary.accounts,
            summary.checking,
            summary.savings,
            money(summary.total_balance)
        )
    }

    fn statistics(&self) -> String {
        match self.bank.statistics() {
            None => "No accounts in the system for statistics.".to_string(),
            Some(stats) => format!(
                "=== SYSTEM STATISTICS ===\nAverage Account Balance: {}\n\
                 Highest Balance: {} (Account #{})\nLowest Balance: {} (Account #{})",
                money(stats.average),
                money(stats.highest.1),
                stats.highest.0,
                money(stats.lowest.1),
                stats.lowest.0
            ),
        }
    }
}

fn customer_card(bank: &Bank, customer: &Customer) -> String {
    let total = bank.customer_total_balance(customer.id()).unwrap_or_default();
    let mut lines = vec![
        format!("Customer ID: {}", customer.id()),
        format!("Name: {}", customer.name()),
        format!("Total Accounts: {}", customer.accounts().len()),
        format!("Total Balance: {}", money(total)),
    ];
    lines.extend(
        customer
            .accounts()
            .iter()
            .filter_map(|id| bank.account(*id))
            .map(|account| format!("  {account}")),
    );
    lines.join("\n")
}

fn account_card(account: &Account) -> String {
    let mut lines = vec![
        format!("Account Number: {}", account.id()),
        format!("Owner: {}", account.owner()),
        format!("Balance: {}", money(account.balance())),
        format!("Account Type: {}", account.kind().label()),
    ];
    if let AccountKind::Savings(policy) = account.kind() {
        lines.push(format!("Interest Rate: {:.2}%", policy.annual_rate * 100.0));
        lines.push(format!("Withdrawal Limit: {}", money(policy.withdrawal_limit)));
        lines.push(format!(
            "Withdrawals This Month: {}/{}",
            policy.withdrawals_this_month,
            desk_bank::MAX_MONTHLY_WITHDRAWALS
        ));
    }
    lines.join("\n")
}

fn transaction_line(tx: &Transaction) -> String {
    let counterparty = match tx.counterparty() {
        Some(other) => format!(" (transfer with account {other})"),
        None => String::new(),
    };
    format!(
        "#{} {} - {} at {}{counterparty}",
        tx.id(),
        tx.kind(),
        money(tx.amount()),
        tx.at().format("%Y-%m-%d %H:%M:%S")
    )
}
