use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Cents, Transaction, TransactionKind};

/// A single bank account: one balance plus its append-only transaction log.
///
/// Fields are private so the `balance >= 0` invariant can only be touched
/// through the operations below; every operation either fully applies or
/// fails before any mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    number: String,
    holder: String,
    account_type: String,
    balance_cents: Cents,
    transactions: Vec<Transaction>,
    opened_at: DateTime<Utc>,
}

impl Account {
    /// Open an account with a zero balance and an empty log.
    /// Initial funding is a regular deposit recorded by the caller.
    pub fn new(
        number: impl Into<String>,
        holder: impl Into<String>,
        account_type: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            holder: holder.into(),
            account_type: account_type.into(),
            balance_cents: 0,
            transactions: Vec::new(),
            opened_at: Utc::now(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn account_type(&self) -> &str {
        &self.account_type
    }

    pub fn balance(&self) -> Cents {
        self.balance_cents
    }

    /// The transaction log, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Timestamp of the most recent transaction, if any.
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.transactions.last().map(|tx| tx.timestamp)
    }

    /// Increase the balance and append a Deposit record.
    /// An empty or missing description defaults to "Deposit".
    /// Returns a copy of the appended transaction.
    pub fn deposit(
        &mut self,
        amount_cents: Cents,
        description: Option<&str>,
    ) -> Result<Transaction, AccountOpError> {
        if amount_cents <= 0 {
            return Err(AccountOpError::InvalidAmount { amount_cents });
        }
        Ok(self.record(TransactionKind::Deposit, amount_cents, description))
    }

    /// Decrease the balance and append a Withdrawal record.
    /// An empty or missing description defaults to "Withdrawal".
    pub fn withdraw(
        &mut self,
        amount_cents: Cents,
        description: Option<&str>,
    ) -> Result<Transaction, AccountOpError> {
        if amount_cents <= 0 {
            return Err(AccountOpError::InvalidAmount { amount_cents });
        }
        if amount_cents > self.balance_cents {
            return Err(AccountOpError::InsufficientFunds {
                balance_cents: self.balance_cents,
                requested_cents: amount_cents,
            });
        }
        Ok(self.record(TransactionKind::Withdrawal, amount_cents, description))
    }

    /// Outgoing leg of a transfer: validated like a withdrawal, logged as a
    /// Transfer. The registry pairs this with `receive_transfer` on the
    /// recipient so both legs land or neither does.
    pub fn send_transfer(
        &mut self,
        amount_cents: Cents,
        description: Option<&str>,
    ) -> Result<Transaction, AccountOpError> {
        if amount_cents <= 0 {
            return Err(AccountOpError::InvalidAmount { amount_cents });
        }
        if amount_cents > self.balance_cents {
            return Err(AccountOpError::InsufficientFunds {
                balance_cents: self.balance_cents,
                requested_cents: amount_cents,
            });
        }
        Ok(self.record(TransactionKind::Transfer, amount_cents, description))
    }

    /// Incoming leg of a transfer. The amount must already be validated by
    /// the sending side, so this cannot fail.
    pub fn receive_transfer(&mut self, amount_cents: Cents, description: &str) -> Transaction {
        self.balance_cents += amount_cents;
        let tx = Transaction::new(TransactionKind::Transfer, amount_cents, description);
        self.transactions.push(tx.clone());
        tx
    }

    fn record(
        &mut self,
        kind: TransactionKind,
        amount_cents: Cents,
        description: Option<&str>,
    ) -> Transaction {
        match kind {
            TransactionKind::Deposit => self.balance_cents += amount_cents,
            TransactionKind::Withdrawal | TransactionKind::Transfer => {
                self.balance_cents -= amount_cents
            }
        }
        let description = match description.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => kind.default_description(),
        };
        let tx = Transaction::new(kind, amount_cents, description);
        self.transactions.push(tx.clone());
        tx
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountOpError {
    InvalidAmount {
        amount_cents: Cents,
    },
    InsufficientFunds {
        balance_cents: Cents,
        requested_cents: Cents,
    },
}

impl std::fmt::Display for AccountOpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountOpError::InvalidAmount { amount_cents } => {
                write!(f, "amount must be positive, got {} cents", amount_cents)
            }
            AccountOpError::InsufficientFunds {
                balance_cents,
                requested_cents,
            } => {
                write!(
                    f,
                    "insufficient funds: balance {} cents, requested {} cents",
                    balance_cents, requested_cents
                )
            }
        }
    }
}

impl std::error::Error for AccountOpError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account::new("ACC1001", "Alice", "Savings")
    }

    #[test]
    fn test_new_account_is_empty() {
        let account = sample_account();
        assert_eq!(account.balance(), 0);
        assert!(account.transactions().is_empty());
        assert!(account.last_activity().is_none());
    }

    #[test]
    fn test_deposit_updates_balance_and_log() {
        let mut account = sample_account();
        account.deposit(5000, None).unwrap();

        assert_eq!(account.balance(), 5000);
        assert_eq!(account.transactions().len(), 1);
        let tx = &account.transactions()[0];
        assert_eq!(tx.kind, TransactionKind::Deposit);
        assert_eq!(tx.amount_cents, 5000);
        assert_eq!(tx.description, "Deposit");
    }

    #[test]
    fn test_deposit_blank_description_defaults() {
        let mut account = sample_account();
        account.deposit(100, Some("   ")).unwrap();
        assert_eq!(account.transactions()[0].description, "Deposit");
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let mut account = sample_account();
        assert_eq!(
            account.deposit(0, None).unwrap_err(),
            AccountOpError::InvalidAmount { amount_cents: 0 }
        );
        assert_eq!(
            account.deposit(-100, None).unwrap_err(),
            AccountOpError::InvalidAmount { amount_cents: -100 }
        );
        assert_eq!(account.balance(), 0);
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_withdraw_updates_balance_and_log() {
        let mut account = sample_account();
        account.deposit(5000, None).unwrap();
        account.withdraw(1200, Some("Groceries")).unwrap();

        assert_eq!(account.balance(), 3800);
        assert_eq!(account.transactions().len(), 2);
        let tx = &account.transactions()[1];
        assert_eq!(tx.kind, TransactionKind::Withdrawal);
        assert_eq!(tx.description, "Groceries");
    }

    #[test]
    fn test_withdraw_insufficient_funds_leaves_state_untouched() {
        let mut account = sample_account();
        account.deposit(1000, None).unwrap();

        let err = account.withdraw(1001, None).unwrap_err();
        assert_eq!(
            err,
            AccountOpError::InsufficientFunds {
                balance_cents: 1000,
                requested_cents: 1001,
            }
        );
        assert_eq!(account.balance(), 1000);
        assert_eq!(account.transactions().len(), 1);
    }

    #[test]
    fn test_withdraw_exact_balance_is_allowed() {
        let mut account = sample_account();
        account.deposit(1000, None).unwrap();
        account.withdraw(1000, None).unwrap();
        assert_eq!(account.balance(), 0);
    }

    #[test]
    fn test_transfer_legs() {
        let mut sender = sample_account();
        let mut recipient = Account::new("ACC1002", "Bob", "Checking");
        sender.deposit(5000, None).unwrap();

        sender.send_transfer(2000, Some("Transfer to Bob")).unwrap();
        recipient.receive_transfer(2000, "Transfer from Alice");

        assert_eq!(sender.balance(), 3000);
        assert_eq!(recipient.balance(), 2000);
        assert_eq!(sender.transactions()[1].kind, TransactionKind::Transfer);
        assert_eq!(
            recipient.transactions()[0].description,
            "Transfer from Alice"
        );
    }

    #[test]
    fn test_send_transfer_insufficient_funds() {
        let mut sender = sample_account();
        sender.deposit(100, None).unwrap();

        assert!(matches!(
            sender.send_transfer(200, None),
            Err(AccountOpError::InsufficientFunds { .. })
        ));
        assert_eq!(sender.balance(), 100);
    }

    #[test]
    fn test_log_preserves_insertion_order() {
        let mut account = sample_account();
        account.deposit(300, Some("first")).unwrap();
        account.withdraw(100, Some("second")).unwrap();
        account.deposit(50, Some("third")).unwrap();

        let descriptions: Vec<_> = account
            .transactions()
            .iter()
            .map(|tx| tx.description.as_str())
            .collect();
        assert_eq!(descriptions, ["first", "second", "third"]);
    }
}
