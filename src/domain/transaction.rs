use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type TransactionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money entering the account from outside
    Deposit,
    /// Money leaving the account to outside
    Withdrawal,
    /// Money moved between two accounts of this bank (either leg)
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::Transfer => "transfer",
        }
    }

    /// Default description used when the caller supplies none.
    pub fn default_description(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Transfer => "Transfer",
        }
    }

    /// Title-case label for table rendering.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Transfer => "Transfer",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single balance-affecting event in an account's log.
/// Transactions are immutable: created once, appended to exactly one
/// account's log, never edited or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    /// Amount in cents (always positive)
    pub amount_cents: Cents,
    pub description: String,
    /// When the event was recorded
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount_cents: Cents, description: impl Into<String>) -> Self {
        assert!(amount_cents > 0, "Transaction amount must be positive");
        Self {
            id: Uuid::new_v4(),
            kind,
            amount_cents,
            description: description.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_transaction() {
        let tx = Transaction::new(TransactionKind::Deposit, 5000, "Paycheck");

        assert_eq!(tx.kind, TransactionKind::Deposit);
        assert_eq!(tx.amount_cents, 5000);
        assert_eq!(tx.description, "Paycheck");
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(TransactionKind::Deposit.as_str(), "deposit");
        assert_eq!(TransactionKind::Withdrawal.label(), "Withdrawal");
        assert_eq!(TransactionKind::Transfer.default_description(), "Transfer");
    }

    #[test]
    #[should_panic(expected = "Transaction amount must be positive")]
    fn test_transaction_requires_positive_amount() {
        Transaction::new(TransactionKind::Withdrawal, 0, "bogus");
    }
}
