use chrono::{DateTime, Utc};

use crate::domain::{Account, Cents, Transaction, TransactionTally, tally};
use crate::storage::Registry;

use super::AppError;

/// Application service providing high-level operations for the bank.
/// This is the primary interface for any client (CLI, tests, a future TUI).
///
/// Every operation resolves its account by number at call time; no handle
/// into the registry survives past a single call, so a deleted account can
/// never be reached through a stale reference.
pub struct BankService {
    registry: Registry,
}

/// Snapshot of one account, detached from the registry.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    pub number: String,
    pub holder: String,
    pub account_type: String,
    pub balance_cents: Cents,
    pub opened_at: DateTime<Utc>,
    pub transaction_count: usize,
    pub last_activity: Option<DateTime<Utc>>,
}

/// One row of the all-accounts listing.
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub number: String,
    pub holder: String,
    pub account_type: String,
    pub balance_cents: Cents,
}

/// Result of a deposit or withdrawal.
#[derive(Debug, Clone)]
pub struct TransactionReceipt {
    pub number: String,
    pub transaction: Transaction,
    /// Balance after the operation
    pub balance_cents: Cents,
}

/// Result of a transfer between two accounts.
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub amount_cents: Cents,
    pub from_number: String,
    pub from_holder: String,
    pub to_number: String,
    pub to_holder: String,
    pub outgoing: Transaction,
    pub incoming: Transaction,
    /// Sender balance after the transfer
    pub from_balance_cents: Cents,
}

/// An account's transaction log plus per-kind totals.
#[derive(Debug, Clone)]
pub struct HistoryReport {
    pub number: String,
    pub transactions: Vec<Transaction>,
    pub totals: TransactionTally,
}

impl Default for BankService {
    fn default() -> Self {
        Self::new()
    }
}

impl BankService {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    // ========================
    // Account operations
    // ========================

    /// Open a new account, minting its number.
    ///
    /// A positive initial balance is recorded as a Deposit labeled
    /// "Initial deposit"; zero leaves the log empty; negative is rejected
    /// outright rather than silently creating a negative balance.
    pub fn open_account(
        &mut self,
        holder: impl Into<String>,
        account_type: impl Into<String>,
        initial_cents: Cents,
    ) -> Result<AccountInfo, AppError> {
        if initial_cents < 0 {
            return Err(AppError::InvalidAmount {
                amount_cents: initial_cents,
            });
        }

        let number = self.registry.mint_number();
        let mut account = Account::new(number.clone(), holder, account_type);
        if initial_cents > 0 {
            account
                .deposit(initial_cents, Some("Initial deposit"))
                .map_err(|err| AppError::from_op(&number, err))?;
        }

        let info = Self::info_of(&account);
        self.registry.insert(account)?;
        Ok(info)
    }

    /// Look up one account and return a detached snapshot.
    pub fn account_info(&self, number: &str) -> Result<AccountInfo, AppError> {
        self.resolve(number).map(Self::info_of)
    }

    /// Current balance of one account.
    pub fn balance(&self, number: &str) -> Result<Cents, AppError> {
        self.resolve(number).map(Account::balance)
    }

    /// List every account in ascending account-number order.
    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        self.registry.accounts().map(Self::summary_of).collect()
    }

    /// Close an account and return a summary of what was removed.
    /// The mint counter is untouched; the number is never reissued.
    pub fn close_account(&mut self, number: &str) -> Result<AccountSummary, AppError> {
        let account = self
            .registry
            .remove(number)
            .ok_or_else(|| AppError::AccountNotFound(number.to_string()))?;
        Ok(Self::summary_of(&account))
    }

    // ========================
    // Money movement
    // ========================

    /// Deposit into an account.
    pub fn deposit(
        &mut self,
        number: &str,
        amount_cents: Cents,
        description: Option<&str>,
    ) -> Result<TransactionReceipt, AppError> {
        let account = self
            .registry
            .get_mut(number)
            .ok_or_else(|| AppError::AccountNotFound(number.to_string()))?;

        let transaction = account
            .deposit(amount_cents, description)
            .map_err(|err| AppError::from_op(number, err))?;

        Ok(TransactionReceipt {
            number: number.to_string(),
            balance_cents: account.balance(),
            transaction,
        })
    }

    /// Withdraw from an account.
    pub fn withdraw(
        &mut self,
        number: &str,
        amount_cents: Cents,
        description: Option<&str>,
    ) -> Result<TransactionReceipt, AppError> {
        let account = self
            .registry
            .get_mut(number)
            .ok_or_else(|| AppError::AccountNotFound(number.to_string()))?;

        let transaction = account
            .withdraw(amount_cents, description)
            .map_err(|err| AppError::from_op(number, err))?;

        Ok(TransactionReceipt {
            number: number.to_string(),
            balance_cents: account.balance(),
            transaction,
        })
    }

    /// Move money between two distinct accounts.
    ///
    /// All preconditions are checked before the first mutation: both
    /// accounts must exist, the amount must be positive and covered by the
    /// sender. The outgoing leg applies first and can still fail those
    /// checks; the incoming leg cannot fail, so there is no observable
    /// state with only one side updated.
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        amount_cents: Cents,
        description: Option<&str>,
    ) -> Result<TransferReceipt, AppError> {
        if from == to {
            return Err(AppError::SelfTransfer(from.to_string()));
        }

        let (sender, recipient) = self.registry.pair_mut(from, to)?;

        let outgoing_description = match description.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format!("Transfer to {}", recipient.holder()),
        };
        let incoming_description = format!("Transfer from {}", sender.holder());

        let outgoing = sender
            .send_transfer(amount_cents, Some(&outgoing_description))
            .map_err(|err| AppError::from_op(from, err))?;
        let incoming = recipient.receive_transfer(amount_cents, &incoming_description);

        Ok(TransferReceipt {
            amount_cents,
            from_number: from.to_string(),
            from_holder: sender.holder().to_string(),
            to_number: to.to_string(),
            to_holder: recipient.holder().to_string(),
            from_balance_cents: sender.balance(),
            outgoing,
            incoming,
        })
    }

    // ========================
    // Reporting
    // ========================

    /// The transaction log of one account, oldest first.
    pub fn transaction_history(&self, number: &str) -> Result<Vec<Transaction>, AppError> {
        self.resolve(number)
            .map(|account| account.transactions().to_vec())
    }

    /// The transaction log plus per-kind totals.
    pub fn history_report(&self, number: &str) -> Result<HistoryReport, AppError> {
        let account = self.resolve(number)?;
        let transactions = account.transactions().to_vec();
        let totals = tally(&transactions);
        Ok(HistoryReport {
            number: number.to_string(),
            transactions,
            totals,
        })
    }

    fn resolve(&self, number: &str) -> Result<&Account, AppError> {
        self.registry
            .get(number)
            .ok_or_else(|| AppError::AccountNotFound(number.to_string()))
    }

    fn info_of(account: &Account) -> AccountInfo {
        AccountInfo {
            number: account.number().to_string(),
            holder: account.holder().to_string(),
            account_type: account.account_type().to_string(),
            balance_cents: account.balance(),
            opened_at: account.opened_at(),
            transaction_count: account.transactions().len(),
            last_activity: account.last_activity(),
        }
    }

    fn summary_of(account: &Account) -> AccountSummary {
        AccountSummary {
            number: account.number().to_string(),
            holder: account.holder().to_string(),
            account_type: account.account_type().to_string(),
            balance_cents: account.balance(),
        }
    }
}
