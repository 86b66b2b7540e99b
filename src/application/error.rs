use thiserror::Error;

use crate::domain::{AccountOpError, Cents, format_cents};
use crate::storage::RegistryError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Account number already in use: {0}")]
    DuplicateAccount(String),

    #[error("Invalid amount: {} (amounts must be positive)", format_cents(*.amount_cents))]
    InvalidAmount { amount_cents: Cents },

    #[error(
        "Insufficient funds in account {number}: balance {}, requested {}",
        format_cents(*.balance_cents),
        format_cents(*.requested_cents)
    )]
    InsufficientFunds {
        number: String,
        balance_cents: Cents,
        requested_cents: Cents,
    },

    #[error("Cannot transfer from account {0} to itself")]
    SelfTransfer(String),
}

impl AppError {
    /// Attach the account number to an account-level failure.
    pub(crate) fn from_op(number: &str, err: AccountOpError) -> Self {
        match err {
            AccountOpError::InvalidAmount { amount_cents } => {
                AppError::InvalidAmount { amount_cents }
            }
            AccountOpError::InsufficientFunds {
                balance_cents,
                requested_cents,
            } => AppError::InsufficientFunds {
                number: number.to_string(),
                balance_cents,
                requested_cents,
            },
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(number) => AppError::AccountNotFound(number),
            RegistryError::DuplicateNumber(number) => AppError::DuplicateAccount(number),
        }
    }
}
