use super::{Cents, Transaction, TransactionKind};

/// Per-kind totals over a transaction log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionTally {
    pub count: usize,
    pub deposit_cents: Cents,
    pub withdrawal_cents: Cents,
    pub transfer_cents: Cents,
}

/// Tally a transaction log by kind.
/// Transfer legs are not signed, so the transfer total counts both
/// incoming and outgoing legs at face value.
pub fn tally(transactions: &[Transaction]) -> TransactionTally {
    transactions.iter().fold(
        TransactionTally {
            count: transactions.len(),
            ..TransactionTally::default()
        },
        |mut totals, tx| {
            match tx.kind {
                TransactionKind::Deposit => totals.deposit_cents += tx.amount_cents,
                TransactionKind::Withdrawal => totals.withdrawal_cents += tx.amount_cents,
                TransactionKind::Transfer => totals.transfer_cents += tx.amount_cents,
            }
            totals
        },
    )
}
