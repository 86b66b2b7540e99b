use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;

use crate::application::{BankService, HistoryReport};
use crate::domain::{Cents, format_cents, parse_cents};

/// Denaro - Interactive Bank Teller
#[derive(Parser)]
#[command(name = "denaro")]
#[command(about = "An interactive teller for a toy in-memory bank ledger")]
#[command(version)]
pub struct Cli {}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut service = BankService::new();
        let stdin = io::stdin().lock();
        run_menu_loop(&mut service, stdin)
    }
}

/// Blocking request/response loop: one menu choice, one operation, repeat.
/// Service failures are printed and the loop continues; only I/O failures
/// propagate. End of input behaves like the Exit option.
fn run_menu_loop(service: &mut BankService, mut input: impl BufRead) -> Result<()> {
    println!("Welcome to the denaro teller. All accounts live in memory only.");

    loop {
        print_menu();
        let Some(choice) = prompt(&mut input, "Enter your choice (1-9): ")? else {
            break;
        };

        match choice.as_str() {
            "1" => run_create_account(service, &mut input)?,
            "2" => run_account_info(service, &mut input)?,
            "3" => run_deposit(service, &mut input)?,
            "4" => run_withdraw(service, &mut input)?,
            "5" => run_transfer(service, &mut input)?,
            "6" => run_history(service, &mut input)?,
            "7" => run_list_accounts(service),
            "8" => run_close_account(service, &mut input)?,
            "9" => break,
            _ => println!("Invalid choice. Enter a number between 1 and 9."),
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn print_menu() {
    println!();
    println!("Bank teller menu");
    println!("{}", "-".repeat(32));
    println!("  1. Create account");
    println!("  2. View account information");
    println!("  3. Deposit money");
    println!("  4. Withdraw money");
    println!("  5. Transfer money");
    println!("  6. View transaction history");
    println!("  7. View all accounts");
    println!("  8. Delete account");
    println!("  9. Exit");
}

fn run_create_account(service: &mut BankService, input: &mut impl BufRead) -> Result<()> {
    let Some(holder) = prompt(input, "Account holder name: ")? else {
        return Ok(());
    };
    let Some(account_type) = prompt(input, "Account type (Savings/Checking/Business): ")? else {
        return Ok(());
    };
    let Some(initial_cents) = prompt_amount(input, "Initial balance (0 for none): ")? else {
        return Ok(());
    };

    match service.open_account(holder, account_type, initial_cents) {
        Ok(info) => {
            println!("Created account {} for {}", info.number, info.holder);
            println!("Balance: {}", format_cents(info.balance_cents));
        }
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn run_account_info(service: &BankService, input: &mut impl BufRead) -> Result<()> {
    let Some(number) = prompt(input, "Account number: ")? else {
        return Ok(());
    };

    match service.account_info(&number) {
        Ok(info) => {
            println!("Account: {}", info.number);
            println!("  Holder:        {}", info.holder);
            println!("  Type:          {}", info.account_type);
            println!("  Opened:        {}", info.opened_at.format("%Y-%m-%d %H:%M:%S"));
            println!("  Balance:       {}", format_cents(info.balance_cents));
            println!("  Transactions:  {}", info.transaction_count);
            if let Some(last) = info.last_activity {
                println!("  Last activity: {}", last.format("%Y-%m-%d %H:%M:%S"));
            }
        }
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn run_deposit(service: &mut BankService, input: &mut impl BufRead) -> Result<()> {
    let Some(number) = prompt(input, "Account number: ")? else {
        return Ok(());
    };
    let Some(amount_cents) = prompt_amount(input, "Deposit amount: ")? else {
        return Ok(());
    };

    match service.deposit(&number, amount_cents, None) {
        Ok(receipt) => println!(
            "Deposited {} into {} (balance: {})",
            format_cents(receipt.transaction.amount_cents),
            receipt.number,
            format_cents(receipt.balance_cents)
        ),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn run_withdraw(service: &mut BankService, input: &mut impl BufRead) -> Result<()> {
    let Some(number) = prompt(input, "Account number: ")? else {
        return Ok(());
    };
    let Some(amount_cents) = prompt_amount(input, "Withdrawal amount: ")? else {
        return Ok(());
    };

    match service.withdraw(&number, amount_cents, None) {
        Ok(receipt) => println!(
            "Withdrew {} from {} (balance: {})",
            format_cents(receipt.transaction.amount_cents),
            receipt.number,
            format_cents(receipt.balance_cents)
        ),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn run_transfer(service: &mut BankService, input: &mut impl BufRead) -> Result<()> {
    let Some(from) = prompt(input, "Source account number: ")? else {
        return Ok(());
    };
    let Some(to) = prompt(input, "Destination account number: ")? else {
        return Ok(());
    };
    let Some(amount_cents) = prompt_amount(input, "Transfer amount: ")? else {
        return Ok(());
    };

    match service.transfer(&from, &to, amount_cents, None) {
        Ok(receipt) => println!(
            "Transferred {} from {} ({}) to {} ({})",
            format_cents(receipt.amount_cents),
            receipt.from_holder,
            receipt.from_number,
            receipt.to_holder,
            receipt.to_number
        ),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn run_history(service: &BankService, input: &mut impl BufRead) -> Result<()> {
    let Some(number) = prompt(input, "Account number: ")? else {
        return Ok(());
    };

    match service.history_report(&number) {
        Ok(report) => print_history(&report),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn print_history(report: &HistoryReport) {
    if report.transactions.is_empty() {
        println!("No transactions yet for {}.", report.number);
        return;
    }

    println!(
        "{:<12} {:>12} {:<32} {}",
        "TYPE", "AMOUNT", "DESCRIPTION", "DATE"
    );
    println!("{}", "-".repeat(78));
    for tx in &report.transactions {
        println!(
            "{:<12} {:>12} {:<32} {}",
            tx.kind.label(),
            format_cents(tx.amount_cents),
            tx.description,
            tx.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
    }
    println!("{}", "-".repeat(78));
    println!(
        "{} transaction(s) | deposits {} | withdrawals {} | transfers {}",
        report.totals.count,
        format_cents(report.totals.deposit_cents),
        format_cents(report.totals.withdrawal_cents),
        format_cents(report.totals.transfer_cents)
    );
}

fn run_list_accounts(service: &BankService) {
    let accounts = service.list_accounts();
    if accounts.is_empty() {
        println!("No accounts yet.");
        return;
    }

    println!(
        "{:<12} {:<20} {:<12} {:>12}",
        "NUMBER", "HOLDER", "TYPE", "BALANCE"
    );
    println!("{}", "-".repeat(60));
    for account in accounts {
        println!(
            "{:<12} {:<20} {:<12} {:>12}",
            account.number,
            account.holder,
            account.account_type,
            format_cents(account.balance_cents)
        );
    }
}

fn run_close_account(service: &mut BankService, input: &mut impl BufRead) -> Result<()> {
    let Some(number) = prompt(input, "Account number to delete: ")? else {
        return Ok(());
    };

    match service.close_account(&number) {
        Ok(summary) => println!(
            "Deleted account {} ({}, balance {})",
            summary.number,
            summary.holder,
            format_cents(summary.balance_cents)
        ),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

/// Print a label and read one trimmed line. `None` means end of input.
fn prompt(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt for a decimal amount. `None` means end of input or an amount the
/// operator typed wrong; either way the current operation is abandoned.
fn prompt_amount(input: &mut impl BufRead, label: &str) -> Result<Option<Cents>> {
    let Some(raw) = prompt(input, label)? else {
        return Ok(None);
    };
    match parse_cents(&raw) {
        Ok(cents) => Ok(Some(cents)),
        Err(err) => {
            println!("Error: {err}. Use a plain amount like '50' or '50.00'.");
            Ok(None)
        }
    }
}
