// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use denaro::application::BankService;
use denaro::domain::Cents;

/// Helper to create a fresh in-memory bank service
pub fn test_service() -> BankService {
    BankService::new()
}

/// Test fixture: standard account setup
pub struct StandardAccounts;

impl StandardAccounts {
    /// Open a funded savings account, returning its number
    pub fn open_funded(service: &mut BankService, holder: &str, cents: Cents) -> Result<String> {
        let info = service.open_account(holder, "Savings", cents)?;
        Ok(info.number)
    }

    /// Open the usual two-account pair: Alice with 100.00, Bob with 50.00
    pub fn open_pair(service: &mut BankService) -> Result<(String, String)> {
        let alice = Self::open_funded(service, "Alice", 10_000)?;
        let bob = Self::open_funded(service, "Bob", 5_000)?;
        Ok((alice, bob))
    }
}
