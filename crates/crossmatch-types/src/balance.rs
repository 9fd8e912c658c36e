//! Balance tracking types for the settlement authority's asset ledger.
//!
//! Every `(account, asset)` pair has an `available` balance and a standing
//! `approved` amount the authority may spend on the holder's behalf. The
//! approval is the escrow primitive: established once, persisting across
//! matches, decremented by every transfer it funds.

use serde::{Deserialize, Serialize};

/// A single ledger entry for an `(account, asset)` pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceEntry {
    /// Funds held by the account.
    pub available: u128,
    /// Remaining approval granted to the settlement authority. Not funds:
    /// an approval may exceed the balance, like any allowance scheme.
    pub approved: u128,
}

impl BalanceEntry {
    /// Create a zero entry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: 0,
            approved: 0,
        }
    }

    /// Whether this entry holds nothing and approves nothing.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.available == 0 && self.approved == 0
    }
}

impl Default for BalanceEntry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zero() {
        let entry = BalanceEntry::default();
        assert_eq!(entry.available, 0);
        assert_eq!(entry.approved, 0);
        assert!(entry.is_zero());
    }

    #[test]
    fn approval_without_balance_is_not_zero() {
        let entry = BalanceEntry {
            available: 0,
            approved: 100,
        };
        assert!(!entry.is_zero());
    }

    #[test]
    fn serde_roundtrip() {
        let entry = BalanceEntry {
            available: u128::MAX,
            approved: 7,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: BalanceEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }
}
