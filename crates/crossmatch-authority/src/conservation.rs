//! Supply conservation invariant checker.
//!
//! Mathematical invariant enforced over the asset ledger:
//! ```text
//! ∀ asset: Σ available == Σ(deposits) - Σ(withdrawals)
//! ```
//! Matching and fills only move funds between accounts; if this identity
//! ever breaks, value was created or destroyed inside the authority.

use std::collections::HashMap;

use crossmatch_types::{AssetId, CrossmatchError, Result};

/// Tracks per-asset deposit/withdrawal totals and validates conservation.
#[derive(Debug, Clone, Default)]
pub struct SupplyTracker {
    /// Total deposits per asset since genesis.
    deposits: HashMap<AssetId, u128>,
    /// Total withdrawals per asset since genesis.
    withdrawals: HashMap<AssetId, u128>,
}

impl SupplyTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            deposits: HashMap::new(),
            withdrawals: HashMap::new(),
        }
    }

    pub fn record_deposit(&mut self, asset: &AssetId, amount: u128) {
        *self.deposits.entry(asset.clone()).or_insert(0) += amount;
    }

    pub fn record_withdrawal(&mut self, asset: &AssetId, amount: u128) {
        *self.withdrawals.entry(asset.clone()).or_insert(0) += amount;
    }

    /// Expected total supply for an asset: deposits - withdrawals.
    #[must_use]
    pub fn expected_supply(&self, asset: &AssetId) -> u128 {
        let deposited = self.deposits.get(asset).copied().unwrap_or(0);
        let withdrawn = self.withdrawals.get(asset).copied().unwrap_or(0);
        deposited.saturating_sub(withdrawn)
    }

    /// Verify that the actual supply matches the expected supply.
    ///
    /// # Errors
    /// Returns [`CrossmatchError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, asset: &AssetId, actual_supply: u128) -> Result<()> {
        let expected = self.expected_supply(asset);
        if actual_supply != expected {
            return Err(CrossmatchError::SupplyInvariantViolation {
                reason: format!(
                    "asset {asset}: actual supply {actual_supply} != expected {expected} \
                     (deposits={}, withdrawals={})",
                    self.deposits.get(asset).copied().unwrap_or(0),
                    self.withdrawals.get(asset).copied().unwrap_or(0),
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weth() -> AssetId {
        AssetId::new("WETH")
    }

    #[test]
    fn empty_supply_is_zero() {
        let tracker = SupplyTracker::new();
        assert_eq!(tracker.expected_supply(&weth()), 0);
        assert!(tracker.verify(&weth(), 0).is_ok());
    }

    #[test]
    fn deposits_and_withdrawals_net_out() {
        let mut tracker = SupplyTracker::new();
        tracker.record_deposit(&weth(), 10);
        tracker.record_deposit(&weth(), 5);
        tracker.record_withdrawal(&weth(), 3);
        assert_eq!(tracker.expected_supply(&weth()), 12);
        assert!(tracker.verify(&weth(), 12).is_ok());
    }

    #[test]
    fn verify_fails_when_imbalanced() {
        let mut tracker = SupplyTracker::new();
        tracker.record_deposit(&weth(), 10);
        let err = tracker.verify(&weth(), 11).unwrap_err();
        assert!(matches!(
            err,
            CrossmatchError::SupplyInvariantViolation { .. }
        ));
    }

    #[test]
    fn assets_tracked_independently() {
        let mut tracker = SupplyTracker::new();
        tracker.record_deposit(&weth(), 5);
        tracker.record_deposit(&AssetId::new("DAI"), 1000);
        assert_eq!(tracker.expected_supply(&weth()), 5);
        assert_eq!(tracker.expected_supply(&AssetId::new("DAI")), 1000);
    }
}
