//! Asset ledger — balances and standing approvals per (account, asset).
//!
//! Fill settlement never moves funds directly: every transfer is a
//! `transfer_from` spending the sender's approval, so an account can only be
//! debited up to what it has explicitly approved. The approval is decremented
//! together with the balance, which is what makes it an escrow: each spread
//! fill consumes part of the matcher's pre-established approval.

use std::collections::HashMap;

use crossmatch_types::{AccountId, AssetId, BalanceEntry, CrossmatchError, Result};

/// Per-(account, asset) balance and approval store.
#[derive(Debug, Clone, Default)]
pub struct AssetLedger {
    entries: HashMap<(AccountId, AssetId), BalanceEntry>,
}

impl AssetLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Credit funds to an account. Creates the entry if needed.
    ///
    /// # Errors
    /// Returns [`CrossmatchError::MathOverflow`] if the balance would wrap.
    pub fn deposit(&mut self, account: AccountId, asset: &AssetId, amount: u128) -> Result<()> {
        let entry = self
            .entries
            .entry((account, asset.clone()))
            .or_insert_with(BalanceEntry::new);
        entry.available =
            entry
                .available
                .checked_add(amount)
                .ok_or(CrossmatchError::MathOverflow {
                    context: format!("deposit of {amount} {asset}"),
                })?;
        Ok(())
    }

    /// Debit funds from an account (exit from the system).
    ///
    /// # Errors
    /// Returns [`CrossmatchError::InsufficientBalance`] if the account holds
    /// less than `amount`.
    pub fn withdraw(&mut self, account: AccountId, asset: &AssetId, amount: u128) -> Result<()> {
        let entry = self
            .entries
            .get_mut(&(account, asset.clone()))
            .ok_or(CrossmatchError::InsufficientBalance {
                needed: amount,
                available: 0,
            })?;
        if entry.available < amount {
            return Err(CrossmatchError::InsufficientBalance {
                needed: amount,
                available: entry.available,
            });
        }
        entry.available -= amount;
        Ok(())
    }

    /// Set the standing approval the authority may spend for `account`.
    /// Overwrites any previous approval; may exceed the current balance.
    pub fn set_approval(&mut self, account: AccountId, asset: &AssetId, amount: u128) {
        let entry = self
            .entries
            .entry((account, asset.clone()))
            .or_insert_with(BalanceEntry::new);
        entry.approved = amount;
    }

    /// Move funds `from` → `to`, spending `from`'s approval.
    ///
    /// The approval check runs first so an unapproved transfer never reveals
    /// balance information. A zero transfer is a no-op.
    ///
    /// # Errors
    /// - [`CrossmatchError::InsufficientApproval`] if the remaining approval
    ///   is below `amount`
    /// - [`CrossmatchError::InsufficientBalance`] if the funds are missing
    pub fn transfer_from(
        &mut self,
        from: AccountId,
        to: AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        {
            let entry = self.entries.get_mut(&(from, asset.clone())).ok_or(
                CrossmatchError::InsufficientApproval {
                    needed: amount,
                    approved: 0,
                },
            )?;
            if entry.approved < amount {
                return Err(CrossmatchError::InsufficientApproval {
                    needed: amount,
                    approved: entry.approved,
                });
            }
            if entry.available < amount {
                return Err(CrossmatchError::InsufficientBalance {
                    needed: amount,
                    available: entry.available,
                });
            }
            entry.approved -= amount;
            entry.available -= amount;
        }
        let recipient = self
            .entries
            .entry((to, asset.clone()))
            .or_insert_with(BalanceEntry::new);
        recipient.available =
            recipient
                .available
                .checked_add(amount)
                .ok_or(CrossmatchError::MathOverflow {
                    context: format!("transfer of {amount} {asset}"),
                })?;
        Ok(())
    }

    /// The entry for an (account, asset) pair; zero if absent.
    #[must_use]
    pub fn entry(&self, account: AccountId, asset: &AssetId) -> BalanceEntry {
        self.entries
            .get(&(account, asset.clone()))
            .copied()
            .unwrap_or_default()
    }

    /// Sum of all accounts' available funds in `asset`.
    #[must_use]
    pub fn total_supply(&self, asset: &AssetId) -> u128 {
        self.entries
            .iter()
            .filter(|((_, a), _)| a == asset)
            .map(|(_, entry)| entry.available)
            .sum()
    }
}
