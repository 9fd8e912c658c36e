//! Global fill-state ledger keyed by order identity.
//!
//! Stores the cumulative filled taker-asset amount per [`OrderKey`] plus the
//! set of cancelled orders. This ledger is what makes a second match against
//! an exhausted order fail with `OrderUnfillable` instead of silently
//! no-opping, and what lets a signature-less continuation fill bind to an
//! order whose authenticity was already established.

use std::collections::{HashMap, HashSet};

use crossmatch_types::{CrossmatchError, Order, OrderKey, Result};

/// Cumulative fill state per order identity.
#[derive(Debug, Clone, Default)]
pub struct FillLedger {
    /// Filled taker-asset amount per order.
    filled: HashMap<OrderKey, u128>,
    /// Orders cancelled by their maker.
    cancelled: HashSet<OrderKey>,
}

impl FillLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            filled: HashMap::new(),
            cancelled: HashSet::new(),
        }
    }

    /// Cumulative filled taker-asset amount for an order.
    #[must_use]
    pub fn filled_amount(&self, key: &OrderKey) -> u128 {
        self.filled.get(key).copied().unwrap_or(0)
    }

    /// Taker-asset amount still fillable for `order`.
    #[must_use]
    pub fn remaining_taker_amount(&self, order: &Order) -> u128 {
        order
            .taker_amount
            .saturating_sub(self.filled_amount(&order.key()))
    }

    /// Record an executed fill.
    ///
    /// # Errors
    /// Returns [`CrossmatchError::MathOverflow`] if the cumulative amount
    /// would wrap.
    pub fn record_fill(&mut self, key: OrderKey, taker_amount: u128) -> Result<()> {
        let entry = self.filled.entry(key).or_insert(0);
        *entry = entry
            .checked_add(taker_amount)
            .ok_or(CrossmatchError::MathOverflow {
                context: format!("cumulative fill for {key}"),
            })?;
        Ok(())
    }

    /// Mark an order cancelled. Cancellation is permanent.
    ///
    /// # Errors
    /// Returns [`CrossmatchError::OrderUnfillable`] if already cancelled.
    pub fn cancel(&mut self, key: OrderKey) -> Result<()> {
        if !self.cancelled.insert(key) {
            return Err(CrossmatchError::OrderUnfillable {
                order: key,
                reason: "already cancelled".to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn is_cancelled(&self, key: &OrderKey) -> bool {
        self.cancelled.contains(key)
    }
}
