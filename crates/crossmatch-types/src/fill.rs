//! Fill results produced by the settlement authority.
//!
//! [`MatchedFillResult`] is the output of a single cross-match of two
//! complementary orders; [`FillResult`] is the output of a single-order fill.

use serde::{Deserialize, Serialize};

use crate::{CrossmatchError, MatchId, Result};

/// The computed fills of one left/right cross-match.
///
/// All amounts are in the respective asset's smallest unit. The left maker
/// asset splits three ways: `right_filled_taker_amount` goes to the right
/// maker, `left_maker_asset_spread_amount` goes to the taker, and the sum of
/// the two is exactly `left_filled_maker_amount` (conservation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedFillResult {
    /// Invocation id stamped by the matching operation.
    pub match_id: MatchId,
    /// Left maker asset leaving the left maker.
    pub left_filled_maker_amount: u128,
    /// Left taker asset received by the left maker.
    pub left_filled_taker_amount: u128,
    /// Right maker asset leaving the right maker.
    pub right_filled_maker_amount: u128,
    /// Right taker asset received by the right maker.
    pub right_filled_taker_amount: u128,
    /// Left maker asset left over after the right leg consumed what it
    /// needs; held by the taker pending redistribution.
    pub left_maker_asset_spread_amount: u128,
}

impl MatchedFillResult {
    /// Returns `true` if the match produced a spread to redistribute.
    #[must_use]
    pub fn has_spread(&self) -> bool {
        self.left_maker_asset_spread_amount > 0
    }

    /// Conservation invariant: the left maker asset is fully accounted for.
    ///
    /// `left_filled_maker_amount == right_filled_taker_amount + spread`
    ///
    /// # Errors
    /// Returns [`CrossmatchError::ConservationViolation`] if the identity
    /// does not hold.
    pub fn verify_conservation(&self) -> Result<()> {
        let accounted = self
            .right_filled_taker_amount
            .checked_add(self.left_maker_asset_spread_amount)
            .ok_or(CrossmatchError::MathOverflow {
                context: "conservation sum".to_string(),
            })?;
        if self.left_filled_maker_amount != accounted {
            return Err(CrossmatchError::ConservationViolation {
                reason: format!(
                    "left maker asset not conserved: filled {} != right taker {} + spread {}",
                    self.left_filled_maker_amount,
                    self.right_filled_taker_amount,
                    self.left_maker_asset_spread_amount,
                ),
            });
        }
        Ok(())
    }
}

/// The computed fill of a single order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillResult {
    /// Maker asset transferred maker → taker.
    pub maker_asset_filled: u128,
    /// Taker asset transferred taker → maker.
    pub taker_asset_filled: u128,
}
