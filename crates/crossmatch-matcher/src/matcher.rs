//! Operator-gated order matcher with atomic spread redistribution.

use std::sync::Arc;

use crossmatch_authority::SettlementAuthority;
use crossmatch_types::{
    AccountId, AssetId, CrossmatchError, MatchedFillResult, MatcherConfig, Order, Result,
    Signature,
};

/// Matches complementary order pairs on behalf of a single operator and
/// captures the spread into its own ledger account.
pub struct OrderMatcher {
    authority: Arc<SettlementAuthority>,
    config: MatcherConfig,
}

impl OrderMatcher {
    #[must_use]
    pub fn new(authority: Arc<SettlementAuthority>, config: MatcherConfig) -> Self {
        Self { authority, config }
    }

    /// The only identity allowed to drive this matcher.
    #[must_use]
    pub fn operator(&self) -> AccountId {
        self.config.operator
    }

    /// The matcher's own ledger account (spread custody).
    #[must_use]
    pub fn account(&self) -> AccountId {
        self.config.account
    }

    /// Cross-match a complementary pair and redistribute any spread.
    ///
    /// The right order's asset fields are overwritten with the complements
    /// of the left's before submission. A caller holding a genuinely
    /// non-complementary right order therefore submits data the maker never
    /// signed, and the authority rejects it as `InvalidSignature` — the
    /// mismatch can never settle silently.
    ///
    /// Both phases run inside one authority transaction: if the secondary
    /// spread fill fails, the primary match is discarded with it.
    ///
    /// # Errors
    /// - [`CrossmatchError::Unauthorized`] if `caller` is not the operator
    /// - any validation or ledger error from the primary match
    /// - [`CrossmatchError::SpreadFillFailed`] carrying the authority's
    ///   reason verbatim if the secondary fill fails
    pub fn match_orders(
        &self,
        caller: AccountId,
        left: &Order,
        mut right: Order,
        left_signature: &Signature,
        right_signature: &Signature,
    ) -> Result<MatchedFillResult> {
        self.require_operator(caller)?;

        right.maker_asset = left.taker_asset.clone();
        right.taker_asset = left.maker_asset.clone();

        let taker = self.config.account;
        self.authority.transact(|txn| {
            let result =
                txn.match_orders(left, &right, left_signature, right_signature, taker)?;

            let spread = result.left_maker_asset_spread_amount;
            if spread > 0 && txn.remaining_taker_amount(&right) > 0 {
                // Continuation fill against the same order identity; its
                // authenticity was anchored by the primary match, so the
                // signature is empty by construction.
                if let Err(err) = txn.fill_order(&right, spread, &Signature::empty(), taker) {
                    tracing::warn!(
                        match_id = %result.match_id,
                        right = %right.key(),
                        error = %err,
                        "Spread fill failed; aborting the whole match"
                    );
                    return Err(CrossmatchError::SpreadFillFailed {
                        reason: err.to_string(),
                    });
                }
            }

            tracing::info!(
                match_id = %result.match_id,
                left = %left.key(),
                right = %right.key(),
                spread,
                "Match complete"
            );
            Ok(result)
        })
    }

    /// Establish the standing approval funding future spread fills.
    /// Operator only; out of the per-match hot path.
    ///
    /// # Errors
    /// [`CrossmatchError::Unauthorized`] for a non-operator caller.
    pub fn set_asset_approval(
        &self,
        caller: AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> Result<()> {
        self.require_operator(caller)?;
        self.authority
            .set_approval(self.config.account, asset, amount);
        Ok(())
    }

    /// Withdraw accumulated spread custody from the matcher's account.
    ///
    /// # Errors
    /// `Unauthorized` for a non-operator caller; `InsufficientBalance` if
    /// the custody does not cover `amount`.
    pub fn withdraw_spread(&self, caller: AccountId, asset: &AssetId, amount: u128) -> Result<()> {
        self.require_operator(caller)?;
        self.authority.withdraw(self.config.account, asset, amount)
    }

    fn require_operator(&self, caller: AccountId) -> Result<()> {
        if caller != self.config.operator {
            return Err(CrossmatchError::Unauthorized {
                reason: format!("caller {caller} is not the designated operator"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossmatch_types::{AuthorityConfig, ExchangeId};

    fn setup() -> (Arc<SettlementAuthority>, OrderMatcher) {
        let authority = Arc::new(SettlementAuthority::new(AuthorityConfig::new(ExchangeId(
            [3u8; 32],
        ))));
        let matcher = OrderMatcher::new(
            Arc::clone(&authority),
            MatcherConfig {
                operator: AccountId([1u8; 32]),
                account: AccountId([2u8; 32]),
            },
        );
        (authority, matcher)
    }

    #[test]
    fn non_operator_is_rejected_before_any_work() {
        let (_, matcher) = setup();
        let stranger = AccountId([7u8; 32]);
        let left = Order::dummy(
            AccountId([4u8; 32]),
            "X",
            "Y",
            5,
            10,
            ExchangeId([3u8; 32]),
        );
        let right = Order::dummy(
            AccountId([5u8; 32]),
            "Y",
            "X",
            10,
            2,
            ExchangeId([3u8; 32]),
        );
        let err = matcher
            .match_orders(
                stranger,
                &left,
                right,
                &Signature::empty(),
                &Signature::empty(),
            )
            .unwrap_err();
        assert!(matches!(err, CrossmatchError::Unauthorized { .. }));
    }

    #[test]
    fn approval_setup_is_operator_gated() {
        let (authority, matcher) = setup();
        let asset = AssetId::new("X");
        let err = matcher
            .set_asset_approval(AccountId([7u8; 32]), &asset, 100)
            .unwrap_err();
        assert!(matches!(err, CrossmatchError::Unauthorized { .. }));

        matcher
            .set_asset_approval(matcher.operator(), &asset, 100)
            .unwrap();
        assert_eq!(authority.balance(matcher.account(), &asset).approved, 100);
    }

    #[test]
    fn spread_withdrawal_is_operator_gated() {
        let (authority, matcher) = setup();
        let asset = AssetId::new("X");
        authority.deposit(matcher.account(), &asset, 5).unwrap();

        let err = matcher
            .withdraw_spread(AccountId([7u8; 32]), &asset, 5)
            .unwrap_err();
        assert!(matches!(err, CrossmatchError::Unauthorized { .. }));

        matcher
            .withdraw_spread(matcher.operator(), &asset, 5)
            .unwrap();
        assert_eq!(authority.balance(matcher.account(), &asset).available, 0);
    }
}
