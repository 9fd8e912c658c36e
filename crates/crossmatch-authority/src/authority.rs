//! The settlement authority: atomic execution of matches and fills.
//!
//! All state lives behind one mutex and every operation runs through
//! [`SettlementAuthority::transact`]: the lock is held for the whole
//! invocation and the operation executes against a working copy that is
//! committed only on success. A failing operation leaves the committed state
//! untouched, which is the atomicity guarantee the matcher's two-phase
//! execution relies on.

use std::sync::{Mutex, PoisonError};

use crossmatch_types::{
    AccountId, AssetId, AuthorityConfig, BalanceEntry, CrossmatchError, ExchangeId, FillResult,
    MatchedFillResult, Order, OrderKey, Result, Signature,
};

use crate::conservation::SupplyTracker;
use crate::fills::FillLedger;
use crate::ledger::AssetLedger;
use crate::matching::{derive_matched_fill, partial_amount_floor};
use crate::verifier::{Ed25519Verifier, SignatureVerifier};

/// The complete mutable state of one authority instance.
#[derive(Debug, Clone, Default)]
struct AuthorityState {
    ledger: AssetLedger,
    fills: FillLedger,
    supply: SupplyTracker,
}

/// System of record for order validation, fill computation, and asset
/// transfers. One instance per [`ExchangeId`].
pub struct SettlementAuthority {
    config: AuthorityConfig,
    verifier: Box<dyn SignatureVerifier>,
    state: Mutex<AuthorityState>,
}

impl SettlementAuthority {
    /// New authority with strict ed25519 signature verification.
    #[must_use]
    pub fn new(config: AuthorityConfig) -> Self {
        Self::with_verifier(config, Box::new(Ed25519Verifier))
    }

    /// New authority with a caller-supplied verifier implementation.
    #[must_use]
    pub fn with_verifier(config: AuthorityConfig, verifier: Box<dyn SignatureVerifier>) -> Self {
        Self {
            config,
            verifier,
            state: Mutex::new(AuthorityState::default()),
        }
    }

    /// This instance's identity.
    #[must_use]
    pub fn exchange(&self) -> ExchangeId {
        self.config.exchange
    }

    /// Run `op` as one atomic unit. The state lock is held for the whole
    /// invocation; the working copy is committed only if `op` succeeds.
    ///
    /// # Errors
    /// Whatever `op` returns; on error no state change persists.
    pub fn transact<T>(&self, op: impl FnOnce(&mut AuthorityTxn<'_>) -> Result<T>) -> Result<T> {
        let mut committed = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut working = committed.clone();
        let outcome = {
            let mut txn = AuthorityTxn {
                config: &self.config,
                verifier: self.verifier.as_ref(),
                state: &mut working,
            };
            op(&mut txn)
        };
        match outcome {
            Ok(value) => {
                *committed = working;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }

    /// Cross-match two complementary orders as a standalone atomic operation.
    ///
    /// # Errors
    /// See [`AuthorityTxn::match_orders`].
    pub fn match_orders(
        &self,
        left: &Order,
        right: &Order,
        left_signature: &Signature,
        right_signature: &Signature,
        taker: AccountId,
    ) -> Result<MatchedFillResult> {
        self.transact(|txn| txn.match_orders(left, right, left_signature, right_signature, taker))
    }

    /// Fill a single order as a standalone atomic operation.
    ///
    /// # Errors
    /// See [`AuthorityTxn::fill_order`].
    pub fn fill_order(
        &self,
        order: &Order,
        taker_fill_amount: u128,
        signature: &Signature,
        taker: AccountId,
    ) -> Result<FillResult> {
        self.transact(|txn| txn.fill_order(order, taker_fill_amount, signature, taker))
    }

    /// Cancel an order. Maker only.
    ///
    /// # Errors
    /// `Unauthorized` if `caller` is not the maker; `OrderUnfillable` if
    /// already cancelled.
    pub fn cancel_order(&self, order: &Order, caller: AccountId) -> Result<()> {
        self.transact(|txn| txn.cancel_order(order, caller))
    }

    /// Credit funds to an account.
    ///
    /// # Errors
    /// `MathOverflow` if the balance would wrap.
    pub fn deposit(&self, account: AccountId, asset: &AssetId, amount: u128) -> Result<()> {
        self.transact(|txn| txn.deposit(account, asset, amount))
    }

    /// Debit funds from an account.
    ///
    /// # Errors
    /// `InsufficientBalance` if the funds are missing.
    pub fn withdraw(&self, account: AccountId, asset: &AssetId, amount: u128) -> Result<()> {
        self.transact(|txn| txn.withdraw(account, asset, amount))
    }

    /// Set the standing approval the authority may spend for `account`.
    pub fn set_approval(&self, account: AccountId, asset: &AssetId, amount: u128) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.ledger.set_approval(account, asset, amount);
    }

    /// Ledger entry for an (account, asset) pair.
    #[must_use]
    pub fn balance(&self, account: AccountId, asset: &AssetId) -> BalanceEntry {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.ledger.entry(account, asset)
    }

    /// Cumulative filled taker-asset amount for an order identity.
    #[must_use]
    pub fn filled_amount(&self, key: &OrderKey) -> u128 {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.fills.filled_amount(key)
    }

    /// Taker-asset amount still fillable for `order`.
    #[must_use]
    pub fn remaining_taker_amount(&self, order: &Order) -> u128 {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.fills.remaining_taker_amount(order)
    }

    /// Check the supply conservation invariant for one asset.
    ///
    /// # Errors
    /// `SupplyInvariantViolation` if ledger supply drifted from the
    /// deposit/withdrawal record.
    pub fn verify_supply(&self, asset: &AssetId) -> Result<()> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.supply.verify(asset, state.ledger.total_supply(asset))
    }
}

/// A handle on the authority's working state during one atomic invocation.
/// Obtained only through [`SettlementAuthority::transact`]; every mutation
/// made through it is discarded if the enclosing operation fails.
pub struct AuthorityTxn<'a> {
    config: &'a AuthorityConfig,
    verifier: &'a dyn SignatureVerifier,
    state: &'a mut AuthorityState,
}

impl AuthorityTxn<'_> {
    /// Cross-match two complementary orders: validate both, derive the
    /// maximal simultaneous fill, settle all transfer legs, record fills.
    ///
    /// The left maker asset splits between the right maker and the taker
    /// (spread); the right maker asset goes to the left maker in full.
    ///
    /// # Errors
    /// - `InvalidOrder` / `InvalidSignature` / `OrderUnfillable` from
    ///   per-order validation
    /// - `NoFillPossible` if the pair is not complementary or does not cross
    /// - ledger errors if a maker's funds or approval fall short
    pub fn match_orders(
        &mut self,
        left: &Order,
        right: &Order,
        left_signature: &Signature,
        right_signature: &Signature,
        taker: AccountId,
    ) -> Result<MatchedFillResult> {
        self.validate_order(left, left_signature)?;
        self.validate_order(right, right_signature)?;

        if right.maker_asset != left.taker_asset || right.taker_asset != left.maker_asset {
            return Err(CrossmatchError::NoFillPossible {
                reason: format!(
                    "orders are not complementary: left trades {}/{}, right trades {}/{}",
                    left.maker_asset, left.taker_asset, right.maker_asset, right.taker_asset,
                ),
            });
        }

        let left_filled = self.state.fills.filled_amount(&left.key());
        let right_filled = self.state.fills.filled_amount(&right.key());
        let result = derive_matched_fill(left, right, left_filled, right_filled)?;

        self.state.ledger.transfer_from(
            left.maker,
            right.maker,
            &left.maker_asset,
            result.right_filled_taker_amount,
        )?;
        self.state.ledger.transfer_from(
            right.maker,
            left.maker,
            &right.maker_asset,
            result.right_filled_maker_amount,
        )?;
        self.state.ledger.transfer_from(
            left.maker,
            taker,
            &left.maker_asset,
            result.left_maker_asset_spread_amount,
        )?;
        self.pay_fees(left, result.left_filled_taker_amount, taker)?;
        self.pay_fees(right, result.right_filled_taker_amount, taker)?;

        self.state
            .fills
            .record_fill(left.key(), result.left_filled_taker_amount)?;
        self.state
            .fills
            .record_fill(right.key(), result.right_filled_taker_amount)?;

        tracing::info!(
            match_id = %result.match_id,
            left = %left.key(),
            right = %right.key(),
            left_filled_maker = result.left_filled_maker_amount,
            right_filled_maker = result.right_filled_maker_amount,
            spread = result.left_maker_asset_spread_amount,
            "Orders matched"
        );
        Ok(result)
    }

    /// Fill a single order for up to `taker_fill_amount` of its taker asset.
    /// The fill is clamped to the order's remaining amount; the maker side
    /// is priced at the order's own rate, rounded down.
    ///
    /// # Errors
    /// - `InvalidFillAmount` on a zero request
    /// - `InvalidOrder` / `InvalidSignature` / `OrderUnfillable` from
    ///   validation
    /// - ledger errors if maker or taker funds/approval fall short
    pub fn fill_order(
        &mut self,
        order: &Order,
        taker_fill_amount: u128,
        signature: &Signature,
        taker: AccountId,
    ) -> Result<FillResult> {
        if taker_fill_amount == 0 {
            return Err(CrossmatchError::InvalidFillAmount {
                reason: "fill amount must be positive".to_string(),
            });
        }
        self.validate_order(order, signature)?;

        let remaining = self.state.fills.remaining_taker_amount(order);
        let taker_fill = taker_fill_amount.min(remaining);
        let maker_fill = partial_amount_floor(order.maker_amount, order.taker_amount, taker_fill)?;

        self.state
            .ledger
            .transfer_from(order.maker, taker, &order.maker_asset, maker_fill)?;
        self.state
            .ledger
            .transfer_from(taker, order.maker, &order.taker_asset, taker_fill)?;
        self.pay_fees(order, taker_fill, taker)?;

        self.state.fills.record_fill(order.key(), taker_fill)?;

        tracing::debug!(
            order = %order.key(),
            maker_filled = maker_fill,
            taker_filled = taker_fill,
            "Order filled"
        );
        Ok(FillResult {
            maker_asset_filled: maker_fill,
            taker_asset_filled: taker_fill,
        })
    }

    /// Cancel an order. Maker only; cancellation is permanent.
    ///
    /// # Errors
    /// `Unauthorized` for a non-maker caller; `OrderUnfillable` if already
    /// cancelled.
    pub fn cancel_order(&mut self, order: &Order, caller: AccountId) -> Result<()> {
        if caller != order.maker {
            return Err(CrossmatchError::Unauthorized {
                reason: format!("only the maker may cancel {}", order.key()),
            });
        }
        self.state.fills.cancel(order.key())?;
        tracing::debug!(order = %order.key(), "Order cancelled");
        Ok(())
    }

    /// Credit funds to an account.
    ///
    /// # Errors
    /// `MathOverflow` if the balance would wrap.
    pub fn deposit(&mut self, account: AccountId, asset: &AssetId, amount: u128) -> Result<()> {
        self.state.ledger.deposit(account, asset, amount)?;
        self.state.supply.record_deposit(asset, amount);
        Ok(())
    }

    /// Debit funds from an account.
    ///
    /// # Errors
    /// `InsufficientBalance` if the funds are missing.
    pub fn withdraw(&mut self, account: AccountId, asset: &AssetId, amount: u128) -> Result<()> {
        self.state.ledger.withdraw(account, asset, amount)?;
        self.state.supply.record_withdrawal(asset, amount);
        Ok(())
    }

    /// Set the standing approval for `account`.
    pub fn set_approval(&mut self, account: AccountId, asset: &AssetId, amount: u128) {
        self.state.ledger.set_approval(account, asset, amount);
    }

    /// Ledger entry for an (account, asset) pair.
    #[must_use]
    pub fn balance(&self, account: AccountId, asset: &AssetId) -> BalanceEntry {
        self.state.ledger.entry(account, asset)
    }

    /// Taker-asset amount still fillable for `order` in this transaction's
    /// working state.
    #[must_use]
    pub fn remaining_taker_amount(&self, order: &Order) -> u128 {
        self.state.fills.remaining_taker_amount(order)
    }

    /// Per-order validation: structure, authority binding, lifecycle, and
    /// signature. Signature verification runs only on an order's first fill;
    /// afterwards authenticity is anchored by the recorded fill state, which
    /// is what admits the empty-signature continuation fill.
    fn validate_order(&self, order: &Order, signature: &Signature) -> Result<()> {
        order.validate()?;
        if order.exchange != self.config.exchange {
            return Err(CrossmatchError::InvalidOrder {
                order: order.key(),
                reason: format!(
                    "bound to {}, not this authority ({})",
                    order.exchange, self.config.exchange,
                ),
            });
        }
        let key = order.key();
        if self.state.fills.is_cancelled(&key) {
            return Err(CrossmatchError::OrderUnfillable {
                order: key,
                reason: "cancelled by maker".to_string(),
            });
        }
        if order.is_expired() {
            return Err(CrossmatchError::OrderUnfillable {
                order: key,
                reason: "expired".to_string(),
            });
        }
        let filled = self.state.fills.filled_amount(&key);
        if filled >= order.taker_amount {
            return Err(CrossmatchError::OrderUnfillable {
                order: key,
                reason: "fully filled".to_string(),
            });
        }
        if filled == 0 && !self.verifier.verify(&order.hash(), &order.maker, signature) {
            return Err(CrossmatchError::InvalidSignature { order: key });
        }
        Ok(())
    }

    /// Proportional maker/taker fees in the configured fee asset, paid to
    /// the order's fee recipient. No-op for fee-less orders.
    fn pay_fees(&mut self, order: &Order, taker_fill: u128, taker: AccountId) -> Result<()> {
        let Some(recipient) = order.fee_recipient else {
            return Ok(());
        };
        let maker_fee = partial_amount_floor(order.maker_fee, order.taker_amount, taker_fill)?;
        let taker_fee = partial_amount_floor(order.taker_fee, order.taker_amount, taker_fill)?;
        let fee_asset = self.config.fee_asset.clone();
        self.state
            .ledger
            .transfer_from(order.maker, recipient, &fee_asset, maker_fee)?;
        self.state
            .ledger
            .transfer_from(taker, recipient, &fee_asset, taker_fee)?;
        Ok(())
    }
}
