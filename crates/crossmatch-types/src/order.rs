//! Order and signature types for the CrossMatch settlement core.
//!
//! An [`Order`] is an immutable, maker-signed offer to exchange a fixed
//! amount of one asset for a fixed amount of another. All amounts are
//! unsigned integers in the asset's smallest unit. The maker signs
//! [`Order::hash`]; any mutation of the order after signing invalidates the
//! signature.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AccountId, AssetId, CrossmatchError, ExchangeId, OrderKey, Result, constants};

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// An opaque signature blob bound to exactly one [`Order`].
///
/// The internal structure is owned by the signature-verification collaborator.
/// The empty signature marks a synthetic continuation fill whose authenticity
/// was anchored by an earlier fill of the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(pub Vec<u8>);

impl Signature {
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The empty signature used for spread continuation fills.
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Order
// ---------------------------------------------------------------------------

/// A signed limit order: `maker_amount` of `maker_asset` offered for
/// `taker_amount` of `taker_asset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Asset the maker is offering.
    pub maker_asset: AssetId,
    /// Asset the maker wants in return.
    pub taker_asset: AssetId,
    /// Amount of `maker_asset` offered. Must be positive.
    pub maker_amount: u128,
    /// Amount of `taker_asset` wanted. Must be positive.
    pub taker_amount: u128,
    /// The maker's identity (signs the order).
    pub maker: AccountId,
    /// Recipient of maker/taker fees, if any.
    pub fee_recipient: Option<AccountId>,
    /// Fee paid by the maker, proportional to the filled fraction.
    pub maker_fee: u128,
    /// Fee paid by the taker, proportional to the filled fraction.
    pub taker_fee: u128,
    /// Orders past this instant are unfillable.
    pub expiration: DateTime<Utc>,
    /// Uniqueness nonce. `(maker, salt)` is the order's ledger identity.
    pub salt: u64,
    /// The settlement authority instance this order is bound to.
    pub exchange: ExchangeId,
}

impl Order {
    /// The identity under which the fill ledger tracks this order.
    #[must_use]
    pub fn key(&self) -> OrderKey {
        OrderKey::new(self.maker, self.salt)
    }

    /// Canonical order hash: domain-separated SHA-256 over every field.
    /// These are the bytes the maker signs. Variable-length fields are
    /// length-prefixed so distinct orders can never collide.
    #[must_use]
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(constants::ORDER_DOMAIN_PREFIX);
        hasher.update(self.exchange.0);
        hasher.update(self.maker.0);
        hasher.update((self.maker_asset.0.len() as u64).to_le_bytes());
        hasher.update(self.maker_asset.0.as_bytes());
        hasher.update((self.taker_asset.0.len() as u64).to_le_bytes());
        hasher.update(self.taker_asset.0.as_bytes());
        hasher.update(self.maker_amount.to_le_bytes());
        hasher.update(self.taker_amount.to_le_bytes());
        hasher.update(self.maker_fee.to_le_bytes());
        hasher.update(self.taker_fee.to_le_bytes());
        match &self.fee_recipient {
            Some(recipient) => {
                hasher.update([1u8]);
                hasher.update(recipient.0);
            }
            None => hasher.update([0u8]),
        }
        hasher.update(self.expiration.timestamp_millis().to_le_bytes());
        hasher.update(self.salt.to_le_bytes());
        hasher.finalize().into()
    }

    /// Returns `true` once the order's expiration has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expiration
    }

    /// Structural validation: both amounts must be positive.
    ///
    /// # Errors
    /// Returns [`CrossmatchError::InvalidOrder`] on a zero amount.
    pub fn validate(&self) -> Result<()> {
        if self.maker_amount == 0 {
            return Err(CrossmatchError::InvalidOrder {
                order: self.key(),
                reason: "maker_amount must be positive".to_string(),
            });
        }
        if self.taker_amount == 0 {
            return Err(CrossmatchError::InvalidOrder {
                order: self.key(),
                reason: "taker_amount must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// A fee-less order expiring an hour from now, with a random salt.
    pub fn dummy(
        maker: AccountId,
        maker_asset: &str,
        taker_asset: &str,
        maker_amount: u128,
        taker_amount: u128,
        exchange: ExchangeId,
    ) -> Self {
        Self {
            maker_asset: AssetId::new(maker_asset),
            taker_asset: AssetId::new(taker_asset),
            maker_amount,
            taker_amount,
            maker,
            fee_recipient: None,
            maker_fee: 0,
            taker_fee: 0,
            expiration: Utc::now() + chrono::Duration::hours(1),
            salt: rand::random::<u64>(),
            exchange,
        }
    }
}
