//! Globally unique identifiers used throughout CrossMatch.
//!
//! Account and exchange identities are raw ed25519 public keys (32 bytes);
//! match invocations use UUIDv7 for time-ordered lexicographic sorting.
//! An order has no standalone id: its identity is the [`OrderKey`]
//! `(maker, salt)` pair under which the fill ledger tracks it.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Identity of a maker, taker, operator, or fee recipient.
/// This is the raw ed25519 public key (32 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    #[must_use]
    pub fn from_pubkey(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// AssetId
// ---------------------------------------------------------------------------

/// Opaque asset identifier (e.g., "WETH", "DAI"). The settlement authority
/// treats it as a ledger key; no asset semantics are attached here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AssetId(pub String);

impl AssetId {
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ExchangeId
// ---------------------------------------------------------------------------

/// Identity of a settlement authority instance. Orders are bound to exactly
/// one instance: the id is part of the signed order payload, so an order
/// replayed against a different instance fails signature validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ExchangeId(pub [u8; 32]);

impl ExchangeId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "xchg:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// OrderKey
// ---------------------------------------------------------------------------

/// The identity under which the global fill ledger tracks an order:
/// `(maker, salt)`. Two orders from the same maker with different salts are
/// distinct; a synthetic continuation fill targeting the same key is
/// recognized as the same order's remaining balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderKey {
    pub maker: AccountId,
    pub salt: u64,
}

impl OrderKey {
    #[must_use]
    pub fn new(maker: AccountId, salt: u64) -> Self {
        Self { maker, salt }
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order:{}:{}", self.maker.short(), self.salt)
    }
}

// ---------------------------------------------------------------------------
// MatchId
// ---------------------------------------------------------------------------

/// Identifier stamped on each match invocation. Uses UUIDv7 so ids sort by
/// invocation time in logs and result streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct MatchId(pub Uuid);

impl MatchId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "match:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_display_is_short_hex() {
        let id = AccountId([0xAB; 32]);
        assert_eq!(format!("{id}"), "acct:abababababababab");
        assert_eq!(id.short(), "abababab");
    }

    #[test]
    fn order_key_identity() {
        let maker = AccountId([1u8; 32]);
        let a = OrderKey::new(maker, 7);
        let b = OrderKey::new(maker, 7);
        let c = OrderKey::new(maker, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn match_id_ordering() {
        let a = MatchId::new();
        let b = MatchId::new();
        assert!(a < b);
    }

    #[test]
    fn asset_id_roundtrip() {
        let asset = AssetId::new("WETH");
        assert_eq!(asset.as_str(), "WETH");
        let json = serde_json::to_string(&asset).unwrap();
        let back: AssetId = serde_json::from_str(&json).unwrap();
        assert_eq!(asset, back);
    }

    #[test]
    fn exchange_id_display() {
        let id = ExchangeId([0u8; 32]);
        assert_eq!(format!("{id}"), "xchg:0000000000000000");
    }
}
