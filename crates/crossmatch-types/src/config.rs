//! Configuration types for the settlement authority and the matcher.

use serde::{Deserialize, Serialize};

use crate::{AccountId, AssetId, ExchangeId, constants};

/// Configuration for a settlement authority instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorityConfig {
    /// This instance's identity. Orders must be bound to it.
    pub exchange: ExchangeId,
    /// Asset in which maker/taker fees are settled.
    pub fee_asset: AssetId,
}

impl AuthorityConfig {
    /// Config with the default fee asset.
    #[must_use]
    pub fn new(exchange: ExchangeId) -> Self {
        Self {
            exchange,
            fee_asset: AssetId::new(constants::DEFAULT_FEE_ASSET),
        }
    }
}

/// Configuration for an order matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// The only identity allowed to invoke `match_orders`.
    pub operator: AccountId,
    /// The matcher's own ledger account: receives spread custody and funds
    /// the secondary spread fills.
    pub account: AccountId,
}
