//! # crossmatch-types
//!
//! Shared types, errors, and configuration for the **CrossMatch**
//! paired-order settlement core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`AssetId`], [`ExchangeId`], [`OrderKey`], [`MatchId`]
//! - **Order model**: [`Order`], [`Signature`]
//! - **Fill model**: [`MatchedFillResult`], [`FillResult`]
//! - **Balance model**: [`BalanceEntry`]
//! - **Configuration**: [`AuthorityConfig`], [`MatcherConfig`]
//! - **Errors**: [`CrossmatchError`] with `XM_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod balance;
pub mod config;
pub mod constants;
pub mod error;
pub mod fill;
pub mod ids;
pub mod order;

// Re-export all primary types at crate root for ergonomic imports:
//   use crossmatch_types::{Order, Signature, MatchedFillResult, ...};

pub use balance::*;
pub use config::*;
pub use error::*;
pub use fill::*;
pub use ids::*;
pub use order::*;

// Constants are accessed via `crossmatch_types::constants::FOO`
// (not re-exported to avoid name collisions).
