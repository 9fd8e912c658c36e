//! # crossmatch-authority
//!
//! **Settlement Authority**: the system of record that validates orders and
//! signatures, computes matched fills, and performs atomic asset transfers.
//!
//! ## Architecture
//!
//! The authority owns one serialized state store behind a mutex:
//! 1. [`AssetLedger`] — balances and standing approvals per (account, asset)
//! 2. [`FillLedger`] — cumulative filled amounts per order identity, plus
//!    cancellations
//! 3. [`SupplyTracker`] — per-asset deposit/withdrawal totals backing the
//!    supply conservation invariant
//!
//! Every state-changing operation runs inside [`SettlementAuthority::transact`]:
//! the lock is held for the whole invocation, the operation executes against
//! a working copy, and the copy is committed only on success. No partial
//! state is ever observable, and concurrent invocations serialize.
//!
//! Signature validation sits behind the [`SignatureVerifier`] seam; the
//! production implementation is [`Ed25519Verifier`].

pub mod authority;
pub mod conservation;
pub mod fills;
pub mod ledger;
pub mod matching;
pub mod verifier;

pub use authority::{AuthorityTxn, SettlementAuthority};
pub use conservation::SupplyTracker;
pub use fills::FillLedger;
pub use ledger::AssetLedger;
pub use matching::{derive_matched_fill, partial_amount_ceil, partial_amount_floor};
pub use verifier::{Ed25519Verifier, SignatureVerifier};
