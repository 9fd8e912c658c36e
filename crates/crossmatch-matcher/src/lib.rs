//! # crossmatch-matcher
//!
//! The **Matcher**: the operator-gated front door of the settlement core.
//!
//! One invocation of [`OrderMatcher::match_orders`] runs two phases inside a
//! single authority transaction:
//!
//! 1. **Primary cross-match** — the pair is normalized (the right order's
//!    asset fields are forced complementary to the left's) and handed to the
//!    settlement authority, which validates, derives the maximal fill, and
//!    settles all legs.
//! 2. **Spread redistribution** — if the match produced a left-maker-asset
//!    spread and the right order still has capacity, a synthetic,
//!    signature-less continuation fill converts the spread into the right
//!    order's maker asset using the matcher's pre-established approval.
//!
//! If phase 2 fails for any reason, the whole invocation aborts — phase 1's
//! transfers do not persist — and the authority's failure reason is carried
//! verbatim in `SpreadFillFailed`.

pub mod matcher;

pub use matcher::OrderMatcher;
