//! Error types for the CrossMatch settlement core.
//!
//! All errors use the `XM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order / match errors
//! - 2xx: Spread redistribution errors
//! - 3xx: Ledger errors
//! - 4xx: Invariant violations
//! - 5xx: Arithmetic errors

use thiserror::Error;

use crate::OrderKey;

/// Central error enum for all CrossMatch operations.
///
/// Every failure aborts the whole invocation: nothing here is retried or
/// recovered locally, and a failed invocation leaves no partial state.
#[derive(Debug, Error)]
pub enum CrossmatchError {
    // =================================================================
    // Order / match errors (1xx)
    // =================================================================
    /// The caller lacks the capability for this operation.
    #[error("XM_ERR_100: Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// The order failed structural validation (zero amounts, wrong
    /// authority binding, etc.).
    #[error("XM_ERR_101: Invalid order {order}: {reason}")]
    InvalidOrder { order: OrderKey, reason: String },

    /// The order's signature does not verify against its data.
    #[error("XM_ERR_102: Signature verification failed for {order}")]
    InvalidSignature { order: OrderKey },

    /// The order is expired, cancelled, or already fully filled.
    #[error("XM_ERR_103: Order {order} unfillable: {reason}")]
    OrderUnfillable { order: OrderKey, reason: String },

    /// The pair offers no overlap: non-complementary assets or a price
    /// cross that would destroy value.
    #[error("XM_ERR_104: No fill possible: {reason}")]
    NoFillPossible { reason: String },

    // =================================================================
    // Spread redistribution errors (2xx)
    // =================================================================
    /// The secondary spread fill failed. Carries the settlement
    /// authority's failure reason verbatim; the primary match was rolled
    /// back with it.
    #[error("XM_ERR_200: Spread fill failed: {reason}")]
    SpreadFillFailed { reason: String },

    // =================================================================
    // Ledger errors (3xx)
    // =================================================================
    /// Not enough available balance to fund a transfer or withdrawal.
    #[error("XM_ERR_300: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    /// The transfer exceeds the remaining approval granted to the
    /// settlement authority.
    #[error("XM_ERR_301: Insufficient approval: need {needed}, approved {approved}")]
    InsufficientApproval { needed: u128, approved: u128 },

    // =================================================================
    // Invariant violations (4xx)
    // =================================================================
    /// The matched-fill conservation identity broke — critical safety alert.
    #[error("XM_ERR_400: Conservation violation: {reason}")]
    ConservationViolation { reason: String },

    /// Per-asset supply no longer equals deposits minus withdrawals.
    #[error("XM_ERR_401: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // Arithmetic errors (5xx)
    // =================================================================
    /// A checked u128 operation overflowed.
    #[error("XM_ERR_500: Arithmetic overflow: {context}")]
    MathOverflow { context: String },

    /// A fill was requested with a zero or otherwise unusable amount.
    #[error("XM_ERR_501: Invalid fill amount: {reason}")]
    InvalidFillAmount { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, CrossmatchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AccountId;

    fn key() -> OrderKey {
        OrderKey::new(AccountId([1u8; 32]), 42)
    }

    #[test]
    fn error_display_contains_prefix() {
        let err = CrossmatchError::InvalidSignature { order: key() };
        let msg = format!("{err}");
        assert!(msg.starts_with("XM_ERR_102"), "Got: {msg}");
    }

    #[test]
    fn insufficient_balance_display() {
        let err = CrossmatchError::InsufficientBalance {
            needed: 100,
            available: 50,
        };
        let msg = format!("{err}");
        assert!(msg.contains("XM_ERR_300"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn spread_fill_failed_carries_reason_verbatim() {
        let inner = CrossmatchError::InsufficientApproval {
            needed: 3,
            approved: 0,
        };
        let err = CrossmatchError::SpreadFillFailed {
            reason: inner.to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.starts_with("XM_ERR_200"));
        assert!(msg.contains("XM_ERR_301"), "inner reason lost: {msg}");
    }

    #[test]
    fn all_errors_have_xm_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(CrossmatchError::Unauthorized {
                reason: "caller is not the operator".into(),
            }),
            Box::new(CrossmatchError::OrderUnfillable {
                order: key(),
                reason: "expired".into(),
            }),
            Box::new(CrossmatchError::NoFillPossible {
                reason: "negative spread".into(),
            }),
            Box::new(CrossmatchError::MathOverflow {
                context: "test".into(),
            }),
            Box::new(CrossmatchError::SupplyInvariantViolation {
                reason: "test".into(),
            }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("XM_ERR_"),
                "Error missing XM_ERR_ prefix: {msg}"
            );
        }
    }
}
