//! Error types for quote computation and parameter validation
//!
//! Infeasibility is an expected outcome under adverse pool conditions, not a
//! defect: every guard failure short-circuits the quote and reports *why* it
//! failed so callers and tests can tell the kinds apart.

use std::fmt;
use thiserror::Error;

/// Result alias used throughout the quote engine
pub type QuoteResult<T> = std::result::Result<T, QuoteError>;

/// Reason a pricing curve cannot produce a quote
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CurveFault {
    /// The side's `wo_feasible` flag is cleared
    #[error("curve parameters flagged as not feasible")]
    NotFeasible,

    /// Oracle price is zero or negative
    #[error("oracle price is not positive")]
    NonPositivePrice,

    /// The requested output exceeds what the curve can produce at any input
    #[error("quadratic discriminant is negative")]
    NegativeDiscriminant,

    /// The economically meaningful root is negative
    #[error("selected root is negative")]
    NegativeRoot,

    /// Neither quadratic nor linear term carries the unknown
    #[error("curve has no dependence on the unknown amount")]
    DegenerateCurve,

    /// `gamma + spread` exceeds one, the curve would pay out a negative amount
    #[error("gamma plus spread exceeds unity")]
    SaturatedSlippage,
}

/// Which reserve failed to cover a computed amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveKind {
    /// Reserve of the asset leaving the pool
    Output,
    /// Shared quote-token reserve backing the intermediate fee of a base-to-base swap
    Quote,
}

impl fmt::Display for ReserveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReserveKind::Output => write!(f, "output"),
            ReserveKind::Quote => write!(f, "quote"),
        }
    }
}

/// Errors that stop a quote from being produced
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// Curve unusable or the inversion has no valid solution
    #[error("curve infeasible: {0}")]
    InfeasibleCurve(#[from] CurveFault),

    /// Notional value of the swap is above the side's max notional swap
    #[error("notional swap exceeds cap of {cap}")]
    NotionalCapExceeded { cap: u128 },

    /// Slippage contribution of the swap is above the side's max gamma
    #[error("gamma {gamma} exceeds cap of {cap}")]
    GammaCapExceeded { gamma: u128, cap: u128 },

    /// Computed amount is larger than the reserve that has to pay it
    #[error("{reserve} reserve of {available} cannot cover {required}")]
    InsufficientReserve {
        reserve: ReserveKind,
        required: u128,
        available: u128,
    },

    /// Fee rate is not strictly below the base fee rate
    #[error("fee rate {fee_rate} must be below base fee rate {base_fee_rate}")]
    InvalidFeeRate { fee_rate: u64, base_fee_rate: u64 },

    /// Input and output refer to the same asset
    #[error("input and output token are identical")]
    IdenticalTokens,

    /// Result does not fit the 128-bit amount domain
    #[error("amount overflows 128 bits")]
    Overflow,
}

impl QuoteError {
    /// True for the market-driven "no quote available now" kinds.
    ///
    /// Configuration defects (`InvalidFeeRate`, `IdenticalTokens`) and
    /// `Overflow` return false.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            QuoteError::InfeasibleCurve(_)
                | QuoteError::NotionalCapExceeded { .. }
                | QuoteError::GammaCapExceeded { .. }
                | QuoteError::InsufficientReserve { .. }
        )
    }
}

/// Errors raised while validating pool-invariant parameters
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    /// The fee denominator must be positive
    #[error("base fee rate must be positive")]
    ZeroBaseFeeRate,

    /// Declared quote decimals disagree with the quote token's own decimals
    #[error("quote token {symbol} has {token} decimals, parameters declare {declared}")]
    QuoteDecimalsMismatch {
        symbol: String,
        token: u8,
        declared: u8,
    },
}
