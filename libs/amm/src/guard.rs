//! Feasibility guards applied around every curve evaluation
//!
//! Checks run in a fixed order: feasibility flag, price sign, notional cap,
//! gamma cap, and finally reserve sufficiency once the curve has produced
//! an amount. The first failing check decides the error.

use crate::error::{CurveFault, QuoteError, QuoteResult, ReserveKind};
use crate::scale::{saturate, WAD};
use crate::types::SideState;
use num_bigint::BigInt;
use num_traits::Signed;
use tracing::trace;

/// Stateless set of guard checks
pub struct ConstraintGuard;

impl ConstraintGuard {
    /// Flag and price checks; returns the price for the curve to use
    pub fn ensure_usable(side: &SideState) -> QuoteResult<BigInt> {
        if !side.wo_feasible {
            return Err(CurveFault::NotFeasible.into());
        }
        if side.price <= 0 {
            return Err(CurveFault::NonPositivePrice.into());
        }
        Ok(BigInt::from(side.price))
    }

    /// Reject when `numerator / denominator > cap`, compared exactly.
    ///
    /// Notionals in quote units are passed with a denominator of one.
    pub fn ensure_notional(
        side: &SideState,
        numerator: &BigInt,
        denominator: &BigInt,
    ) -> QuoteResult<()> {
        let cap = BigInt::from(side.max_notional_swap);
        if numerator > &(cap * denominator) {
            trace!(cap = side.max_notional_swap, "notional cap hit");
            return Err(QuoteError::NotionalCapExceeded {
                cap: side.max_notional_swap,
            });
        }
        Ok(())
    }

    pub fn ensure_gamma(side: &SideState, gamma: &BigInt) -> QuoteResult<()> {
        if gamma > &BigInt::from(side.max_gamma) {
            trace!(gamma = %gamma, cap = side.max_gamma, "gamma cap hit");
            return Err(QuoteError::GammaCapExceeded {
                gamma: saturate(gamma),
                cap: side.max_gamma,
            });
        }
        Ok(())
    }

    /// `1e18 - gamma - spread`, the fraction of the zero-slippage amount paid out
    pub fn slippage_multiplier(gamma: &BigInt, spread: u128) -> QuoteResult<BigInt> {
        let multiplier = &*WAD - gamma - BigInt::from(spread);
        if multiplier.is_negative() {
            return Err(CurveFault::SaturatedSlippage.into());
        }
        Ok(multiplier)
    }

    pub fn ensure_reserve(amount: u128, reserve: u128, kind: ReserveKind) -> QuoteResult<()> {
        if amount > reserve {
            return Err(QuoteError::InsufficientReserve {
                reserve: kind,
                required: amount,
                available: reserve,
            });
        }
        Ok(())
    }
}
