//! Forward evaluation of the oracle-anchored pricing curve
//!
//! The curve prices an asset at its oracle price, then shaves the result by
//! `(1e18 - gamma - spread) / 1e18`, where gamma grows linearly with the
//! trade's notional. Output is non-decreasing in input until a cap rejects
//! the trade.

use crate::error::QuoteResult;
use crate::guard::ConstraintGuard;
use crate::scale::{to_amount, DecimalScale, WAD};
use crate::types::{FixedParameters, SideState};
use num_bigint::BigInt;
use tracing::trace;

/// Curve of one base asset against the quote token
#[derive(Debug, Clone)]
pub struct PriceCurve {
    side: SideState,
    spread: u128,
    scale: DecimalScale,
}

impl PriceCurve {
    /// Curve using the side's own spread
    pub fn new(side: &SideState, token_decimals: u8, params: &FixedParameters) -> Self {
        Self {
            side: *side,
            spread: side.spread,
            scale: DecimalScale::new(token_decimals, params),
        }
    }

    /// Replace the spread, used when a base-to-base leg applies the wider of both sides
    pub fn with_spread(mut self, spread: u128) -> Self {
        self.spread = spread;
        self
    }

    pub fn side(&self) -> &SideState {
        &self.side
    }

    pub fn spread(&self) -> u128 {
        self.spread
    }

    pub fn scale(&self) -> &DecimalScale {
        &self.scale
    }

    /// Base amount received for a net (after-fee) quote input
    pub fn base_from_quote(&self, quote_amount_after_fee: u128) -> QuoteResult<u128> {
        let price = ConstraintGuard::ensure_usable(&self.side)?;
        let quote = BigInt::from(quote_amount_after_fee);

        ConstraintGuard::ensure_notional(&self.side, &quote, &BigInt::from(1u8))?;

        let gamma = &quote * self.side.coeff / &self.scale.quote;
        ConstraintGuard::ensure_gamma(&self.side, &gamma)?;

        let multiplier = ConstraintGuard::slippage_multiplier(&gamma, self.spread)?;
        let base = &quote * &self.scale.token * &self.scale.price / &price * multiplier
            / &*WAD
            / &self.scale.quote;
        trace!(quote = quote_amount_after_fee, gamma = %gamma, base = %base, "base from quote");

        to_amount(&base)
    }

    /// Quote amount (before fee) received for a base input
    pub fn quote_from_base(&self, base_amount: u128) -> QuoteResult<u128> {
        let price = ConstraintGuard::ensure_usable(&self.side)?;
        let base = BigInt::from(base_amount);

        let gross = &base * &price * &self.scale.quote;
        ConstraintGuard::ensure_notional(&self.side, &gross, &self.scale.notional_denominator())?;

        let gamma = &base * &price * self.side.coeff / &self.scale.price / &self.scale.token;
        ConstraintGuard::ensure_gamma(&self.side, &gamma)?;

        let multiplier = ConstraintGuard::slippage_multiplier(&gamma, self.spread)?;
        let quote = gross / &self.scale.price * multiplier / &*WAD / &self.scale.token;
        trace!(base = base_amount, gamma = %gamma, quote = %quote, "quote from base");

        to_amount(&quote)
    }
}
