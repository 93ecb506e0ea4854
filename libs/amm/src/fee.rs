//! Proportional swap fees on quote-token amounts
//!
//! Fees are always charged on the gross quote-token side of a trade as
//! `fee_rate / base_fee_rate`. Forward quotes net a known gross down;
//! inverse quotes gross a desired net up.

use crate::error::{QuoteError, QuoteResult};
use num_bigint::BigInt;

/// Fee and the amount left after it, both in quote-token units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSplit {
    pub fee: u128,
    pub net: u128,
    pub gross: u128,
}

/// Unrounded gross `numerator / denominator` in quote-token units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrossFraction {
    pub numerator: BigInt,
    pub denominator: BigInt,
}

/// Fee rate over its base denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeModel {
    rate: u64,
    base: u64,
}

impl FeeModel {
    /// Requires `rate < base`; anything else would charge the whole amount or more
    pub fn new(rate: u64, base: u64) -> QuoteResult<Self> {
        if rate >= base {
            return Err(QuoteError::InvalidFeeRate {
                fee_rate: rate,
                base_fee_rate: base,
            });
        }
        Ok(Self { rate, base })
    }

    /// The wider of two rates, applied to both legs of a base-to-base swap
    pub fn conservative(rate_a: u64, rate_b: u64, base: u64) -> QuoteResult<Self> {
        Self::new(rate_a.max(rate_b), base)
    }

    pub fn rate(&self) -> u64 {
        self.rate
    }

    /// `fee = ⌊gross · rate / base⌋`, `net = gross − fee`
    pub fn net_from_gross(&self, gross: u128) -> QuoteResult<FeeSplit> {
        let fee = gross
            .checked_mul(u128::from(self.rate))
            .ok_or(QuoteError::Overflow)?
            / u128::from(self.base);
        Ok(FeeSplit {
            fee,
            net: gross - fee,
            gross,
        })
    }

    /// `gross = ⌈net · base / (base − rate)⌉`, `fee = gross − net`.
    ///
    /// Rounding up guarantees that netting `gross` down again yields at
    /// least `net`.
    pub fn gross_from_net(&self, net: u128) -> QuoteResult<FeeSplit> {
        let numerator = net
            .checked_mul(u128::from(self.base))
            .ok_or(QuoteError::Overflow)?;
        let gross = numerator.div_ceil(u128::from(self.base - self.rate));
        Ok(FeeSplit {
            fee: gross - net,
            net,
            gross,
        })
    }

    /// `net · base / (base − rate)` without rounding, for solving the curve
    /// against the gross a net actually implies
    pub fn exact_gross(&self, net: u128) -> GrossFraction {
        GrossFraction {
            numerator: BigInt::from(net) * self.base,
            denominator: BigInt::from(self.base - self.rate),
        }
    }
}
