//! Fixed-point scaling across the three decimal bases of a quote
//!
//! A quote touches three independent bases: the token's native decimals,
//! the pool's quote-token decimals and the oracle price decimals. All
//! conversions are exact big-integer multiply/divide with truncation toward
//! zero; nothing here allocates state beyond the call.

use crate::error::{QuoteError, QuoteResult};
use crate::types::FixedParameters;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use once_cell::sync::Lazy;

/// 1e18, the unit of gamma, spread and coeff
pub static WAD: Lazy<BigInt> = Lazy::new(|| pow10(18));

/// 1e36, lifts quadratic coefficients out of the truncation noise floor
pub static SOLVER_SCALE: Lazy<BigInt> = Lazy::new(|| pow10(36));

/// `10^exp` as a big integer
pub fn pow10(exp: u8) -> BigInt {
    BigInt::from(10u8).pow(u32::from(exp))
}

/// Narrow a non-negative big integer back to the 128-bit amount domain
pub fn to_amount(value: &BigInt) -> QuoteResult<u128> {
    value.to_u128().ok_or(QuoteError::Overflow)
}

/// Narrow with saturation, for reporting values inside error payloads
pub(crate) fn saturate(value: &BigInt) -> u128 {
    value.to_u128().unwrap_or(u128::MAX)
}

/// Power-of-ten units for one curve side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalScale {
    /// `10^token_decimals`
    pub token: BigInt,
    /// `10^quote_token_decimals`
    pub quote: BigInt,
    /// `10^oracle_price_decimals`
    pub price: BigInt,
}

impl DecimalScale {
    pub fn new(token_decimals: u8, params: &FixedParameters) -> Self {
        Self {
            token: pow10(token_decimals),
            quote: pow10(params.quote_token_decimals),
            price: pow10(params.oracle_price_decimals),
        }
    }

    /// Notional value of a base amount in quote-token units, truncated.
    ///
    /// `amount * price * 10^qd / 10^pd / 10^td`
    pub fn notional(&self, base_amount: &BigInt, price: &BigInt) -> BigInt {
        base_amount * price * &self.quote / &self.price / &self.token
    }

    /// Denominator turning `amount * price * 10^qd` into quote units
    pub fn notional_denominator(&self) -> BigInt {
        &self.price * &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Token;
    use rust_decimal_macros::dec;

    fn params(quote_decimals: u8, price_decimals: u8) -> FixedParameters {
        let usdc = Token::new("0xusdc", quote_decimals, "USDC", dec!(1));
        FixedParameters::new(100_000, quote_decimals, price_decimals, usdc).unwrap()
    }

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0), BigInt::from(1));
        assert_eq!(pow10(6), BigInt::from(1_000_000));
        assert_eq!(*WAD, BigInt::from(1_000_000_000_000_000_000u64));
        assert_eq!(&*SOLVER_SCALE, &(&*WAD * &*WAD));
    }

    #[test]
    fn test_notional_of_one_weth() {
        // 1 WETH at $1,750.00000000 is 1,750 USDC
        let scale = DecimalScale::new(18, &params(6, 8));
        let notional = scale.notional(
            &BigInt::from(1_000_000_000_000_000_000u128),
            &BigInt::from(175_000_000_000i64),
        );
        assert_eq!(notional, BigInt::from(1_750_000_000u64));
    }

    #[test]
    fn test_to_amount_bounds() {
        assert_eq!(to_amount(&BigInt::from(42)), Ok(42));
        assert_eq!(to_amount(&BigInt::from(-1)), Err(QuoteError::Overflow));

        let too_big = BigInt::from(u128::MAX) + 1;
        assert_eq!(to_amount(&too_big), Err(QuoteError::Overflow));
        assert_eq!(saturate(&too_big), u128::MAX);
    }
}
