//! Quadratic inversion of the pricing curve
//!
//! The curve multiplies its own gamma term, which depends on the unknown
//! amount, into the result. Asking "which input yields this output" is
//! therefore a quadratic `a·x² + b·x + c = 0`, solved here in big-integer
//! fixed point with an integer square root.
//!
//! Of the two roots, the one whose value lands closest to the zero-slippage
//! estimate is the economically meaningful one. The other sits on the far,
//! decreasing side of the curve.

use crate::curve::PriceCurve;
use crate::error::{CurveFault, QuoteResult};
use crate::fee::GrossFraction;
use crate::guard::ConstraintGuard;
use crate::scale::{to_amount, SOLVER_SCALE, WAD};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use tracing::trace;

/// Coefficients of `a·x² + b·x + c = 0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quadratic {
    pub a: BigInt,
    pub b: BigInt,
    pub c: BigInt,
}

impl Quadratic {
    pub fn discriminant(&self) -> BigInt {
        &self.b * &self.b - BigInt::from(4u8) * &self.a * &self.c
    }

    /// Floor roots as `((−b + √Δ) / 2a, (−b − √Δ) / 2a)`.
    ///
    /// With `a = 0` both entries hold the linear solution `⌊−c / b⌋`.
    pub fn roots(&self) -> QuoteResult<(BigInt, BigInt)> {
        if self.a.is_zero() {
            if self.b.is_zero() {
                return Err(CurveFault::DegenerateCurve.into());
            }
            let x = (-&self.c).div_floor(&self.b);
            return Ok((x.clone(), x));
        }

        let delta = self.discriminant();
        if delta.is_negative() {
            return Err(CurveFault::NegativeDiscriminant.into());
        }

        let root = delta.sqrt();
        let two_a = BigInt::from(2u8) * &self.a;
        let x1 = (-&self.b + &root).div_floor(&two_a);
        let x2 = (-&self.b - &root).div_floor(&two_a);
        Ok((x1, x2))
    }
}

/// Pick the root whose measured value is strictly closer to `reference`,
/// falling back to the second root on ties
fn closest_root(
    (x1, x2): (BigInt, BigInt),
    reference: &BigInt,
    measure: impl Fn(&BigInt) -> BigInt,
) -> BigInt {
    let d1 = (measure(&x1) - reference).abs();
    let d2 = (measure(&x2) - reference).abs();
    if d1 < d2 {
        x1
    } else {
        x2
    }
}

/// Inverts a [`PriceCurve`] for a desired output
pub struct InverseSolver<'a> {
    curve: &'a PriceCurve,
}

impl<'a> InverseSolver<'a> {
    pub fn new(curve: &'a PriceCurve) -> Self {
        Self { curve }
    }

    /// Coefficients for the net quote input `x` with `base_from_quote(x) = base_amount`
    pub fn quote_input_quadratic(&self, price: &BigInt, base_amount: u128) -> Quadratic {
        let scale = self.curve.scale();
        let lifted = &*SOLVER_SCALE * &scale.token * &scale.price;

        let a = &lifted * self.curve.side().coeff / (price * &*WAD * &scale.quote * &scale.quote);
        let b = (&lifted * (BigInt::from(self.curve.spread()) - &*WAD))
            .div_floor(&(price * &scale.quote * &*WAD));
        let c = &*SOLVER_SCALE * base_amount;
        Quadratic { a, b, c }
    }

    /// Coefficients for the base input `x` with `quote_from_base(x) = quote_amount`
    pub fn base_input_quadratic(&self, price: &BigInt, quote_amount: u128) -> Quadratic {
        self.base_input_quadratic_over(price, &BigInt::from(quote_amount), &BigInt::from(1u8))
    }

    /// As [`Self::base_input_quadratic`] for a target of `numerator / denominator`.
    ///
    /// Every coefficient is multiplied through by `denominator`, which leaves
    /// the roots unchanged and keeps `c` integral.
    pub fn base_input_quadratic_over(
        &self,
        price: &BigInt,
        numerator: &BigInt,
        denominator: &BigInt,
    ) -> Quadratic {
        let scale = self.curve.scale();

        let a = &*SOLVER_SCALE * price * price * &scale.quote * self.curve.side().coeff * denominator
            / (&scale.price * &scale.price * &scale.token);
        let b = (&*SOLVER_SCALE
            * price
            * &scale.quote
            * (BigInt::from(self.curve.spread()) - &*WAD)
            * denominator)
            .div_floor(&scale.price);
        let c = &*SOLVER_SCALE * numerator * &*WAD * &scale.token;
        Quadratic { a, b, c }
    }

    /// Net (after-fee) quote input that buys exactly `base_amount`
    pub fn quote_for_base_out(&self, base_amount: u128) -> QuoteResult<u128> {
        let side = self.curve.side();
        let price = ConstraintGuard::ensure_usable(side)?;
        let scale = self.curve.scale();

        let roots = self.quote_input_quadratic(&price, base_amount).roots()?;
        let naive = scale.notional(&BigInt::from(base_amount), &price);
        trace!(x1 = %roots.0, x2 = %roots.1, naive = %naive, "quote input roots");

        let quote = closest_root(roots, &naive, |x| x.clone());
        if quote.is_negative() {
            return Err(CurveFault::NegativeRoot.into());
        }

        ConstraintGuard::ensure_notional(side, &quote, &BigInt::from(1u8))?;
        let gamma = &quote * side.coeff / &scale.quote;
        ConstraintGuard::ensure_gamma(side, &gamma)?;

        to_amount(&quote)
    }

    /// Base input whose gross quote proceeds are exactly `quote_amount`
    pub fn base_for_quote_out(&self, quote_amount: u128) -> QuoteResult<u128> {
        self.base_for_gross(&GrossFraction {
            numerator: BigInt::from(quote_amount),
            denominator: BigInt::from(1u8),
        })
    }

    /// Base input whose gross quote proceeds equal an unrounded fee gross-up
    pub fn base_for_gross(&self, gross: &GrossFraction) -> QuoteResult<u128> {
        let side = self.curve.side();
        let price = ConstraintGuard::ensure_usable(side)?;
        let scale = self.curve.scale();
        let denominator = scale.notional_denominator();

        let roots = self
            .base_input_quadratic_over(&price, &gross.numerator, &gross.denominator)
            .roots()?;
        trace!(x1 = %roots.0, x2 = %roots.1, target = %gross.numerator, over = %gross.denominator, "base input roots");

        let base = closest_root(roots, &gross.numerator, |x| {
            (x * &price * &scale.quote * &gross.denominator).div_floor(&denominator)
        });
        if base.is_negative() {
            return Err(CurveFault::NegativeRoot.into());
        }

        ConstraintGuard::ensure_notional(side, &(&base * &price * &scale.quote), &denominator)?;
        let gamma = &base * &price * side.coeff / &denominator;
        ConstraintGuard::ensure_gamma(side, &gamma)?;

        to_amount(&base)
    }
}
