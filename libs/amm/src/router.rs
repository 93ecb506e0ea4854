//! Per-call dispatch over the three trade shapes
//!
//! | input is quote | output is quote | shape        |
//! |----------------|-----------------|--------------|
//! | yes            | -               | quote → base |
//! | -              | yes             | base → quote |
//! | no             | no              | base → base  |
//!
//! Base-to-base trades route through the quote token: the first leg sells
//! the input base for quote, the second buys the output base with it. Both
//! legs apply the wider fee rate and spread of the two sides.

use crate::curve::PriceCurve;
use crate::error::{QuoteError, QuoteResult, ReserveKind};
use crate::fee::FeeModel;
use crate::guard::ConstraintGuard;
use crate::inverse::InverseSolver;
use crate::types::{FixedParameters, PoolState, Quote, SideState, Token};
use tracing::debug;

/// Trade shape, decided by which side (if any) is the pool's quote token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeShape {
    QuoteToBase,
    BaseToQuote,
    BaseToBase,
}

impl TradeShape {
    pub fn classify(
        params: &FixedParameters,
        input_token: &Token,
        output_token: &Token,
    ) -> QuoteResult<Self> {
        if input_token.same_asset(output_token) {
            return Err(QuoteError::IdenticalTokens);
        }
        Ok(if params.is_quote_token(input_token) {
            TradeShape::QuoteToBase
        } else if params.is_quote_token(output_token) {
            TradeShape::BaseToQuote
        } else {
            TradeShape::BaseToBase
        })
    }
}

/// Quote computation over one pool snapshot
pub struct SwapRouter<'a> {
    pool: &'a PoolState,
    params: &'a FixedParameters,
}

impl<'a> SwapRouter<'a> {
    pub fn new(pool: &'a PoolState, params: &'a FixedParameters) -> Self {
        Self { pool, params }
    }

    /// Fee and output amount for a given input amount
    pub fn quote_given_input(
        &self,
        input_token: &Token,
        output_token: &Token,
        input_amount: u128,
    ) -> QuoteResult<Quote> {
        let shape = TradeShape::classify(self.params, input_token, output_token)?;
        debug!(?shape, input = %input_token.symbol, output = %output_token.symbol, input_amount, "quoting given input");

        let result = self.ensure_sides_usable(shape).and_then(|_| match shape {
            TradeShape::QuoteToBase => self.sell_quote_given_input(output_token, input_amount),
            TradeShape::BaseToQuote => self.sell_base_given_input(input_token, input_amount),
            TradeShape::BaseToBase => {
                self.base_to_base_given_input(input_token, output_token, input_amount)
            }
        });
        Self::log_outcome(shape, &result);
        result
    }

    /// Fee and required input amount for a desired output amount
    pub fn quote_given_output(
        &self,
        input_token: &Token,
        output_token: &Token,
        output_amount: u128,
    ) -> QuoteResult<Quote> {
        let shape = TradeShape::classify(self.params, input_token, output_token)?;
        debug!(?shape, input = %input_token.symbol, output = %output_token.symbol, output_amount, "quoting given output");

        let result = self.ensure_sides_usable(shape).and_then(|_| match shape {
            TradeShape::QuoteToBase => self.sell_quote_given_output(output_token, output_amount),
            TradeShape::BaseToQuote => self.sell_base_given_output(input_token, output_amount),
            TradeShape::BaseToBase => {
                self.base_to_base_given_output(input_token, output_token, output_amount)
            }
        });
        Self::log_outcome(shape, &result);
        result
    }

    /// Flag and price checks on every curve the shape touches, ahead of any
    /// reserve or fee step
    fn ensure_sides_usable(&self, shape: TradeShape) -> QuoteResult<()> {
        match shape {
            TradeShape::QuoteToBase => {
                ConstraintGuard::ensure_usable(&self.pool.output)?;
            }
            TradeShape::BaseToQuote => {
                ConstraintGuard::ensure_usable(&self.pool.input)?;
            }
            TradeShape::BaseToBase => {
                ConstraintGuard::ensure_usable(&self.pool.input)?;
                ConstraintGuard::ensure_usable(&self.pool.output)?;
            }
        }
        Ok(())
    }

    fn log_outcome(shape: TradeShape, result: &QuoteResult<Quote>) {
        match result {
            Ok(quote) => debug!(?shape, fee = quote.fee, amount = quote.amount, "quote computed"),
            Err(err) => debug!(?shape, error = %err, infeasible = err.is_infeasible(), "quote rejected"),
        }
    }

    fn fee_model(&self, side: &SideState) -> QuoteResult<FeeModel> {
        FeeModel::new(side.fee_rate, self.params.base_fee_rate)
    }

    /// Fee model and curves for the two legs of a base-to-base swap
    fn base_to_base_legs(
        &self,
        input_token: &Token,
        output_token: &Token,
    ) -> QuoteResult<(FeeModel, PriceCurve, PriceCurve)> {
        let (input, output) = (&self.pool.input, &self.pool.output);
        let fee = FeeModel::conservative(input.fee_rate, output.fee_rate, self.params.base_fee_rate)?;
        let spread = input.spread.max(output.spread);

        let sell_leg = PriceCurve::new(input, input_token.decimals, self.params).with_spread(spread);
        let buy_leg = PriceCurve::new(output, output_token.decimals, self.params).with_spread(spread);
        Ok((fee, sell_leg, buy_leg))
    }

    fn sell_quote_given_input(&self, output_token: &Token, input_amount: u128) -> QuoteResult<Quote> {
        let output = &self.pool.output;
        let split = self.fee_model(output)?.net_from_gross(input_amount)?;

        let curve = PriceCurve::new(output, output_token.decimals, self.params);
        let base_amount = curve.base_from_quote(split.net)?;
        ConstraintGuard::ensure_reserve(base_amount, output.reserve, ReserveKind::Output)?;

        Ok(Quote {
            fee: split.fee,
            amount: base_amount,
        })
    }

    fn sell_base_given_input(&self, input_token: &Token, input_amount: u128) -> QuoteResult<Quote> {
        let input = &self.pool.input;
        let curve = PriceCurve::new(input, input_token.decimals, self.params);
        let quote_amount = curve.quote_from_base(input_amount)?;

        // The output side is the quote token here
        ConstraintGuard::ensure_reserve(quote_amount, self.pool.output.reserve, ReserveKind::Output)?;

        let split = self.fee_model(input)?.net_from_gross(quote_amount)?;
        Ok(Quote {
            fee: split.fee,
            amount: split.net,
        })
    }

    fn base_to_base_given_input(
        &self,
        input_token: &Token,
        output_token: &Token,
        input_amount: u128,
    ) -> QuoteResult<Quote> {
        let (fee, sell_leg, buy_leg) = self.base_to_base_legs(input_token, output_token)?;

        let quote_amount = sell_leg.quote_from_base(input_amount)?;
        let split = fee.net_from_gross(quote_amount)?;
        ConstraintGuard::ensure_reserve(split.fee, self.pool.quote_reserve, ReserveKind::Quote)?;

        let base_amount = buy_leg.base_from_quote(split.net)?;
        ConstraintGuard::ensure_reserve(base_amount, self.pool.output.reserve, ReserveKind::Output)?;

        Ok(Quote {
            fee: split.fee,
            amount: base_amount,
        })
    }

    fn sell_quote_given_output(&self, output_token: &Token, output_amount: u128) -> QuoteResult<Quote> {
        let output = &self.pool.output;
        ConstraintGuard::ensure_reserve(output_amount, output.reserve, ReserveKind::Output)?;

        let curve = PriceCurve::new(output, output_token.decimals, self.params);
        let net = InverseSolver::new(&curve).quote_for_base_out(output_amount)?;
        let split = self.fee_model(output)?.gross_from_net(net)?;

        Ok(Quote {
            fee: split.fee,
            amount: split.gross,
        })
    }

    fn sell_base_given_output(&self, input_token: &Token, output_amount: u128) -> QuoteResult<Quote> {
        let input = &self.pool.input;
        let fee = self.fee_model(input)?;
        let split = fee.gross_from_net(output_amount)?;
        ConstraintGuard::ensure_reserve(split.gross, self.pool.output.reserve, ReserveKind::Output)?;

        let curve = PriceCurve::new(input, input_token.decimals, self.params);
        let gross = fee.exact_gross(output_amount);
        let base_amount = InverseSolver::new(&curve).base_for_gross(&gross)?;

        Ok(Quote {
            fee: split.fee,
            amount: base_amount,
        })
    }

    fn base_to_base_given_output(
        &self,
        input_token: &Token,
        output_token: &Token,
        output_amount: u128,
    ) -> QuoteResult<Quote> {
        ConstraintGuard::ensure_reserve(output_amount, self.pool.output.reserve, ReserveKind::Output)?;
        let (fee, sell_leg, buy_leg) = self.base_to_base_legs(input_token, output_token)?;

        let net = InverseSolver::new(&buy_leg).quote_for_base_out(output_amount)?;
        let split = fee.gross_from_net(net)?;
        ConstraintGuard::ensure_reserve(split.fee, self.pool.quote_reserve, ReserveKind::Quote)?;

        // The sell leg is solved against the unrounded gross; only the reported fee rounds up
        let base_amount = InverseSolver::new(&sell_leg).base_for_gross(&fee.exact_gross(net))?;
        Ok(Quote {
            fee: split.fee,
            amount: base_amount,
        })
    }
}
