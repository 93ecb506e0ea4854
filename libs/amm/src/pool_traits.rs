//! Liquidity-module interface shared by pool types

use crate::error::QuoteResult;
use crate::router::SwapRouter;
use crate::types::{FixedParameters, PoolState, Quote, Token};
use rust_decimal::Decimal;

/// Capability set a pool type exposes to routing and reporting
///
/// Quoting is mandatory. Yield and TVL estimation are reporting concerns that
/// a separate component may supply; the defaults report nothing.
pub trait LiquidityModule {
    /// Fee and output amount for `amount` of `input_token`
    fn quote_given_input(
        &self,
        pool: &PoolState,
        params: &FixedParameters,
        input_token: &Token,
        output_token: &Token,
        amount: u128,
    ) -> QuoteResult<Quote>;

    /// Fee and required input amount to receive `amount` of `output_token`
    fn quote_given_output(
        &self,
        pool: &PoolState,
        params: &FixedParameters,
        input_token: &Token,
        output_token: &Token,
        amount: u128,
    ) -> QuoteResult<Quote>;

    fn estimate_yield(&self, _pool: &PoolState) -> Option<Decimal> {
        None
    }

    fn estimate_total_value_locked(
        &self,
        _pool: &PoolState,
        _denomination: Option<&Token>,
    ) -> Option<Decimal> {
        None
    }
}

/// Oracle-anchored sPMM pool
#[derive(Debug, Clone, Copy, Default)]
pub struct SpmmLiquidityModule;

impl LiquidityModule for SpmmLiquidityModule {
    fn quote_given_input(
        &self,
        pool: &PoolState,
        params: &FixedParameters,
        input_token: &Token,
        output_token: &Token,
        amount: u128,
    ) -> QuoteResult<Quote> {
        SwapRouter::new(pool, params).quote_given_input(input_token, output_token, amount)
    }

    fn quote_given_output(
        &self,
        pool: &PoolState,
        params: &FixedParameters,
        input_token: &Token,
        output_token: &Token,
        amount: u128,
    ) -> QuoteResult<Quote> {
        SwapRouter::new(pool, params).quote_given_output(input_token, output_token, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SideState;
    use rust_decimal_macros::dec;

    fn side(price: i128) -> SideState {
        SideState {
            reserve: 1_000_000_000_000,
            fee_rate: 0,
            max_gamma: 1_000_000_000_000_000,
            max_notional_swap: 1_000_000_000_000,
            price,
            spread: 0,
            coeff: 0,
            wo_feasible: true,
        }
    }

    #[test]
    fn test_module_delegates_to_router() {
        let usdc = Token::new("0xusdc", 6, "USDC", dec!(1));
        let dai = Token::new("0xdai", 6, "DAI", dec!(1));
        let params = FixedParameters::new(100_000, 6, 8, usdc.clone()).unwrap();
        let pool = PoolState {
            input: side(100_000_000),
            output: side(100_000_000),
            quote_reserve: 0,
        };

        // Zero fee, zero spread, zero coefficient: a 1:1 curve at price 1.0
        let module = SpmmLiquidityModule;
        let quote = module
            .quote_given_input(&pool, &params, &usdc, &dai, 5_000_000)
            .unwrap();
        assert_eq!(quote, Quote { fee: 0, amount: 5_000_000 });
    }

    #[test]
    fn test_reporting_defaults_to_none() {
        let pool = PoolState {
            input: side(1),
            output: side(1),
            quote_reserve: 0,
        };
        let module = SpmmLiquidityModule;
        assert_eq!(module.estimate_yield(&pool), None);
        assert_eq!(module.estimate_total_value_locked(&pool, None), None);
    }
}
