//! Shared fixtures: a Base-chain WETH/cbBTC pool quoted in USDC

#![allow(dead_code)]

use rust_decimal_macros::dec;
use spmm_amm::{FixedParameters, PoolState, SideState, Token};

pub const ONE_WETH: u128 = 1_000_000_000_000_000_000;
pub const ONE_CBBTC: u128 = 100_000_000;
pub const ONE_USDC: u128 = 1_000_000;

/// Route engine logs to the test writer; repeated calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("spmm_amm=debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn usdc() -> Token {
    Token::new("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913", 6, "USDC", dec!(1))
}

pub fn weth() -> Token {
    Token::new("0x4200000000000000000000000000000000000006", 18, "WETH", dec!(1750))
}

pub fn cbbtc() -> Token {
    Token::new("0xcbB7C0000aB88B473b1f5aFd9ef808440eed33Bf", 8, "cbBTC", dec!(92000))
}

pub fn params() -> FixedParameters {
    FixedParameters::new(100_000, 6, 8, usdc()).expect("valid fixed parameters")
}

pub fn weth_side() -> SideState {
    SideState {
        reserve: 100 * ONE_WETH,
        fee_rate: 25,
        max_gamma: 3_000_000_000_000_000,
        max_notional_swap: 1_000_000 * ONE_USDC,
        price: 175_000_000_000,
        spread: 941_000_000_000_000,
        coeff: 1_660_000_000,
        wo_feasible: true,
    }
}

pub fn cbbtc_side() -> SideState {
    SideState {
        reserve: 100 * ONE_CBBTC,
        fee_rate: 25,
        max_gamma: 3_000_000_000_000_000,
        max_notional_swap: 1_000_000 * ONE_USDC,
        price: 9_200_000_000_000,
        spread: 1_050_000_000_000_000,
        coeff: 1_660_000_000,
        wo_feasible: true,
    }
}

/// Quote-token side; only its reserve and flag are ever read
pub fn usdc_side() -> SideState {
    SideState {
        reserve: 1_000_000_000 * ONE_USDC,
        fee_rate: 0,
        max_gamma: 0,
        max_notional_swap: 0,
        price: 100_000_000,
        spread: 0,
        coeff: 0,
        wo_feasible: true,
    }
}

pub fn pool(input: SideState, output: SideState) -> PoolState {
    PoolState {
        input,
        output,
        quote_reserve: 1_000 * ONE_USDC,
    }
}

pub fn weth_to_cbbtc() -> PoolState {
    pool(weth_side(), cbbtc_side())
}
