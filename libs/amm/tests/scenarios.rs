//! End-to-end quotes against a WETH/cbBTC pool routed through USDC

mod common;

use common::*;
use spmm_amm::{
    CurveFault, LiquidityModule, QuoteError, ReserveKind, SpmmLiquidityModule, SwapRouter, Token,
};

#[test]
fn test_ten_weth_for_cbbtc() {
    init_tracing();
    let pool = weth_to_cbbtc();
    let params = params();

    let quote = SwapRouter::new(&pool, &params)
        .quote_given_input(&weth(), &cbbtc(), 10 * ONE_WETH)
        .unwrap();

    // 17,481.116625 USDC intermediate at the wider cbBTC spread
    assert_eq!(quote.fee, 4_370_279);
    assert_eq!(quote.amount, 18_975_966);
}

#[test]
fn test_weth_needed_for_one_cbbtc() {
    init_tracing();
    let pool = weth_to_cbbtc();
    let params = params();

    let quote = SwapRouter::new(&pool, &params)
        .quote_given_output(&weth(), &cbbtc(), ONE_CBBTC)
        .unwrap();
    assert_eq!(quote.fee, 23_033_459);
    assert_eq!(quote.amount, 52_711_323_471_124_169_097);

    // Real-valued evaluation of the same curve lands on 52.711323471118491648 WETH
    let reference = 52_711_323_471_118_491_648u128;
    let relative = quote.amount.abs_diff(reference) as f64 / reference as f64;
    assert!(relative < 1e-12, "relative error {relative}");
}

#[test]
fn test_inverse_then_forward_recovers_output() {
    let pool = weth_to_cbbtc();
    let params = params();
    let router = SwapRouter::new(&pool, &params);

    let inverse = router.quote_given_output(&weth(), &cbbtc(), ONE_CBBTC).unwrap();
    let forward = router
        .quote_given_input(&weth(), &cbbtc(), inverse.amount)
        .unwrap();

    // Both forward legs truncate, giving up at most one sat
    assert_eq!(forward.amount, ONE_CBBTC - 1);
    assert_eq!(forward.fee, inverse.fee - 1);
}

#[test]
fn test_output_reserve_boundary() {
    let params = params();

    let mut exact = weth_to_cbbtc();
    exact.output.reserve = 18_975_966;
    assert!(SwapRouter::new(&exact, &params)
        .quote_given_input(&weth(), &cbbtc(), 10 * ONE_WETH)
        .is_ok());

    let mut short = weth_to_cbbtc();
    short.output.reserve = 18_975_965;
    assert_eq!(
        SwapRouter::new(&short, &params).quote_given_input(&weth(), &cbbtc(), 10 * ONE_WETH),
        Err(QuoteError::InsufficientReserve {
            reserve: ReserveKind::Output,
            required: 18_975_966,
            available: 18_975_965,
        })
    );

    let mut exact = weth_to_cbbtc();
    exact.output.reserve = ONE_CBBTC;
    assert!(SwapRouter::new(&exact, &params)
        .quote_given_output(&weth(), &cbbtc(), ONE_CBBTC)
        .is_ok());

    let mut short = weth_to_cbbtc();
    short.output.reserve = ONE_CBBTC - 1;
    let err = SwapRouter::new(&short, &params)
        .quote_given_output(&weth(), &cbbtc(), ONE_CBBTC)
        .unwrap_err();
    assert!(matches!(
        err,
        QuoteError::InsufficientReserve {
            reserve: ReserveKind::Output,
            ..
        }
    ));
    assert!(err.is_infeasible());
}

#[test]
fn test_quote_reserve_must_cover_inverse_fee() {
    let params = params();
    let mut pool = weth_to_cbbtc();
    pool.quote_reserve = 23_033_458;

    assert_eq!(
        SwapRouter::new(&pool, &params).quote_given_output(&weth(), &cbbtc(), ONE_CBBTC),
        Err(QuoteError::InsufficientReserve {
            reserve: ReserveKind::Quote,
            required: 23_033_459,
            available: 23_033_458,
        })
    );
}

#[test]
fn test_unusable_side_reported_first() {
    let params = params();
    let mut pool = weth_to_cbbtc();
    pool.output.wo_feasible = false;
    pool.output.reserve = 0;
    pool.quote_reserve = 0;

    // 600 WETH would also break the notional cap on the input side
    let router = SwapRouter::new(&pool, &params);
    assert_eq!(
        router.quote_given_input(&weth(), &cbbtc(), 600 * ONE_WETH),
        Err(QuoteError::InfeasibleCurve(CurveFault::NotFeasible))
    );
    assert_eq!(
        router.quote_given_output(&weth(), &cbbtc(), ONE_CBBTC),
        Err(QuoteError::InfeasibleCurve(CurveFault::NotFeasible))
    );
}

#[test]
fn test_notional_checked_before_gamma() {
    let params = params();
    let mut pool = weth_to_cbbtc();
    pool.input.max_gamma = 1;

    // 600 WETH is 1,050,000 USDC of notional
    let router = SwapRouter::new(&pool, &params);
    assert_eq!(
        router.quote_given_input(&weth(), &cbbtc(), 600 * ONE_WETH),
        Err(QuoteError::NotionalCapExceeded {
            cap: 1_000_000 * ONE_USDC
        })
    );

    pool.input.max_gamma = 500_000_000_000_000;
    let router = SwapRouter::new(&pool, &params);
    assert_eq!(
        router.quote_given_input(&weth(), &cbbtc(), 300 * ONE_WETH),
        Err(QuoteError::GammaCapExceeded {
            gamma: 871_500_000_000_000,
            cap: 500_000_000_000_000
        })
    );
}

#[test]
fn test_output_beyond_curve_peak() {
    let params = params();
    let mut pool = weth_to_cbbtc();
    pool.output.reserve = u128::MAX;

    let err = SwapRouter::new(&pool, &params)
        .quote_given_output(&weth(), &cbbtc(), 1_000_000_000 * ONE_CBBTC)
        .unwrap_err();
    assert_eq!(err, QuoteError::InfeasibleCurve(CurveFault::NegativeDiscriminant));
}

#[test]
fn test_quote_side_flag_not_consulted() {
    let params = params();
    let mut quote_side = usdc_side();
    quote_side.wo_feasible = false;
    let pool = pool(quote_side, cbbtc_side());

    let quote = SwapRouter::new(&pool, &params)
        .quote_given_input(&usdc(), &cbbtc(), 1_000 * ONE_USDC)
        .unwrap();
    assert_eq!(quote.fee, 250_000);
    assert!(quote.amount > 0);
}

#[test]
fn test_identical_tokens_ignore_address_case() {
    let params = params();
    let pool = weth_to_cbbtc();
    let lower = Token::new(weth().address.to_lowercase(), 18, "weth", weth().reference_price);

    assert_eq!(
        SwapRouter::new(&pool, &params).quote_given_input(&weth(), &lower, ONE_WETH),
        Err(QuoteError::IdenticalTokens)
    );
}

#[test]
fn test_module_matches_router() {
    let pool = weth_to_cbbtc();
    let params = params();
    let module = SpmmLiquidityModule;

    let via_module = module
        .quote_given_input(&pool, &params, &weth(), &cbbtc(), 10 * ONE_WETH)
        .unwrap();
    let via_router = SwapRouter::new(&pool, &params)
        .quote_given_input(&weth(), &cbbtc(), 10 * ONE_WETH)
        .unwrap();
    assert_eq!(via_module, via_router);
}
