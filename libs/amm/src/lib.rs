//! # sPMM Quote Engine - Oracle-Anchored Pricing Curves
//!
//! ## Purpose
//!
//! Deterministic quote computation for a synthetic proactive market maker
//! pool. Given a read-only pool snapshot, answers "how much comes out for
//! this input" and "how much must go in for this output" across quote→base,
//! base→quote and base→base trades, including fees and every feasibility
//! constraint the pool enforces.
//!
//! ## Integration Points
//!
//! - **Input Sources**: `PoolState` snapshots and `FixedParameters` assembled by
//!   callers from chain and oracle data, or loaded through `spmm-config`
//! - **Output Destinations**: Route planners, quote services, simulators
//! - **Interface**: [`LiquidityModule`], implemented by [`SpmmLiquidityModule`]
//! - **Precision**: Integer amounts in each asset's native decimals, big-integer
//!   intermediates, floor division everywhere except the fee gross-up
//! - **Validation**: Feasibility flag, oracle price sign, notional cap, gamma
//!   cap and reserve sufficiency, reported as typed [`QuoteError`]s
//!
//! ## Architecture Role
//!
//! ```text
//! SwapRouter ──► FeeModel
//!     │
//!     ├──► PriceCurve ──────► ConstraintGuard
//!     │        ▲
//!     └──► InverseSolver ───► ConstraintGuard
//! ```
//!
//! Every call is a pure function of its arguments. No state survives between
//! calls, so quotes may run concurrently on shared snapshots without locking.

pub mod curve;
pub mod error;
pub mod fee;
pub mod guard;
pub mod inverse;
pub mod pool_traits;
pub mod router;
pub mod scale;
pub mod types;

pub use curve::PriceCurve;
pub use error::{CurveFault, ParameterError, QuoteError, QuoteResult, ReserveKind};
pub use fee::{FeeModel, FeeSplit, GrossFraction};
pub use guard::ConstraintGuard;
pub use inverse::{InverseSolver, Quadratic};
pub use pool_traits::{LiquidityModule, SpmmLiquidityModule};
pub use router::{SwapRouter, TradeShape};
pub use scale::{DecimalScale, SOLVER_SCALE, WAD};
pub use types::{FixedParameters, PoolState, Quote, SideState, Token};

/// Reference prices on [`Token`] are informational decimals
pub use rust_decimal::Decimal;
