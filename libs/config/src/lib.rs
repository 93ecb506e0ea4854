//! # sPMM Pool Configuration
//!
//! Loads the inputs of the quote engine from disk: fixed pool parameters,
//! the token registry and a pool snapshot.
//!
//! ## Features
//!
//! - **Layered Loading**: Base TOML file, optional `environments/<name>.toml`
//!   overlay, then `SPMM__`-prefixed environment variables
//! - **Wide Integers**: 128-bit amounts accepted as integers or decimal strings
//! - **Round-Trip**: Snapshots can be saved back to TOML
//!
//! ## Usage
//!
//! ```no_run
//! use amm::{LiquidityModule, SpmmLiquidityModule};
//! use spmm_config::load_pool_config;
//!
//! let config = load_pool_config("config/weth_cbbtc.toml")?;
//! let (weth, cbbtc) = (config.token("WETH").unwrap(), config.token("cbBTC").unwrap());
//!
//! let quote = SpmmLiquidityModule.quote_given_input(
//!     &config.pool,
//!     &config.fixed,
//!     weth,
//!     cbbtc,
//!     10_000_000_000_000_000_000,
//! )?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod pool_config;

pub use pool_config::{load_pool_config, PoolConfig, ENV_PREFIX};
