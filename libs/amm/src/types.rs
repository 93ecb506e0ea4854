//! Pool, token and quote value types
//!
//! Every monetary field is an integer in the smallest unit of its asset.
//! Pool snapshots are read-only inputs supplied fresh per call; the engine
//! never mutates or caches them.

use crate::error::ParameterError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tradable asset identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    /// Opaque unique identifier (EVM address)
    pub address: String,
    pub decimals: u8,
    /// Display only
    pub symbol: String,
    /// Informational, never used in pricing math
    #[serde(default)]
    pub reference_price: Decimal,
}

impl Token {
    pub fn new(
        address: impl Into<String>,
        decimals: u8,
        symbol: impl Into<String>,
        reference_price: Decimal,
    ) -> Self {
        Self {
            address: address.into(),
            decimals,
            symbol: symbol.into(),
            reference_price,
        }
    }

    /// Address equality, ignoring hex checksum casing
    pub fn same_asset(&self, other: &Token) -> bool {
        self.address.eq_ignore_ascii_case(&other.address)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.same_asset(other)
    }
}

impl Eq for Token {}

/// Pool-invariant configuration shared by every quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedParameters {
    /// Denominator for all per-token fee rates (e.g. 100_000 = 100%)
    pub base_fee_rate: u64,
    pub quote_token_decimals: u8,
    pub oracle_price_decimals: u8,
    /// Designated reference asset; base-to-base trades route through it
    pub quote_token: Token,
}

impl FixedParameters {
    pub fn new(
        base_fee_rate: u64,
        quote_token_decimals: u8,
        oracle_price_decimals: u8,
        quote_token: Token,
    ) -> Result<Self, ParameterError> {
        let params = Self {
            base_fee_rate,
            quote_token_decimals,
            oracle_price_decimals,
            quote_token,
        };
        params.validate()?;
        Ok(params)
    }

    /// Re-run construction checks, for values produced by deserialization
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.base_fee_rate == 0 {
            return Err(ParameterError::ZeroBaseFeeRate);
        }
        if self.quote_token.decimals != self.quote_token_decimals {
            return Err(ParameterError::QuoteDecimalsMismatch {
                symbol: self.quote_token.symbol.clone(),
                token: self.quote_token.decimals,
                declared: self.quote_token_decimals,
            });
        }
        Ok(())
    }

    pub fn is_quote_token(&self, token: &Token) -> bool {
        self.quote_token.same_asset(token)
    }
}

/// Live pricing surface of one asset in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideState {
    /// Balance in the asset's native decimals
    #[serde(with = "wide_int")]
    pub reserve: u128,
    /// Fee numerator, denominator is `FixedParameters::base_fee_rate`
    pub fee_rate: u64,
    /// 1e18-scaled slippage cap
    #[serde(with = "wide_int")]
    pub max_gamma: u128,
    /// Cap in quote-token decimals
    #[serde(with = "wide_int")]
    pub max_notional_swap: u128,
    /// Oracle price scaled by `10^oracle_price_decimals`; sign checked per call
    #[serde(with = "wide_int")]
    pub price: i128,
    /// 1e18-scaled
    #[serde(with = "wide_int")]
    pub spread: u128,
    /// 1e18-scaled curvature
    #[serde(with = "wide_int")]
    pub coeff: u128,
    pub wo_feasible: bool,
}

/// Snapshot of both trade sides plus the shared quote reserve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub input: SideState,
    pub output: SideState,
    #[serde(with = "wide_int")]
    pub quote_reserve: u128,
}

/// Feasible quote: fee and amount, each in the native decimals of its asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(with = "wide_int")]
    pub fee: u128,
    #[serde(with = "wide_int")]
    pub amount: u128,
}

/// Serde adapter for 128-bit integers.
///
/// Serializes as a decimal string; accepts native integers or decimal
/// strings (with optional `_` separators), since TOML integers stop at i64.
pub mod wide_int {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;
    use std::marker::PhantomData;
    use std::str::FromStr;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: fmt::Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr + TryFrom<i64> + TryFrom<u64> + TryFrom<i128> + TryFrom<u128>,
        <T as FromStr>::Err: fmt::Display,
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(WideIntVisitor(PhantomData))
    }

    struct WideIntVisitor<T>(PhantomData<T>);

    impl<T> WideIntVisitor<T> {
        fn out_of_range<E: de::Error>(value: impl fmt::Display) -> E {
            E::custom(format!("integer {value} out of range"))
        }
    }

    impl<'de, T> Visitor<'de> for WideIntVisitor<T>
    where
        T: FromStr + TryFrom<i64> + TryFrom<u64> + TryFrom<i128> + TryFrom<u128>,
        <T as FromStr>::Err: fmt::Display,
    {
        type Value = T;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a decimal integer string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
            T::try_from(v).map_err(|_| Self::out_of_range(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
            T::try_from(v).map_err(|_| Self::out_of_range(v))
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<T, E> {
            T::try_from(v).map_err(|_| Self::out_of_range(v))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<T, E> {
            T::try_from(v).map_err(|_| Self::out_of_range(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
            let digits: String = v.trim().chars().filter(|c| *c != '_').collect();
            digits
                .parse::<T>()
                .map_err(|e| E::custom(format!("invalid integer '{v}': {e}")))
        }
    }
}
