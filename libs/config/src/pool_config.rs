//! Pool Configuration Module
//!
//! Loads fixed parameters, the token registry and a pool snapshot from TOML
//! files, layered with environment-specific overrides and `SPMM__` variables.

use amm::{FixedParameters, PoolState, Token};
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Prefix for environment overrides, e.g. `SPMM__POOL__OUTPUT__RESERVE`
pub const ENV_PREFIX: &str = "SPMM";

/// Everything needed to quote against one pool
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PoolConfig {
    /// Pool-invariant parameters
    pub fixed: FixedParameters,

    /// Registry of tradable tokens, looked up by symbol
    #[serde(default)]
    pub tokens: Vec<Token>,

    /// Snapshot of the two sides and the shared quote reserve
    pub pool: PoolState,
}

impl PoolConfig {
    /// Load from `path`, then `<dir>/environments/<environment>.toml` if present,
    /// then `SPMM__*` environment variables
    pub fn load(path: &Path, environment: Option<&str>) -> Result<Self> {
        Self::load_with_env_prefix(path, environment, ENV_PREFIX)
    }

    /// As [`PoolConfig::load`], reading overrides from `<env_prefix>__*` variables
    pub fn load_with_env_prefix(
        path: &Path,
        environment: Option<&str>,
        env_prefix: &str,
    ) -> Result<Self> {
        info!("Loading pool config: {:?}", path);
        let mut builder = Config::builder().add_source(File::from(path).required(true));

        if let Some(env) = environment {
            let env_file = environment_file(path, env);
            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        // Values stay strings so 128-bit amounts never pass through i64 or f64
        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("__")
                .separator("__"),
        );

        let config: Self = builder
            .build()
            .context("Failed to build pool configuration")?
            .try_deserialize()
            .context("Failed to deserialize pool configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Parse an in-memory TOML document, without file or environment layering
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()
            .context("Failed to parse pool configuration")?
            .try_deserialize()
            .context("Failed to deserialize pool configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Write the configuration back out as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize pool configuration")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write pool configuration to {:?}", path))?;
        info!("Saved pool config: {:?}", path);
        Ok(())
    }

    /// Registry token with the given symbol
    pub fn token(&self, symbol: &str) -> Option<&Token> {
        self.tokens.iter().find(|token| token.symbol == symbol)
    }

    /// Check parameters and registry consistency
    pub fn validate(&self) -> Result<()> {
        self.fixed
            .validate()
            .context("Invalid fixed parameters")?;

        for (i, token) in self.tokens.iter().enumerate() {
            if self.tokens[..i].iter().any(|other| other.same_asset(token)) {
                bail!("Token {} ({}) registered twice", token.symbol, token.address);
            }
        }

        if !self.tokens.is_empty() && !self.tokens.iter().any(|t| self.fixed.is_quote_token(t)) {
            warn!(
                "Quote token {} missing from token registry",
                self.fixed.quote_token.symbol
            );
        }
        Ok(())
    }
}

fn environment_file(path: &Path, environment: &str) -> PathBuf {
    path.parent()
        .unwrap_or_else(|| Path::new("."))
        .join("environments")
        .join(format!("{}.toml", environment))
}

/// Convenience function to load a pool configuration without an environment overlay
pub fn load_pool_config(path: impl AsRef<Path>) -> Result<PoolConfig> {
    PoolConfig::load(path.as_ref(), None)
}
