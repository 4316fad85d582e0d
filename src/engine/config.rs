//! Engine configuration.

use crate::types::MIN_DECIMAL_SCALE;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration injected into the engine at construction.
///
/// Defaults match a crypto venue with 8 fractional digits: quantities and
/// prices from one satoshi-equivalent up to seven figures. Every field can
/// also come from the environment via [`EngineConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Smallest accepted order quantity
    pub min_quantity: Decimal,
    /// Largest accepted order quantity
    pub max_quantity: Decimal,
    /// Smallest accepted limit price
    pub min_price: Decimal,
    /// Largest accepted limit price
    pub max_price: Decimal,
    /// Price levels per side included in depth snapshots and book updates
    pub default_depth: usize,
    /// Maximum fractional digits accepted on prices and quantities
    pub decimal_scale: u32,
    /// Whether the engine mints order ids when the caller omits one
    pub assign_ids: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_quantity: Decimal::new(1, 8),
            max_quantity: Decimal::from(1_000_000),
            min_price: Decimal::new(1, 8),
            max_price: Decimal::from(10_000_000),
            default_depth: 10,
            decimal_scale: MIN_DECIMAL_SCALE,
            assign_ids: true,
        }
    }
}

/// Errors produced while loading or validating an [`EngineConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// An environment variable held an unparseable value
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// The offending value
        value: String,
    },
    /// The configuration is internally inconsistent
    InvalidBounds {
        /// Description of the inconsistency
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { name, value } => {
                write!(f, "invalid value for {name}: {value:?}")
            }
            ConfigError::InvalidBounds { message } => {
                write!(f, "invalid configuration: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn env_decimal(name: &'static str, default: Decimal) -> Result<Decimal, ConfigError> {
    match std::env::var(name) {
        Ok(value) => Decimal::from_str_exact(value.trim())
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

fn env_parse<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset: `MIN_QUANTITY`, `MAX_QUANTITY`,
    /// `MIN_PRICE`, `MAX_PRICE`, `DEFAULT_DEPTH`, `DECIMAL_SCALE`,
    /// `ASSIGN_IDS`.
    ///
    /// The result is validated before being returned.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            min_quantity: env_decimal("MIN_QUANTITY", defaults.min_quantity)?,
            max_quantity: env_decimal("MAX_QUANTITY", defaults.max_quantity)?,
            min_price: env_decimal("MIN_PRICE", defaults.min_price)?,
            max_price: env_decimal("MAX_PRICE", defaults.max_price)?,
            default_depth: env_parse("DEFAULT_DEPTH", defaults.default_depth)?,
            decimal_scale: env_parse("DECIMAL_SCALE", defaults.decimal_scale)?,
            assign_ids: env_parse("ASSIGN_IDS", defaults.assign_ids)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.min_quantity <= Decimal::ZERO {
            errors.push(format!("min_quantity must be positive: {}", self.min_quantity));
        }
        if self.max_quantity <= self.min_quantity {
            errors.push(format!(
                "max_quantity must exceed min_quantity: {} <= {}",
                self.max_quantity, self.min_quantity
            ));
        }
        if self.min_price <= Decimal::ZERO {
            errors.push(format!("min_price must be positive: {}", self.min_price));
        }
        if self.max_price <= self.min_price {
            errors.push(format!(
                "max_price must exceed min_price: {} <= {}",
                self.max_price, self.min_price
            ));
        }
        if self.default_depth == 0 {
            errors.push("default_depth must be at least 1".to_string());
        }
        if self.decimal_scale < MIN_DECIMAL_SCALE {
            errors.push(format!(
                "decimal_scale must be at least {MIN_DECIMAL_SCALE}: {}",
                self.decimal_scale
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidBounds {
                message: errors.join("; "),
            })
        }
    }
}
