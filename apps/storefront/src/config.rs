//! Storefront configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                      | Default                       |
//! |-------------------------------|-------------------------------|
//! | `PIXELMART_API_URL`           | `http://localhost:8080/api`   |
//! | `PIXELMART_DB_PATH`           | `<data dir>/pixelmart.db`     |
//! | `PIXELMART_CART_SLOT`         | `cart`                        |
//! | `PIXELMART_TAX_BPS`           | `600` (6%)                    |
//! | `PIXELMART_FLAT_FEE_CENTS`    | `499` ($4.99)                 |
//! | `PIXELMART_HTTP_TIMEOUT_SECS` | `30`                          |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use pixelmart_core::{
    FeePolicy, Money, TaxRate, DEFAULT_CART_SLOT, DEFAULT_FLAT_FEE_CENTS, DEFAULT_TAX_RATE_BPS,
};
use serde::Serialize;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";
const DATABASE_FILE: &str = "pixelmart.db";

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Base URL of the marketplace REST API
    pub api_url: String,

    /// Snapshot database override; `None` uses the platform data directory
    pub db_path: Option<PathBuf>,

    /// Snapshot slot holding the cart
    pub cart_slot: String,

    /// Tax rate in basis points (600 = 6%)
    pub tax_rate_bps: u32,

    /// Flat fee added to every non-empty order, in cents
    pub flat_fee_cents: i64,

    /// Per-request HTTP timeout in seconds
    pub http_timeout_secs: u64,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = StorefrontConfig {
            api_url: lookup("PIXELMART_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim()
                .to_string(),

            db_path: lookup("PIXELMART_DB_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),

            cart_slot: lookup("PIXELMART_CART_SLOT")
                .unwrap_or_else(|| DEFAULT_CART_SLOT.to_string())
                .trim()
                .to_string(),

            tax_rate_bps: parse_var(&lookup, "PIXELMART_TAX_BPS", DEFAULT_TAX_RATE_BPS)?,

            flat_fee_cents: parse_var(&lookup, "PIXELMART_FLAT_FEE_CENTS", DEFAULT_FLAT_FEE_CENTS)?,

            http_timeout_secs: parse_var(&lookup, "PIXELMART_HTTP_TIMEOUT_SECS", 30)?,
        };

        if reqwest::Url::parse(&config.api_url).is_err() {
            return Err(ConfigError::InvalidValue("PIXELMART_API_URL".to_string()));
        }
        if config.cart_slot.is_empty() {
            return Err(ConfigError::InvalidValue("PIXELMART_CART_SLOT".to_string()));
        }
        if config.tax_rate_bps > 10_000 {
            return Err(ConfigError::InvalidValue("PIXELMART_TAX_BPS".to_string()));
        }
        if config.flat_fee_cents < 0 {
            return Err(ConfigError::InvalidValue("PIXELMART_FLAT_FEE_CENTS".to_string()));
        }
        if config.http_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("PIXELMART_HTTP_TIMEOUT_SECS".to_string()));
        }

        Ok(config)
    }

    /// Tax and fee applied to order totals.
    pub fn fee_policy(&self) -> FeePolicy {
        FeePolicy::new(
            TaxRate::from_bps(self.tax_rate_bps),
            Money::from_cents(self.flat_fee_cents),
        )
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Determines the database file path.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.pixelmart.storefront/pixelmart.db`
    /// - **Windows**: `%APPDATA%\pixelmart\storefront\data\pixelmart.db`
    /// - **Linux**: `~/.local/share/storefront/pixelmart.db`
    ///
    /// The data directory is created when missing.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("com", "pixelmart", "storefront")
            .ok_or_else(|| ConfigError::DataDir("no home directory".to_string()))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;

        Ok(data_dir.join(DATABASE_FILE))
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Cannot determine data directory: {0}")]
    DataDir(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(config.db_path, None);
        assert_eq!(config.cart_slot, "cart");
        assert_eq!(config.fee_policy(), FeePolicy::default());
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PIXELMART_API_URL", "https://shop.example.com/api/"),
            ("PIXELMART_DB_PATH", "/tmp/cart.db"),
            ("PIXELMART_CART_SLOT", "wishlist"),
            ("PIXELMART_TAX_BPS", " 825 "),
            ("PIXELMART_FLAT_FEE_CENTS", "0"),
            ("PIXELMART_HTTP_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.api_url, "https://shop.example.com/api/");
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/cart.db"));
        assert_eq!(config.cart_slot, "wishlist");
        assert_eq!(config.fee_policy().tax_rate.bps(), 825);
        assert!(config.fee_policy().flat_fee.is_zero());
        assert_eq!(config.http_timeout_secs, 5);
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            ("PIXELMART_TAX_BPS", "six"),
            ("PIXELMART_TAX_BPS", "10001"),
            ("PIXELMART_FLAT_FEE_CENTS", "-1"),
            ("PIXELMART_FLAT_FEE_CENTS", "4.99"),
            ("PIXELMART_HTTP_TIMEOUT_SECS", "0"),
            ("PIXELMART_API_URL", "not a url"),
            ("PIXELMART_CART_SLOT", "   "),
        ];

        for (key, value) in cases {
            match config_from(&[(key, value)]) {
                Err(ConfigError::InvalidValue(name)) => assert_eq!(name, key),
                other => panic!("{key}={value:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_blank_db_path_uses_default() {
        let config = config_from(&[("PIXELMART_DB_PATH", "  ")]).unwrap();
        assert_eq!(config.db_path, None);
    }
}
