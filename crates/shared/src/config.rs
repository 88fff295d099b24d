//! Application configuration management.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppError;
use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Currency rate source configuration.
    #[serde(default)]
    pub rates: RatesConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
    /// Refresh token expiration in seconds.
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> u64 {
    604_800 // 7 days
}

/// Currency quote source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Quote endpoint returning the list of currency quotes.
    #[serde(default = "default_rates_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_rates_timeout")]
    pub timeout_secs: u64,
    /// Overrides for the static fallback table, keyed by currency code.
    #[serde(default)]
    pub fallback: HashMap<String, Decimal>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            endpoint: default_rates_endpoint(),
            timeout_secs: default_rates_timeout(),
            fallback: HashMap::new(),
        }
    }
}

fn default_rates_endpoint() -> String {
    "https://dolarapi.com/v1/cotizaciones".to_string()
}

fn default_rates_timeout() -> u64 {
    10
}

impl RatesConfig {
    /// Parses the fallback overrides into typed currencies.
    ///
    /// Keys are matched case-insensitively because the `config` crate
    /// lowercases them.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for an unknown code, the reference
    /// currency, or a non-positive rate.
    pub fn fallback_overrides(&self) -> Result<BTreeMap<Currency, Decimal>, AppError> {
        let mut overrides = BTreeMap::new();
        for (code, rate) in &self.fallback {
            let currency = Currency::from_str(code).map_err(AppError::Config)?;
            if currency.is_reference() {
                return Err(AppError::Config(format!(
                    "{currency} is the reference currency and has no fallback rate"
                )));
            }
            if *rate <= Decimal::ZERO {
                return Err(AppError::Config(format!(
                    "fallback rate for {currency} must be positive, got {rate}"
                )));
            }
            overrides.insert(currency, *rate);
        }
        Ok(overrides)
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FAIRSHARE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
