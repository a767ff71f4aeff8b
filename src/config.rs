// Configuration for the relay service:
// - deposit address list (required)
// - explorer base URL and downstream update URL
// - unit subdivision factor and currency label
// - server listening address/port
// - optional transport timeout and seen-transaction window

use dotenv::dotenv;
use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::validation::{validate_deposit_address, ValidationError};

pub const DEFAULT_EXPLORER_URL: &str = "https://bch-chain.api.btc.com/v3/address";
pub const SATOSHI_NUMBER: u64 = 100_000_000;
pub const DEFAULT_CURRENCY: &str = "BCH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("BCH address list cannot be found")]
    MissingAddressList,

    #[error("BCH address list is empty")]
    EmptyAddressList,

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Invalid deposit address: {0}")]
    InvalidAddress(#[from] ValidationError),
}

/// Settings the relay itself needs, separated from the server settings so a
/// relay can be built against any pair of endpoints.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub deposit_addresses: Vec<String>,
    pub explorer_url: String,
    pub update_url: String,
    pub subdivision: u64,
    pub currency: String,
    pub http_timeout: Option<Duration>,
    pub strict_forwarding: bool,
    pub seen_window: Option<Duration>,
    pub seen_window_capacity: u64,
}

impl RelayConfig {
    pub fn new(
        deposit_addresses: Vec<String>,
        explorer_url: impl Into<String>,
        update_url: impl Into<String>,
    ) -> Self {
        Self {
            deposit_addresses,
            explorer_url: explorer_url.into(),
            update_url: update_url.into(),
            subdivision: SATOSHI_NUMBER,
            currency: DEFAULT_CURRENCY.to_string(),
            http_timeout: None,
            strict_forwarding: false,
            seen_window: None,
            seen_window_capacity: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub app_version: String,
    pub server_host: String,
    pub server_port: u16,
    pub relay: RelayConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let deposit_addresses = parse_address_list(lookup("BCH_ADDRESS_LIST"))?;

        let update_url = lookup("API_UPDATE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("API_UPDATE_URL"))?;
        let explorer_url = lookup("BCH_TX_URL").unwrap_or_else(|| DEFAULT_EXPLORER_URL.to_string());

        let subdivision = parse_or("SATOSHI_NUMBER", lookup("SATOSHI_NUMBER"), SATOSHI_NUMBER)?;
        if subdivision == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SATOSHI_NUMBER",
                value: "0".to_string(),
            });
        }
        let currency = lookup("CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(v) => Some(Duration::from_secs(parse_value("HTTP_TIMEOUT_SECS", &v)?)),
            None => None,
        };
        let strict_forwarding = parse_or("STRICT_FORWARDING", lookup("STRICT_FORWARDING"), false)?;
        let seen_window_secs: u64 = parse_or("SEEN_WINDOW_SECS", lookup("SEEN_WINDOW_SECS"), 0)?;
        let seen_window = (seen_window_secs > 0).then(|| Duration::from_secs(seen_window_secs));
        let seen_window_capacity =
            parse_or("SEEN_WINDOW_CAPACITY", lookup("SEEN_WINDOW_CAPACITY"), 10_000)?;

        let app_name = lookup("HEROKU_APP_NAME").unwrap_or_else(|| "Unknown Name".to_string());
        let app_version =
            lookup("HEROKU_RELEASE_VERSION").unwrap_or_else(|| "Unknown Version".to_string());
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let server_port = parse_or("PORT", lookup("PORT"), 8080)?;

        Ok(Self {
            app_name,
            app_version,
            server_host,
            server_port,
            relay: RelayConfig {
                deposit_addresses,
                explorer_url,
                update_url,
                subdivision,
                currency,
                http_timeout,
                strict_forwarding,
                seen_window,
                seen_window_capacity,
            },
        })
    }
}

/// Split a comma-separated address list, dropping blank entries.
pub fn parse_address_list(raw: Option<String>) -> Result<Vec<String>, ConfigError> {
    let raw = raw.ok_or(ConfigError::MissingAddressList)?;

    let addresses: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect();

    if addresses.is_empty() {
        return Err(ConfigError::EmptyAddressList);
    }

    for address in &addresses {
        validate_deposit_address(address)?;
    }

    Ok(addresses)
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(v) => parse_value(key, &v),
        None => Ok(default),
    }
}
