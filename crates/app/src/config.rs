//! Application configuration, read from the environment once at startup.

use thiserror::Error;

use invoicekit_invoicing::DEFAULT_CURRENCY;
use invoicekit_observability::{LogFormat, ParseLogFormatError};

pub const ENV_CURRENCY: &str = "INVOICEKIT_CURRENCY";
pub const ENV_SEED: &str = "INVOICEKIT_SEED";
pub const ENV_LOG_FORMAT: &str = "INVOICEKIT_LOG_FORMAT";
pub const ENV_RECENT_LIMIT: &str = "INVOICEKIT_RECENT_LIMIT";

const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// ISO 4217 code used when formatting amounts.
    pub currency: String,
    /// Start with the mock invoices loaded.
    pub seed_mock_data: bool,
    pub log_format: LogFormat,
    /// How many invoices the dashboard lists as recent.
    pub recent_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            seed_mock_data: true,
            log_format: LogFormat::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: '{value}' is not a three-letter currency code")]
    InvalidCurrency { var: &'static str, value: String },

    #[error("{var}: '{value}' is not a boolean (true/false/1/0/yes/no)")]
    InvalidBool { var: &'static str, value: String },

    #[error("{var}: '{value}' is not a positive integer")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var}: {source}")]
    InvalidLogFormat {
        var: &'static str,
        #[source]
        source: ParseLogFormatError,
    },
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_CURRENCY) {
            config.currency = parse_currency(&value)?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            config.seed_mock_data = parse_bool(ENV_SEED, &value)?;
        }
        if let Some(value) = lookup(ENV_LOG_FORMAT) {
            config.log_format = value
                .parse()
                .map_err(|source| ConfigError::InvalidLogFormat {
                    var: ENV_LOG_FORMAT,
                    source,
                })?;
        }
        if let Some(value) = lookup(ENV_RECENT_LIMIT) {
            config.recent_limit = match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: ENV_RECENT_LIMIT,
                        value,
                    });
                }
            };
        }

        Ok(config)
    }
}

fn parse_currency(value: &str) -> Result<String, ConfigError> {
    let code = value.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(ConfigError::InvalidCurrency {
            var: ENV_CURRENCY,
            value: value.to_string(),
        })
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
