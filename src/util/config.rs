use std::{env, path::PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "MarketDesk";
const APP_NAME: &str = "MarketDesk";

pub const ENV_DATA_DIR: &str = "MARKET_DESK_DATA_DIR";
pub const ENV_LOG: &str = "MARKET_DESK_LOG";
pub const ENV_CURRENCY: &str = "MARKET_DESK_CURRENCY";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no data directory available; set MARKET_DESK_DATA_DIR")]
    NoDataDir,
    #[error("MARKET_DESK_CURRENCY must not be blank")]
    BlankCurrency,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Directory holding the market store document.
    pub data_dir: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
    pub currency_symbol: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup(ENV_DATA_DIR).filter(|value| !value.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir().ok_or(ConfigError::NoDataDir)?,
        };
        let log_filter = lookup(ENV_LOG)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());
        let currency_symbol = match lookup(ENV_CURRENCY) {
            Some(symbol) if symbol.trim().is_empty() => return Err(ConfigError::BlankCurrency),
            Some(symbol) => symbol.trim().to_string(),
            None => "$".to_string(),
        };

        Ok(Self {
            data_dir,
            log_filter,
            currency_symbol,
        })
    }
}

fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn explicit_values_win() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_DATA_DIR, "/tmp/market"),
            (ENV_LOG, "debug"),
            (ENV_CURRENCY, " € "),
        ]))
        .expect("valid config");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/market"));
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.currency_symbol, "€");
    }

    #[test]
    fn defaults_apply() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_DATA_DIR, "/tmp/market")]))
            .expect("valid config");
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn blank_currency_is_rejected() {
        let result = AppConfig::from_lookup(lookup(&[
            (ENV_DATA_DIR, "/tmp/market"),
            (ENV_CURRENCY, "  "),
        ]));
        assert_eq!(result, Err(ConfigError::BlankCurrency));
    }
}
