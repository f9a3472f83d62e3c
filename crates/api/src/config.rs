//! Process configuration for the two services, read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use ledgerdesk_sports::SportsConfig;

pub const DEFAULT_BANK_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_SPORTS_BIND_ADDR: &str = "0.0.0.0:8001";
pub const DEFAULT_USERS_DB_FILE: &str = "users_db.json";
pub const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost,http://localhost:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },
}

/// Bank service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankConfig {
    pub bind_addr: SocketAddr,
    pub users_db_file: PathBuf,
    pub allowed_origins: Vec<String>,
}

impl BankConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = bind_addr(&lookup, "BANK_BIND_ADDR", DEFAULT_BANK_BIND_ADDR)?;

        let users_db_file = lookup("USERS_DB_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_DB_FILE));

        let origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGINS.to_string());
        let allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            bind_addr,
            users_db_file,
            allowed_origins,
        })
    }
}

/// Sports proxy settings: where to listen plus the upstream client config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SportsServiceConfig {
    pub bind_addr: SocketAddr,
    pub upstream: SportsConfig,
}

impl SportsServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = bind_addr(&lookup, "SPORTS_BIND_ADDR", DEFAULT_SPORTS_BIND_ADDR)?;
        Ok(Self {
            bind_addr,
            upstream: SportsConfig::from_lookup(lookup),
        })
    }
}

fn bind_addr(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
) -> Result<SocketAddr, ConfigError> {
    let value = match lookup(var).filter(|v| !v.trim().is_empty()) {
        Some(v) => v.trim().to_string(),
        None => default.to_string(),
    };
    value
        .parse()
        .map_err(|_| ConfigError::InvalidAddr { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn bank_defaults() {
        let c = BankConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.users_db_file, PathBuf::from("users_db.json"));
        assert_eq!(
            c.allowed_origins,
            vec!["http://localhost".to_string(), "http://localhost:3000".to_string()]
        );
    }

    #[test]
    fn bank_overrides() {
        let c = BankConfig::from_lookup(lookup(&[
            ("BANK_BIND_ADDR", "127.0.0.1:9000"),
            ("USERS_DB_FILE", "/tmp/ledger.json"),
            ("CORS_ALLOWED_ORIGINS", " https://a.example , ,https://b.example"),
        ]))
        .unwrap();
        assert_eq!(c.bind_addr.port(), 9000);
        assert_eq!(c.users_db_file, PathBuf::from("/tmp/ledger.json"));
        assert_eq!(c.allowed_origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn invalid_bind_addr_is_reported() {
        let err = BankConfig::from_lookup(lookup(&[("BANK_BIND_ADDR", "not-an-addr")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidAddr {
                var: "BANK_BIND_ADDR",
                value: "not-an-addr".to_string()
            }
        );
    }

    #[test]
    fn sports_defaults_to_port_8001() {
        let c = SportsServiceConfig::from_lookup(lookup(&[("SPORTS_API_KEY", "k")])).unwrap();
        assert_eq!(c.bind_addr.port(), 8001);
        assert_eq!(c.upstream.api_key, "k");
    }
}
