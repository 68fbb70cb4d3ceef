// src/config.rs

use std::{env, net::IpAddr};
use tracing::warn;

/// Where the historical automobile sales CSV lives.
pub static DEFAULT_DATA_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/historical_automobile_sales.csv";

pub const DEFAULT_PORT: u16 = 8050;

/// Runtime settings. Every field has a default so the dashboard runs with
/// an empty environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            host: IpAddr::from([127, 0, 0, 1]),
            port: DEFAULT_PORT,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Read `DATA_URL`, `HOST`, `PORT` and `LOG_LEVEL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, with the variable source injected.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        if let Some(url) = lookup("DATA_URL").filter(|u| !u.trim().is_empty()) {
            cfg.data_url = url.trim().to_string();
        }

        if let Some(raw) = lookup("HOST") {
            match raw.trim().parse() {
                Ok(host) => cfg.host = host,
                Err(e) => warn!(value = %raw, error = %e, "ignoring invalid HOST"),
            }
        }

        if let Some(raw) = lookup("PORT") {
            match raw.trim().parse() {
                Ok(port) => cfg.port = port,
                Err(e) => warn!(value = %raw, error = %e, "ignoring invalid PORT"),
            }
        }

        if let Some(level) = lookup("LOG_LEVEL").filter(|l| !l.trim().is_empty()) {
            cfg.log_level = level.trim().to_string();
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = Config::from_lookup(|_| None);
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.port, 8050);
        assert_eq!(cfg.data_url, DEFAULT_DATA_URL);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("DATA_URL", "http://localhost:9000/sales.csv"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9999"),
            ("LOG_LEVEL", "debug"),
        ]));
        assert_eq!(cfg.data_url, "http://localhost:9000/sales.csv");
        assert_eq!(cfg.host, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(cfg.port, 9999);
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = Config::from_lookup(lookup_from(&[("PORT", "eighty"), ("HOST", "nowhere")]));
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.host, Config::default().host);
    }
}
