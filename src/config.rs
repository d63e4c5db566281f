//! Runtime configuration, read from the environment (and `.env` via dotenvy).

use crate::constants::*;
use crate::services::PlaySeed;
use crate::utils::errors::ConfigError;
use crate::utils::http::HttpSettings;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file backing the local catalog.
    pub db_path: PathBuf,
    pub primary_api_base: String,
    pub secondary_api_base: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// `limit` parameter of secondary searches.
    pub secondary_search_limit: u32,
    /// Query standing in for the primary provider's missing trending endpoint.
    pub trending_seed_query: String,
    pub play_seed: PlaySeed,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("[Config] No .env loaded: {}", e);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let db_path = match get("ISAITHALAM_DB_PATH") {
            Some(path) => PathBuf::from(path),
            None => crate::data::SqliteStore::default_path()
                .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME).join(DB_FILE_NAME)),
        };

        let play_seed = match parse::<u64>(&get, "SYNTHETIC_PLAYS_SEED")? {
            Some(seed) => PlaySeed::Fixed(seed),
            None => PlaySeed::Entropy,
        };

        Ok(Self {
            db_path,
            primary_api_base: get("PRIMARY_API_BASE")
                .unwrap_or_else(|| DEFAULT_PRIMARY_API_BASE.to_string()),
            secondary_api_base: get("SECONDARY_API_BASE")
                .unwrap_or_else(|| DEFAULT_SECONDARY_API_BASE.to_string()),
            connect_timeout: timeout(&get, "PROVIDER_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
            request_timeout: timeout(&get, "PROVIDER_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            secondary_search_limit: parse(&get, "SECONDARY_SEARCH_LIMIT")?
                .unwrap_or(DEFAULT_SECONDARY_SEARCH_LIMIT),
            trending_seed_query: get("TRENDING_SEED_QUERY")
                .unwrap_or_else(|| DEFAULT_TRENDING_SEED_QUERY.to_string()),
            play_seed,
        })
    }

    /// Primary provider wants a browser user agent
    pub fn primary_http(&self) -> HttpSettings {
        HttpSettings {
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
            user_agent: Some(BROWSER_USER_AGENT.to_string()),
        }
    }

    pub fn secondary_http(&self) -> HttpSettings {
        HttpSettings {
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
            user_agent: None,
        }
    }
}

// Provider calls must stay bounded: 1..=MAX_TIMEOUT_SECS
fn timeout(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    let secs = parse(get, key)?.unwrap_or(default);
    if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
        return Err(ConfigError {
            key,
            value: secs.to_string(),
            reason: format!("must be between 1 and {} seconds", MAX_TIMEOUT_SECS),
        });
    }
    Ok(Duration::from_secs(secs))
}

fn parse<T>(get: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.primary_api_base, DEFAULT_PRIMARY_API_BASE);
        assert_eq!(config.secondary_api_base, DEFAULT_SECONDARY_API_BASE);
        assert_eq!(config.connect_timeout, Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
        assert_eq!(config.secondary_search_limit, 10);
        assert_eq!(config.trending_seed_query, "latest tamil");
        assert_eq!(config.play_seed, PlaySeed::Entropy);
        assert!(config.db_path.ends_with(DB_FILE_NAME));
    }

    #[test]
    fn overrides_are_read() {
        let config = config(&[
            ("ISAITHALAM_DB_PATH", "/tmp/x.db"),
            ("PRIMARY_API_BASE", "http://localhost:1"),
            ("PROVIDER_TIMEOUT_SECS", " 9 "),
            ("SECONDARY_SEARCH_LIMIT", "25"),
            ("TRENDING_SEED_QUERY", "top malayalam"),
            ("SYNTHETIC_PLAYS_SEED", "42"),
        ])
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.primary_api_base, "http://localhost:1");
        assert_eq!(config.request_timeout, Duration::from_secs(9));
        assert_eq!(config.secondary_search_limit, 25);
        assert_eq!(config.trending_seed_query, "top malayalam");
        assert_eq!(config.play_seed, PlaySeed::Fixed(42));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config(&[("TRENDING_SEED_QUERY", "  ")]).unwrap();
        assert_eq!(config.trending_seed_query, DEFAULT_TRENDING_SEED_QUERY);
    }

    #[test]
    fn invalid_number_is_an_error() {
        let err = config(&[("PROVIDER_CONNECT_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert_eq!(err.key, "PROVIDER_CONNECT_TIMEOUT_SECS");
        assert_eq!(err.value, "soon");
    }

    #[test]
    fn timeouts_must_be_bounded() {
        let zero = config(&[("PROVIDER_CONNECT_TIMEOUT_SECS", "0")]).unwrap_err();
        assert_eq!(zero.key, "PROVIDER_CONNECT_TIMEOUT_SECS");

        let huge = config(&[("PROVIDER_TIMEOUT_SECS", "86400")]).unwrap_err();
        assert_eq!(huge.key, "PROVIDER_TIMEOUT_SECS");
        assert_eq!(huge.value, "86400");

        let edge = config(&[("PROVIDER_TIMEOUT_SECS", MAX_TIMEOUT_SECS.to_string().as_str())]).unwrap();
        assert_eq!(edge.request_timeout, Duration::from_secs(MAX_TIMEOUT_SECS));
    }

    #[test]
    fn only_primary_sends_browser_agent() {
        let config = config(&[]).unwrap();
        assert_eq!(config.primary_http().user_agent.as_deref(), Some(BROWSER_USER_AGENT));
        assert!(config.secondary_http().user_agent.is_none());
    }
}
