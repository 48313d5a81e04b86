use std::collections::HashMap;
use std::time::Duration;

pub const GEOCODING_URL_ENV: &str = "WEATHER_GEOCODING_URL";
pub const FORECAST_URL_ENV: &str = "WEATHER_FORECAST_URL";
pub const TIMEOUT_SECS_ENV: &str = "WEATHER_TIMEOUT_SECS";
pub const DEBOUNCE_MS_ENV: &str = "WEATHER_DEBOUNCE_MS";
pub const SUGGEST_LIMIT_ENV: &str = "WEATHER_SUGGEST_LIMIT";
pub const LOG_FILTER_ENV: &str = "WEATHER_LOG";

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";
/// Same as the blocking HTTP client's own default.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const MAX_SUGGESTIONS: u8 = 5;
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub timeout_secs: u64,
    pub debounce_ms: u64,
    pub suggest_limit: u8,
    pub log_filter: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from_pairs(Vec::<(String, String)>::new())
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_pairs(std::env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        Self {
            geocoding_url: resolve_base_url(&map, GEOCODING_URL_ENV, DEFAULT_GEOCODING_URL),
            forecast_url: resolve_base_url(&map, FORECAST_URL_ENV, DEFAULT_FORECAST_URL),
            timeout_secs: resolve_positive(&map, TIMEOUT_SECS_ENV).unwrap_or(DEFAULT_TIMEOUT_SECS),
            debounce_ms: resolve_positive(&map, DEBOUNCE_MS_ENV).unwrap_or(DEFAULT_DEBOUNCE_MS),
            suggest_limit: resolve_positive(&map, SUGGEST_LIMIT_ENV)
                .map(|value| value.min(u64::from(MAX_SUGGESTIONS)) as u8)
                .unwrap_or(MAX_SUGGESTIONS),
            log_filter: non_empty(&map, LOG_FILTER_ENV)
                .unwrap_or(DEFAULT_LOG_FILTER)
                .to_string(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn non_empty<'a>(env_map: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env_map
        .get(key)
        .map(String::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn resolve_base_url(env_map: &HashMap<String, String>, key: &str, default: &str) -> String {
    non_empty(env_map, key)
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}

fn resolve_positive(env_map: &HashMap<String, String>, key: &str) -> Option<u64> {
    non_empty(env_map, key)
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
}
