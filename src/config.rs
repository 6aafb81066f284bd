use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

use bon::Builder;
use thiserror::Error;

pub const STORE_URL_VAR: &str = "CHESSDAILY_STORE_URL";
pub const STORE_KEY_VAR: &str = "CHESSDAILY_STORE_KEY";
pub const BIND_VAR: &str = "CHESSDAILY_BIND";
pub const DATA_DIR_VAR: &str = "CHESSDAILY_DATA_DIR";
pub const ASSETS_DIR_VAR: &str = "CHESSDAILY_ASSETS_DIR";
pub const PAGE_SIZE_VAR: &str = "CHESSDAILY_PAGE_SIZE";
pub const TIMEOUT_VAR: &str = "CHESSDAILY_TIMEOUT_MS";
pub const LOG_JSON_VAR: &str = "CHESSDAILY_LOG_JSON";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },

    #[error("Failed to load {}: {message}", path.display())]
    EnvFile { path: PathBuf, message: String },
}

/// Loads variables from an env file. A missing file is not an error; a file
/// that exists but does not parse is.
pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::EnvFile {
            path: path.to_path_buf(),
            message: err.to_string(),
        }),
    }
}

#[derive(Debug, Clone, Builder)]
pub struct Config {
    #[builder(into)]
    pub store_url: String,
    #[builder(into)]
    pub store_key: String,
    #[builder(default = SocketAddr::from(([0, 0, 0, 0], 3000)))]
    pub bind_addr: SocketAddr,
    #[builder(into, default = PathBuf::from("data"))]
    pub data_dir: PathBuf,
    #[builder(into)]
    pub assets_dir: Option<PathBuf>,
    #[builder(default = 10)]
    pub page_size: usize,
    #[builder(default = Duration::from_secs(10))]
    pub request_timeout: Duration,
    #[builder(default)]
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let store_url = get(STORE_URL_VAR).ok_or(ConfigError::Missing(STORE_URL_VAR))?;
        let store_key = get(STORE_KEY_VAR).ok_or(ConfigError::Missing(STORE_KEY_VAR))?;

        let bind_addr = match get(BIND_VAR) {
            Some(raw) => parse(BIND_VAR, &raw)?,
            None => SocketAddr::from(([0, 0, 0, 0], 3000)),
        };
        let page_size = match get(PAGE_SIZE_VAR) {
            Some(raw) => match parse::<usize>(PAGE_SIZE_VAR, &raw)? {
                0 => {
                    return Err(ConfigError::Invalid {
                        var: PAGE_SIZE_VAR,
                        value: raw,
                    })
                }
                n => n,
            },
            None => 10,
        };
        let request_timeout = match get(TIMEOUT_VAR) {
            Some(raw) => Duration::from_millis(parse(TIMEOUT_VAR, &raw)?),
            None => Duration::from_secs(10),
        };
        let log_json = match get(LOG_JSON_VAR) {
            Some(raw) => parse_bool(LOG_JSON_VAR, &raw)?,
            None => false,
        };

        Ok(Self {
            store_url,
            store_key,
            bind_addr,
            data_dir: get(DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            assets_dir: get(ASSETS_DIR_VAR).map(PathBuf::from),
            page_size,
            request_timeout,
            log_json,
        })
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
        var,
        value: raw.to_string(),
    })
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Ok(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
        }),
    }
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
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_store_is_set() {
        let config = Config::from_lookup(lookup(&[
            (STORE_URL_VAR, "https://example.supabase.co"),
            (STORE_KEY_VAR, "anon"),
        ]))
        .unwrap();

        assert_eq!(config.store_url, "https://example.supabase.co");
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.assets_dir, None);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(!config.log_json);
    }

    #[test]
    fn missing_store_settings_are_reported() {
        assert_eq!(
            Config::from_lookup(lookup(&[(STORE_KEY_VAR, "anon")])).unwrap_err(),
            ConfigError::Missing(STORE_URL_VAR)
        );
        assert_eq!(
            Config::from_lookup(lookup(&[(STORE_URL_VAR, "http://x"), (STORE_KEY_VAR, " ")]))
                .unwrap_err(),
            ConfigError::Missing(STORE_KEY_VAR)
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            (STORE_URL_VAR, "http://127.0.0.1:54321"),
            (STORE_KEY_VAR, "anon"),
            (BIND_VAR, "127.0.0.1:8080"),
            (DATA_DIR_VAR, "/srv/chess"),
            (ASSETS_DIR_VAR, "public"),
            (PAGE_SIZE_VAR, "25"),
            (TIMEOUT_VAR, "1500"),
            (LOG_JSON_VAR, "yes"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.data_dir, PathBuf::from("/srv/chess"));
        assert_eq!(config.assets_dir, Some(PathBuf::from("public")));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
        assert!(config.log_json);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let base = [(STORE_URL_VAR, "http://x"), (STORE_KEY_VAR, "anon")];

        let err = Config::from_lookup(lookup(&[base[0], base[1], (PAGE_SIZE_VAR, "0")]));
        assert!(matches!(err, Err(ConfigError::Invalid { var: PAGE_SIZE_VAR, .. })));

        let err = Config::from_lookup(lookup(&[base[0], base[1], (BIND_VAR, "nowhere")]));
        assert!(matches!(err, Err(ConfigError::Invalid { var: BIND_VAR, .. })));

        let err = Config::from_lookup(lookup(&[base[0], base[1], (LOG_JSON_VAR, "maybe")]));
        assert!(matches!(err, Err(ConfigError::Invalid { var: LOG_JSON_VAR, .. })));
    }

    #[test]
    fn env_file_may_be_missing_but_not_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        assert_eq!(load_env_file(&path), Ok(()));

        std::fs::write(&path, "this line is broken\n").unwrap();
        let err = load_env_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile { .. }));
        assert!(err.to_string().contains(".env"));
    }

    #[test]
    fn builder_fills_defaults() {
        let config = Config::builder()
            .store_url("http://127.0.0.1:1")
            .store_key("anon")
            .page_size(3)
            .build();
        assert_eq!(config.page_size, 3);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.assets_dir.is_none());
    }
}
