use std::{
    sync::atomic::{AtomicU64, Ordering},
    sync::Arc,
    time::Instant,
};

use bon::Builder;
use reqwest::Url;
use serde::Serialize;
use tracing::debug;

use crate::{config::Config, error::ClientError};

/// Snapshot of request bookkeeping, served on `/healthz`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub store_url: String,
    pub total_requests: u64,
    pub failed_requests: u64,
    pub last_success_secs_ago: Option<u64>,
    pub last_error: Option<String>,
    pub last_error_secs_ago: Option<u64>,
}

/// Read-only client for the hosted data store.
#[derive(Clone, Builder)]
pub struct ChessStore {
    base_url: Url,
    #[builder(into)]
    api_key: String,
    #[builder(default = reqwest::Client::new())]
    pub(crate) http_client: reqwest::Client,
    #[builder(skip = Arc::new(AtomicU64::new(0)))]
    total_requests: Arc<AtomicU64>,
    #[builder(skip = Arc::new(AtomicU64::new(0)))]
    failed_requests: Arc<AtomicU64>,
    #[builder(skip = Arc::new(parking_lot::RwLock::new(None)))]
    last_successful_request: Arc<parking_lot::RwLock<Option<Instant>>>,
    #[builder(skip = Arc::new(parking_lot::RwLock::new(None)))]
    last_error: Arc<parking_lot::RwLock<Option<(Instant, String)>>>,
}

impl std::fmt::Debug for ChessStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChessStore")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ChessStore {
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        if config.store_key.trim().is_empty() {
            return Err(ClientError::Unconfigured);
        }

        let base_url = parse_base_url(&config.store_url)?;
        let http_client = reqwest::ClientBuilder::new()
            .timeout(config.request_timeout)
            .build()?;

        debug!(store_url = %base_url, "store client configured");

        Ok(Self::builder()
            .base_url(base_url)
            .api_key(config.store_key.clone())
            .http_client(http_client)
            .build())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Record a successful request
    pub(crate) fn record_success(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        *self.last_successful_request.write() = Some(Instant::now());
    }

    /// Record a failed request
    pub(crate) fn record_failure(&self, error: &str) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
        *self.last_error.write() = Some((Instant::now(), error.to_string()));
    }

    pub fn health_status(&self) -> HealthStatus {
        let last_error = self.last_error.read().clone();

        HealthStatus {
            store_url: self.base_url.to_string(),
            total_requests: self.total_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            last_success_secs_ago: (*self.last_successful_request.read())
                .map(|at| at.elapsed().as_secs()),
            last_error_secs_ago: last_error.as_ref().map(|(at, _)| at.elapsed().as_secs()),
            last_error: last_error.map(|(_, message)| message),
        }
    }
}

/// `Url::join` drops the last path segment unless it ends with a slash.
fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    let url = Url::parse(&raw)
        .map_err(|e| ClientError::InvalidRequest(format!("Invalid store URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::InvalidRequest(format!(
            "Unsupported store URL scheme: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, key: &str) -> Config {
        Config::builder().store_url(url).store_key(key).build()
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let store = ChessStore::from_config(&config("https://abc.supabase.co/proxy", "anon")).unwrap();
        assert_eq!(store.base_url().as_str(), "https://abc.supabase.co/proxy/");
        assert_eq!(
            store.base_url().join("rest/v1/news").unwrap().as_str(),
            "https://abc.supabase.co/proxy/rest/v1/news"
        );
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(matches!(
            ChessStore::from_config(&config("https://abc.supabase.co", "  ")),
            Err(ClientError::Unconfigured)
        ));
        assert!(matches!(
            ChessStore::from_config(&config("not a url", "anon")),
            Err(ClientError::InvalidRequest(_))
        ));
        assert!(matches!(
            ChessStore::from_config(&config("ftp://abc", "anon")),
            Err(ClientError::InvalidRequest(_))
        ));
    }

    #[test]
    fn health_metrics_track_requests() {
        let store = ChessStore::from_config(&config("http://127.0.0.1:1", "anon")).unwrap();
        store.record_success();
        store.record_failure("boom");

        let health = store.health_status();
        assert_eq!(health.total_requests, 2);
        assert_eq!(health.failed_requests, 1);
        assert_eq!(health.last_error.as_deref(), Some("boom"));
        assert!(health.last_success_secs_ago.is_some());
        assert!(health.last_error_secs_ago.is_some());
        assert_eq!(health.store_url, "http://127.0.0.1:1/");
    }
}
