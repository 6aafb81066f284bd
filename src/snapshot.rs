//! Bundled JSON documents: the ratings snapshot and per-player profiles.

use std::{io::ErrorKind, path::PathBuf};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    models::{PlayerProfile, RatingsSnapshot},
    paths::{PLAYER_PROFILES_DIR, RATINGS_FILE},
};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Snapshots {
    dir: PathBuf,
}

impl Snapshots {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn ratings(&self) -> Result<RatingsSnapshot, SnapshotError> {
        let path = self.dir.join(RATINGS_FILE);
        let raw = std::fs::read(&path).map_err(|source| SnapshotError::Io {
            path: path.clone(),
            source,
        })?;
        let snapshot: RatingsSnapshot =
            serde_json::from_slice(&raw).map_err(|source| SnapshotError::Json { path, source })?;
        debug!(
            classical = snapshot.classical.len(),
            rapid = snapshot.rapid.len(),
            blitz = snapshot.blitz.len(),
            "loaded ratings snapshot"
        );
        Ok(snapshot)
    }

    /// Profile document for `slug`. `Ok(None)` when there is no such document.
    #[instrument(skip(self))]
    pub async fn player_profile(&self, slug: &str) -> Result<Option<PlayerProfile>, SnapshotError> {
        if !is_safe_slug(slug) {
            debug!("rejected profile slug");
            return Ok(None);
        }

        let path = self
            .dir
            .join(PLAYER_PROFILES_DIR)
            .join(format!("{slug}.json"));
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(SnapshotError::Io { path, source }),
        };

        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|source| SnapshotError::Json { path, source })
    }
}

fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
