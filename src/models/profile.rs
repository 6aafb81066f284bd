use serde::{Deserialize, Serialize};

use super::Achievements;
use crate::serde_utils::trimmed_string;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageCredit {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl ImageCredit {
    /// "author / source / license", skipping whatever is missing.
    pub fn attribution(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.author, &self.source, &self.license]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.trim().is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" / "))
    }
}

/// Bundled per-player document, one file per slug.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerProfile {
    pub name: String,
    #[serde(default, deserialize_with = "trimmed_string")]
    pub image: Option<String>,
    #[serde(default)]
    pub image_credit: Option<ImageCredit>,
    #[serde(default)]
    pub achievements: Option<Achievements>,
}
