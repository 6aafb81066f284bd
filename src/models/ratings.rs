use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Game-pace category a ratings list belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TimeControl {
    #[default]
    Classical,
    Rapid,
    Blitz,
}

impl TimeControl {
    /// Tab label, e.g. "Rapid".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Classical => "Classical",
            Self::Rapid => "Rapid",
            Self::Blitz => "Blitz",
        }
    }

    /// Parses a query value, falling back to classical for anything unknown.
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().to_ascii_lowercase().parse().ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RatingEntry {
    pub rank: u32,
    pub name: String,
    #[serde(default)]
    pub fed: String,
    pub rating: f64,
    #[serde(default)]
    pub born: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RatingsSnapshot {
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub classical: Vec<RatingEntry>,
    #[serde(default)]
    pub rapid: Vec<RatingEntry>,
    #[serde(default)]
    pub blitz: Vec<RatingEntry>,
}

impl RatingsSnapshot {
    pub fn list(&self, time_control: TimeControl) -> &[RatingEntry] {
        match time_control {
            TimeControl::Classical => &self.classical,
            TimeControl::Rapid => &self.rapid,
            TimeControl::Blitz => &self.blitz,
        }
    }
}
