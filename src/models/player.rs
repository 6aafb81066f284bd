use serde::{Deserialize, Serialize};

use super::{Achievements, RowId};
use crate::serde_utils::trimmed_string;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Player {
    #[serde(default)]
    pub id: Option<RowId>,
    pub slug: String,
    pub name: String,
    #[serde(default, deserialize_with = "trimmed_string")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub achievements: Option<Achievements>,
}

/// Row shape of the players list (`select=name,slug`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_player_row() {
        let player: Player = serde_json::from_str(
            r#"{
                "id": 3,
                "slug": "magnus-carlsen",
                "name": "Magnus Carlsen",
                "avatar_url": " https://cdn.example/magnus.jpg\n",
                "achievements": {"WCC": [2013, 2014, 2016, 2018, 2021]}
            }"#,
        )
        .unwrap();

        assert_eq!(player.avatar_url.as_deref(), Some("https://cdn.example/magnus.jpg"));
        let lines = player.achievements.unwrap().lines();
        assert_eq!(
            lines[0].to_string(),
            "World Chess Championship: 2013, 2014, 2016, 2018, 2021"
        );
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let player: Player =
            serde_json::from_str(r#"{"slug": "gukesh-d", "name": "Gukesh D", "avatar_url": ""}"#)
                .unwrap();
        assert!(player.id.is_none());
        assert!(player.avatar_url.is_none());
        assert!(player.achievements.is_none());

        let summary: PlayerSummary =
            serde_json::from_str(r#"{"name": "Gukesh D", "slug": "gukesh-d"}"#).unwrap();
        assert_eq!(summary.slug, player.slug);
    }
}
