use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::serde_utils::{lenient_tags, trimmed_string};

/// Primary key of a store row. Tables may use serial or text keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, Display)]
#[serde(untagged)]
pub enum RowId {
    #[display("{_0}")]
    Int(i64),
    #[display("{_0}")]
    Text(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsItem {
    pub id: RowId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "trimmed_string")]
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub players: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub events: Option<Vec<String>>,
}

impl NewsItem {
    pub fn player_tags(&self) -> &[String] {
        self.players.as_deref().unwrap_or_default()
    }

    pub fn event_tags(&self) -> &[String] {
        self.events.as_deref().unwrap_or_default()
    }
}

/// Projection used when only the event tags of the news table are needed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventTagsRow {
    #[serde(default, deserialize_with = "lenient_tags")]
    pub events: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_store_row() {
        let item: NewsItem = serde_json::from_str(
            r#"{
                "id": 7,
                "title": "Carlsen wins Norway Chess",
                "slug": "carlsen-wins-norway-chess",
                "summary": "Sixth title.",
                "cover_url": "  https://cdn.example/cover.jpg ",
                "created_at": "2024-06-07T18:30:00+00:00",
                "players": ["magnus-carlsen", "hikaru-nakamura"],
                "events": ["norway-chess-2024"]
            }"#,
        )
        .unwrap();

        assert_eq!(item.id, RowId::Int(7));
        assert_eq!(item.cover_url.as_deref(), Some("https://cdn.example/cover.jpg"));
        assert_eq!(item.player_tags().len(), 2);
        assert_eq!(item.event_tags(), ["norway-chess-2024".to_string()]);
        assert!(item.published_at.is_none());
        assert!(item.content.is_none());
    }

    #[test]
    fn malformed_tags_do_not_fail_the_row() {
        let item: NewsItem = serde_json::from_str(
            r#"{
                "id": "a1b2",
                "title": "t",
                "slug": "s",
                "created_at": "2024-01-01T00:00:00Z",
                "players": "magnus-carlsen",
                "events": null
            }"#,
        )
        .unwrap();

        assert_eq!(item.id.to_string(), "a1b2");
        assert!(item.players.is_none());
        assert!(item.events.is_none());
        assert!(item.player_tags().is_empty());

        let item: NewsItem = serde_json::from_str(
            r#"{"id": 1, "title": "t", "slug": "s", "created_at": "2024-01-01T00:00:00Z",
                "events": ["tata-steel", 42, null]}"#,
        )
        .unwrap();
        assert_eq!(item.event_tags(), ["tata-steel".to_string()]);
        assert!(item.players.is_none());
    }

    #[test]
    fn event_tags_row_accepts_missing_column() {
        let rows: Vec<EventTagsRow> =
            serde_json::from_str(r#"[{"events": ["a"]}, {}, {"events": {"x": 1}}]"#).unwrap();
        assert_eq!(rows[0].events.as_deref(), Some(&["a".to_string()][..]));
        assert!(rows[1].events.is_none());
        assert!(rows[2].events.is_none());
    }
}
