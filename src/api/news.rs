use tracing::{debug, instrument};

use crate::{
    association,
    client::ChessStore,
    error::{log_fetch_failure, ClientError},
    http::{Direction, HttpClient, HttpRequest},
    models::{EventTagsRow, NewsItem},
    paths::NEWS_TABLE,
};

impl ChessStore {
    /// All news, newest first.
    #[instrument(skip(self))]
    pub async fn try_all_news(&self) -> Result<Vec<NewsItem>, ClientError> {
        let req = HttpRequest::get(NEWS_TABLE)
            .select("*")
            .order("created_at", Direction::Desc);

        self.request(req).await
    }

    #[instrument(skip(self))]
    pub async fn try_news_by_slug(&self, slug: &str) -> Result<Option<NewsItem>, ClientError> {
        let req = HttpRequest::get(NEWS_TABLE)
            .select("*")
            .eq("slug", slug)
            .limit(1);

        let rows: Vec<NewsItem> = self.request(req).await?;
        Ok(rows.into_iter().next())
    }

    /// News tagged with the player `slug`, newest first.
    #[instrument(skip(self))]
    pub async fn try_news_for_player(&self, slug: &str) -> Result<Vec<NewsItem>, ClientError> {
        let req = HttpRequest::get(NEWS_TABLE)
            .select("*")
            .contains("players", [slug])
            .order("created_at", Direction::Desc);

        let rows: Vec<NewsItem> = self.request(req).await?;
        Ok(association::related_to_player(rows, slug))
    }

    /// News tagged with the event `slug`, newest first.
    #[instrument(skip(self))]
    pub async fn try_news_for_event(&self, slug: &str) -> Result<Vec<NewsItem>, ClientError> {
        let req = HttpRequest::get(NEWS_TABLE)
            .select("*")
            .contains("events", [slug])
            .order("created_at", Direction::Desc);

        let rows: Vec<NewsItem> = self.request(req).await?;
        Ok(association::related_to_event(rows, slug))
    }

    /// Distinct event tags across the news table, in first-seen order.
    #[instrument(skip(self))]
    pub async fn try_event_tags(&self) -> Result<Vec<String>, ClientError> {
        let req = HttpRequest::get(NEWS_TABLE).select("events");

        let rows: Vec<EventTagsRow> = self.request(req).await?;
        let tags = association::event_tags(rows.iter().map(|row| row.events.as_deref().unwrap_or_default()));
        debug!(rows = rows.len(), events = tags.len(), "derived event tags");
        Ok(tags)
    }

    pub async fn all_news(&self) -> Vec<NewsItem> {
        self.try_all_news().await.unwrap_or_else(|err| {
            log_fetch_failure("all_news", None, &err);
            Vec::new()
        })
    }

    pub async fn news_by_slug(&self, slug: &str) -> Option<NewsItem> {
        self.try_news_by_slug(slug).await.unwrap_or_else(|err| {
            log_fetch_failure("news_by_slug", Some(slug), &err);
            None
        })
    }

    pub async fn news_for_player(&self, slug: &str) -> Vec<NewsItem> {
        self.try_news_for_player(slug).await.unwrap_or_else(|err| {
            log_fetch_failure("news_for_player", Some(slug), &err);
            Vec::new()
        })
    }

    pub async fn news_for_event(&self, slug: &str) -> Vec<NewsItem> {
        self.try_news_for_event(slug).await.unwrap_or_else(|err| {
            log_fetch_failure("news_for_event", Some(slug), &err);
            Vec::new()
        })
    }

    pub async fn event_tags(&self) -> Vec<String> {
        self.try_event_tags().await.unwrap_or_else(|err| {
            log_fetch_failure("event_tags", None, &err);
            Vec::new()
        })
    }
}
