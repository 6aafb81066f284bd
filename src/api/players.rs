use tracing::instrument;

use crate::{
    client::ChessStore,
    error::{log_fetch_failure, ClientError},
    http::{Direction, HttpClient, HttpRequest},
    models::{Player, PlayerSummary},
    paths::PLAYERS_TABLE,
};

impl ChessStore {
    /// Name and slug of every player, sorted by name.
    #[instrument(skip(self))]
    pub async fn try_all_players(&self) -> Result<Vec<PlayerSummary>, ClientError> {
        let req = HttpRequest::get(PLAYERS_TABLE)
            .select("name,slug")
            .order("name", Direction::Asc);

        self.request(req).await
    }

    #[instrument(skip(self))]
    pub async fn try_player_by_slug(&self, slug: &str) -> Result<Option<Player>, ClientError> {
        let req = HttpRequest::get(PLAYERS_TABLE)
            .select("*")
            .eq("slug", slug)
            .limit(1);

        let rows: Vec<Player> = self.request(req).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn all_players(&self) -> Vec<PlayerSummary> {
        self.try_all_players().await.unwrap_or_else(|err| {
            log_fetch_failure("all_players", None, &err);
            Vec::new()
        })
    }

    pub async fn player_by_slug(&self, slug: &str) -> Option<Player> {
        self.try_player_by_slug(slug).await.unwrap_or_else(|err| {
            log_fetch_failure("player_by_slug", Some(slug), &err);
            None
        })
    }
}
