use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, warn};

use crate::{
    client::ChessStore,
    config::Config,
    models::{RatingsSnapshot, TimeControl},
    pages::{self, HomeView, PlayerView},
    paging::paginate,
    snapshot::Snapshots,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: ChessStore,
    pub snapshots: Snapshots,
    pub ratings: Arc<RatingsSnapshot>,
    pub page_size: usize,
}

impl AppState {
    pub fn new(store: ChessStore, snapshots: Snapshots, page_size: usize) -> Self {
        let ratings = snapshots.ratings().unwrap_or_else(|err| {
            error!(error = %err, "ratings snapshot unavailable, serving empty tables");
            RatingsSnapshot::default()
        });
        Self {
            store,
            snapshots,
            ratings: Arc::new(ratings),
            page_size,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, crate::error::ClientError> {
        Ok(Self::new(
            ChessStore::from_config(config)?,
            Snapshots::new(&config.data_dir),
            config.page_size,
        ))
    }
}

/// UI selection carried in the home page URL.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    tc: Option<String>,
    page: Option<String>,
}

impl HomeQuery {
    fn time_control(&self) -> TimeControl {
        TimeControl::from_query(self.tc.as_deref())
    }

    fn page(&self) -> Option<usize> {
        self.page.as_deref().and_then(|p| p.trim().parse().ok())
    }
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Html(pages::not_found(message))).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
async fn home(State(state): State<AppState>, Query(query): Query<HomeQuery>) -> Html<String> {
    let news = state.store.all_news().await;
    let (slice, page) = paginate(&news, query.page(), state.page_size);

    Html(pages::home(&HomeView {
        news: slice,
        page,
        ratings: &state.ratings,
        time_control: query.time_control(),
    }))
}

/// GET /news/:slug
async fn news_detail(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.store.news_by_slug(&slug).await {
        Some(item) => Html(pages::news_detail(&item)).into_response(),
        None => not_found(pages::NEWS_NOT_FOUND),
    }
}

/// GET /players
async fn players(State(state): State<AppState>) -> Html<String> {
    Html(pages::players(&state.store.all_players().await))
}

/// GET /players/:slug
async fn player_detail(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let player = state.store.player_by_slug(&slug).await;
    let profile = state
        .snapshots
        .player_profile(&slug)
        .await
        .unwrap_or_else(|err| {
            warn!(slug = %slug, error = %err, "player profile unreadable");
            None
        });

    let Some(view) = PlayerView::merge(player, profile) else {
        return not_found(pages::PLAYER_NOT_FOUND);
    };

    let related = state.store.news_for_player(&slug).await;
    Html(pages::player(&view, &related)).into_response()
}

/// GET /events
async fn events(State(state): State<AppState>) -> Html<String> {
    Html(pages::events(&state.store.event_tags().await))
}

/// GET /events/:slug
async fn event_detail(State(state): State<AppState>, Path(slug): Path<String>) -> Html<String> {
    let news = state.store.news_for_event(&slug).await;
    Html(pages::event(&slug, &news))
}

/// GET /healthz
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.health_status())
}

pub fn build_router(state: AppState, assets_dir: Option<&std::path::Path>) -> Router {
    let router = Router::new()
        .route("/", get(home))
        .route("/news/:slug", get(news_detail))
        .route("/players", get(players))
        .route("/players/:slug", get(player_detail))
        .route("/events", get(events))
        .route("/events/:slug", get(event_detail))
        .route("/healthz", get(health))
        .with_state(state);

    let router = match assets_dir {
        Some(dir) => router.nest_service("/static", ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}
