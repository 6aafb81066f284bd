//! In-process stand-in for the data store's REST endpoint.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use parking_lot::Mutex;

use crate::{client::ChessStore, config::Config};

#[derive(Clone, Default)]
struct FakeState {
    responses: Arc<HashMap<String, (StatusCode, String)>>,
    seen: Arc<Mutex<Vec<String>>>,
}

pub(crate) struct FakeStore {
    pub url: String,
    seen: Arc<Mutex<Vec<String>>>,
}

impl FakeStore {
    /// Serves `body` with `status` for each listed table. Unlisted tables
    /// answer with a PostgREST "relation does not exist" error.
    pub async fn spawn(tables: &[(&str, StatusCode, &str)]) -> Self {
        let state = FakeState {
            responses: Arc::new(
                tables
                    .iter()
                    .map(|(table, status, body)| (table.to_string(), (*status, body.to_string())))
                    .collect(),
            ),
            seen: Arc::default(),
        };
        let seen = Arc::clone(&state.seen);

        let app = Router::new()
            .route("/rest/v1/:table", get(handle))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });

        Self {
            url: format!("http://{addr}"),
            seen,
        }
    }

    pub fn store(&self) -> ChessStore {
        store_at(&self.url)
    }

    /// Requests received so far, as `table?raw-query`.
    pub fn requests(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

async fn handle(
    State(state): State<FakeState>,
    Path(table): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    state
        .seen
        .lock()
        .push(format!("{table}?{}", query.unwrap_or_default()));

    let authorized = headers.get("apikey").is_some()
        && headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("Bearer "));
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            r#"{"message":"No API key found in request"}"#,
        )
            .into_response();
    }

    match state.responses.get(&table) {
        Some((status, body)) => (
            *status,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            format!(
                r#"{{"code":"42P01","message":"relation \"public.{table}\" does not exist","details":null,"hint":null}}"#
            ),
        )
            .into_response(),
    }
}

pub(crate) fn store_at(url: &str) -> ChessStore {
    let config = Config::builder().store_url(url).store_key("anon").build();
    ChessStore::from_config(&config).unwrap()
}

/// A store pointing at a local port nobody listens on.
pub(crate) fn unreachable_store() -> ChessStore {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    store_at(&format!("http://127.0.0.1:{port}"))
}
