use reqwest::{header, Method, Response};
use serde::de::DeserializeOwned;
use strum::Display;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    client::ChessStore,
    error::{ApiErrorResponse, ClientError, ResponseError},
    paths::REST_PATH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// A read against one table of the store, expressed in PostgREST query syntax.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    table: String,
    query_params: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(table: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            table: table.into(),
            query_params: Vec::new(),
        }
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn select(self, columns: &str) -> Self {
        self.query("select", columns)
    }

    /// `column = value`
    #[must_use]
    pub fn eq(self, column: &str, value: &str) -> Self {
        self.query(column, format!("eq.{value}"))
    }

    /// Array column contains every one of `values`.
    #[must_use]
    pub fn contains<I, S>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = values
            .into_iter()
            .map(|v| quote_array_item(v.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        self.query(column, format!("cs.{{{items}}}"))
    }

    #[must_use]
    pub fn order(self, column: &str, direction: Direction) -> Self {
        self.query("order", format!("{column}.{direction}"))
    }

    #[must_use]
    pub fn limit(self, limit: usize) -> Self {
        self.query("limit", limit.to_string())
    }

    /// Path and query string relative to the store's base URL.
    pub fn path_and_query(&self) -> String {
        let path = format!("{REST_PATH}{}", self.table);
        if self.query_params.is_empty() {
            return path;
        }
        let params: Vec<String> = self
            .query_params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{path}?{}", params.join("&"))
    }
}

/// Postgres array literal element: always double-quoted, with `"` and `\`
/// escaped, so slugs containing commas or braces stay one element.
fn quote_array_item(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

#[async_trait::async_trait]
pub trait HttpClient {
    async fn request<T: DeserializeOwned>(&self, req: HttpRequest) -> Result<T, ClientError>;
}

#[async_trait::async_trait]
impl HttpClient for ChessStore {
    async fn request<T: DeserializeOwned>(&self, req: HttpRequest) -> Result<T, ClientError> {
        self.execute_request(req).await
    }
}

impl ChessStore {
    /// Sends `req` and decodes the body. A request only counts as a success
    /// for `/healthz` once its body has decoded.
    #[instrument(skip(self, req), fields(method = %req.method, table = %req.table))]
    async fn execute_request<T: DeserializeOwned>(&self, req: HttpRequest) -> Result<T, ClientError> {
        match self.fetch(&req).await {
            Ok(value) => {
                info!("store request completed");
                self.record_success();
                Ok(value)
            }
            Err(e) => {
                error!("store request failed: {}", e);
                self.record_failure(&e.to_string());
                Err(e)
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, req: &HttpRequest) -> Result<T, ClientError> {
        let res = self.execute_single_request(req).await?;
        let body = res.bytes().await?;
        Ok(serde_json::from_slice::<T>(&body)?)
    }

    async fn execute_single_request(&self, req: &HttpRequest) -> Result<Response, ClientError> {
        let url = self
            .base_url()
            .join(&req.path_and_query())
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid path for {}: {e}", req.table)))?;

        debug!("Built request URL: {}", url);

        let request_builder = match req.method {
            Method::GET => self.http_client.get(url),
            _ => {
                return Err(ClientError::InvalidRequest(format!(
                    "Unsupported HTTP method: {:?}",
                    req.method
                )))
            }
        };

        let res = request_builder
            .header("apikey", self.api_key())
            .bearer_auth(self.api_key())
            .header(header::ACCEPT, mime::APPLICATION_JSON.as_ref())
            .send()
            .await
            .map_err(|e| {
                warn!("Network error occurred: {}", e);
                ClientError::RequestError(e)
            })?;

        let status = res.status();
        if status.is_client_error() || status.is_server_error() {
            warn!(
                "Received HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );

            let body_text = res.text().await.unwrap_or_default();
            if let Ok(error_response) = serde_json::from_str::<ApiErrorResponse>(&body_text) {
                if !error_response.message.is_empty() {
                    return Err(ClientError::ApiError {
                        status,
                        body: error_response,
                    });
                }
            }

            return Err(ResponseError::http_status(status, body_text).into());
        }

        debug!("HTTP request completed with status: {}", status);

        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_postgrest_query() {
        let req = HttpRequest::get("news")
            .select("*")
            .eq("slug", "carlsen-wins")
            .order("created_at", Direction::Desc)
            .limit(1);

        assert_eq!(
            req.path_and_query(),
            "rest/v1/news?select=%2A&slug=eq.carlsen-wins&order=created_at.desc&limit=1"
        );
    }

    #[test]
    fn contains_quotes_and_encodes_items() {
        let req = HttpRequest::get("news").contains("events", ["norway-chess", "a\"b"]);
        assert_eq!(
            req.path_and_query(),
            "rest/v1/news?events=cs.%7B%22norway-chess%22%2C%22a%5C%22b%22%7D"
        );
    }

    #[test]
    fn bare_table_path() {
        assert_eq!(HttpRequest::get("players").path_and_query(), "rest/v1/players");
        assert_eq!(Direction::Asc.to_string(), "asc");
    }
}
