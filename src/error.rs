use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt::Display;
use thiserror::Error;
use tracing::error;

/// Error body returned by the PostgREST layer of the data store.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{code}] {}", self.message)?,
            None => write!(f, "{}", self.message)?,
        }
        if let Some(details) = &self.details {
            write!(f, ": {details}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Client is missing required configuration")]
    Unconfigured,

    #[error("API error: {body}")]
    ApiError {
        status: StatusCode,
        body: ApiErrorResponse,
    },

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Response format error: {0}")]
    ResponseError(#[from] ResponseError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// HTTP status attached to the failure, if the store answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::RequestError(err) => err.status(),
            Self::ResponseError(ResponseError::HttpStatus { status, .. }) => Some(*status),
            _ => None,
        }
    }

    fn api_error(&self) -> Option<&ApiErrorResponse> {
        match self {
            Self::ApiError { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
}

impl ResponseError {
    pub fn http_status(status: StatusCode, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }
}

/// Logs a store failure with everything an operator needs to chase it.
/// Callers downgrade the error to an empty result afterwards.
pub(crate) fn log_fetch_failure(operation: &'static str, slug: Option<&str>, err: &ClientError) {
    let api = err.api_error();
    error!(
        operation,
        slug = slug.unwrap_or("-"),
        status = err.status().map(|s| s.as_u16()),
        code = api.and_then(|a| a.code.as_deref()),
        message = api.map(|a| a.message.as_str()),
        hint = api.and_then(|a| a.hint.as_deref()),
        details = api.and_then(|a| a.details.as_deref()),
        error = %err,
        debug = ?err,
        "store fetch failed, rendering empty result"
    );
}
