use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Status and headers of a completed HTTP exchange
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl ResponseMeta {
    pub fn new(status: StatusCode, headers: HeaderMap) -> Self {
        Self { status, headers }
    }

    /// Look up a header as a string, ignoring values that are not valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Error body returned by the Librato API
///
/// ```json
/// {"errors": {"params": {"duration": ["is not a number"]}, "request": [], "system": []}}
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: ErrorDetails,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(default)]
    pub params: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub request: Vec<String>,
    #[serde(default)]
    pub system: Vec<String>,
}

impl ErrorResponse {
    /// Flatten every reported error into one line.
    ///
    /// Parameter errors are prefixed with their parameter name, e.g.
    /// `duration is not a number; Chart not found`.
    pub fn message(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        for (param, messages) in &self.errors.params {
            for msg in messages {
                parts.push(format!("{} {}", param, msg));
            }
        }
        parts.extend(self.errors.request.iter().cloned());
        parts.extend(self.errors.system.iter().cloned());

        parts.join("; ")
    }

    pub fn is_empty(&self) -> bool {
        self.errors.params.is_empty()
            && self.errors.request.is_empty()
            && self.errors.system.is_empty()
    }
}

/// Errors surfaced by snapshot operations and the transport
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be encoded as JSON
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The snapshot URL has no usable trailing path segment
    #[error("Invalid snapshot URL '{0}': no snapshot id in path")]
    InvalidSnapshotUrl(String),

    /// The request path could not be joined onto the base URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Network or request dispatch error
    #[error("Request Error: {0}")]
    Request(#[source] reqwest::Error),

    /// 400 Bad Request
    #[error("Bad Request: {message}")]
    BadRequest { meta: ResponseMeta, message: String },

    /// 401 Unauthorized
    #[error("Unauthorized: {body}")]
    Unauthorized { meta: ResponseMeta, body: String },

    /// 403 Forbidden
    #[error("Forbidden: {body}")]
    Forbidden { meta: ResponseMeta, body: String },

    /// 404 Not Found
    #[error("Not Found: {body}")]
    NotFound { meta: ResponseMeta, body: String },

    /// 429 Too Many Requests
    #[error("Rate Limited. Retry after {}", .retry_after.map(|s| format!("{} s", s)).unwrap_or_else(|| "an unspecified delay".to_string()))]
    RateLimited {
        meta: ResponseMeta,
        retry_after: Option<u64>,
    },

    /// 5xx Server Error
    #[error("Server Error ({}): {body}", .meta.status.as_u16())]
    Server { meta: ResponseMeta, body: String },

    /// Other non-success statuses
    #[error("HTTP Error ({}): {body}", .meta.status.as_u16())]
    Http { meta: ResponseMeta, body: String },

    /// A success response whose body did not match the expected shape
    #[error("Deserialization Error: {source}")]
    Deserialization {
        meta: ResponseMeta,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Response metadata, when the error came from a completed HTTP exchange
    pub fn response(&self) -> Option<&ResponseMeta> {
        match self {
            ApiError::BadRequest { meta, .. }
            | ApiError::Unauthorized { meta, .. }
            | ApiError::Forbidden { meta, .. }
            | ApiError::NotFound { meta, .. }
            | ApiError::RateLimited { meta, .. }
            | ApiError::Server { meta, .. }
            | ApiError::Http { meta, .. }
            | ApiError::Deserialization { meta, .. } => Some(meta),
            ApiError::Serialization(_)
            | ApiError::InvalidSnapshotUrl(_)
            | ApiError::InvalidUrl(_)
            | ApiError::Request(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|meta| meta.status)
    }
}
