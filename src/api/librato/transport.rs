use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::models::{ApiError, ResponseMeta};

/// A prepared API call: method, path relative to the API root, and JSON body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// The body as a JSON value, mostly useful for inspecting requests in tests
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
    }
}

/// The HTTP layer snapshot operations run on
///
/// Authentication, base URL resolution and status handling all live behind
/// `execute`; callers only build requests and read decoded results.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Prepare a request, encoding `body` as JSON when present.
    fn new_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<ApiRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ApiError::Serialization)?;

        Ok(ApiRequest {
            method,
            path: path.trim_start_matches('/').to_string(),
            body,
        })
    }

    /// Send a request and decode a successful JSON response into `T`.
    async fn execute<T>(&self, request: ApiRequest) -> Result<(T, ResponseMeta), ApiError>
    where
        T: DeserializeOwned + Send;
}
