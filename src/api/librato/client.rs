use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::models::{ApiError, ErrorResponse, ResponseMeta};
use super::transport::{ApiRequest, Transport};
use crate::config::LibratoConfig;

/// Librato API client: basic-auth JSON transport over reqwest
pub struct LibratoClient {
    http_client: HttpClient,
    user: String,
    token: String,
    base_url: Url,
}

impl LibratoClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://metrics-api.librato.com/v1/";

    const USER_AGENT: &'static str = concat!("librato-snapshots/", env!("CARGO_PKG_VERSION"));

    /// Create a client from loaded configuration
    pub fn new(config: &LibratoConfig) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Request)?;

        Self::from_parts(http_client, config.user.clone(), config.token.clone(), &config.base_url)
    }

    /// Create a client with custom base URL (for testing)
    pub fn with_base_url(user: String, token: String, base_url: &str) -> Result<Self, ApiError> {
        Self::from_parts(HttpClient::new(), user, token, base_url)
    }

    fn from_parts(
        http_client: HttpClient,
        user: String,
        token: String,
        base_url: &str,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            http_client,
            user,
            token,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Create default JSON headers
    fn create_headers(has_body: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        headers
    }
}

#[async_trait]
impl Transport for LibratoClient {
    async fn execute<T>(&self, request: ApiRequest) -> Result<(T, ResponseMeta), ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let url = resolve_url(&self.base_url, &request.path)?;
        debug!("{} {}", request.method, url);

        let mut builder = self
            .http_client
            .request(request.method, url)
            .headers(Self::create_headers(request.body.is_some()))
            .basic_auth(&self.user, Some(&self.token));
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(ApiError::Request)?;
        let meta = ResponseMeta::new(response.status(), response.headers().clone());
        let body = response.bytes().await.map_err(ApiError::Request)?;

        if !meta.status.is_success() {
            let body_text = String::from_utf8_lossy(&body).into_owned();
            return Err(error_for_status(meta, body_text));
        }

        match serde_json::from_slice::<T>(&body) {
            Ok(value) => Ok((value, meta)),
            Err(source) => Err(ApiError::Deserialization { meta, source }),
        }
    }
}

/// Parse the API root, forcing a trailing slash so relative paths append to it
fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };
    Url::parse(&normalized).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))
}

/// Join a request path onto the API root
fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ApiError> {
    base_url
        .join(path.trim_start_matches('/'))
        .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
}

/// Map a non-success response to an error based on HTTP status code
fn error_for_status(meta: ResponseMeta, body_text: String) -> ApiError {
    let status_code = meta.status.as_u16();

    match status_code {
        400 => {
            // Librato reports validation failures as a JSON error body
            let message = serde_json::from_str::<ErrorResponse>(&body_text)
                .ok()
                .filter(|parsed| !parsed.is_empty())
                .map(|parsed| parsed.message())
                .unwrap_or(body_text);
            ApiError::BadRequest { meta, message }
        }
        401 => ApiError::Unauthorized { meta, body: body_text },
        403 => ApiError::Forbidden { meta, body: body_text },
        404 => ApiError::NotFound { meta, body: body_text },
        429 => {
            let retry_after = meta
                .header(RETRY_AFTER.as_str())
                .and_then(|s| s.trim().parse().ok());
            warn!("Rate limited by Librato, retry after {:?} s", retry_after);
            ApiError::RateLimited { meta, retry_after }
        }
        500..=599 => {
            warn!("Server error {}: {}", status_code, body_text);
            ApiError::Server { meta, body: body_text }
        }
        _ => ApiError::Http { meta, body: body_text },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::{Method, StatusCode};
    use std::time::Duration;

    fn meta(status: StatusCode) -> ResponseMeta {
        ResponseMeta::new(status, HeaderMap::new())
    }

    #[test]
    fn test_base_url_without_trailing_slash_keeps_version() {
        let base = parse_base_url("https://metrics-api.librato.com/v1").unwrap();
        let url = resolve_url(&base, "snapshots/58").unwrap();
        assert_eq!(url.as_str(), "https://metrics-api.librato.com/v1/snapshots/58");
    }

    #[test]
    fn test_leading_slash_does_not_escape_base_path() {
        let base = parse_base_url(LibratoClient::DEFAULT_BASE_URL).unwrap();
        let url = resolve_url(&base, "/snapshots").unwrap();
        assert_eq!(url.as_str(), "https://metrics-api.librato.com/v1/snapshots");
    }

    #[test]
    fn test_with_base_url_normalizes_root() {
        let client = LibratoClient::with_base_url("u".to_string(), "t".to_string(), "http://localhost:1234/api").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:1234/api/");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(parse_base_url("not a url"), Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_bad_request_uses_librato_error_body() {
        let body = r#"{"errors":{"params":{"duration":["must be positive"]}}}"#.to_string();
        match error_for_status(meta(StatusCode::BAD_REQUEST), body) {
            ApiError::BadRequest { message, .. } => assert_eq!(message, "duration must be positive"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bad_request_falls_back_to_raw_body() {
        match error_for_status(meta(StatusCode::BAD_REQUEST), "oops".to_string()) {
            ApiError::BadRequest { message, .. } => assert_eq!(message, "oops"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rate_limit_reads_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("12"));
        let err = error_for_status(
            ResponseMeta::new(StatusCode::TOO_MANY_REQUESTS, headers),
            String::new(),
        );
        assert!(matches!(err, ApiError::RateLimited { retry_after: Some(12), .. }));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            error_for_status(meta(StatusCode::UNAUTHORIZED), String::new()),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            error_for_status(meta(StatusCode::FORBIDDEN), String::new()),
            ApiError::Forbidden { .. }
        ));
        assert!(matches!(
            error_for_status(meta(StatusCode::NOT_FOUND), String::new()),
            ApiError::NotFound { .. }
        ));
        assert!(matches!(
            error_for_status(meta(StatusCode::BAD_GATEWAY), String::new()),
            ApiError::Server { .. }
        ));
        assert!(matches!(
            error_for_status(meta(StatusCode::CONFLICT), String::new()),
            ApiError::Http { .. }
        ));
    }

    /// Accept one connection, capture the raw request and reply with `response`
    async fn serve_once(response: String) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];

            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);

                let Some(head_end) = received.windows(4).position(|w| w == b"\r\n\r\n") else {
                    continue;
                };
                let head = String::from_utf8_lossy(&received[..head_end]).to_lowercase();
                let content_length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if received.len() >= head_end + 4 + content_length {
                    break;
                }
            }

            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&received).into_owned()
        });

        (format!("http://{}/v1", addr), handle)
    }

    fn local_client(base_url: &str) -> LibratoClient {
        let http_client = HttpClient::builder().no_proxy().build().unwrap();
        LibratoClient::from_parts(http_client, "ops@example.com".to_string(), "secret".to_string(), base_url)
            .unwrap()
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
    }

    #[tokio::test]
    async fn test_execute_posts_json_with_basic_auth() {
        let body = r#"{"href":"https://metrics-api.librato.com/v1/snapshots/58","image_href":"http://snapshots.librato.com/chart/58.png"}"#;
        let (base_url, server) = serve_once(http_response("201 Created", body)).await;
        let client = local_client(&base_url);

        let request = client
            .new_request(Method::POST, "snapshots", Some(&serde_json::json!({"duration": 60})))
            .unwrap();
        let (snapshot, meta): (crate::models::ChartSnapshot, _) = client.execute(request).await.unwrap();

        assert_eq!(meta.status, StatusCode::CREATED);
        assert_eq!(snapshot.image.as_deref(), Some("http://snapshots.librato.com/chart/58.png"));

        let raw = server.await.unwrap();
        let lowered = raw.to_lowercase();
        assert!(raw.starts_with("POST /v1/snapshots HTTP/1.1"));
        assert!(lowered.contains("authorization: basic "));
        assert!(lowered.contains("content-type: application/json"));
        assert!(raw.ends_with(r#"{"duration":60}"#));
    }

    #[tokio::test]
    async fn test_execute_maps_error_status_with_metadata() {
        let body = r#"{"errors":{"request":["Snapshot not found"]}}"#;
        let (base_url, server) = serve_once(http_response("404 Not Found", body)).await;
        let client = local_client(&base_url);

        let request = client.new_request::<()>(Method::GET, "snapshots/404", None).unwrap();
        let result: Result<(crate::models::ChartSnapshot, _), _> = client.execute(request).await;
        let err = result.unwrap_err();

        assert!(matches!(err, ApiError::NotFound { .. }));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(server.await.unwrap().starts_with("GET /v1/snapshots/404 HTTP/1.1"));
    }

    #[test]
    fn test_new_from_config() {
        let config = LibratoConfig {
            user: "ops@example.com".to_string(),
            token: "secret".to_string(),
            base_url: "http://localhost:8080/v1".to_string(),
            timeout: Duration::from_secs(5),
        };
        let client = LibratoClient::new(&config).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/v1/");
    }
}
