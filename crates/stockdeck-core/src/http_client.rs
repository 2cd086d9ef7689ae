use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// HTTP GET request issued by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub timeout_ms: u64,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout_ms: 3_000,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok_json(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level HTTP error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
    retryable: bool,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }

    pub fn non_retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Transport contract used by the backend gateway.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// Production HTTP client backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::with_user_agent(concat!("stockdeck/", env!("CARGO_PKG_VERSION")))
    }

    pub fn with_user_agent(user_agent: &str) -> Self {
        Self {
            client: Arc::new(
                reqwest::Client::builder()
                    .user_agent(user_agent)
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new()),
            ),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .get(&request.url)
                .timeout(Duration::from_millis(request.timeout_ms));

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::new(format!("request timeout: {e}"))
                } else if e.is_connect() {
                    HttpError::new(format!("connection failed: {e}"))
                } else if e.is_builder() {
                    HttpError::non_retryable(format!("invalid request: {e}"))
                } else {
                    HttpError::new(format!("request failed: {e}"))
                }
            })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| HttpError::new(format!("failed to read response body: {e}")))?;

            Ok(HttpResponse { status, body })
        })
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fixture::FixtureHttpClient;

#[cfg(any(test, feature = "test-support"))]
mod fixture {
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::{Mutex, PoisonError};

    use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

    /// In-memory transport serving canned responses by exact URL.
    ///
    /// Unknown URLs answer `404` with a FastAPI-style `{"detail":"Not Found"}`
    /// body. Every request is recorded for later inspection.
    #[derive(Debug, Default)]
    pub struct FixtureHttpClient {
        routes: HashMap<String, Result<HttpResponse, HttpError>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl FixtureHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(mut self, url: impl Into<String>, response: HttpResponse) -> Self {
            self.routes.insert(url.into(), Ok(response));
            self
        }

        pub fn with_json(self, url: impl Into<String>, body: impl Into<String>) -> Self {
            self.with_response(url, HttpResponse::ok_json(body))
        }

        pub fn with_error(mut self, url: impl Into<String>, error: HttpError) -> Self {
            self.routes.insert(url.into(), Err(error));
            self
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl HttpClient for FixtureHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            let outcome = self
                .routes
                .get(&request.url)
                .cloned()
                .unwrap_or_else(|| Ok(HttpResponse::new(404, r#"{"detail":"Not Found"}"#)));

            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request);

            Box::pin(async move { outcome })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_are_lowercased() {
        let request = HttpRequest::get("http://backend.test/").with_header("Accept", "application/json");

        assert_eq!(
            request.headers.get("accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn fixture_serves_routes_and_records_requests() {
        let client = FixtureHttpClient::new()
            .with_json("http://backend.test/get-all-stocks", "[]")
            .with_error("http://backend.test/down", HttpError::new("connection refused"));

        let ok = client
            .execute(HttpRequest::get("http://backend.test/get-all-stocks"))
            .await
            .expect("canned response");
        assert!(ok.is_success());

        let missing = client
            .execute(HttpRequest::get("http://backend.test/elsewhere"))
            .await
            .expect("404 response");
        assert_eq!(missing.status, 404);

        let err = client
            .execute(HttpRequest::get("http://backend.test/down"))
            .await
            .expect_err("canned error");
        assert!(err.retryable());

        assert_eq!(client.requests().len(), 3);
    }
}
