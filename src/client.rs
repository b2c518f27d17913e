use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{
    CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS, LIVENESS_FAILURES,
    LIVENESS_PROBES,
};
use crate::types::{HistoryEntry, TalkRequest, TalkResponse};

/// Where the Buddy backend listens unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";
/// Default timeout for every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const STATUS_PATH: &str = "buddy/status";
const TALK_PATH: &str = "buddy/talk";

/// The two backend calls the session controller depends on.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Probes the backend; true only when it answers with a success status.
    ///
    /// Never fails: network errors and bad statuses both read as offline.
    async fn check_liveness(&self) -> bool;

    /// Sends a message with the transcript that preceded it.
    async fn exchange(&self, message: &str, history: &[HistoryEntry]) -> Result<TalkResponse>;
}

/// HTTP client for the Buddy backend.
#[derive(Debug, Clone)]
pub struct BuddyClient {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
}

impl BuddyClient {
    /// Create a client for the default local backend.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = parse_base_url(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn map_send_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Turn a non-success response into an [`Error::Api`].
    ///
    /// FastAPI reports failures as `{"detail": ...}`; when that shape is
    /// present its detail becomes the message, otherwise the raw body does.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        #[derive(Deserialize)]
        struct ErrorResponse {
            detail: Option<serde_json::Value>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let detail = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|parsed| parsed.detail)
            .map(|detail| match detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });
        let message = match detail {
            Some(detail) => detail,
            None if error_body.is_empty() => {
                format!("API request failed with status {status_code}")
            }
            None => error_body,
        };
        Error::api(status_code, message)
    }

    async fn post_talk(&self, request: &TalkRequest) -> Result<TalkResponse> {
        let url = self.endpoint(TALK_PATH)?;

        let response = self
            .client
            .post(url)
            .headers(Self::default_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<TalkResponse>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait::async_trait]
impl Transport for BuddyClient {
    async fn check_liveness(&self) -> bool {
        LIVENESS_PROBES.click();
        let url = match self.endpoint(STATUS_PATH) {
            Ok(url) => url,
            Err(err) => {
                LIVENESS_FAILURES.click();
                tracing::warn!(error = %err, "API status check failed");
                return false;
            }
        };
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                LIVENESS_FAILURES.click();
                tracing::warn!(status = %response.status(), "API status check failed");
                false
            }
            Err(e) => {
                LIVENESS_FAILURES.click();
                tracing::warn!(error = %self.map_send_error(e), "API status check failed");
                false
            }
        }
    }

    async fn exchange(&self, message: &str, history: &[HistoryEntry]) -> Result<TalkResponse> {
        CLIENT_REQUESTS.click();
        let request = TalkRequest::new(message, history);
        let start = Instant::now();
        let result = self.post_talk(&request).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if let Err(err) = &result {
            CLIENT_REQUEST_ERRORS.click();
            tracing::warn!(error = %err, "Error sending message");
        }
        result
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(Error::url(
            format!("{raw} cannot be used as a base URL"),
            None,
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
