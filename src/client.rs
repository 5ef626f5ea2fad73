use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, header};
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use crate::client_logger::WebhookLogger;
use crate::error::{Error, Result};
use crate::observability::{WEBHOOK_REQUEST_DURATION, WEBHOOK_REQUEST_ERRORS, WEBHOOK_REQUESTS};
use crate::types::{ChatRequest, WebhookReply};

/// Environment variable consulted when no URL is given explicitly.
pub const WEBHOOK_URL_ENV: &str = "ANIMO_WEBHOOK_URL";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Anything that can answer one chat turn.
///
/// [`WebhookClient`] is the production implementation; tests drive the
/// conversation controller with scripted implementations.
#[async_trait::async_trait]
pub trait Webhook: Send + Sync {
    /// POST `request` and decode the reply.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, non-success statuses and
    /// bodies that are not valid JSON.
    async fn send(&self, request: &ChatRequest) -> Result<WebhookReply>;
}

/// HTTP client for the chat webhook.
#[derive(Clone)]
pub struct WebhookClient {
    client: ReqwestClient,
    url: Url,
    timeout: Option<Duration>,
    logger: Option<Arc<dyn WebhookLogger>>,
}

impl WebhookClient {
    /// Create a new webhook client with the default timeout.
    ///
    /// The URL can be provided directly or read from the `ANIMO_WEBHOOK_URL`
    /// environment variable.
    pub fn new(url: Option<String>) -> Result<Self> {
        Self::with_options(url, Some(DEFAULT_TIMEOUT))
    }

    /// Create a new client with custom settings.
    ///
    /// A `timeout` of `None` waits for the webhook indefinitely.
    pub fn with_options(url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let url = match url {
            Some(url) => url,
            None => env::var(WEBHOOK_URL_ENV).map_err(|_| {
                Error::configuration(
                    "webhook URL not provided and ANIMO_WEBHOOK_URL environment variable not set",
                    Some(WEBHOOK_URL_ENV.to_string()),
                )
            })?,
        };
        let url = Url::parse(url.trim())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration(
                format!("webhook URL must be http or https, got {}", url.scheme()),
                Some("webhook-url".to_string()),
            ));
        }

        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            Error::http_client(
                format!("Failed to build HTTP client: {}", e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Self {
            client,
            url,
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that observes every request and its outcome.
    pub fn with_logger(mut self, logger: Arc<dyn WebhookLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The configured webhook URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    async fn post(&self, request: &ChatRequest) -> Result<(u16, WebhookReply)> {
        let response = self
            .client
            .post(self.url.clone())
            .headers(self.default_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        if !status.is_success() {
            return Err(Error::status(status.as_u16(), body));
        }

        let body = serde_json::from_str(&body).map_err(|e| {
            Error::serialization(
                format!("Failed to parse webhook reply: {}", e),
                Some(Box::new(e)),
            )
        })?;
        Ok((status.as_u16(), WebhookReply::new(body)))
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                self.timeout.map(|t| t.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }
}

#[async_trait::async_trait]
impl Webhook for WebhookClient {
    async fn send(&self, request: &ChatRequest) -> Result<WebhookReply> {
        WEBHOOK_REQUESTS.click();
        if let Some(logger) = &self.logger {
            logger.log_request(self.url.as_str(), request);
        }

        let start = Instant::now();
        let result = self.post(request).await;
        WEBHOOK_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        match result {
            Ok((status, reply)) => {
                if let Some(logger) = &self.logger {
                    logger.log_reply(status, &reply);
                }
                Ok(reply)
            }
            Err(err) => {
                WEBHOOK_REQUEST_ERRORS.click();
                if let Some(logger) = &self.logger {
                    logger.log_failure(&err);
                }
                Err(err)
            }
        }
    }
}

impl fmt::Debug for WebhookClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookClient")
            .field("url", &self.url.as_str())
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}
