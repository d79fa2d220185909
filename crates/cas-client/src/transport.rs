//! Request function seam and the default HTTP transport.
//!
//! The client never talks to `reqwest` directly. It hands a URL and
//! [`RequestOptions`] to a [`FetchJson`] implementation and receives parsed
//! JSON back. Implementations must fail on non-2xx responses, network
//! failures, and timeouts, and must abandon the request when the options'
//! cancellation token fires.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::cancel::CancellationToken;
use crate::error::TransportError;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

/// Options for one request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub body: Option<Vec<u8>>,
    pub content_type: Option<&'static str>,
    /// Bound on this request alone. `None` leaves the transport default.
    pub timeout: Option<Duration>,
    /// Abort signal. The transport drops the request once this fires.
    pub cancel: Option<CancellationToken>,
}

impl RequestOptions {
    /// A `GET` with no body.
    pub fn get() -> Self {
        Self::default()
    }

    /// A `POST` carrying `body` with the given content type.
    pub fn post(body: Vec<u8>, content_type: &'static str) -> Self {
        Self {
            method: HttpMethod::Post,
            body: Some(body),
            content_type: Some(content_type),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// A request function returning parsed JSON.
#[async_trait]
pub trait FetchJson: Send + Sync {
    /// Perform one request.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on non-2xx status, network failure,
    /// timeout, unparseable body, or cancellation.
    async fn fetch_json(&self, url: &Url, options: RequestOptions) -> Result<Value, TransportError>;
}

/// [`FetchJson`] over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
    default_timeout: Duration,
}

impl HttpFetcher {
    /// Build a transport whose requests time out after `default_timeout`
    /// unless the request options say otherwise.
    pub fn new(default_timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(default_timeout)
            .build()
            .map_err(TransportError::Http)?;
        Ok(Self {
            http,
            default_timeout,
        })
    }

    /// Wrap an existing client (shared connection pool, custom TLS, ...).
    pub fn from_client(http: reqwest::Client, default_timeout: Duration) -> Self {
        Self {
            http,
            default_timeout,
        }
    }

    async fn exchange(&self, url: &Url, options: RequestOptions) -> Result<Value, TransportError> {
        let timeout = options.timeout.unwrap_or(self.default_timeout);
        let mut req = match options.method {
            HttpMethod::Get => self.http.get(url.clone()),
            HttpMethod::Post => self.http.post(url.clone()),
        };
        if let Some(content_type) = options.content_type {
            req = req.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        if let Some(body) = options.body {
            req = req.body(body);
        }
        if let Some(t) = options.timeout {
            req = req.timeout(t);
        }

        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                TransportError::Timeout(timeout)
            } else {
                TransportError::Http(e)
            }
        };

        let resp = req.send().await.map_err(classify)?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        let text = resp.text().await.map_err(classify)?;
        serde_json::from_str(&text).map_err(|e| TransportError::InvalidJson(e.to_string()))
    }
}

#[async_trait]
impl FetchJson for HttpFetcher {
    async fn fetch_json(&self, url: &Url, options: RequestOptions) -> Result<Value, TransportError> {
        tracing::debug!(method = ?options.method, %url, "anchor service request");
        match options.cancel.clone() {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(TransportError::Aborted),
                    result = self.exchange(url, options) => result,
                }
            }
            None => self.exchange(url, options).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_options_carry_body_and_type() {
        let opts = RequestOptions::post(vec![1, 2, 3], "application/vnd.ipld.car")
            .with_timeout(Duration::from_millis(100));
        assert_eq!(opts.method, HttpMethod::Post);
        assert_eq!(opts.body.as_deref(), Some(&[1u8, 2, 3][..]));
        assert_eq!(opts.content_type, Some("application/vnd.ipld.car"));
        assert_eq!(opts.timeout, Some(Duration::from_millis(100)));
        assert!(opts.cancel.is_none());
    }

    #[tokio::test]
    async fn closed_port_is_a_transport_error() {
        let fetcher = HttpFetcher::new(Duration::from_millis(200)).unwrap();
        let url: Url = "http://127.0.0.1:1/".parse().unwrap();
        let result = fetcher.fetch_json(&url, RequestOptions::get()).await;
        assert!(matches!(
            result,
            Err(TransportError::Http(_)) | Err(TransportError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn stopped_token_aborts_before_sending() {
        let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let url: Url = "http://127.0.0.1:1/".parse().unwrap();
        let result = fetcher
            .fetch_json(&url, RequestOptions::get().with_cancel(token))
            .await;
        assert!(matches!(result, Err(TransportError::Aborted)));
    }
}
