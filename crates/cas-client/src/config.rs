//! Anchor service client configuration.
//!
//! Holds the service base URL and the polling policy. Immutable once
//! built; [`CasClientConfig::new`] rejects zero intervals and URLs that
//! cannot carry a path.

use std::time::Duration;

use url::Url;

/// Default pause between attempts of a retrying request (60 seconds).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Default overall retry budget (24 hours).
pub const DEFAULT_MAX_POLL_TIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Default timeout for a single HTTP request when the caller sets none.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for connecting to an anchor service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasClientConfig {
    service_url: Url,
    poll_interval: Duration,
    max_poll_time: Duration,
    request_timeout: Duration,
}

impl CasClientConfig {
    /// Build a configuration, validating the URL and the polling policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the URL is not an `http(s)` base URL or
    /// either duration is zero.
    pub fn new(
        service_url: Url,
        poll_interval: Duration,
        max_poll_time: Duration,
    ) -> Result<Self, ConfigError> {
        if !matches!(service_url.scheme(), "http" | "https") || service_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(
                "service_url".to_string(),
                format!("{service_url} is not an http(s) base URL"),
            ));
        }
        if poll_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("poll_interval"));
        }
        if max_poll_time.is_zero() {
            return Err(ConfigError::ZeroDuration("max_poll_time"));
        }
        Ok(Self {
            service_url,
            poll_interval,
            max_poll_time,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Override the default HTTP request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CAS_URL` (required)
    /// - `CAS_POLL_INTERVAL_MS` (default: 60000)
    /// - `CAS_MAX_POLL_TIME_MS` (default: 86400000)
    /// - `CAS_REQUEST_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("CAS_URL").map_err(|_| ConfigError::MissingUrl)?;
        let service_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("CAS_URL".to_string(), e.to_string()))?;

        let poll_interval = env_millis("CAS_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL)?;
        let max_poll_time = env_millis("CAS_MAX_POLL_TIME_MS", DEFAULT_MAX_POLL_TIME)?;
        let request_timeout = match std::env::var("CAS_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidNumber("CAS_REQUEST_TIMEOUT_SECS".to_string(), raw))?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self::new(service_url, poll_interval, max_poll_time)?.with_request_timeout(request_timeout))
    }

    /// Base URL of the anchor service.
    pub fn service_url(&self) -> &Url {
        &self.service_url
    }

    /// Pause between attempts of a retrying request; also the per-attempt
    /// timeout of status lookups.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Overall budget for a retrying request.
    pub fn max_poll_time(&self) -> Duration {
        self.max_poll_time
    }

    /// Timeout applied by the default HTTP transport.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Build `{service_url}/{segments...}`, keeping any base path.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.service_url.clone();
        // `new` rejects cannot-be-a-base URLs, so the segments are always writable.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn env_millis(var: &str, default: Duration) -> Result<Duration, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidNumber(var.to_string(), raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("CAS_URL environment variable is required")]
    MissingUrl,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid number for {0}: {1:?}")]
    InvalidNumber(String, String),
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> CasClientConfig {
        CasClientConfig::new(
            url.parse().unwrap(),
            Duration::from_millis(100),
            Duration::from_millis(1000),
        )
        .unwrap()
    }

    #[test]
    fn endpoint_appends_to_bare_host() {
        let cfg = config("http://example.com");
        assert_eq!(
            cfg.endpoint(&["api", "v0", "requests"]).as_str(),
            "http://example.com/api/v0/requests"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let cfg = config("https://cas.example.com/anchor/");
        assert_eq!(
            cfg.endpoint(&["api", "v0", "service-info", "supported_chains"]).as_str(),
            "https://cas.example.com/anchor/api/v0/service-info/supported_chains"
        );
        let cfg = config("https://cas.example.com/anchor");
        assert_eq!(
            cfg.endpoint(&["api", "v0", "requests"]).as_str(),
            "https://cas.example.com/anchor/api/v0/requests"
        );
    }

    #[test]
    fn zero_durations_rejected() {
        let url: Url = "http://example.com".parse().unwrap();
        let err = CasClientConfig::new(url.clone(), Duration::ZERO, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDuration("poll_interval")));
        let err = CasClientConfig::new(url, Duration::from_secs(1), Duration::ZERO).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDuration("max_poll_time")));
    }

    #[test]
    fn non_http_urls_rejected() {
        let err = CasClientConfig::new(
            "mailto:ops@example.com".parse().unwrap(),
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(..)));
    }

    #[test]
    fn defaults_apply() {
        let cfg = config("http://example.com");
        assert_eq!(cfg.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
        let cfg = cfg.with_request_timeout(Duration::from_secs(5));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn env_millis_uses_default_when_var_absent() {
        let d = env_millis("NONEXISTENT_CAS_VAR_12345", Duration::from_millis(7)).unwrap();
        assert_eq!(d, Duration::from_millis(7));
    }

    #[test]
    fn env_millis_rejects_garbage() {
        std::env::set_var("TEST_BAD_MILLIS_CAS", "ten");
        let result = env_millis("TEST_BAD_MILLIS_CAS", Duration::from_millis(7));
        std::env::remove_var("TEST_BAD_MILLIS_CAS");
        assert!(matches!(result, Err(ConfigError::InvalidNumber(..))));
    }
}
