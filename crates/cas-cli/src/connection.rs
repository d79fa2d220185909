//! Connection flags shared by every subcommand.

use std::time::Duration;

use anyhow::Context;
use cas_client::{AnchorServiceClient, CasClientConfig};
use clap::Args;

/// Where the anchor service lives and how patiently to talk to it.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Anchor service base URL.
    #[arg(long, env = "CAS_URL")]
    pub url: String,

    /// Pause between retries, and the timeout of status lookups (ms).
    #[arg(long, env = "CAS_POLL_INTERVAL_MS", default_value_t = 60_000)]
    pub poll_interval_ms: u64,

    /// Overall retry budget for `request --wait` (ms).
    #[arg(long, env = "CAS_MAX_POLL_TIME_MS", default_value_t = 86_400_000)]
    pub max_poll_time_ms: u64,

    /// Timeout of a single HTTP request (s).
    #[arg(long, env = "CAS_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}

impl ConnectionArgs {
    /// Validate the flags into a client configuration.
    pub fn to_config(&self) -> anyhow::Result<CasClientConfig> {
        let url = self
            .url
            .parse()
            .with_context(|| format!("invalid anchor service URL {:?}", self.url))?;
        let config = CasClientConfig::new(
            url,
            Duration::from_millis(self.poll_interval_ms),
            Duration::from_millis(self.max_poll_time_ms),
        )?
        .with_request_timeout(Duration::from_secs(self.request_timeout_secs));
        Ok(config)
    }

    /// Build a client over HTTP.
    pub fn connect(&self) -> anyhow::Result<AnchorServiceClient> {
        Ok(AnchorServiceClient::with_http(self.to_config()?)?)
    }
}
