//! The anchor service client facade.

use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;
use url::Url;

use crate::archive::{AnchorArchive, CAR_CONTENT_TYPE};
use crate::cancel::CancellationToken;
use crate::config::CasClientConfig;
use crate::decode::{decode_anchor_request, decode_supported_chains};
use crate::error::CasError;
use crate::poll::{PollLoop, PollPolicy};
use crate::transport::{FetchJson, HttpFetcher, RequestOptions};
use crate::types::{AnchorStatusResponse, ChainId, Cid, StreamId};

const SUPPORTED_CHAINS: &str = "GET /api/v0/service-info/supported_chains";
const CREATE_REQUEST: &str = "POST /api/v0/requests";
const GET_REQUEST: &str = "GET /api/v0/requests/{streamId}/{tip}";

/// Client for one anchor service.
///
/// Clones share the transport and the cancellation token, so closing any
/// clone closes all of them.
#[derive(Clone)]
pub struct AnchorServiceClient {
    config: CasClientConfig,
    fetch: Arc<dyn FetchJson>,
    poll: PollLoop,
    token: CancellationToken,
    span: tracing::Span,
}

impl std::fmt::Debug for AnchorServiceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnchorServiceClient")
            .field("config", &self.config)
            .field("closed", &self.token.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl AnchorServiceClient {
    /// Create a client over an injected request function.
    pub fn new(config: CasClientConfig, fetch: Arc<dyn FetchJson>) -> Self {
        let poll = PollLoop::new(config.poll_interval(), config.max_poll_time());
        let span = tracing::info_span!("cas_client", service_url = %config.service_url());
        Self {
            config,
            fetch,
            poll,
            token: CancellationToken::new(),
            span,
        }
    }

    /// Create a client over the default `reqwest` transport.
    pub fn with_http(config: CasClientConfig) -> Result<Self, CasError> {
        let fetch = HttpFetcher::new(config.request_timeout()).map_err(|source| CasError::Network {
            operation: "client_init",
            source,
        })?;
        Ok(Self::new(config, Arc::new(fetch)))
    }

    pub fn config(&self) -> &CasClientConfig {
        &self.config
    }

    /// Whether [`Self::close`] has been called on this client or a clone.
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Chains the service anchors to.
    ///
    /// Calls `GET {service_url}/api/v0/service-info/supported_chains` once.
    /// The result is not cached.
    pub async fn supported_chains(&self) -> Result<Vec<ChainId>, CasError> {
        let url = self
            .config
            .endpoint(&["api", "v0", "service-info", "supported_chains"]);
        let options = RequestOptions::get().with_cancel(self.token.clone());
        let (url, options) = (&url, &options);

        self.poll
            .execute(SUPPORTED_CHAINS, PollPolicy::once(&self.token), move || async move {
                let raw = self.send(SUPPORTED_CHAINS, url, options.clone()).await?;
                decode_supported_chains(&raw).map_err(CasError::from)
            })
            .instrument(self.span.clone())
            .await
    }

    /// Submit an anchor request for the archive's stream tip.
    ///
    /// Calls `POST {service_url}/api/v0/requests` with the CAR bytes as body.
    /// With `wait_for_confirmation` the request is retried every
    /// `poll_interval` until the service answers with a well-formed record,
    /// `max_poll_time` runs out, or the client is closed. Any status,
    /// including `PENDING`, counts as an answer.
    pub async fn create<A>(
        &self,
        archive: &A,
        wait_for_confirmation: bool,
    ) -> Result<AnchorStatusResponse, CasError>
    where
        A: AnchorArchive + ?Sized,
    {
        let url = self.config.endpoint(&["api", "v0", "requests"]);
        let options = RequestOptions::post(archive.bytes().to_vec(), CAR_CONTENT_TYPE)
            .with_cancel(self.token.clone());
        let policy = if wait_for_confirmation {
            PollPolicy::retrying(&self.token)
        } else {
            PollPolicy::once(&self.token)
        };
        let (url, options) = (&url, &options);

        let span = tracing::info_span!(
            parent: &self.span,
            "create_anchor_request",
            stream_id = %archive.stream_id(),
            tip = %archive.tip(),
            wait_for_confirmation,
        );
        let request = self
            .poll
            .execute(CREATE_REQUEST, policy, move || async move {
                let raw = self.send(CREATE_REQUEST, url, options.clone()).await?;
                decode_anchor_request(CREATE_REQUEST, &raw).map_err(CasError::from)
            })
            .instrument(span)
            .await?;

        Ok(request.into_status_response())
    }

    /// Current status of the anchor request for `stream_id` at `tip`.
    ///
    /// Calls `GET {service_url}/api/v0/requests/{stream_id}/{tip}` once,
    /// bounded by `poll_interval`.
    pub async fn get(&self, stream_id: &StreamId, tip: &Cid) -> Result<AnchorStatusResponse, CasError> {
        let url = self
            .config
            .endpoint(&["api", "v0", "requests", stream_id.as_str(), tip.as_str()]);
        let limit = self.config.poll_interval();
        let options = RequestOptions::get()
            .with_timeout(limit)
            .with_cancel(self.token.clone());
        let policy = PollPolicy::once(&self.token).with_attempt_timeout(limit);
        let (url, options) = (&url, &options);

        let span = tracing::info_span!(
            parent: &self.span,
            "get_anchor_request",
            %stream_id,
            %tip,
        );
        let request = self
            .poll
            .execute(GET_REQUEST, policy, move || async move {
                let raw = self.send(GET_REQUEST, url, options.clone()).await?;
                decode_anchor_request(GET_REQUEST, &raw).map_err(CasError::from)
            })
            .instrument(span)
            .await?;

        Ok(request.into_status_response())
    }

    /// Stop the client.
    ///
    /// Pending `create`/`get`/`supported_chains` calls reject with
    /// [`CasError::Cancelled`] and later calls reject without touching the
    /// network. Safe to call any number of times.
    pub fn close(&self) {
        if self.token.cancel() {
            let _entered = self.span.enter();
            tracing::info!("anchor service client closed");
        }
    }

    async fn send(
        &self,
        operation: &'static str,
        url: &Url,
        options: RequestOptions,
    ) -> Result<Value, CasError> {
        self.fetch
            .fetch_json(url, options)
            .await
            .map_err(|source| CasError::Network { operation, source })
    }
}
