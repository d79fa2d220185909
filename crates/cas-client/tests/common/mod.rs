//! Shared fixtures for client tests: a scripted in-process transport that
//! records every call it receives.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cas_client::{
    AnchorRequestArchive, AnchorServiceClient, CasClientConfig, Cid, FetchJson, RequestOptions,
    StreamId, TransportError,
};
use serde_json::{json, Value};
use tokio::time::Instant;
use url::Url;

pub const ANCHOR_SERVICE_URL: &str = "http://example.com";
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const MAX_POLL_TIME: Duration = Duration::from_millis(1000);

pub const STREAM: &str = "kjzl6cwe1jw147dvq16zluojmraqvwdmbh61dx9e0c59i344lcrsgqfohexp60s";
pub const TIP: &str = "bagcqceraplay4erv6l32qrki522uhiz7rf46xccwniw7ypmvs3cvu2b3oulq";

/// What the scripted transport does on a given call.
pub enum Reply {
    Json(Value),
    Fail(&'static str),
    /// Never resolves and ignores the abort signal.
    Hang,
    /// Resolves after the delay unless the abort signal fires first.
    Delay(Duration, Value),
}

/// A recorded call.
#[derive(Debug, Clone)]
pub struct Call {
    pub url: String,
    pub options: RequestOptions,
    pub at: Instant,
}

type Script = Box<dyn Fn(usize) -> Reply + Send + Sync>;

pub struct ScriptedFetch {
    calls: Mutex<Vec<Call>>,
    script: Script,
}

impl ScriptedFetch {
    /// `script` receives the 1-based call number.
    pub fn new(script: impl Fn(usize) -> Reply + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            script: Box::new(script),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Call {
        self.calls.lock().unwrap().last().cloned().expect("no calls recorded")
    }
}

#[async_trait]
impl FetchJson for ScriptedFetch {
    async fn fetch_json(&self, url: &Url, options: RequestOptions) -> Result<Value, TransportError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(Call {
                url: url.to_string(),
                options: options.clone(),
                at: Instant::now(),
            });
            calls.len()
        };
        match (self.script)(n) {
            Reply::Json(v) => Ok(v),
            Reply::Fail(msg) => Err(TransportError::Other(msg.to_string())),
            Reply::Hang => std::future::pending().await,
            Reply::Delay(delay, v) => match options.cancel {
                Some(token) => tokio::select! {
                    _ = token.cancelled() => Err(TransportError::Aborted),
                    _ = tokio::time::sleep(delay) => Ok(v),
                },
                None => {
                    tokio::time::sleep(delay).await;
                    Ok(v)
                }
            },
        }
    }
}

pub fn config() -> CasClientConfig {
    CasClientConfig::new(ANCHOR_SERVICE_URL.parse().unwrap(), POLL_INTERVAL, MAX_POLL_TIME).unwrap()
}

pub fn client(fetch: Arc<ScriptedFetch>) -> AnchorServiceClient {
    AnchorServiceClient::new(config(), fetch)
}

pub fn stream_id() -> StreamId {
    STREAM.parse().unwrap()
}

pub fn tip() -> Cid {
    TIP.parse().unwrap()
}

pub fn archive() -> AnchorRequestArchive {
    AnchorRequestArchive::new(stream_id(), tip(), b"fake car file".to_vec())
}

/// A service answer for the fixture stream and tip.
pub fn pending_response() -> Value {
    json!({
        "id": "foo",
        "status": "PENDING",
        "streamId": STREAM,
        "cid": TIP,
        "message": "Sending anchoring request",
        "createdAt": 1_700_000_000,
        "updatedAt": 1_700_000_000,
    })
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
