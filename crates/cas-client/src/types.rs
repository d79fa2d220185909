//! # Anchor Request Records
//!
//! Typed views of anchor service responses, plus re-exports of the
//! identifier newtypes from [`cas_core`] so consumers of this crate use
//! the same typed identifiers as the rest of the node.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use cas_core::{AnchorRequestStatus, ChainId, Cid, StreamId};

/// The service's latest knowledge of one stream's anchor request.
///
/// Only ever produced by decoding a service response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRequest {
    /// Service-side request identifier. Present on creation responses.
    pub id: Option<String>,
    pub stream_id: StreamId,
    /// Tip commit the request anchors.
    pub cid: Cid,
    pub status: AnchorRequestStatus,
    pub message: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AnchorRequest {
    /// Drop the bookkeeping fields, keeping what callers act on.
    pub fn into_status_response(self) -> AnchorStatusResponse {
        AnchorStatusResponse {
            status: self.status,
            stream_id: self.stream_id,
            cid: self.cid,
            message: self.message,
        }
    }
}

/// Result of `create` and `get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorStatusResponse {
    pub status: AnchorRequestStatus,
    pub stream_id: StreamId,
    pub cid: Cid,
    pub message: String,
}
