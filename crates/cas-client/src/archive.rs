//! Anchor request payloads.
//!
//! An anchor request body is a CAR archive holding the commit to anchor.
//! Encoding that archive is the caller's job; the client only needs the
//! stream it belongs to, the tip being anchored, and the encoded bytes.

use crate::types::{Cid, StreamId};

/// Media type of the `POST /api/v0/requests` body.
pub const CAR_CONTENT_TYPE: &str = "application/vnd.ipld.car";

/// Source of an anchor request.
pub trait AnchorArchive: Send + Sync {
    /// Stream whose tip is being anchored.
    fn stream_id(&self) -> &StreamId;

    /// Commit to anchor.
    fn tip(&self) -> &Cid;

    /// Encoded CAR archive carrying the anchor proof request.
    fn bytes(&self) -> &[u8];
}

/// An already-encoded anchor request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRequestArchive {
    stream_id: StreamId,
    tip: Cid,
    bytes: Vec<u8>,
}

impl AnchorRequestArchive {
    pub fn new(stream_id: StreamId, tip: Cid, bytes: Vec<u8>) -> Self {
        Self {
            stream_id,
            tip,
            bytes,
        }
    }
}

impl AnchorArchive for AnchorRequestArchive {
    fn stream_id(&self) -> &StreamId {
        &self.stream_id
    }

    fn tip(&self) -> &Cid {
        &self.tip
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
