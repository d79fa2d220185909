//! Validation of anchor service responses.
//!
//! The service is untrusted input. Each function here takes the raw JSON a
//! transport returned and produces either a typed value or a
//! [`DecodeError`] whose message embeds the payload verbatim. Nothing in
//! this module performs I/O, so it is tested with literal payloads.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{DecodeError, SchemaViolation};
use crate::types::{AnchorRequest, AnchorRequestStatus, ChainId, Cid, StreamId};

const SUPPORTED_CHAINS_FIELD: &str = "supportedChains";
const SUPPORTED_CHAINS_PATH: &str = "/(SupportedChainsResponse)/supportedChains(supportedChains)";

// -- Supported chains ---------------------------------------------------------

/// Decode a `GET /api/v0/service-info/supported_chains` payload.
///
/// The payload must hold `supportedChains` as an array of exactly one
/// CAIP-2 chain ID. Other fields are ignored.
pub fn decode_supported_chains(raw: &Value) -> Result<Vec<ChainId>, DecodeError> {
    let failure = |cause: Option<SchemaViolation>| DecodeError::SupportedChains {
        payload: raw.to_string(),
        cause,
    };
    let invalid = |value: &Value, path: String| {
        failure(Some(SchemaViolation {
            path,
            value: value.to_string(),
        }))
    };

    let Some(field) = raw.get(SUPPORTED_CHAINS_FIELD) else {
        return Err(failure(None));
    };
    let entry = match field.as_array().map(Vec::as_slice) {
        Some([entry]) => entry,
        _ => return Err(invalid(field, SUPPORTED_CHAINS_PATH.to_string())),
    };
    let chain = entry
        .as_str()
        .and_then(|s| ChainId::new(s).ok())
        .ok_or_else(|| invalid(entry, format!("{SUPPORTED_CHAINS_PATH}/0(ChainId)")))?;

    Ok(vec![chain])
}

// -- Anchor requests ----------------------------------------------------------

/// Timestamps arrive as unix seconds; ISO 8601 strings are tolerated.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Unix(i64),
    Iso(DateTime<Utc>),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnchorRequestWire {
    #[serde(default)]
    id: Option<String>,
    status: AnchorRequestStatus,
    stream_id: StreamId,
    cid: Cid,
    message: String,
    #[serde(default)]
    created_at: Option<WireTimestamp>,
    #[serde(default)]
    updated_at: Option<WireTimestamp>,
}

/// Decode an anchor request record returned by `create` or `get`.
///
/// `status`, `streamId`, `cid`, and `message` are required; `id`,
/// `createdAt`, and `updatedAt` are optional. `operation` names the call
/// in the error message.
pub fn decode_anchor_request(
    operation: &'static str,
    raw: &Value,
) -> Result<AnchorRequest, DecodeError> {
    let failure = |reason: String| DecodeError::AnchorRequest {
        operation,
        payload: raw.to_string(),
        reason,
    };

    let wire = AnchorRequestWire::deserialize(raw).map_err(|e| failure(e.to_string()))?;
    let created_at = wire
        .created_at
        .map(|t| timestamp(t, "createdAt"))
        .transpose()
        .map_err(failure)?;
    let updated_at = wire
        .updated_at
        .map(|t| timestamp(t, "updatedAt"))
        .transpose()
        .map_err(failure)?;

    Ok(AnchorRequest {
        id: wire.id,
        stream_id: wire.stream_id,
        cid: wire.cid,
        status: wire.status,
        message: wire.message,
        created_at,
        updated_at,
    })
}

fn timestamp(t: WireTimestamp, field: &str) -> Result<DateTime<Utc>, String> {
    match t {
        WireTimestamp::Unix(secs) => DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| format!("{field} {secs} is out of range")),
        WireTimestamp::Iso(dt) => Ok(dt),
    }
}
