//! # Error Types
//!
//! Validation errors raised when a string cannot be turned into one of the
//! typed identifiers or status values in this crate.

use thiserror::Error;

/// Validation errors for identifier newtypes and status names.
///
/// Each variant carries the rejected input so that contract drift in the
/// anchor service can be diagnosed from the error alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Stream ID is not a base36 multibase string.
    #[error("invalid stream ID: \"{0}\" (expected base36 multibase string starting with 'k')")]
    InvalidStreamId(String),

    /// CID is neither a CIDv0 nor a multibase-encoded CIDv1.
    #[error("invalid CID: \"{0}\" (expected CIDv0 'Qm...' or a multibase CIDv1)")]
    InvalidCid(String),

    /// Chain ID does not conform to CAIP-2.
    #[error("invalid chain ID: \"{0}\" (expected <namespace>:<reference>)")]
    InvalidChainId(String),

    /// Status name is not one the anchor service emits.
    #[error("unknown anchor request status: \"{0}\"")]
    UnknownStatus(String),
}
