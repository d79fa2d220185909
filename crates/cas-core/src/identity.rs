//! # Identifier Newtypes
//!
//! Typed identifiers exchanged with the anchor service. Each identifier is
//! a distinct type; a [`Cid`] cannot be passed where a [`StreamId`] is
//! expected.
//!
//! ## Validation
//!
//! All three types validate their string encoding at construction and on
//! deserialization. Validation is syntactic: it checks the multibase prefix
//! and alphabet, not the binary structure behind it.
//!
//! ## References
//!
//! - Multibase: <https://github.com/multiformats/multibase>
//! - CID: <https://github.com/multiformats/cid>
//! - CAIP-2 chain IDs: <https://github.com/ChainAgnostic/CAIPs/blob/main/CAIPs/caip-2.md>

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const BASE58BTC: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// URL-style prefix accepted in front of a stream ID.
pub const STREAM_URL_PREFIX: &str = "ceramic://";

fn is_base36_lower(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_lowercase()
}

fn is_base58btc(c: char) -> bool {
    BASE58BTC.contains(c)
}

// ---------------------------------------------------------------------------
// StreamId
// ---------------------------------------------------------------------------

/// Identifier of a stream (a versioned document).
///
/// Canonical form is the base36 multibase string (`k` prefix). The
/// `ceramic://` URL form is accepted and normalized away.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StreamId(String);

impl StreamId {
    /// Parse a stream ID, validating its multibase form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidStreamId`] if the string is not
    /// a `k`-prefixed base36 string.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let s = raw.strip_prefix(STREAM_URL_PREFIX).unwrap_or(&raw);
        let body = match s.strip_prefix('k') {
            Some(body) if !body.is_empty() => body,
            _ => return Err(ValidationError::InvalidStreamId(raw)),
        };
        if !body.chars().all(is_base36_lower) {
            return Err(ValidationError::InvalidStreamId(raw));
        }
        Ok(Self(s.to_string()))
    }

    /// Access the canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the `ceramic://` URL form.
    pub fn to_url(&self) -> String {
        format!("{STREAM_URL_PREFIX}{}", self.0)
    }
}

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StreamId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for StreamId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StreamId> for String {
    fn from(id: StreamId) -> Self {
        id.0
    }
}

// ---------------------------------------------------------------------------
// Cid
// ---------------------------------------------------------------------------

/// Content identifier of a commit (the "tip" of a stream).
///
/// # Validation
///
/// - CIDv0: `Qm` followed by 44 base58btc characters (46 total)
/// - CIDv1: a multibase prefix followed by a non-empty body in that
///   base's alphabet. Supported prefixes: `b`/`B` (base32), `z`
///   (base58btc), `k` (base36), `f`/`F` (base16), `m` (base64),
///   `u` (base64url).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cid(String);

impl Cid {
    /// Parse a CID from its string encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCid`] for anything that is not a
    /// recognizable CIDv0 or multibase CIDv1 string.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if Self::is_valid(&s) {
            Ok(Self(s))
        } else {
            Err(ValidationError::InvalidCid(s))
        }
    }

    fn is_valid(s: &str) -> bool {
        if s.len() == 46 && s.starts_with("Qm") {
            return s.chars().all(is_base58btc);
        }
        let mut chars = s.chars();
        let Some(prefix) = chars.next() else {
            return false;
        };
        let body = chars.as_str();
        if body.is_empty() {
            return false;
        }
        let alphabet: fn(char) -> bool = match prefix {
            'b' => |c| c.is_ascii_lowercase() || ('2'..='7').contains(&c),
            'B' => |c| c.is_ascii_uppercase() || ('2'..='7').contains(&c),
            'z' => is_base58btc,
            'k' => is_base36_lower,
            'f' => |c| c.is_ascii_digit() || ('a'..='f').contains(&c),
            'F' => |c| c.is_ascii_digit() || ('A'..='F').contains(&c),
            'm' => |c| c.is_ascii_alphanumeric() || c == '+' || c == '/',
            'u' => |c| c.is_ascii_alphanumeric() || c == '-' || c == '_',
            _ => return false,
        };
        body.chars().all(alphabet)
    }

    /// Access the string encoding.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a legacy CIDv0.
    pub fn is_v0(&self) -> bool {
        self.0.len() == 46 && self.0.starts_with("Qm")
    }
}

impl std::fmt::Display for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Cid {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Cid {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Cid> for String {
    fn from(cid: Cid) -> Self {
        cid.0
    }
}

// ---------------------------------------------------------------------------
// ChainId
// ---------------------------------------------------------------------------

/// CAIP-2 blockchain identifier, e.g. `eip155:1`.
///
/// # Validation
///
/// - namespace: 3-8 characters of `[-a-z0-9]`
/// - reference: 1-32 characters of `[-_a-zA-Z0-9]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainId(String);

impl ChainId {
    /// Parse a CAIP-2 chain ID.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidChainId`] if the string is not of
    /// the form `namespace:reference`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let Some((namespace, reference)) = s.split_once(':') else {
            return Err(ValidationError::InvalidChainId(s));
        };
        let namespace_ok = (3..=8).contains(&namespace.len())
            && namespace
                .chars()
                .all(|c| c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit());
        let reference_ok = (1..=32).contains(&reference.len())
            && reference
                .chars()
                .all(|c| c == '-' || c == '_' || c.is_ascii_alphanumeric());
        if !(namespace_ok && reference_ok) {
            return Err(ValidationError::InvalidChainId(s));
        }
        Ok(Self(s))
    }

    /// Access the full `namespace:reference` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The CAIP-2 namespace (e.g. `eip155`).
    pub fn namespace(&self) -> &str {
        self.0.split_once(':').map(|(ns, _)| ns).unwrap_or(&self.0)
    }

    /// The chain reference within the namespace (e.g. `1`).
    pub fn reference(&self) -> &str {
        self.0.split_once(':').map(|(_, r)| r).unwrap_or_default()
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChainId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ChainId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChainId> for String {
    fn from(id: ChainId) -> Self {
        id.0
    }
}
