//! # Anchor Request Status
//!
//! Lifecycle of an anchor request as reported by the anchor service.
//!
//! ```text
//! PENDING ──▶ PROCESSING ──▶ READY ──▶ COMPLETED
//!    │             │
//!    └──────┬──────┴──▶ FAILED
//!           └─────────▶ REPLACED
//! ```
//!
//! `COMPLETED`, `FAILED`, and `REPLACED` are terminal from the service's
//! point of view. The client reports whatever status it is given and never
//! waits for a terminal one.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Status of an anchor request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnchorRequestStatus {
    /// Accepted by the service, not yet picked up for a batch.
    #[serde(rename = "PENDING")]
    Pending,
    /// Included in a batch that is being built.
    #[serde(rename = "PROCESSING")]
    Processing,
    /// Batched and waiting for the anchor transaction.
    #[serde(rename = "READY")]
    Ready,
    /// Proof committed on chain.
    #[serde(rename = "COMPLETED", alias = "ANCHORED")]
    Anchored,
    /// The service gave up on this request.
    #[serde(rename = "FAILED")]
    Failed,
    /// A newer tip for the same stream superseded this request.
    #[serde(rename = "REPLACED")]
    Replaced,
}

impl AnchorRequestStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Processing,
        Self::Ready,
        Self::Anchored,
        Self::Failed,
        Self::Replaced,
    ];

    /// Wire name as emitted by the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Ready => "READY",
            Self::Anchored => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Replaced => "REPLACED",
        }
    }

    /// Whether the service will report no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Anchored | Self::Failed | Self::Replaced)
    }
}

impl std::fmt::Display for AnchorRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnchorRequestStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PROCESSING" => Ok(Self::Processing),
            "READY" => Ok(Self::Ready),
            "COMPLETED" | "ANCHORED" => Ok(Self::Anchored),
            "FAILED" => Ok(Self::Failed),
            "REPLACED" => Ok(Self::Replaced),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_parse_back() {
        for status in AnchorRequestStatus::ALL {
            assert_eq!(status.as_str().parse::<AnchorRequestStatus>().unwrap(), status);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn anchored_alias_is_accepted() {
        let s: AnchorRequestStatus = serde_json::from_str("\"ANCHORED\"").unwrap();
        assert_eq!(s, AnchorRequestStatus::Anchored);
        assert_eq!("ANCHORED".parse::<AnchorRequestStatus>().unwrap(), s);
    }

    #[test]
    fn terminal_statuses() {
        assert!(!AnchorRequestStatus::Pending.is_terminal());
        assert!(!AnchorRequestStatus::Processing.is_terminal());
        assert!(!AnchorRequestStatus::Ready.is_terminal());
        assert!(AnchorRequestStatus::Anchored.is_terminal());
        assert!(AnchorRequestStatus::Failed.is_terminal());
        assert!(AnchorRequestStatus::Replaced.is_terminal());
    }

    #[test]
    fn unknown_and_lowercase_names_rejected() {
        assert!("pending".parse::<AnchorRequestStatus>().is_err());
        assert!("DONE".parse::<AnchorRequestStatus>().is_err());
    }
}
